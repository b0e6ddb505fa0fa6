//! Application event loop.
//!
//! [`run`] opens a window and drives the demo with winit's
//! [`ApplicationHandler`]:
//!
//! 1. On `resumed`, create the window and GPU context, load the assets and
//!    populate the stage. Natively this blocks on a tokio runtime; on the web
//!    it runs with `spawn_local` and reports back through a user event.
//! 2. Route input to the orbit controls and resizes to the viewport.
//! 3. On `RedrawRequested`, animate the stage, upload instance and camera
//!    data, render, present and request the next frame.

use std::{fmt::Debug, iter, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::SceneConfig,
    context::Context,
    data_structures::model::MatcapLibrary,
    pipelines::background::Background,
    render::{LabelBatches, Render},
    resources::load_assets,
    stage::Stage,
    viewport::Viewport,
};

/// Everything that exists once initialization succeeded.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    stage: Stage,
    matcaps: MatcapLibrary,
    background: Option<Background>,
    labels: LabelBatches,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: SceneConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let viewport = Viewport::from_physical(size.width, size.height, window.scale_factor());
        let mut stage = Stage::new(&config, viewport);

        let [r, g, b, a] = config.clear_colour;
        let ctx = Context::new(
            window,
            surface_size(&viewport, size.width, size.height),
            wgpu::Color { r, g, b, a },
        )
        .await?;

        let assets = load_assets(
            &config.assets,
            &ctx.device,
            &ctx.queue,
            &ctx.pipelines.texture_layout,
        )
        .await?;

        let shape = stage.populate(
            &assets.font,
            &assets.matcaps.pool_ids(),
            &mut rand::thread_rng(),
        )?;
        let labels = LabelBatches::new(&ctx.device, shape, &stage.scene);
        let background = assets
            .background
            .map(|texture| Background::new(&ctx.device, texture, &ctx.pipelines.texture_layout));

        Ok(Self {
            ctx,
            stage,
            matcaps: assets.matcaps,
            background,
            labels,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        let scale_factor = self.ctx.window.scale_factor();
        if self.stage.resize(width, height, scale_factor) {
            let (width, height) = surface_size(&self.stage.viewport, width, height);
            self.ctx.resize(width, height);
            self.is_surface_configured = true;
        }
    }

    /// Animates the stage and uploads everything the next frame reads.
    fn update(&mut self) {
        self.stage.frame();
        self.labels
            .write_to_buffer(&self.ctx.device, &self.ctx.queue, &self.stage.scene);
        if let Some(camera) = self.stage.camera() {
            self.ctx.camera.write(&self.ctx.queue, camera);
        }
    }

    fn render(&self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let render = Render::Composed(vec![
                self.background
                    .as_ref()
                    .map_or(Render::None, Render::Background),
                self.labels.render(&self.matcaps),
            ]);
            render.draw(&self.ctx, &mut render_pass);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Pixel size of the render surface for a window of `width` x `height`
/// physical pixels.
///
/// On the web the canvas backing store follows the capped pixel ratio.
/// Native surfaces must match the window, so they keep its physical size.
fn surface_size(viewport: &Viewport, width: u32, height: u32) -> (u32, u32) {
    if cfg!(target_arch = "wasm32") {
        viewport.surface_size()
    } else {
        (width.max(1), height.max(1))
    }
}

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(Box<AppState>),
    #[allow(dead_code)]
    Failed(anyhow::Error),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
            Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    // taken on the first `resumed`
    config: Option<SceneConfig>,
    state: Option<AppState>,
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, config: SceneConfig) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config: Some(config),
            state: None,
            failure: None,
        })
    }

    fn start(&mut self, mut state: AppState) {
        let size = state.ctx.window.inner_size();
        state.resize(size.width, size.height);
        state.ctx.window.request_redraw();
        log::info!("scene ready with {} labels", state.labels.instance_count());
        self.state = Some(state);
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("initialization failed: {:#}", error);
        self.failure = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.config.take() else {
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(config.label.clone());

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(CANVAS_ID));
            match canvas {
                Some(canvas) => {
                    window_attributes = window_attributes.with_canvas(Some(canvas.unchecked_into()));
                }
                None => log::warn!("no element with id {:?}, using a new canvas", CANVAS_ID),
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let init_future = AppState::new(window, config);

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok(state) => self.start(state),
                Err(e) => self.fail(event_loop, e),
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let event = match init_future.await {
                    Ok(state) => FlowEvent::Initialized(Box::new(state)),
                    Err(e) => FlowEvent::Failed(e),
                };
                if proxy.send_event(event).is_err() {
                    log::error!("event loop closed before initialization finished");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            // This is the message from our wasm `spawn_local`
            FlowEvent::Initialized(state) => self.start(*state),
            FlowEvent::Failed(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.stage.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                state.update();
                match state.render() {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Opens the window and runs the demo until it is closed.
///
/// Returns the initialization error if the scene could not be set up, for
/// example when the font is missing.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            eprintln!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {}", e).into());
        }
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;

    let mut app = App::new(&event_loop, config)?;

    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
