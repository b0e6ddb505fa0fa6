//! Window size bookkeeping.
//!
//! winit reports physical pixels and a scale factor. The scene works in
//! logical units; the surface is rendered at `logical * pixel_ratio` pixels,
//! with the pixel ratio capped so high-density displays don't pay for more
//! than twice the logical resolution.

pub const MAX_PIXEL_RATIO: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    logical_width: f64,
    logical_height: f64,
    scale_factor: f64,
    pixel_ratio: f64,
}

impl Viewport {
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let mut viewport = Self {
            logical_width: 1.0,
            logical_height: 1.0,
            scale_factor: 1.0,
            pixel_ratio: 1.0,
        };
        viewport.resize(width, height, scale_factor);
        viewport
    }

    /// Updates the viewport from a physical size. Zero-sized windows (e.g.
    /// minimized ones) are ignored and `false` is returned.
    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        self.logical_width = width as f64 / scale_factor;
        self.logical_height = height as f64 / scale_factor;
        self.scale_factor = scale_factor;
        self.pixel_ratio = scale_factor.min(MAX_PIXEL_RATIO);
        true
    }

    pub fn logical_size(&self) -> (f64, f64) {
        (self.logical_width, self.logical_height)
    }

    /// Size of the window in physical pixels, as winit reports it.
    pub fn physical_size(&self) -> (f64, f64) {
        (
            self.logical_width * self.scale_factor,
            self.logical_height * self.scale_factor,
        )
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        (self.logical_width / self.logical_height) as f32
    }

    /// Size of the render surface in pixels, at least 1×1.
    pub fn surface_size(&self) -> (u32, u32) {
        let width = (self.logical_width * self.pixel_ratio).round() as u32;
        let height = (self.logical_height * self.pixel_ratio).round() as u32;
        (width.max(1), height.max(1))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_physical(1, 1, 1.0)
    }
}
