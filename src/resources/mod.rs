/**
 * This module contains all logic for loading fonts and textures from external files.
 *
 * Natively, files are read from `./assets`, from the directory named by the
 * `TEXT_FLOW_ASSETS` environment variable, or from the copy the build script
 * places in `OUT_DIR`. On the web they are fetched from `<origin>/assets/`.
 */
pub mod texture;

use anyhow::Context;
use futures::future::join_all;

use crate::{
    config::AssetManifest,
    data_structures::{
        model::{Material, MatcapLibrary},
        texture::{ColorSpace, Texture},
    },
    geometry::font::Font,
    resources::texture::load_texture_or_placeholder,
};

/// Neutral grey shown in place of a matcap that failed to load.
const MISSING_MATCAP: [u8; 4] = [128, 128, 128, 255];

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().context("no browser window")?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| anyhow::anyhow!("cannot read page origin: {:?}", e))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn asset_path(file_name: &str) -> std::path::PathBuf {
    use std::path::Path;

    if let Ok(root) = std::env::var("TEXT_FLOW_ASSETS") {
        return Path::new(&root).join(file_name);
    }
    let local = Path::new("./assets");
    match option_env!("OUT_DIR") {
        Some(out_dir) if !local.exists() => Path::new(out_dir).join("assets").join(file_name),
        _ => local.join(file_name),
    }
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.error_for_status()?.text().await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = {
        let path = asset_path(file_name);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?
    };

    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url)
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = asset_path(file_name);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?
    };

    Ok(data)
}

pub async fn load_font(file_name: &str) -> anyhow::Result<Font> {
    let json = load_string(file_name).await?;
    let font =
        Font::from_json(&json).with_context(|| format!("cannot parse font {}", file_name))?;
    log::info!("loaded font {:?} from {}", font.family_name(), file_name);
    Ok(font)
}

/// Everything the demo loads before the scene can be populated.
#[derive(Debug)]
pub struct Assets {
    pub font: Font,
    pub matcaps: MatcapLibrary,
    pub background: Option<Texture>,
}

/// Loads the font and all textures concurrently.
///
/// The font is required: failing to load it is an error. Textures that fail
/// to load are logged and replaced by placeholders.
pub async fn load_assets(
    manifest: &AssetManifest,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    matcap_layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<Assets> {
    let font = load_font(&manifest.font);
    // only the main matcap is sRGB-encoded; the rest are sampled as stored
    let main = load_texture_or_placeholder(
        &manifest.main_matcap,
        MISSING_MATCAP,
        ColorSpace::Srgb,
        device,
        queue,
    );
    let pool = join_all(
        manifest
            .matcap_pool
            .iter()
            .map(|file_name| {
                load_texture_or_placeholder(
                    file_name,
                    MISSING_MATCAP,
                    ColorSpace::Linear,
                    device,
                    queue,
                )
            }),
    );
    let background = async {
        match &manifest.background {
            Some(file_name) => Some(
                load_texture_or_placeholder(
                    file_name,
                    [0, 0, 0, 255],
                    ColorSpace::Linear,
                    device,
                    queue,
                )
                .await,
            ),
            None => None,
        }
    };
    let (font, main, pool, background) = futures::join!(font, main, pool, background);

    let font = font.with_context(|| format!("cannot load font {}", manifest.font))?;
    let main = Material::new(device, &manifest.main_matcap, main, matcap_layout);
    let pool = pool
        .into_iter()
        .zip(&manifest.matcap_pool)
        .map(|(texture, name)| Material::new(device, name, texture, matcap_layout))
        .collect();

    Ok(Assets {
        font,
        matcaps: MatcapLibrary::new(main, pool),
        background,
    })
}
