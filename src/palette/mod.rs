//! Dominant color extraction for sprite images.
//!
//! Extraction is best-effort: every failure path (undecodable bytes, a fully
//! transparent image, a panicked worker) ends in [`Color::SURFACE`] rather
//! than an error.

mod color;
mod quantizer;

pub use color::Color;
pub use quantizer::{build_palette, Swatch};

use image::DynamicImage;
use tokio::task::JoinHandle;

/// Maximum number of swatches kept by the quantizer.
pub const MAX_COLORS: usize = 16;

/// Pick a representative color for `image`.
///
/// The most populous swatch that is not near-black or near-white wins. When
/// every swatch looks like background, the most populous swatch overall is
/// used. Returns `None` when the image has no opaque pixels.
pub fn extract_dominant_color(image: &DynamicImage) -> Option<Color> {
    let palette = build_palette(image, MAX_COLORS);

    palette
        .iter()
        .filter(|swatch| !swatch.is_background())
        .max_by_key(|swatch| swatch.population)
        .or_else(|| palette.iter().max_by_key(|swatch| swatch.population))
        .map(|swatch| swatch.color)
}

/// Decode `bytes` and extract its dominant color, falling back to
/// [`Color::SURFACE`] on any failure.
pub fn dominant_color_from_bytes(bytes: &[u8]) -> Color {
    match image::load_from_memory(bytes) {
        Ok(image) => extract_dominant_color(&image).unwrap_or_else(|| {
            tracing::debug!("No opaque pixels to extract a color from");
            Color::SURFACE
        }),
        Err(e) => {
            tracing::debug!(error = %e, "Sprite decode failed");
            Color::SURFACE
        }
    }
}

/// Decode and extract on the blocking pool.
pub async fn dominant_color(bytes: Vec<u8>) -> Color {
    tokio::task::spawn_blocking(move || dominant_color_from_bytes(&bytes))
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Color extraction task failed");
            Color::SURFACE
        })
}

/// Callback form of [`dominant_color`]: `on_finish` receives the color once
/// extraction completes. Must be called from within a tokio runtime.
pub fn calculate_dominant_color<F>(bytes: Vec<u8>, on_finish: F) -> JoinHandle<()>
where
    F: FnOnce(Color) + Send + 'static,
{
    tokio::spawn(async move {
        on_finish(dominant_color(bytes).await);
    })
}
