//! Logo watermark compositor.
//!
//! Draws the embedded SVG logo into the bottom-left corner of a generated
//! image and re-encodes the result as PNG.
//!
//! The base image and the logo are decoded as two independent blocking
//! tasks. Drawing starts only after both have finished, whichever finishes
//! first. The surface is exactly the size of the base image; it is never
//! scaled.
//!
//! # Example
//!
//! ```ignore
//! use story_gen::models::Platform;
//! use story_gen::watermark::apply_watermark;
//!
//! let png = apply_watermark(generated.bytes, Platform::Instagram).await?;
//! ```

mod error;
pub mod position;

pub use error::WatermarkError;
pub use position::LogoPlacement;

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::{ColorU8, Pixmap, Transform};
use resvg::usvg;

use crate::constants::{LOGO_FONTS, LOGO_FONT_FAMILY, LOGO_SVG};
use crate::models::Platform;

/// Overlays the logo onto `image` and returns the PNG-encoded result.
///
/// `platform` is accepted for per-platform sizing; every platform is
/// currently drawn the same way.
pub async fn apply_watermark(image: Vec<u8>, platform: Platform) -> Result<Vec<u8>, WatermarkError> {
    tracing::debug!(platform = %platform, bytes = image.len(), "Applying watermark");

    let (base, logo) = tokio::try_join!(decode_base_image(image), decode_logo())?;

    let output = tokio::task::spawn_blocking(move || {
        let canvas = composite(&base, &logo)?;
        encode_png(canvas)
    })
    .await
    .map_err(|err| WatermarkError::Task(err.to_string()))??;

    tracing::debug!(platform = %platform, bytes = output.len(), "Watermark applied");
    Ok(output)
}

async fn decode_base_image(bytes: Vec<u8>) -> Result<RgbaImage, WatermarkError> {
    tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes)
            .map(|decoded| decoded.to_rgba8())
            .map_err(|err| WatermarkError::decode("base image", err))
    })
    .await
    .map_err(|err| WatermarkError::Task(err.to_string()))?
}

async fn decode_logo() -> Result<usvg::Tree, WatermarkError> {
    tokio::task::spawn_blocking(|| parse_svg(LOGO_SVG))
        .await
        .map_err(|err| WatermarkError::Task(err.to_string()))?
}

/// Parses the logo against the embedded fonts only. A tree with nothing to
/// draw is a decode failure, never an invisible watermark.
fn parse_svg(data: &[u8]) -> Result<usvg::Tree, WatermarkError> {
    let mut options = usvg::Options {
        font_family: LOGO_FONT_FAMILY.to_string(),
        ..usvg::Options::default()
    };
    let fontdb = options.fontdb_mut();
    for font in LOGO_FONTS {
        fontdb.load_font_data(font.to_vec());
    }
    fontdb.set_sans_serif_family(LOGO_FONT_FAMILY);

    let tree =
        usvg::Tree::from_data(data, &options).map_err(|err| WatermarkError::decode("logo", err))?;
    if tree.root().children().is_empty() {
        return Err(WatermarkError::decode("logo", "nothing drawable after parsing"));
    }
    Ok(tree)
}

/// Draws `logo` onto a copy of `base` at the placement for its size.
pub fn composite(base: &RgbaImage, logo: &usvg::Tree) -> Result<RgbaImage, WatermarkError> {
    let (width, height) = base.dimensions();
    let mut surface = Pixmap::new(width, height).ok_or(WatermarkError::Surface { width, height })?;

    for (target, source) in surface.pixels_mut().iter_mut().zip(base.pixels()) {
        let [r, g, b, a] = source.0;
        *target = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    let placement = LogoPlacement::for_canvas(width, height);
    let logo_size = logo.size();
    let transform = Transform::from_row(
        (placement.width / f64::from(logo_size.width())) as f32,
        0.0,
        0.0,
        (placement.height / f64::from(logo_size.height())) as f32,
        placement.x as f32,
        placement.y as f32,
    );
    resvg::render(logo, transform, &mut surface.as_mut());

    let mut canvas = RgbaImage::new(width, height);
    for (target, source) in canvas.pixels_mut().zip(surface.pixels()) {
        let color = source.demultiply();
        *target = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }

    Ok(canvas)
}

fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>, WatermarkError> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|err| WatermarkError::Encode(err.to_string()))?;
    Ok(buffer.into_inner())
}
