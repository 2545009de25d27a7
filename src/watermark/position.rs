//! Logo placement on the canvas.
//!
//! The logo sits in the bottom-left corner, inset by a padding that grows
//! with the canvas width, and scales with the canvas height up to a cap:
//!
//! - `padding = max(20, 0.02 * W)`
//! - `height  = min(60, 0.10 * H)`
//! - `width   = height * 200 / 60`
//! - `x = padding`, `y = H - height - padding`
//!
//! Coordinates are fractional. On very narrow or very wide canvases the box
//! can extend past the canvas edge; drawing clips it.

use crate::constants::{
    LOGO_ASPECT_HEIGHT, LOGO_ASPECT_WIDTH, LOGO_HEIGHT_RATIO, LOGO_PADDING_RATIO,
    MAX_LOGO_HEIGHT, MIN_LOGO_PADDING,
};

/// Box the logo is drawn into, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl LogoPlacement {
    /// Placement for a canvas of `width` x `height` pixels.
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let canvas_width = f64::from(width);
        let canvas_height = f64::from(height);

        let padding = MIN_LOGO_PADDING.max(canvas_width * LOGO_PADDING_RATIO);
        let logo_height = MAX_LOGO_HEIGHT.min(canvas_height * LOGO_HEIGHT_RATIO);
        let logo_width = logo_height * (LOGO_ASPECT_WIDTH / LOGO_ASPECT_HEIGHT);

        Self {
            x: padding,
            y: canvas_height - logo_height - padding,
            width: logo_width,
            height: logo_height,
            padding,
        }
    }

    /// True when the whole box lies inside `[0, width] x [0, height]`.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= f64::from(width)
            && self.y + self.height <= f64::from(height)
    }
}
