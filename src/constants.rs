pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const MODEL_ENV_VAR: &str = "GEMINI_MODEL";
pub const ENDPOINT_ENV_VAR: &str = "GEMINI_ENDPOINT";

/// Style value meaning "leave the style up to the model".
pub const DEFAULT_STYLE: &str = "default";

pub const CAMERA_STYLES: [&str; 7] = [
    DEFAULT_STYLE,
    "Close-up",
    "Medium",
    "Wide",
    "Low Angle",
    "High Angle",
    "Dolly Shot",
];

pub const LIGHTING_STYLES: [&str; 7] = [
    DEFAULT_STYLE,
    "Cinematic",
    "Soft",
    "Hard",
    "Night",
    "Daylight",
    "Golden Hour",
];

pub const FINAL_IMAGE_DIRECTIVE: &str = "Output only the final image, with no accompanying text.";

pub const LOGO_SVG: &[u8] = include_bytes!("../assets/logo.svg");
/// Faces the logo text is shaped with; no system fonts are consulted.
pub const LOGO_FONTS: [&[u8]; 2] = [
    include_bytes!("../assets/fonts/DejaVuSans.ttf"),
    include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf"),
];
pub const LOGO_FONT_FAMILY: &str = "DejaVu Sans";
/// Native logo size; the drawn box always keeps this ratio.
pub const LOGO_ASPECT_WIDTH: f64 = 200.0;
pub const LOGO_ASPECT_HEIGHT: f64 = 60.0;
pub const MIN_LOGO_PADDING: f64 = 20.0;
pub const LOGO_PADDING_RATIO: f64 = 0.02;
pub const MAX_LOGO_HEIGHT: f64 = 60.0;
pub const LOGO_HEIGHT_RATIO: f64 = 0.10;

pub const OUTPUT_FILE_PREFIX: &str = "story";
