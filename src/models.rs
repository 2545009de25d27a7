use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_IMAGE_MIME, DEFAULT_STYLE};

/// Where the final image is meant to be shared.
///
/// Every platform is watermarked the same way today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    Instagram,
    Facebook,
    WhatsApp,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::Facebook, Platform::WhatsApp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::WhatsApp => "WhatsApp",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown platform '{}'", value.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleParameters {
    pub camera_style: String,
    pub lighting_style: String,
}

impl Default for StyleParameters {
    fn default() -> Self {
        Self {
            camera_style: DEFAULT_STYLE.to_string(),
            lighting_style: DEFAULT_STYLE.to_string(),
        }
    }
}

impl StyleParameters {
    pub fn new(camera_style: impl Into<String>, lighting_style: impl Into<String>) -> Self {
        Self {
            camera_style: camera_style.into(),
            lighting_style: lighting_style.into(),
        }
    }

    /// Camera style to mention in the prompt, `None` for the default.
    pub fn camera(&self) -> Option<&str> {
        non_default_style(&self.camera_style)
    }

    /// Lighting style to mention in the prompt, `None` for the default.
    pub fn lighting(&self) -> Option<&str> {
        non_default_style(&self.lighting_style)
    }
}

fn non_default_style(style: &str) -> Option<&str> {
    let trimmed = style.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(DEFAULT_STYLE) {
        None
    } else {
        Some(trimmed)
    }
}

/// One uploaded image, still in its original encoding.
#[derive(Clone, PartialEq, Eq)]
pub struct InputImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl InputImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        let mime_type = mime_type.into();
        let mime_type = if mime_type.trim().is_empty() {
            DEFAULT_IMAGE_MIME.to_string()
        } else {
            mime_type.trim().to_string()
        };
        Self { mime_type, data }
    }
}

impl fmt::Debug for InputImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub images: Vec<InputImage>,
    pub styles: StyleParameters,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, images: Vec<InputImage>, styles: StyleParameters) -> Self {
        Self {
            prompt: prompt.into(),
            images,
            styles,
        }
    }
}

/// Image returned by the generation service, exactly as it was sent.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for GeneratedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parsing_is_case_insensitive() {
        assert_eq!("instagram".parse::<Platform>(), Ok(Platform::Instagram));
        assert_eq!(" FACEBOOK ".parse::<Platform>(), Ok(Platform::Facebook));
        assert_eq!("whatsapp".parse::<Platform>(), Ok(Platform::WhatsApp));
        assert!("tiktok".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_display_round_trips() {
        for platform in Platform::ALL {
            assert_eq!(platform.to_string().parse::<Platform>(), Ok(platform));
        }
        assert_eq!(Platform::default(), Platform::Instagram);
    }

    #[test]
    fn test_default_styles_are_omitted() {
        let styles = StyleParameters::default();
        assert_eq!(styles.camera(), None);
        assert_eq!(styles.lighting(), None);

        let styles = StyleParameters::new("  ", "DEFAULT");
        assert_eq!(styles.camera(), None);
        assert_eq!(styles.lighting(), None);
    }

    #[test]
    fn test_custom_styles_are_trimmed() {
        let styles = StyleParameters::new(" Wide ", "Golden Hour");
        assert_eq!(styles.camera(), Some("Wide"));
        assert_eq!(styles.lighting(), Some("Golden Hour"));
    }

    #[test]
    fn test_styles_deserialize_from_camel_case() {
        let styles: StyleParameters = serde_json::from_str(
            r#"{ "cameraStyle": "Dolly Shot", "lightingStyle": "default" }"#,
        )
        .unwrap();
        assert_eq!(styles.camera(), Some("Dolly Shot"));
        assert_eq!(styles.lighting(), None);

        let platform: Platform = serde_json::from_str(r#""WhatsApp""#).unwrap();
        assert_eq!(platform, Platform::WhatsApp);
    }

    #[test]
    fn test_input_image_defaults_blank_mime() {
        let image = InputImage::new("", vec![1, 2, 3]);
        assert_eq!(image.mime_type, DEFAULT_IMAGE_MIME);
        assert_eq!(format!("{:?}", image), "InputImage { mime_type: \"image/png\", bytes: 3 }");
    }
}
