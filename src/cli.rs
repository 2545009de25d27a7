//! CLI parser
use std::path::PathBuf;

use clap::Parser;

use crate::config::ClientConfig;
use crate::constants::{CAMERA_STYLES, DEFAULT_STYLE, LIGHTING_STYLES};
use crate::error::ConfigError;
use crate::messages::Locale;
use crate::models::{Platform, StyleParameters};

#[derive(Parser, Debug)]
#[clap(
    name = "story-gen",
    about = "Re-imagines photos with an AI image model and stamps the logo on the result",
    after_help = style_catalogue_help()
)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, short)]
    /// Theme the images should be re-imagined with.
    pub prompt: String,

    #[clap(long = "image", short, required = true)]
    /// Source image, repeat for several. Order is kept.
    pub images: Vec<PathBuf>,

    #[clap(long, default_value = DEFAULT_STYLE)]
    /// Camera style, free text or one of the suggestions below; `default`
    /// leaves it to the model.
    pub camera_style: String,

    #[clap(long, default_value = DEFAULT_STYLE)]
    /// Lighting style, free text or one of the suggestions below; `default`
    /// leaves it to the model.
    pub lighting_style: String,

    #[clap(long, default_value = "instagram")]
    /// Target platform: instagram, facebook or whatsapp.
    pub platform: Platform,

    #[clap(long, short, default_value = ".")]
    /// Directory the final PNG is written to.
    pub out_dir: PathBuf,

    #[clap(long, default_value = "en")]
    /// Language of error messages: `en` or `ar`.
    pub locale: Locale,

    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    /// Gemini API key. Env: GEMINI_API_KEY, falling back to API_KEY.
    pub api_key: Option<String>,

    #[clap(long, env = "GEMINI_MODEL")]
    /// Image model id. Env: GEMINI_MODEL
    pub model: Option<String>,

    #[clap(long, env = "GEMINI_ENDPOINT")]
    /// Base URL of the models API. Env: GEMINI_ENDPOINT
    pub endpoint: Option<String>,

    #[clap(long, help = "Enable debug logging", env = "STORY_GEN_DEBUG")]
    /// Enable debug logging. Env: STORY_GEN_DEBUG
    pub debug: bool,
}

/// Lists the suggested styles, skipping the `default` sentinel.
fn style_catalogue_help() -> String {
    let suggestions = |styles: &[&str]| {
        styles
            .iter()
            .filter(|style| **style != DEFAULT_STYLE)
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Suggested camera styles: {}\nSuggested lighting styles: {}",
        suggestions(&CAMERA_STYLES),
        suggestions(&LIGHTING_STYLES)
    )
}

impl CliOptions {
    pub fn styles(&self) -> StyleParameters {
        StyleParameters::new(self.camera_style.clone(), self.lighting_style.clone())
    }

    /// Flag values win over the environment.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let config = match self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        {
            Some(key) => ClientConfig::new(key),
            None => ClientConfig::from_env()?,
        };

        let config = match &self.model {
            Some(model) => config.with_model(model.clone()),
            None => config,
        };
        Ok(match &self.endpoint {
            Some(endpoint) => config.with_endpoint(endpoint.clone()),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::try_parse_from(std::iter::once("story-gen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["--prompt", "a castle", "--image", "a.png", "--api-key", "k"]);
        assert_eq!(cli.platform, Platform::Instagram);
        assert_eq!(cli.locale, Locale::English);
        assert_eq!(cli.styles(), StyleParameters::default());
        assert_eq!(cli.out_dir, PathBuf::from("."));
    }

    #[test]
    fn test_repeated_images_keep_order() {
        let cli = parse(&[
            "-p", "x", "-i", "b.png", "-i", "a.jpg", "--image", "c.webp", "--api-key", "k",
        ]);
        assert_eq!(
            cli.images,
            vec![PathBuf::from("b.png"), PathBuf::from("a.jpg"), PathBuf::from("c.webp")]
        );
    }

    #[test]
    fn test_platform_and_locale_parse() {
        let cli = parse(&[
            "-p", "x", "-i", "a.png", "--platform", "WhatsApp", "--locale", "ar", "--api-key", "k",
        ]);
        assert_eq!(cli.platform, Platform::WhatsApp);
        assert_eq!(cli.locale, Locale::Arabic);
    }

    #[test]
    fn test_styles_accept_free_text() {
        let cli = parse(&[
            "-p", "x", "-i", "a.png", "--camera-style", "Fisheye", "--lighting-style",
            "Golden Hour", "--api-key", "k",
        ]);
        assert_eq!(cli.styles(), StyleParameters::new("Fisheye", "Golden Hour"));
        assert_eq!(cli.styles().camera(), Some("Fisheye"));
    }

    #[test]
    fn test_help_lists_style_suggestions() {
        let help = CliOptions::command().render_long_help().to_string();
        assert!(help.contains("Dolly Shot"));
        assert!(help.contains("Golden Hour"));
    }

    #[test]
    fn test_image_is_required() {
        let result = CliOptions::try_parse_from(["story-gen", "--prompt", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        let result = CliOptions::try_parse_from([
            "story-gen", "-p", "x", "-i", "a.png", "--platform", "myspace",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_client_config_applies_flags() {
        let cli = parse(&[
            "-p",
            "x",
            "-i",
            "a.png",
            "--api-key",
            " key ",
            "--model",
            "models/custom-image",
            "--endpoint",
            "http://localhost:9999/",
        ]);
        let config = cli.client_config().unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.model, "custom-image");
        assert_eq!(config.endpoint, "http://localhost:9999");
    }
}
