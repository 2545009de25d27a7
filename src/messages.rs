//! User-facing text for every classified failure.

use std::str::FromStr;

use crate::error::{GenerationError, StoryError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    English,
    Arabic,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "ar" | "arabic" => Ok(Locale::Arabic),
            other => Err(format!("unsupported locale '{}'", other)),
        }
    }
}

struct Catalog {
    validation: &'static str,
    blocked: &'static str,
    failed: &'static str,
    text_response: &'static str,
    service: &'static str,
    watermark: &'static str,
}

const ENGLISH: Catalog = Catalog {
    validation: "Please write a description and attach at least one image.",
    blocked: "The request was blocked by content policy. Please change the description or use a different image.",
    failed: "The AI failed to create the image. Try again with a different description.",
    text_response: "text response",
    service: "The image service could not complete the request",
    watermark: "Could not add the watermark to the generated image",
};

const ARABIC: Catalog = Catalog {
    validation: "يرجى كتابة وصف وإرفاق صورة واحدة على الأقل.",
    blocked: "تم حظر الطلب بسبب سياسات المحتوى. يرجى تعديل الوصف أو استخدام صورة مختلفة.",
    failed: "فشل الذكاء الاصطناعي في إنشاء الصورة. حاول مرة أخرى بوصف مختلف.",
    text_response: "الرد النصي",
    service: "تعذر على خدمة الصور إكمال الطلب",
    watermark: "تعذر إضافة العلامة المائية إلى الصورة",
};

impl Locale {
    fn catalog(self) -> &'static Catalog {
        match self {
            Locale::English => &ENGLISH,
            Locale::Arabic => &ARABIC,
        }
    }

    pub fn validation_message(self) -> &'static str {
        self.catalog().validation
    }
}

/// Message shown to the user for `err`.
pub fn user_message(err: &StoryError, locale: Locale) -> String {
    let catalog = locale.catalog();
    match err {
        StoryError::Generation(err) => generation_message(err, catalog),
        StoryError::Watermark(err) => format!("{}: {}", catalog.watermark, err),
    }
}

fn generation_message(err: &GenerationError, catalog: &Catalog) -> String {
    match err {
        GenerationError::Validation(_) => catalog.validation.to_string(),
        GenerationError::ContentBlocked { text, .. } => with_text(catalog.blocked, text, catalog),
        GenerationError::GenerationFailed { text } => with_text(catalog.failed, text, catalog),
        GenerationError::Service(detail) | GenerationError::Encoding(detail) => {
            format!("{}: {}", catalog.service, detail)
        }
    }
}

fn with_text(message: &str, text: &Option<String>, catalog: &Catalog) -> String {
    match text {
        Some(text) => format!("{} ({}: {})", message, catalog.text_response, text),
        None => message.to_string(),
    }
}
