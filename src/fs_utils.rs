use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use llmapi::utils::detect_mime_type;
use tokio::fs;
use tokio::fs::try_exists;

use crate::constants::OUTPUT_FILE_PREFIX;
use crate::models::InputImage;

/// Reads an uploaded image; the MIME type comes from the file extension.
pub async fn load_input_image(path: &Path) -> Result<InputImage> {
    let data = fs::read(path)
        .await
        .with_context(|| format!("Unable to read image '{}'", path.display()))?;
    Ok(InputImage::new(detect_mime_type(path), data))
}

/// Reads every path concurrently, keeping the given order.
pub async fn load_input_images(paths: &[PathBuf]) -> Result<Vec<InputImage>> {
    let reads = paths.iter().map(|path| load_input_image(path));
    futures::future::try_join_all(reads).await
}

/// Returns `original` if free in `dir`, otherwise the first free `stem-N.ext`.
pub async fn ensure_unique_file_name(dir: &Path, original: &str) -> Result<String> {
    if !exists(&dir.join(original)).await? {
        return Ok(original.to_string());
    }

    let original_path = Path::new(original);
    let stem = original_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(OUTPUT_FILE_PREFIX);
    let extension = original_path.extension().and_then(|ext| ext.to_str());

    let mut counter = 1;
    loop {
        let candidate = match extension {
            Some(ext) => format!("{stem}-{counter}.{ext}"),
            None => format!("{stem}-{counter}"),
        };

        if !exists(&dir.join(&candidate)).await? {
            return Ok(candidate);
        }

        counter += 1;
    }
}

/// Writes the final PNG into `dir` (created if missing) and returns its path.
pub async fn write_output_image(dir: &Path, png: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Unable to create directory '{}'", dir.display()))?;

    let base_name = format!("{}-{}.png", OUTPUT_FILE_PREFIX, unix_millis());
    let unique_name = ensure_unique_file_name(dir, &base_name).await?;
    let target = dir.join(unique_name);

    fs::write(&target, png)
        .await
        .with_context(|| format!("Unable to persist generated image '{}'", target.display()))?;
    Ok(target)
}

async fn exists(path: &Path) -> Result<bool> {
    try_exists(path)
        .await
        .with_context(|| format!("Failed to check '{}'", path.display()))
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_input_image_guesses_mime() {
        let dir = TempDir::new().unwrap();
        let jpeg = dir.path().join("photo.jpg");
        let unknown = dir.path().join("photo.blob");
        std::fs::write(&jpeg, [1, 2, 3]).unwrap();
        std::fs::write(&unknown, [4]).unwrap();

        let image = load_input_image(&jpeg).await.unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, vec![1, 2, 3]);

        let image = load_input_image(&unknown).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_load_input_images_keeps_order() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..4u8)
            .map(|index| {
                let path = dir.path().join(format!("{index}.png"));
                std::fs::write(&path, [index]).unwrap();
                path
            })
            .collect();

        let images = load_input_images(&paths).await.unwrap();
        let firsts: Vec<u8> = images.iter().map(|image| image.data[0]).collect();
        assert_eq!(firsts, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_missing_input_names_the_path() {
        let err = load_input_image(Path::new("/definitely/missing.png"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/definitely/missing.png"));
    }

    #[tokio::test]
    async fn test_unique_file_name_adds_counter() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            ensure_unique_file_name(dir.path(), "story-1.png").await.unwrap(),
            "story-1.png"
        );

        std::fs::write(dir.path().join("story-1.png"), b"x").unwrap();
        std::fs::write(dir.path().join("story-1-1.png"), b"x").unwrap();
        assert_eq!(
            ensure_unique_file_name(dir.path(), "story-1.png").await.unwrap(),
            "story-1-2.png"
        );
    }

    #[tokio::test]
    async fn test_write_output_image_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        let first = write_output_image(&nested, b"png").await.unwrap();
        let second = write_output_image(&nested, b"png").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"png");
        let name = first.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("story-") && name.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_output_directory_holds_only_the_image() {
        let dir = TempDir::new().unwrap();
        let written = write_output_image(dir.path(), b"png").await.unwrap();

        let entries: Vec<PathBuf> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(entries, vec![written]);
    }
}
