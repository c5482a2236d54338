use crate::{
    config::StorageConfig,
    error::{GenError, Result},
    models::{format_timestamp, ImageMetadata, StoredImage},
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Filename prefix for every generated image and its sidecar.
pub const FILE_PREFIX: &str = "imagen";

/// Length cap on the prompt slug embedded in filenames.
const SLUG_LEN: usize = 30;

/// File-backed store for generated images: one flat directory of PNG files
/// named `imagen-<promptSlug>-<epochMillis>.png`, each with a JSON sidecar
/// carrying the metadata the filename cannot.
#[derive(Clone)]
pub struct ImageStore {
    output_dir: PathBuf,
    public_prefix: String,
}

/// Sanitized, length-capped slug of a prompt for use in filenames.
pub fn prompt_slug(prompt: &str) -> String {
    prompt
        .chars()
        .take(SLUG_LEN)
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

impl ImageStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            output_dir: config.output_dir(),
            public_prefix: config.public_prefix().trim_end_matches('/').to_string(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Decodes the base64 payload and persists it with a sidecar metadata
    /// record, returning the public URL of the stored file.
    pub async fn save(
        &self,
        base64_data: &str,
        prompt: &str,
        styles: &[String],
        aspect_ratio: &str,
    ) -> Result<String> {
        let bytes = BASE64.decode(base64_data).map_err(|e| {
            log::error!("Failed to decode base64 image: {}", e);
            GenError::NoImageData
        })?;

        fs::create_dir_all(&self.output_dir).await?;

        let timestamp = Utc::now().timestamp_millis();
        let filename = format!("{}-{}-{}.png", FILE_PREFIX, prompt_slug(prompt), timestamp);
        let filepath = self.output_dir.join(&filename);

        fs::write(&filepath, &bytes).await?;

        let metadata = ImageMetadata {
            id: timestamp.to_string(),
            prompt: prompt.to_string(),
            styles: styles.to_vec(),
            aspect_ratio: aspect_ratio.to_string(),
            timestamp,
        };
        let sidecar = filepath.with_extension("json");
        let json = serde_json::to_vec_pretty(&metadata)
            .map_err(|e| GenError::SerializationError(e.to_string()))?;
        fs::write(&sidecar, json).await?;

        log::info!("Saved image to {}", filepath.display());

        Ok(format!("{}/{}", self.public_prefix, filename))
    }

    /// Lists all stored images, newest first. Metadata comes from the sidecar
    /// when present and is otherwise reconstructed from the filename.
    pub async fn list(&self) -> Result<Vec<StoredImage>> {
        let mut images = Vec::new();

        let mut entries = match fs::read_dir(&self.output_dir).await {
            Ok(entries) => entries,
            // Nothing generated yet.
            Err(_) => return Ok(images),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| GenError::StorageError(e.to_string()))?
        {
            let filename = entry.file_name().to_string_lossy().to_string();
            if !filename.starts_with(&format!("{}-", FILE_PREFIX)) || !filename.ends_with(".png") {
                continue;
            }

            let url = format!("{}/{}", self.public_prefix, filename);

            if let Some(metadata) = self.read_sidecar(&entry.path()).await {
                images.push(StoredImage {
                    id: metadata.id,
                    url,
                    prompt: metadata.prompt,
                    styles: metadata.styles,
                    aspect_ratio: Some(metadata.aspect_ratio),
                    timestamp: format_timestamp(metadata.timestamp),
                });
            } else if let Some((prompt, timestamp)) = parse_filename(&filename) {
                images.push(StoredImage {
                    id: timestamp.to_string(),
                    url,
                    prompt,
                    styles: Vec::new(),
                    aspect_ratio: None,
                    timestamp: format_timestamp(timestamp),
                });
            } else {
                log::warn!("Skipping unparseable generated file: {}", filename);
            }
        }

        images.sort_by(|a, b| {
            let a_ts = a.id.parse::<i64>().unwrap_or(0);
            let b_ts = b.id.parse::<i64>().unwrap_or(0);
            b_ts.cmp(&a_ts)
        });

        Ok(images)
    }

    /// Deletes one stored image by its public URL. Anything outside the
    /// public prefix is rejected before the filesystem is touched.
    pub async fn delete_one(&self, filename: &str) -> Result<()> {
        if filename.is_empty() {
            return Err(GenError::InvalidInput("Filename is required".into()));
        }

        let prefix = format!("{}/", self.public_prefix);
        let basename = filename
            .strip_prefix(&prefix)
            .ok_or_else(|| GenError::InvalidInput("Invalid filename".into()))?;

        // Single flat directory; no nested paths are ever produced.
        if basename.is_empty() || basename.contains('/') || basename.contains("..") {
            return Err(GenError::InvalidInput("Invalid filename".into()));
        }

        let filepath = self.output_dir.join(basename);
        fs::remove_file(&filepath).await?;

        let sidecar = filepath.with_extension("json");
        if fs::try_exists(&sidecar).await.unwrap_or(false) {
            fs::remove_file(&sidecar).await?;
        }

        log::info!("Deleted {}", filepath.display());
        Ok(())
    }

    /// Deletes every recognized generated file. An absent directory is a
    /// successful no-op.
    pub async fn delete_all(&self) -> Result<()> {
        let mut entries = match fs::read_dir(&self.output_dir).await {
            Ok(entries) => entries,
            Err(_) => return Ok(()),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| GenError::StorageError(e.to_string()))?
        {
            let filename = entry.file_name().to_string_lossy().to_string();
            if filename.starts_with(&format!("{}-", FILE_PREFIX)) {
                fs::remove_file(entry.path()).await?;
            }
        }

        log::info!("Deleted all generated images");
        Ok(())
    }

    async fn read_sidecar(&self, png_path: &Path) -> Option<ImageMetadata> {
        let sidecar = png_path.with_extension("json");
        let bytes = fs::read(&sidecar).await.ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// Recovers (prompt, timestamp) from `imagen-<slug>-<millis>.png`. The
/// timestamp is taken after the last `-` so slugs containing the delimiter
/// still parse.
fn parse_filename(filename: &str) -> Option<(String, i64)> {
    let stem = filename
        .strip_prefix(&format!("{}-", FILE_PREFIX))?
        .strip_suffix(".png")?;
    let (slug, timestamp) = stem.rsplit_once('-')?;
    let timestamp = timestamp.parse::<i64>().ok()?;
    Some((slug.replace('-', " "), timestamp))
}
