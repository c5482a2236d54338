use crate::{
    config::GoogleAiConfig,
    error::{GenError, Result},
    models::{imagen_payload, AspectRatio, ImagenResponse},
    styles,
};

/// Client for the Imagen `:predict` endpoint. Returns the raw base64 image
/// payload; decoding and persistence live in the storage layer.
#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    config: GoogleAiConfig,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, config: GoogleAiConfig) -> Self {
        Self { http, config }
    }

    pub async fn generate(
        &self,
        prompt: &str,
        style_ids: &[String],
        aspect_ratio: AspectRatio,
    ) -> Result<String> {
        if prompt.is_empty() {
            return Err(GenError::InvalidInput("Prompt is required".into()));
        }
        if style_ids.is_empty() {
            return Err(GenError::InvalidInput("Styles are required".into()));
        }

        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            log::error!("Imagen API key not configured");
            GenError::NotConfigured
        })?;

        // The style suffix travels inside the prompt text itself.
        let enhanced_prompt = format!("{} - Style: {}", prompt, styles::display_names(style_ids));

        let url = format!(
            "{}/v1beta/{}:predict",
            self.config.base_url(),
            self.config.imagen_model()
        );
        let payload = imagen_payload(&enhanced_prompt, aspect_ratio.as_str());

        log::info!(
            "Generating image with {} at {}",
            self.config.imagen_model(),
            aspect_ratio
        );
        log::debug!("Imagen request payload: {}", payload);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("user-agent", env!("CARGO_PKG_NAME"))
            .header("x-goog-api-client", env!("CARGO_PKG_NAME"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| GenError::RemoteFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Imagen returned status {}: {}", status, body);
            return Err(GenError::RemoteFailure(format!(
                "API request failed with status {}",
                status
            )));
        }

        let body: ImagenResponse = response
            .json()
            .await
            .map_err(|e| GenError::RemoteFailure(e.to_string()))?;

        body.first_image_base64()
            .map(str::to_owned)
            .ok_or(GenError::NoImageData)
    }
}
