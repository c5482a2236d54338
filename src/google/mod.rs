pub mod image_client;
pub mod prompt_client;

use crate::config::GoogleAiConfig;

pub use image_client::ImageClient;
pub use prompt_client::PromptClient;

/// Client for the Google generative language API, aggregating the Gemini
/// prompt-enhancement client and the Imagen image-generation client over one
/// shared HTTP connection pool. A missing API key does not fail construction;
/// each remote call degrades to `NotConfigured` instead.
#[derive(Clone)]
pub struct GoogleClient {
    prompt_client: PromptClient,
    image_client: ImageClient,
}

impl GoogleClient {
    pub fn new(config: GoogleAiConfig) -> Self {
        let http = reqwest::Client::new();

        Self {
            prompt_client: PromptClient::new(http.clone(), config.clone()),
            image_client: ImageClient::new(http, config),
        }
    }

    pub fn prompt(&self) -> &PromptClient {
        &self.prompt_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
