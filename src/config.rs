use std::env;
use std::path::PathBuf;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGEN_MODEL: &str = "models/imagen-3.0-generate-002";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GoogleAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub gemini_model: Option<String>,
    pub imagen_model: Option<String>,
}

impl Default for GoogleAiConfig {
    fn default() -> Self {
        GoogleAiConfig {
            api_key: None,
            base_url: None,
            gemini_model: None,
            imagen_model: None,
        }
    }
}

impl GoogleAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GOOGLE_AI_API_KEY").ok();
        let base_url = env::var("GOOGLE_AI_BASE_URL").ok();
        let gemini_model = env::var("GEMINI_MODEL").ok();
        let imagen_model = env::var("IMAGEN_MODEL").ok();

        GoogleAiConfig {
            api_key,
            base_url,
            gemini_model,
            imagen_model,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_models(
        mut self,
        gemini_model: impl Into<String>,
        imagen_model: impl Into<String>,
    ) -> Self {
        self.gemini_model = Some(gemini_model.into());
        self.imagen_model = Some(imagen_model.into());
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn gemini_model(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    pub fn imagen_model(&self) -> &str {
        self.imagen_model.as_deref().unwrap_or(DEFAULT_IMAGEN_MODEL)
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub output_dir: Option<PathBuf>,
    pub public_prefix: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            output_dir: None,
            public_prefix: None,
        }
    }
}

impl StorageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let output_dir = env::var("GENERATED_DIR").ok().map(PathBuf::from);
        let public_prefix = env::var("GENERATED_PUBLIC_PREFIX").ok();

        StorageConfig {
            output_dir,
            public_prefix,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_public_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.public_prefix = Some(prefix.into());
        self
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("public/generated"))
    }

    pub fn public_prefix(&self) -> &str {
        self.public_prefix.as_deref().unwrap_or("/generated")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub google: GoogleAiConfig,
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            google: GoogleAiConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        Config {
            port,
            google: GoogleAiConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_google(mut self, config: GoogleAiConfig) -> Self {
        self.google = config;
        self
    }

    pub fn with_storage(mut self, config: StorageConfig) -> Self {
        self.storage = config;
        self
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(8080)
    }
}
