pub mod config;
pub mod error;
pub mod google;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod server;
pub mod storage;
pub mod styles;

pub use config::{Config, GoogleAiConfig, StorageConfig};
pub use error::{GenError, Result, MAX_BATCH_IMAGES, MAX_PROMPT_TOKENS};
pub use google::{GoogleClient, ImageClient, PromptClient};
pub use models::{AspectRatio, StoredImage, WorkResult};
pub use orchestrator::{BatchOrchestrator, ImageSynthesizer, PromptEnhancer, Synthesizer};
pub use storage::ImageStore;
