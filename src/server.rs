use crate::{
    error::GenError,
    google::GoogleClient,
    models::{
        AspectRatio, BatchRequest, BatchResponse, DeleteRequest, DeleteResponse, GenerateRequest,
        GenerateResponse, ListResponse, SuggestionRequest, SuggestionResponse,
    },
    orchestrator::{BatchOrchestrator, ImageSynthesizer, Synthesizer},
    storage::ImageStore,
    styles,
};
use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde_json::json;

/// Shared state behind every handler: the Google client, the image store and
/// the synthesizer composing the two.
pub struct AppState {
    pub google: GoogleClient,
    pub store: ImageStore,
    pub synthesizer: Synthesizer,
}

impl AppState {
    pub fn new(google: GoogleClient, store: ImageStore) -> Self {
        let synthesizer = Synthesizer::new(google.image().clone(), store.clone());
        Self {
            google,
            store,
            synthesizer,
        }
    }
}

impl ResponseError for GenError {
    fn status_code(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

fn parse_aspect_ratio(raw: &Option<String>) -> Result<AspectRatio, GenError> {
    match raw {
        Some(value) => value.parse(),
        None => Err(GenError::InvalidAspectRatio("missing".into())),
    }
}

async fn batch_generate(
    state: web::Data<AppState>,
    request: web::Json<BatchRequest>,
) -> Result<HttpResponse, GenError> {
    // Batches without an explicit aspect ratio fall back to square.
    let aspect_ratio = match &request.aspect_ratio {
        Some(value) => value.parse()?,
        None => AspectRatio::default(),
    };
    let iterations = request.iterations.unwrap_or(1);

    let orchestrator = BatchOrchestrator::new(state.google.prompt(), &state.synthesizer);
    let results = orchestrator
        .run(&request.prompt, &request.styles, aspect_ratio, iterations)
        .await?;

    Ok(HttpResponse::Ok().json(BatchResponse { results }))
}

async fn prompt_suggestion(
    state: web::Data<AppState>,
    request: web::Json<SuggestionRequest>,
) -> Result<HttpResponse, GenError> {
    if request.prompt.is_empty() {
        return Err(GenError::InvalidInput("Prompt is required".into()));
    }
    if request.styles.is_empty() {
        return Err(GenError::InvalidInput(
            "Styles are required for prompt suggestion".into(),
        ));
    }

    let suggestion = state
        .google
        .prompt()
        .enhance(&request.prompt, &request.styles, &request.prompt_memory)
        .await?;

    Ok(HttpResponse::Ok().json(SuggestionResponse { suggestion }))
}

async fn generate(
    state: web::Data<AppState>,
    request: web::Json<GenerateRequest>,
) -> Result<HttpResponse, GenError> {
    if request.prompt.is_empty() {
        return Err(GenError::InvalidInput("Prompt is required".into()));
    }
    if request.styles.is_empty() {
        return Err(GenError::InvalidInput("Styles are required".into()));
    }
    let aspect_ratio = parse_aspect_ratio(&request.aspect_ratio)?;

    let url = state
        .synthesizer
        .synthesize(&request.prompt, &request.styles, aspect_ratio)
        .await?;

    Ok(HttpResponse::Ok().json(GenerateResponse { url }))
}

async fn list_images(state: web::Data<AppState>) -> Result<HttpResponse, GenError> {
    let images = state.store.list().await?;
    Ok(HttpResponse::Ok().json(ListResponse { images }))
}

async fn delete_image(
    state: web::Data<AppState>,
    request: web::Json<DeleteRequest>,
) -> Result<HttpResponse, GenError> {
    state.store.delete_one(&request.filename).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse { success: true }))
}

async fn delete_all_images(state: web::Data<AppState>) -> Result<HttpResponse, GenError> {
    state.store.delete_all().await?;
    Ok(HttpResponse::Ok().json(DeleteResponse { success: true }))
}

async fn list_styles() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "styles": styles::all() }))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/batch-generate", web::post().to(batch_generate))
            .route("/prompt-suggestion", web::post().to(prompt_suggestion))
            .route("/generate", web::post().to(generate))
            .route("/images", web::get().to(list_images))
            .route("/delete-image", web::post().to(delete_image))
            .route("/delete-all-images", web::post().to(delete_all_images))
            .route("/styles", web::get().to(list_styles)),
    );
}
