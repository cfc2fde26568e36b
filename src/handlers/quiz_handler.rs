use actix_web::{get, post, web, HttpRequest, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::QuizSpec,
        dto::response::{GenerateQuizResponse, HealthResponse},
    },
    services::SessionContext,
};

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Generates a quiz for the given parameters and persists it in the store
/// on behalf of the bearer of the request's credential.
#[post("/api/quizzes/generate")]
async fn generate_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<QuizSpec>,
    credentials: Option<BearerAuth>,
) -> Result<HttpResponse, AppError> {
    let spec = request.into_inner();
    spec.validate()?;

    let session = SessionContext::new(
        credentials.as_ref().map(|c| c.token()),
        &state.config.store_base_url,
    )?;

    log::info!(
        "Generating quiz '{}' about '{}' (request {})",
        spec.title,
        spec.topic,
        get_request_id(&req).unwrap_or_default()
    );

    let report = state.pipeline.run(&spec, &session).await?;

    if let Some(fatal) = report.fatal_error() {
        return Err(AppError::from(fatal.clone()));
    }

    Ok(HttpResponse::Created().json(GenerateQuizResponse::from(&report)))
}
