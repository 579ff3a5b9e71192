// Route exports
pub mod upload;

use actix_web::{error, web, HttpRequest};

use crate::models::UploadResponse;

pub use upload::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .configure(upload::configure);
}

/// Handle query payload errors with the upload response shape
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    let body = UploadResponse::failure(format!("Invalid query: {}", err));
    error::InternalError::from_response(err, actix_web::HttpResponse::BadRequest().json(body)).into()
}
