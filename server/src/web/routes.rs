// server/src/web/routes.rs

use actix_web::{error::JsonPayloadError, error::PathError, web, HttpRequest};
use tracing::debug;

use crate::errors::AppError;
use crate::web::handlers::user_handlers;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// A path segment that is not a valid id.
fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
  debug!(path = %req.path(), "Path extraction failed: {}", err);
  AppError::TypeMismatch(err.to_string()).into()
}

// Undecodable body or wrong content type; reported like any other invalid payload.
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
  debug!(path = %req.path(), "JSON payload rejected: {}", err);
  let violation = user_orders::Violation::new("body", err.to_string());
  AppError::ValidationFailed(user_orders::ValidationError {
    violations: vec![violation],
  })
  .into()
}

/// Called by `main.rs` and by the integration tests to mount every route.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.route("/health", web::get().to(health_check_handler)).service(
    web::scope("/api/users")
      .app_data(web::PathConfig::default().error_handler(path_error_handler))
      .app_data(web::JsonConfig::default().error_handler(json_error_handler))
      .service(
        web::resource(vec!["", "/"])
          .route(web::get().to(user_handlers::list_users_handler))
          .route(web::head().to(user_handlers::list_users_handler))
          .route(web::post().to(user_handlers::create_user_handler))
          .default_service(web::to(user_handlers::method_not_allowed_handler)),
      )
      .service(
        web::resource("/{user_id}")
          .route(web::get().to(user_handlers::get_user_handler))
          .route(web::head().to(user_handlers::get_user_handler))
          .route(web::put().to(user_handlers::update_user_handler))
          .route(web::delete().to(user_handlers::delete_user_handler))
          .default_service(web::to(user_handlers::method_not_allowed_handler)),
      ),
  );
}
