// server/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use user_orders::{User, UserId, UserPayload, UserSummary, Validate};

#[instrument(name = "handler::list_users", skip(app_state))]
pub async fn list_users_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let users = app_state.user_repository.find_all().await?;
  info!("Listing {} users.", users.len());

  let summaries: Vec<UserSummary> = users.iter().map(User::to_summary).collect();
  Ok(HttpResponse::Ok().json(summaries))
}

#[instrument(name = "handler::get_user", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn get_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<UserId>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();

  match app_state.user_repository.find_by_id(user_id).await? {
    Some(user) => {
      info!("User {} fetched with {} orders.", user_id, user.orders.len());
      Ok(HttpResponse::Ok().json(user.to_detail()))
    }
    None => {
      warn!("User with ID {} not found.", user_id);
      Err(AppError::user_not_found())
    }
  }
}

#[instrument(name = "handler::create_user", skip(app_state, req_payload))]
pub async fn create_user_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  payload.validate()?;

  let created = app_state.user_repository.save(payload.into_new_user()).await?;
  info!(user_id = ?created.id, orders = created.orders.len(), "User created.");

  Ok(HttpResponse::Created().json(created.to_detail()))
}

#[instrument(name = "handler::update_user", skip(app_state, path, req_payload), fields(user_id = %path.as_ref()))]
pub async fn update_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<UserId>,
  req_payload: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();

  let Some(mut user) = app_state.user_repository.find_by_id(user_id).await? else {
    warn!("Update requested for missing user {}.", user_id);
    return Err(AppError::user_not_found());
  };

  let changes = req_payload.into_inner();
  changes.validate()?;
  user.apply_update(changes);

  let updated = app_state.user_repository.save(user).await?;
  info!("User {} updated.", user_id);

  Ok(HttpResponse::Ok().json(updated.to_detail()))
}

#[instrument(name = "handler::delete_user", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn delete_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<UserId>,
) -> Result<HttpResponse, AppError> {
  let user_id = path.into_inner();

  if !app_state.user_repository.exists_by_id(user_id).await? {
    warn!("Delete requested for missing user {}.", user_id);
    return Err(AppError::user_not_found());
  }

  app_state.user_repository.delete_by_id(user_id).await?;
  info!("User {} deleted along with its orders.", user_id);

  Ok(HttpResponse::NoContent().finish())
}

/// Fallback for a mapped path hit with a verb it has no route for.
pub async fn method_not_allowed_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  Err(AppError::MethodNotSupported(format!(
    "Request method '{}' is not supported",
    req.method()
  )))
}
