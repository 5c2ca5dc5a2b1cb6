// server/src/state.rs
use std::sync::Arc;
use user_orders::UserRepository;

/// Shared with every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
  pub user_repository: Arc<dyn UserRepository>,
}

impl AppState {
  pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
    Self { user_repository }
  }
}
