// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;
use tracing::Level;

use user_orders::{InMemoryUserRepository, Order, User, UserRepository};
use user_orders_server::state::AppState;
use user_orders_server::web::configure_app_routes;

pub const NAME_USER_ONE: &str = "Анатолий";
pub const NAME_USER_TWO: &str = "Николай";
pub const EMAIL_ONE: &str = "anatoly@example.com";
pub const EMAIL_TWO: &str = "nikolay@example.com";

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Builds the full route table over the given in-memory repository.
pub async fn init_app(
  repo: Arc<InMemoryUserRepository>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
  setup_tracing();
  let state = AppState::new(repo as Arc<dyn UserRepository>);
  test::init_service(
    App::new()
      .app_data(web::Data::new(state))
      .configure(configure_app_routes),
  )
  .await
}

/// Stores two users, the first one owning two orders.
pub async fn seed_users(repo: &InMemoryUserRepository) -> (User, User) {
  let first = repo
    .save(User::new(NAME_USER_ONE, EMAIL_ONE).with_orders(vec![
      Order::new("Soap", "Доставлено"),
      Order::new("Pencil", "В доставке"),
    ]))
    .await
    .unwrap();
  let second = repo.save(User::new(NAME_USER_TWO, EMAIL_TWO)).await.unwrap();
  (first, second)
}

pub async fn read_json(response: ServiceResponse) -> Value {
  let body = test::read_body(response).await;
  serde_json::from_slice(&body).expect("JSON body")
}
