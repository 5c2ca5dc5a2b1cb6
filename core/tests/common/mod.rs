// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use once_cell::sync::Lazy;
use tracing::Level;
use user_orders::{Order, OrderPayload, User, UserPayload};

// --- Helper for Tracing Setup ---
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

// --- Fixtures ---
pub const NAME_USER_ONE: &str = "Анатолий";
pub const NAME_USER_TWO: &str = "Николай";
pub const EMAIL_ONE: &str = "anatoly@example.com";
pub const EMAIL_TWO: &str = "nikolay@example.com";

pub fn user_with_two_orders() -> User {
  User::new(NAME_USER_ONE, EMAIL_ONE).with_orders(vec![
    Order::new("Soap", "Доставлено"),
    Order::new("Pencil", "В доставке"),
  ])
}

pub fn order_payload(product: &str, status: &str) -> OrderPayload {
  OrderPayload {
    product: Some(product.to_string()),
    status: Some(status.to_string()),
  }
}

pub fn valid_payload() -> UserPayload {
  UserPayload::new(NAME_USER_TWO, EMAIL_TWO)
}
