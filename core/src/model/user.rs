// core/src/model/user.rs

use serde::Deserialize;
use sqlx::FromRow;

use super::order::{Order, OrderPayload};

pub type UserId = i64;

/// Bounds on `User::name`, counted in characters.
pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
  #[sqlx(rename = "user_id")]
  pub id: Option<UserId>,
  pub name: String,
  pub email: String,
  // Loaded separately; the users table has no orders column.
  #[sqlx(skip)]
  pub orders: Vec<Order>,
}

impl User {
  pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      id: None,
      name: name.into(),
      email: email.into(),
      orders: Vec::new(),
    }
  }

  pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
    self.orders = orders;
    self
  }

  /// Partial update: only name and email are taken from `changes`.
  /// Identifier and orders of `self` are left as they are.
  pub fn apply_update(&mut self, changes: UserPayload) {
    self.name = changes.name.unwrap_or_default();
    self.email = changes.email.unwrap_or_default();
  }
}

/// User as it arrives in a create or update request body.
///
/// Every field is optional on the wire so that a missing `name` is reported
/// by validation rather than rejected by the JSON decoder. A client supplied
/// `id` is read and then ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPayload {
  pub id: Option<UserId>,
  pub name: Option<String>,
  pub email: Option<String>,
  pub orders: Option<Vec<OrderPayload>>,
}

impl UserPayload {
  pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
      email: Some(email.into()),
      ..Self::default()
    }
  }

  /// Builds a new, unsaved user together with any orders it carries.
  /// Call only after validation passed.
  pub fn into_new_user(self) -> User {
    let orders = self
      .orders
      .unwrap_or_default()
      .into_iter()
      .map(OrderPayload::into_order)
      .collect();
    User::new(self.name.unwrap_or_default(), self.email.unwrap_or_default()).with_orders(orders)
  }
}
