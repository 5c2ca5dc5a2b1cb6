// core/src/model/order.rs

use serde::Deserialize;
use sqlx::FromRow;

use super::user::UserId;

pub type OrderId = i64;

/// An order owned by exactly one user.
///
/// `user_id` is the back-reference to the owner. It is `None` only while the
/// order is being built, before its owner has been saved, and it is never part
/// of any serialized view.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Order {
  #[sqlx(rename = "order_id")]
  pub id: Option<OrderId>,
  pub product: String,
  pub status: String,
  pub user_id: Option<UserId>,
}

impl Order {
  pub fn new(product: impl Into<String>, status: impl Into<String>) -> Self {
    Self {
      id: None,
      product: product.into(),
      status: status.into(),
      user_id: None,
    }
  }
}

/// Order as it arrives in a request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderPayload {
  pub product: Option<String>,
  pub status: Option<String>,
}

impl OrderPayload {
  /// Builds an unsaved, unowned order. Call only after validation passed.
  pub fn into_order(self) -> Order {
    Order::new(self.product.unwrap_or_default(), self.status.unwrap_or_default())
  }
}
