// core/src/view.rs

//! Response shapes for users.
//!
//! The summary view is used for listings and leaves orders out. The detail
//! view is used for single-user responses and nests each order's product and
//! status. Neither view ever emits an order's back-reference to its owner.

use serde::Serialize;

use crate::model::{Order, User, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
  pub id: Option<UserId>,
  pub name: String,
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDetail {
  pub id: Option<UserId>,
  pub name: String,
  pub email: String,
  pub orders: Vec<OrderDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDetail {
  pub product: String,
  pub status: String,
}

impl User {
  pub fn to_summary(&self) -> UserSummary {
    UserSummary {
      id: self.id,
      name: self.name.clone(),
      email: self.email.clone(),
    }
  }

  pub fn to_detail(&self) -> UserDetail {
    UserDetail {
      id: self.id,
      name: self.name.clone(),
      email: self.email.clone(),
      orders: self.orders.iter().map(Order::to_detail).collect(),
    }
  }
}

impl Order {
  pub fn to_detail(&self) -> OrderDetail {
    OrderDetail {
      product: self.product.clone(),
      status: self.status.clone(),
    }
  }
}
