// core/src/model/mod.rs

//! Entities persisted by the gateway and the payloads used to create or update them.

pub mod order;
pub mod user;

pub use order::{Order, OrderId, OrderPayload};
pub use user::{User, UserId, UserPayload, NAME_MAX_LEN, NAME_MIN_LEN};
