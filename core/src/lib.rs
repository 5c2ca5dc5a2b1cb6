// src/lib.rs

//! user_orders: the domain half of a small user/order CRUD service.
//!
//! The crate provides:
//!  - `User` and `Order` entities, where a user owns its orders.
//!  - Summary and detail response views, neither of which serializes an
//!    order's back-reference to its owner.
//!  - Explicit validation of incoming payloads through the `Validate` trait.
//!  - The `UserRepository` persistence gateway, backed by PostgreSQL or by an
//!    in-memory store.

pub mod error;
pub mod model;
pub mod repository;
pub mod validation;
pub mod view;

// --- Re-exports for the Public API ---

pub use crate::error::{RepositoryError, RepositoryResult, ValidationError, Violation};
pub use crate::model::{Order, OrderId, OrderPayload, User, UserId, UserPayload, NAME_MAX_LEN, NAME_MIN_LEN};
pub use crate::repository::{InMemoryUserRepository, PgUserRepository, UserRepository};
pub use crate::validation::{is_valid_email, Validate};
pub use crate::view::{OrderDetail, UserDetail, UserSummary};

/*
    Request flow in the server:
    1. Decode the body into a `UserPayload`.
    2. `payload.validate()?` before touching storage.
    3. Create: `repo.save(payload.into_new_user())`.
       Update: `repo.find_by_id(id)`, then `user.apply_update(payload)`, then `repo.save(user)`.
    4. Shape the response with `to_summary()` for listings or `to_detail()` for a single user.
*/
