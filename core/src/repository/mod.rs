// core/src/repository/mod.rs

//! The persistence gateway for users and the orders they own.

use async_trait::async_trait;

use crate::error::RepositoryResult;
use crate::model::{User, UserId};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

/// CRUD access to users keyed by numeric id.
///
/// Orders are owned by their user: `save` writes them along with the user and
/// `delete_by_id` removes them with it. Absence is never an error here;
/// `find_by_id` yields `None` and deleting a missing id does nothing.
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// All users with their orders, ordered by ascending id.
  async fn find_all(&self) -> RepositoryResult<Vec<User>>;

  async fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;

  /// Inserts the user when `id` is `None`, otherwise overwrites the stored
  /// record. Orders without an id are inserted; every saved order is pointed
  /// at the user. Returns the user as stored, with all ids assigned.
  async fn save(&self, user: User) -> RepositoryResult<User>;

  async fn exists_by_id(&self, id: UserId) -> RepositoryResult<bool>;

  async fn delete_by_id(&self, id: UserId) -> RepositoryResult<()>;
}
