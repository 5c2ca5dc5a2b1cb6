// core/src/repository/memory.rs

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use super::UserRepository;
use crate::error::{RepositoryError, RepositoryResult};
use crate::model::{OrderId, User, UserId};

#[derive(Debug)]
struct Store {
  users: BTreeMap<UserId, User>,
  next_user_id: UserId,
  next_order_id: OrderId,
}

impl Default for Store {
  fn default() -> Self {
    Self {
      users: BTreeMap::new(),
      next_user_id: 1,
      next_order_id: 1,
    }
  }
}

/// Process-local gateway. Ids start at 1 and are never reused.
///
/// Orders live inside their owning `User`, so cascading delete falls out of
/// removing the map entry. The lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
  store: RwLock<Store>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of orders across all users.
  pub fn order_count(&self) -> usize {
    self.store.read().users.values().map(|u| u.orders.len()).sum()
  }
}

/// Returns `requested`, or the next free id when absent, and moves `next`
/// past it.
fn claim_id(next: &mut i64, requested: Option<i64>, table: &'static str) -> RepositoryResult<i64> {
  let id = requested.unwrap_or(*next);
  let following = id.checked_add(1).ok_or(RepositoryError::IdsExhausted(table))?;
  *next = (*next).max(following);
  Ok(id)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn find_all(&self) -> RepositoryResult<Vec<User>> {
    Ok(self.store.read().users.values().cloned().collect())
  }

  async fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
    Ok(self.store.read().users.get(&id).cloned())
  }

  #[instrument(name = "InMemoryUserRepository::save", level = "debug", skip_all, fields(user_id = ?user.id))]
  async fn save(&self, mut user: User) -> RepositoryResult<User> {
    let mut store = self.store.write();

    // Work on copies so a failed save leaves the counters untouched.
    let mut next_user_id = store.next_user_id;
    let mut next_order_id = store.next_order_id;

    let user_id = claim_id(&mut next_user_id, user.id, "users")?;
    user.id = Some(user_id);

    for order in user.orders.iter_mut() {
      order.id = Some(claim_id(&mut next_order_id, order.id, "orders")?);
      order.user_id = Some(user_id);
    }

    store.next_user_id = next_user_id;
    store.next_order_id = next_order_id;
    debug!(user_id, orders = user.orders.len(), "Storing user.");
    store.users.insert(user_id, user.clone());
    Ok(user)
  }

  async fn exists_by_id(&self, id: UserId) -> RepositoryResult<bool> {
    Ok(self.store.read().users.contains_key(&id))
  }

  async fn delete_by_id(&self, id: UserId) -> RepositoryResult<()> {
    if let Some(removed) = self.store.write().users.remove(&id) {
      debug!(user_id = id, orders = removed.orders.len(), "Removed user and owned orders.");
    }
    Ok(())
  }
}
