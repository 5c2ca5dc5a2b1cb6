// core/src/repository/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use tracing::{debug, error, instrument};

use super::UserRepository;
use crate::error::{RepositoryError, RepositoryResult};
use crate::model::{Order, OrderId, User, UserId};

/// Gateway over the `users` and `orders` tables described in `schema.sql`.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
  pool: PgPool,
}

impl PgUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

fn log_db_error(operation: &'static str) -> impl Fn(sqlx::Error) -> RepositoryError {
  move |e| {
    error!(operation, "Database operation failed: {}", e);
    RepositoryError::Database(e)
  }
}

/// Moves the serial sequence behind `table.column` past an id written
/// explicitly, so later generated ids cannot collide with it. Never moves it
/// backwards.
async fn advance_sequence(
  tx: &mut Transaction<'_, Postgres>,
  table: &'static str,
  column: &'static str,
  id: i64,
) -> RepositoryResult<()> {
  sqlx::query(
    "SELECT setval(seq, $3) FROM (SELECT pg_get_serial_sequence($1, $2)::regclass AS seq) s \
     WHERE $3 > COALESCE(pg_sequence_last_value(seq), 0)",
  )
  .bind(table)
  .bind(column)
  .bind(id)
  .execute(&mut **tx)
  .await
  .map_err(log_db_error("advance_sequence"))?;
  Ok(())
}

async fn upsert_user(tx: &mut Transaction<'_, Postgres>, user: &User) -> RepositoryResult<UserId> {
  if let Some(id) = user.id {
    let updated = sqlx::query("UPDATE users SET name = $2, email = $3 WHERE user_id = $1")
      .bind(id)
      .bind(&user.name)
      .bind(&user.email)
      .execute(&mut **tx)
      .await
      .map_err(log_db_error("update_user"))?;
    if updated.rows_affected() > 0 {
      return Ok(id);
    }
    // Unknown id: store the record under the id it carries.
    sqlx::query("INSERT INTO users (user_id, name, email) VALUES ($1, $2, $3)")
      .bind(id)
      .bind(&user.name)
      .bind(&user.email)
      .execute(&mut **tx)
      .await
      .map_err(log_db_error("insert_user_with_id"))?;
    advance_sequence(tx, "users", "user_id", id).await?;
    return Ok(id);
  }

  sqlx::query_scalar::<_, UserId>("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING user_id")
    .bind(&user.name)
    .bind(&user.email)
    .fetch_one(&mut **tx)
    .await
    .map_err(log_db_error("insert_user"))
}

async fn upsert_order(
  tx: &mut Transaction<'_, Postgres>,
  user_id: UserId,
  order: &Order,
) -> RepositoryResult<OrderId> {
  match order.id {
    Some(id) => {
      let updated = sqlx::query("UPDATE orders SET product = $2, status = $3, user_id = $4 WHERE order_id = $1")
        .bind(id)
        .bind(&order.product)
        .bind(&order.status)
        .bind(user_id)
        .execute(&mut **tx)
        .await
        .map_err(log_db_error("update_order"))?;
      if updated.rows_affected() == 0 {
        sqlx::query("INSERT INTO orders (order_id, product, status, user_id) VALUES ($1, $2, $3, $4)")
          .bind(id)
          .bind(&order.product)
          .bind(&order.status)
          .bind(user_id)
          .execute(&mut **tx)
          .await
          .map_err(log_db_error("insert_order_with_id"))?;
        advance_sequence(tx, "orders", "order_id", id).await?;
      }
      Ok(id)
    }
    None => sqlx::query_scalar::<_, OrderId>(
      "INSERT INTO orders (product, status, user_id) VALUES ($1, $2, $3) RETURNING order_id",
    )
    .bind(&order.product)
    .bind(&order.status)
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(log_db_error("insert_order")),
  }
}

#[async_trait]
impl UserRepository for PgUserRepository {
  #[instrument(name = "PgUserRepository::find_all", skip(self), err(Display))]
  async fn find_all(&self) -> RepositoryResult<Vec<User>> {
    let mut users: Vec<User> = sqlx::query_as("SELECT user_id, name, email FROM users ORDER BY user_id ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(log_db_error("find_all_users"))?;

    let orders: Vec<Order> =
      sqlx::query_as("SELECT order_id, product, status, user_id FROM orders ORDER BY order_id ASC")
        .fetch_all(&self.pool)
        .await
        .map_err(log_db_error("find_all_orders"))?;

    let mut by_owner: HashMap<UserId, Vec<Order>> = HashMap::new();
    for order in orders {
      let owner = order.user_id.ok_or_else(|| {
        RepositoryError::Inconsistent(format!("order {:?} has no owning user", order.id))
      })?;
      by_owner.entry(owner).or_default().push(order);
    }
    for user in users.iter_mut() {
      if let Some(id) = user.id {
        user.orders = by_owner.remove(&id).unwrap_or_default();
      }
    }

    debug!("Fetched {} users.", users.len());
    Ok(users)
  }

  #[instrument(name = "PgUserRepository::find_by_id", skip(self), err(Display))]
  async fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
    let user: Option<User> = sqlx::query_as("SELECT user_id, name, email FROM users WHERE user_id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(log_db_error("find_user_by_id"))?;

    let Some(mut user) = user else {
      return Ok(None);
    };

    user.orders = sqlx::query_as(
      "SELECT order_id, product, status, user_id FROM orders WHERE user_id = $1 ORDER BY order_id ASC",
    )
    .bind(id)
    .fetch_all(&self.pool)
    .await
    .map_err(log_db_error("find_orders_by_user"))?;

    Ok(Some(user))
  }

  #[instrument(name = "PgUserRepository::save", skip_all, fields(user_id = ?user.id), err(Display))]
  async fn save(&self, mut user: User) -> RepositoryResult<User> {
    let mut tx = self.pool.begin().await.map_err(log_db_error("begin_save"))?;

    let user_id = upsert_user(&mut tx, &user).await?;
    user.id = Some(user_id);

    for order in user.orders.iter_mut() {
      order.id = Some(upsert_order(&mut tx, user_id, order).await?);
      order.user_id = Some(user_id);
    }

    tx.commit().await.map_err(log_db_error("commit_save"))?;
    debug!(user_id, orders = user.orders.len(), "User saved.");
    Ok(user)
  }

  #[instrument(name = "PgUserRepository::exists_by_id", skip(self), err(Display))]
  async fn exists_by_id(&self, id: UserId) -> RepositoryResult<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
      .bind(id)
      .fetch_one(&self.pool)
      .await
      .map_err(log_db_error("exists_user_by_id"))
  }

  #[instrument(name = "PgUserRepository::delete_by_id", skip(self), err(Display))]
  async fn delete_by_id(&self, id: UserId) -> RepositoryResult<()> {
    let mut tx = self.pool.begin().await.map_err(log_db_error("begin_delete"))?;

    let orders = sqlx::query("DELETE FROM orders WHERE user_id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await
      .map_err(log_db_error("delete_orders_by_user"))?;
    sqlx::query("DELETE FROM users WHERE user_id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await
      .map_err(log_db_error("delete_user"))?;

    tx.commit().await.map_err(log_db_error("commit_delete"))?;
    debug!(user_id = id, orders_removed = orders.rows_affected(), "User deleted.");
    Ok(())
  }
}
