// tests/pg_repository_tests.rs
//
// Runs the gateway contract against a real Postgres. Opt-in:
//   DATABASE_URL=postgres://... cargo test -p user_orders -- --ignored
// The target database is wiped by every test.
mod common;
use common::*;
use serial_test::serial;
use sqlx::PgPool;
use user_orders::{Order, PgUserRepository, User, UserRepository};

const SCHEMA: &str = include_str!("../schema.sql");

async fn fresh_repository() -> Option<PgUserRepository> {
  setup_tracing();
  let Ok(url) = std::env::var("DATABASE_URL") else {
    eprintln!("DATABASE_URL not set; skipping Postgres gateway test");
    return None;
  };
  let pool = PgPool::connect(&url).await.expect("Failed to connect to Postgres");
  sqlx::raw_sql(SCHEMA).execute(&pool).await.expect("Failed to apply schema");
  sqlx::query("TRUNCATE orders, users RESTART IDENTITY CASCADE")
    .execute(&pool)
    .await
    .expect("Failed to truncate tables");
  Some(PgUserRepository::new(pool))
}

#[tokio::test]
#[serial]
#[ignore = "requires Postgres; set DATABASE_URL and run with --ignored"]
async fn test_pg_save_assigns_ids_and_reads_back() {
  let Some(repo) = fresh_repository().await else { return };

  let saved = repo.save(user_with_two_orders()).await.unwrap();
  let user_id = saved.id.expect("user id assigned");
  assert!(saved.orders.iter().all(|o| o.id.is_some() && o.user_id == Some(user_id)));

  let found = repo.find_by_id(user_id).await.unwrap().expect("saved user is found");
  assert_eq!(found.name, NAME_USER_ONE);
  assert_eq!(found.email, EMAIL_ONE);
  assert_eq!(found.orders, saved.orders);
  assert!(repo.exists_by_id(user_id).await.unwrap());
}

#[tokio::test]
#[serial]
#[ignore = "requires Postgres; set DATABASE_URL and run with --ignored"]
async fn test_pg_save_with_existing_id_overwrites_record() {
  let Some(repo) = fresh_repository().await else { return };
  let mut stored = repo.save(user_with_two_orders()).await.unwrap();

  stored.name = NAME_USER_TWO.to_string();
  stored.orders[0].status = "Отменён".to_string();
  repo.save(stored.clone()).await.unwrap();

  let all = repo.find_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].name, NAME_USER_TWO);
  assert_eq!(all[0].orders, stored.orders);
}

#[tokio::test]
#[serial]
#[ignore = "requires Postgres; set DATABASE_URL and run with --ignored"]
async fn test_pg_find_all_is_ordered_by_id_with_owned_orders() {
  let Some(repo) = fresh_repository().await else { return };
  let first = repo.save(user_with_two_orders()).await.unwrap();
  let second = repo.save(User::new(NAME_USER_TWO, EMAIL_TWO)).await.unwrap();

  let all = repo.find_all().await.unwrap();
  let ids: Vec<_> = all.iter().map(|u| u.id).collect();
  assert_eq!(ids, vec![first.id, second.id]);
  assert_eq!(all[0].orders.len(), 2);
  assert!(all[1].orders.is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires Postgres; set DATABASE_URL and run with --ignored"]
async fn test_pg_delete_cascades_and_missing_id_is_a_no_op() {
  let Some(repo) = fresh_repository().await else { return };
  let saved = repo.save(user_with_two_orders()).await.unwrap();
  let user_id = saved.id.unwrap();

  repo.delete_by_id(user_id + 100).await.unwrap();
  assert!(repo.exists_by_id(user_id).await.unwrap());

  repo.delete_by_id(user_id).await.unwrap();
  assert!(repo.find_by_id(user_id).await.unwrap().is_none());
  let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
    .fetch_one(repo.pool())
    .await
    .unwrap();
  assert_eq!(orphans, 0);
}

#[tokio::test]
#[serial]
#[ignore = "requires Postgres; set DATABASE_URL and run with --ignored"]
async fn test_pg_order_with_unknown_id_is_stored() {
  let Some(repo) = fresh_repository().await else { return };

  let mut order = Order::new("Lamp", "NEW");
  order.id = Some(77);
  let saved = repo
    .save(User::new(NAME_USER_ONE, EMAIL_ONE).with_orders(vec![order]))
    .await
    .unwrap();

  let found = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
  assert_eq!(found.orders.len(), 1);
  assert_eq!(found.orders[0].id, Some(77));
  assert_eq!(found.orders[0].product, "Lamp");

  // The order sequence now starts past the explicit id.
  let mut more = found.clone();
  more.orders.push(Order::new("Bulb", "NEW"));
  let updated = repo.save(more).await.unwrap();
  assert_eq!(updated.orders[1].id, Some(78));
}

#[tokio::test]
#[serial]
#[ignore = "requires Postgres; set DATABASE_URL and run with --ignored"]
async fn test_pg_generated_id_follows_explicit_id() {
  let Some(repo) = fresh_repository().await else { return };

  let mut explicit = User::new(NAME_USER_ONE, EMAIL_ONE);
  explicit.id = Some(5);
  assert_eq!(repo.save(explicit).await.unwrap().id, Some(5));

  let generated = repo.save(User::new(NAME_USER_TWO, EMAIL_TWO)).await.unwrap();
  assert_eq!(generated.id, Some(6));

  // A lower explicit id never drags the sequence backwards.
  let mut lower = User::new(NAME_USER_TWO, EMAIL_TWO);
  lower.id = Some(2);
  repo.save(lower).await.unwrap();
  let next = repo.save(User::new(NAME_USER_ONE, EMAIL_ONE)).await.unwrap();
  assert_eq!(next.id, Some(7));
  assert_eq!(repo.find_all().await.unwrap().len(), 4);
}
