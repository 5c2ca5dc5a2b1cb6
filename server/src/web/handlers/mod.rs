// server/src/web/handlers/mod.rs

pub mod user_handlers;
