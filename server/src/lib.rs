// server/src/lib.rs

//! HTTP surface of the user/order service: configuration, the error
//! translator, shared state and the `/api/users` routes.

pub mod config;
pub mod errors;
pub mod state;
pub mod web;
