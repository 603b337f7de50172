//! Core types and trait definitions for Campus Fest Hub.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The client, the API and the store all speak in these types.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod ack;
pub mod catalog;
pub mod error;
pub mod event;
pub mod registration;
pub mod store;
pub mod subscriber;
pub mod validate;

pub use error::{Error, Result};
