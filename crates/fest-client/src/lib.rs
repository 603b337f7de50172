//! Client side of Campus Fest Hub: catalog loading, gateway submissions and
//! the presentation state behind the `fest` binary.

pub mod app;
pub mod card;
pub mod catalog;
pub mod client;
pub mod error;
pub mod image;
pub mod notice;
pub mod session;

pub use app::App;
pub use client::{ApiClient, ApiConfig, CatalogSource, Endpoint};
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
