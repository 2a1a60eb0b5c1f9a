//! Contact data services.
//!
//! `ContactService` is the boundary the store talks to. The in-memory service is the
//! source of truth for the demo server; the HTTP service talks to that server over
//! the network and can be swapped in without touching the store.

mod http;
mod memory;
#[cfg(test)]
pub(crate) mod testing;

pub use http::*;
pub use memory::*;

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{Contact, ContactFormData};

/// CRUD operations on contact records. Every call returns owned copies.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<Contact>, AppError>;

    /// Store a new record with a service-assigned id and timestamps.
    async fn create(&self, data: &ContactFormData) -> Result<Contact, AppError>;

    /// Merge `data` into record `id` and refresh its `updated_at`.
    async fn update(&self, id: &str, data: &ContactFormData) -> Result<Contact, AppError>;

    /// Remove record `id`.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Artificial delay applied before every service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceLatency {
    pub read: Duration,
    pub write: Duration,
}

impl ServiceLatency {
    pub fn none() -> Self {
        Self {
            read: Duration::ZERO,
            write: Duration::ZERO,
        }
    }
}

impl Default for ServiceLatency {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(500),
            write: Duration::from_millis(300),
        }
    }
}

pub(crate) fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Contact {} not found", id))
}
