//! In-memory contact service with simulated network latency.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{not_found, ContactService, ServiceLatency};
use crate::errors::AppError;
use crate::models::{seed_contacts, Contact, ContactFormData};

/// Contact records held in process memory.
pub struct InMemoryContactService {
    contacts: RwLock<Vec<Contact>>,
    latency: ServiceLatency,
}

impl InMemoryContactService {
    pub fn new(latency: ServiceLatency) -> Self {
        Self::with_contacts(Vec::new(), latency)
    }

    pub fn with_contacts(contacts: Vec<Contact>, latency: ServiceLatency) -> Self {
        Self {
            contacts: RwLock::new(contacts),
            latency,
        }
    }

    /// Service preloaded with the sample contacts.
    pub fn seeded(latency: ServiceLatency) -> Self {
        Self::with_contacts(seed_contacts(), latency)
    }

    /// Get a record by ID.
    pub async fn get(&self, id: &str) -> Result<Option<Contact>, AppError> {
        simulate(self.latency.read).await;
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ContactService for InMemoryContactService {
    async fn list(&self) -> Result<Vec<Contact>, AppError> {
        simulate(self.latency.read).await;
        Ok(self.contacts.read().await.clone())
    }

    async fn create(&self, data: &ContactFormData) -> Result<Contact, AppError> {
        simulate(self.latency.write).await;
        let contact = Contact::from_form(Uuid::new_v4().to_string(), data);

        self.contacts.write().await.push(contact.clone());
        tracing::debug!("Created contact {}", contact.id);
        Ok(contact)
    }

    async fn update(&self, id: &str, data: &ContactFormData) -> Result<Contact, AppError> {
        simulate(self.latency.write).await;
        let mut contacts = self.contacts.write().await;
        let existing = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(id))?;

        existing.apply(data);
        tracing::debug!("Updated contact {}", id);
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        simulate(self.latency.write).await;
        let mut contacts = self.contacts.write().await;
        let index = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| not_found(id))?;

        contacts.remove(index);
        tracing::debug!("Deleted contact {}", id);
        Ok(())
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
