//! Contact model matching the frontend Contact interface.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Prefix of ids handed out to contacts that the service has not confirmed yet.
pub const PLACEHOLDER_ID_PREFIX: &str = "temp-";

/// A stored contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable projection of a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
}

impl Contact {
    /// Build a record with a fresh id and `created_at == updated_at == now`.
    pub fn from_form(id: String, data: &ContactFormData) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: data.name.clone(),
            email: data.email.clone(),
            company: data.company.clone(),
            phone: data.phone.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// A locally synthesized record standing in for a pending create.
    pub fn placeholder(data: &ContactFormData) -> Self {
        Self::from_form(placeholder_id(), data)
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.starts_with(PLACEHOLDER_ID_PREFIX)
    }

    /// Overwrite the editable fields and refresh `updated_at`.
    pub fn apply(&mut self, data: &ContactFormData) {
        self.name = data.name.clone();
        self.email = data.email.clone();
        self.company = data.company.clone();
        self.phone = data.phone.clone();
        // Clock skew must not break updated_at >= created_at.
        self.updated_at = Utc::now().max(self.created_at);
    }

    /// Same record with `data` merged in.
    pub fn merged(&self, data: &ContactFormData) -> Self {
        let mut next = self.clone();
        next.apply(data);
        next
    }

    pub fn form_data(&self) -> ContactFormData {
        ContactFormData {
            name: self.name.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
            phone: self.phone.clone(),
        }
    }
}

impl ContactFormData {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        company: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            company: company.into(),
            phone: phone.into(),
        }
    }

    /// Name and email are required; company and phone may be blank.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(AppError::Validation("Email is required".to_string()));
        }
        Ok(())
    }
}

fn placeholder_id() -> String {
    format!("{}{}", PLACEHOLDER_ID_PREFIX, Uuid::new_v4())
}

/// Sample contacts the demo service starts with.
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        seed(
            "1",
            "John Smith",
            "john.smith@acme.com",
            "Acme Corp",
            "+1 (555) 123-4567",
            (2024, 1, 15),
        ),
        seed(
            "2",
            "Sarah Johnson",
            "sarah.j@techstart.io",
            "TechStart",
            "+1 (555) 987-6543",
            (2024, 2, 20),
        ),
        seed(
            "3",
            "Michael Brown",
            "mbrown@globalinc.com",
            "Global Inc",
            "+1 (555) 456-7890",
            (2024, 3, 10),
        ),
    ]
}

fn seed(
    id: &str,
    name: &str,
    email: &str,
    company: &str,
    phone: &str,
    (year, month, day): (i32, u32, u32),
) -> Contact {
    let created_at = Utc
        .with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        company: company.to_string(),
        phone: phone.to_string(),
        created_at,
        updated_at: created_at,
    }
}
