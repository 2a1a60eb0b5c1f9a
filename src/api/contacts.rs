//! Contact API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{Contact, ContactFormData};
use crate::service::{not_found, ContactService};
use crate::AppState;

/// GET /api/contacts - List all contacts.
pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Vec<Contact>> {
    let contacts = state.service.list().await?;
    success(contacts)
}

/// GET /api/contacts/:id - Get a single contact.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Contact> {
    match state.service.get(&id).await? {
        Some(contact) => success(contact),
        None => Err(not_found(&id)),
    }
}

/// POST /api/contacts - Create a new contact.
pub async fn create_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactFormData>,
) -> ApiResult<Contact> {
    request.validate()?;

    let contact = state.service.create(&request).await?;
    tracing::info!("Created contact {} via API", contact.id);
    success(contact)
}

/// PUT /api/contacts/:id - Update a contact.
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ContactFormData>,
) -> ApiResult<Contact> {
    request.validate()?;

    let contact = state.service.update(&id, &request).await?;
    success(contact)
}

/// DELETE /api/contacts/:id - Delete a contact.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.service.delete(&id).await?;
    tracing::info!("Deleted contact {} via API", id);
    success(())
}
