//! Contact store: the single owner of client-side contact state.
//!
//! Mutations are applied optimistically, then confirmed or rolled back once the
//! contact service answers. Rollback is per record: a failed call undoes only its own
//! change, so overlapping mutations on different records do not clobber each other.
//! State is held in a `watch` channel; every mutation goes through the sender's lock,
//! which is never held across an await.

mod filter;
mod state;

pub use filter::*;
pub use state::*;

use std::sync::Arc;

use tokio::sync::watch;

use crate::errors::AppError;
use crate::models::{Contact, ContactFormData, FilterUpdate, User, UserRole};
use crate::service::ContactService;

pub struct ContactStore {
    service: Arc<dyn ContactService>,
    state: watch::Sender<ContactState>,
}

impl ContactStore {
    /// Store with the default admin user.
    pub fn new(service: Arc<dyn ContactService>) -> Self {
        Self::with_user(service, User::default())
    }

    pub fn with_user(service: Arc<dyn ContactService>, user: User) -> Self {
        let (state, _) = watch::channel(ContactState::new(user));
        Self { service, state }
    }

    /// Detached copy of the current state.
    pub fn snapshot(&self) -> ContactState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ContactState> {
        self.state.subscribe()
    }

    /// Fetch all contacts. Failures are logged and recorded, never returned.
    pub async fn load_contacts(&self) {
        tracing::info!("Loading contacts");
        self.state.send_modify(|state| {
            state.set_loading(true);
            state.set_load_error(None);
        });

        match self.service.list().await {
            Ok(contacts) => {
                tracing::info!("Loaded {} contacts", contacts.len());
                self.state.send_modify(|state| {
                    state.set_contacts(contacts);
                    state.set_loading(false);
                });
            }
            Err(err) => {
                tracing::error!("Failed to load contacts: {}", err);
                self.state.send_modify(|state| {
                    state.set_load_error(Some(err.message()));
                    state.set_loading(false);
                });
            }
        }
    }

    /// Create a contact, showing a placeholder record until the service confirms it.
    pub async fn create_contact(&self, data: &ContactFormData) -> Result<Contact, AppError> {
        self.ensure_can_modify()?;

        let placeholder = Contact::placeholder(data);
        let temp_id = placeholder.id.clone();
        tracing::debug!("Creating contact {:?} as {}", data.name, temp_id);
        self.state.send_modify(|state| state.push_contact(placeholder));

        match self.service.create(data).await {
            Ok(contact) => {
                tracing::info!("Contact created: {}", contact.id);
                let confirmed = contact.clone();
                self.state.send_modify(|state| {
                    // A reload may already have dropped the placeholder.
                    if !state.replace_contact(&temp_id, confirmed.clone())
                        && state.contact(&confirmed.id).is_none()
                    {
                        state.push_contact(confirmed);
                    }
                });
                Ok(contact)
            }
            Err(err) => {
                tracing::error!("Failed to create contact: {}", err);
                self.state.send_modify(|state| {
                    state.remove_contact(&temp_id);
                });
                Err(err)
            }
        }
    }

    /// Update a contact optimistically. An id unknown to the store is a silent no-op
    /// and yields `Ok(None)`.
    pub async fn update_contact(
        &self,
        id: &str,
        data: &ContactFormData,
    ) -> Result<Option<Contact>, AppError> {
        self.ensure_can_modify()?;

        let mut previous = None;
        self.state.send_if_modified(|state| {
            let Some(existing) = state.contact(id).cloned() else {
                return false;
            };
            state.replace_contact(id, existing.merged(data));
            previous = Some(existing);
            true
        });

        let Some(previous) = previous else {
            tracing::debug!("Contact {} is not loaded, skipping update", id);
            return Ok(None);
        };

        tracing::debug!("Updating contact {}", id);
        match self.service.update(id, data).await {
            Ok(contact) => {
                tracing::info!("Contact updated: {}", id);
                let confirmed = contact.clone();
                self.state.send_modify(|state| {
                    state.replace_contact(id, confirmed);
                });
                Ok(Some(contact))
            }
            Err(err) => {
                tracing::error!("Failed to update contact {}: {}", id, err);
                self.state.send_modify(|state| {
                    state.replace_contact(id, previous);
                });
                Err(err)
            }
        }
    }

    /// Delete a contact optimistically; it reappears in place if the service refuses.
    pub async fn delete_contact(&self, id: &str) -> Result<(), AppError> {
        self.ensure_can_modify()?;

        let mut removed = None;
        self.state
            .send_modify(|state| removed = state.remove_contact(id));

        tracing::debug!("Deleting contact {}", id);
        match self.service.delete(id).await {
            Ok(()) => {
                tracing::info!("Contact deleted: {}", id);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to delete contact {}: {}", id, err);
                if let Some((index, contact)) = removed {
                    self.state
                        .send_modify(|state| state.restore_contact(index, contact));
                }
                Err(err)
            }
        }
    }

    /// Open the dialog: editing `contact` if given, creating otherwise.
    pub fn open_modal(&self, contact: Option<Contact>) {
        let modal = match contact {
            Some(contact) => {
                tracing::debug!("Opening modal for contact {}", contact.id);
                ModalState::Editing(contact)
            }
            None => {
                tracing::debug!("Opening modal for a new contact");
                ModalState::Creating
            }
        };
        self.state.send_modify(|state| state.set_modal(modal));
    }

    pub fn close_modal(&self) {
        tracing::debug!("Closing modal");
        self.state
            .send_modify(|state| state.set_modal(ModalState::Closed));
    }

    /// Submit the dialog form. Updates the edited record or creates a new one, then
    /// closes the dialog. On failure the dialog stays open.
    pub async fn submit_modal(&self, data: &ContactFormData) -> Result<Option<Contact>, AppError> {
        self.ensure_can_modify()?;
        data.validate()?;

        let modal = self.state.borrow().modal().clone();
        let saved = match modal {
            ModalState::Closed => {
                return Err(AppError::BadRequest("No contact form is open".to_string()))
            }
            ModalState::Creating => Some(self.create_contact(data).await?),
            ModalState::Editing(contact) => self.update_contact(&contact.id, data).await?,
        };

        self.close_modal();
        Ok(saved)
    }

    /// Merge a partial filter change and refilter.
    pub fn set_filters(&self, update: FilterUpdate) {
        tracing::debug!("Setting filters: {:?}", update);
        self.state.send_modify(|state| state.merge_filters(update));
    }

    pub fn clear_filters(&self) {
        self.set_filters(FilterUpdate::clear());
    }

    /// Recompute the filtered view from the current contacts and filters.
    pub fn apply_filters(&self) {
        self.state.send_modify(|state| state.refilter());
    }

    pub fn set_current_user(&self, user: User) {
        tracing::info!("Current user is now {} ({:?})", user.name, user.role);
        self.state
            .send_modify(|state| state.set_current_user(user));
    }

    /// Flip the current user between admin and viewer.
    pub fn toggle_role(&self) -> UserRole {
        let user = self.state.borrow().current_user().clone();
        let role = user.role.toggled();
        self.set_current_user(user.with_role(role));
        role
    }

    fn ensure_can_modify(&self) -> Result<(), AppError> {
        let user = self.state.borrow().current_user().clone();
        if user.can_modify() {
            return Ok(());
        }
        tracing::warn!("User {} attempted a modification as viewer", user.id);
        Err(AppError::Forbidden(
            "You don't have permission to modify contacts".to_string(),
        ))
    }
}
