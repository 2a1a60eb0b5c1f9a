//! Store state snapshot.

use super::filter::apply_filters;
use crate::models::{Contact, ContactFilters, FilterUpdate, User};

/// Add/edit dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Creating,
    Editing(Contact),
}

/// Everything the contact UI renders from.
///
/// `filtered_contacts` is derived from `contacts` and `filters`; every mutator that
/// touches either one recomputes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactState {
    contacts: Vec<Contact>,
    filtered_contacts: Vec<Contact>,
    current_user: User,
    is_loading: bool,
    modal: ModalState,
    filters: ContactFilters,
    load_error: Option<String>,
}

impl ContactState {
    pub fn new(current_user: User) -> Self {
        Self {
            contacts: Vec::new(),
            filtered_contacts: Vec::new(),
            current_user,
            is_loading: false,
            modal: ModalState::Closed,
            filters: ContactFilters::default(),
            load_error: None,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn filtered_contacts(&self) -> &[Contact] {
        &self.filtered_contacts
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn filters(&self) -> &ContactFilters {
        &self.filters
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    /// Why the last load failed, if it did.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn is_modal_open(&self) -> bool {
        !matches!(self.modal, ModalState::Closed)
    }

    /// The record being edited; `None` while closed or creating.
    pub fn editing_contact(&self) -> Option<&Contact> {
        match &self.modal {
            ModalState::Editing(contact) => Some(contact),
            _ => None,
        }
    }

    pub fn contact(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Distinct non-empty company names, first-seen order.
    pub fn companies(&self) -> Vec<&str> {
        let mut companies: Vec<&str> = Vec::new();
        for contact in &self.contacts {
            let company = contact.company.as_str();
            if !company.is_empty() && !companies.contains(&company) {
                companies.push(company);
            }
        }
        companies
    }

    pub(crate) fn refilter(&mut self) {
        self.filtered_contacts = apply_filters(&self.contacts, &self.filters);
    }

    pub(crate) fn set_contacts(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
        self.refilter();
    }

    pub(crate) fn push_contact(&mut self, contact: Contact) {
        self.contacts.push(contact);
        self.refilter();
    }

    /// Replace record `id` in place. Returns false when it is gone.
    pub(crate) fn replace_contact(&mut self, id: &str, contact: Contact) -> bool {
        let Some(slot) = self.contacts.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        *slot = contact;
        self.refilter();
        true
    }

    pub(crate) fn remove_contact(&mut self, id: &str) -> Option<(usize, Contact)> {
        let index = self.contacts.iter().position(|c| c.id == id)?;
        let removed = self.contacts.remove(index);
        self.refilter();
        Some((index, removed))
    }

    /// Put a removed record back near its old position unless it already reappeared.
    pub(crate) fn restore_contact(&mut self, index: usize, contact: Contact) {
        if self.contact(&contact.id).is_some() {
            return;
        }
        let index = index.min(self.contacts.len());
        self.contacts.insert(index, contact);
        self.refilter();
    }

    pub(crate) fn merge_filters(&mut self, update: FilterUpdate) {
        self.filters.merge(update);
        self.refilter();
    }

    pub(crate) fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub(crate) fn set_load_error(&mut self, error: Option<String>) {
        self.load_error = error;
    }

    pub(crate) fn set_modal(&mut self, modal: ModalState) {
        self.modal = modal;
    }

    pub(crate) fn set_current_user(&mut self, user: User) {
        self.current_user = user;
    }
}

impl Default for ContactState {
    fn default() -> Self {
        Self::new(User::default())
    }
}
