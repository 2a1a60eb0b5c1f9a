//! Linear filtering of the contact list.

use crate::models::{Contact, ContactFilters};

/// Contacts passing `filters`, in their original order.
pub fn apply_filters(contacts: &[Contact], filters: &ContactFilters) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|contact| matches_filters(contact, filters))
        .cloned()
        .collect()
}

/// Search and company filters are ANDed; each empty filter passes everything.
pub fn matches_filters(contact: &Contact, filters: &ContactFilters) -> bool {
    matches_search(contact, &filters.search) && matches_company(contact, &filters.company)
}

fn matches_search(contact: &Contact, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    let needle = search.to_lowercase();
    contains_ignore_case(&contact.name, &needle)
        || contains_ignore_case(&contact.email, &needle)
        || contains_ignore_case(&contact.company, &needle)
        // Phone numbers are compared verbatim.
        || contact.phone.contains(search)
}

fn matches_company(contact: &Contact, company: &str) -> bool {
    company.is_empty() || contains_ignore_case(&contact.company, &company.to_lowercase())
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
