//! Contact list filters.

use serde::{Deserialize, Serialize};

/// Active filters. An empty string means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilters {
    pub search: String,
    pub company: String,
}

/// Partial filter change; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub company: Option<String>,
}

impl ContactFilters {
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(search) = update.search {
            self.search = search;
        }
        if let Some(company) = update.company {
            self.company = company;
        }
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.company.is_empty()
    }
}

impl FilterUpdate {
    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            company: None,
        }
    }

    pub fn company(company: impl Into<String>) -> Self {
        Self {
            search: None,
            company: Some(company.into()),
        }
    }

    /// Update that resets both filters.
    pub fn clear() -> Self {
        Self {
            search: Some(String::new()),
            company: Some(String::new()),
        }
    }
}
