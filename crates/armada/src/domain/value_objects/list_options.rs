//! ListOptions - Filtering for service listings

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Options accepted by the list operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListOptions {
    /// Matches services whose name or ID starts with this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ListOptions {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
        }
    }

    /// The query to filter by. An empty query is the same as none.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }
}
