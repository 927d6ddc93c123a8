//! Service - Desired state of a replicated workload
//!
//! Pure domain entity without infrastructure dependencies.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TaskTemplate;
use crate::domain::Version;

/// Service - Persisted desired-state record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Service {
    /// Opaque unique ID, assigned at creation and never changed
    pub id: String,
    #[serde(default)]
    pub meta: Meta,
    pub spec: ServiceSpec,
}

/// Store-maintained bookkeeping for a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    #[serde(default)]
    pub version: Version,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// ServiceSpec - Caller-supplied desired state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ServiceSpec {
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TaskTemplate>,
    /// Desired number of running instances
    #[serde(default = "default_instances")]
    pub instances: u64,
}

fn default_instances() -> u64 {
    1
}

/// Name and free-form labels attached to a spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Annotations {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl Service {
    /// Build an uncommitted record. The store stamps `meta` on commit.
    pub fn new(id: impl Into<String>, spec: ServiceSpec) -> Self {
        Self {
            id: id.into(),
            meta: Meta::default(),
            spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.annotations.name
    }
}

impl ServiceSpec {
    pub fn new(name: impl Into<String>, template: TaskTemplate) -> Self {
        Self {
            annotations: Annotations::named(name),
            template: Some(template),
            instances: default_instances(),
        }
    }

    pub fn with_instances(mut self, instances: u64) -> Self {
        self.instances = instances;
        self
    }
}

impl Annotations {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}
