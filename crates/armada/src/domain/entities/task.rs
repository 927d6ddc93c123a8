//! TaskTemplate - How one instance of a service runs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ResourceRequirements;

/// Task template carrying the runtime to execute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TaskTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<RuntimeSpec>,
}

/// One-of across runtime kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeSpec {
    Container(ContainerSpec),
    /// Accepted on the wire, not yet runnable
    Plugin(PluginSpec),
}

/// Container runtime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContainerSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Environment in `KEY=value` form
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageSpec {
    #[serde(default)]
    pub reference: String,
}

/// Plugin runtime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PluginSpec {
    #[serde(default)]
    pub name: String,
}

impl TaskTemplate {
    pub fn from_container(container: ContainerSpec) -> Self {
        Self {
            runtime: Some(RuntimeSpec::Container(container)),
        }
    }

    /// The container runtime, if that is the selected variant
    pub fn container(&self) -> Option<&ContainerSpec> {
        match &self.runtime {
            Some(RuntimeSpec::Container(c)) => Some(c),
            _ => None,
        }
    }
}

impl RuntimeSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeSpec::Container(_) => "container",
            RuntimeSpec::Plugin(_) => "plugin",
        }
    }
}

impl ContainerSpec {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            image: Some(ImageSpec {
                reference: reference.into(),
            }),
            ..Default::default()
        }
    }

    pub fn with_resources(mut self, resources: ResourceRequirements) -> Self {
        self.resources = Some(resources);
        self
    }
}
