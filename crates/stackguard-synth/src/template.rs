//! The synthesized template document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SynthResult;

/// A single resource entry in the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfnResource {
    /// Resource type, e.g. `AWS::S3::Bucket`.
    #[serde(rename = "Type")]
    pub resource_type: String,

    /// Resource properties.
    #[serde(rename = "Properties", default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,

    /// Logical ids this resource must be created after.
    #[serde(rename = "DependsOn", default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// What happens to the physical resource on stack update replacement.
    #[serde(rename = "UpdateReplacePolicy", default, skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<String>,

    /// What happens to the physical resource on stack deletion.
    #[serde(rename = "DeletionPolicy", default, skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<String>,
}

impl CfnResource {
    /// Create a resource of the given type with no properties.
    #[must_use]
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties: Map::new(),
            depends_on: Vec::new(),
            update_replace_policy: None,
            deletion_policy: None,
        }
    }

    /// Set a property, returning `self`.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Keep the physical resource when it is replaced or the stack is deleted.
    #[must_use]
    pub fn retained(mut self) -> Self {
        self.update_replace_policy = Some("Retain".to_owned());
        self.deletion_policy = Some("Retain".to_owned());
        self
    }

    /// Add a dependency on another logical id, ignoring duplicates.
    pub fn add_dependency(&mut self, logical_id: &str) {
        if !self.depends_on.iter().any(|d| d == logical_id) {
            self.depends_on.push(logical_id.to_owned());
        }
    }
}

/// A synthesized template: resources keyed by logical id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Free-form description.
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Resources keyed by logical id.
    #[serde(rename = "Resources", default)]
    pub resources: BTreeMap<String, CfnResource>,
}

impl Template {
    /// Parse a template previously rendered with [`Template::to_json_pretty`].
    pub fn from_json(json: &str) -> SynthResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SynthResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as a JSON value.
    pub fn to_value(&self) -> SynthResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Look up a resource by logical id.
    #[must_use]
    pub fn resource(&self, logical_id: &str) -> Option<&CfnResource> {
        self.resources.get(logical_id)
    }

    /// All resources of a type, in logical-id order.
    #[must_use]
    pub fn find_resources(&self, resource_type: &str) -> Vec<(&str, &CfnResource)> {
        self.resources
            .iter()
            .filter(|(_, r)| r.resource_type == resource_type)
            .map(|(id, r)| (id.as_str(), r))
            .collect()
    }
}
