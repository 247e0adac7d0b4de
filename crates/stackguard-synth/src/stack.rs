//! The stack: a named collection of constructs and the resources they emit.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use stackguard_core::StackEnv;

use crate::error::{SynthError, SynthResult};
use crate::logical_id::logical_id;
use crate::template::{CfnResource, Template};

/// Path separator for construct paths.
const PATH_SEP: char = '/';

/// Stack-relative path of a construct, e.g. `ExampleS3Lambda/S3Bucket`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstructPath(Vec<String>);

impl ConstructPath {
    /// The stack itself.
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of a child construct.
    pub fn child(&self, id: &str) -> SynthResult<Self> {
        if id.is_empty() {
            return Err(SynthError::InvalidConstructId {
                id: id.to_owned(),
                reason: "must not be empty",
            });
        }
        if id.contains(PATH_SEP) {
            return Err(SynthError::InvalidConstructId {
                id: id.to_owned(),
                reason: "must not contain '/'",
            });
        }
        let mut components = self.0.clone();
        components.push(id.to_owned());
        Ok(Self(components))
    }

    /// Path components.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ConstructPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

/// A deployable unit: constructs register here and emit resources into it.
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    env: StackEnv,
    description: Option<String>,
    constructs: BTreeSet<ConstructPath>,
    resources: BTreeMap<String, CfnResource>,
}

impl Stack {
    /// Create an empty stack.
    #[must_use]
    pub fn new(name: impl Into<String>, env: StackEnv) -> Self {
        Self {
            name: name.into(),
            env,
            description: None,
            constructs: BTreeSet::new(),
            resources: BTreeMap::new(),
        }
    }

    /// Set the template description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Stack name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target environment.
    #[must_use]
    pub fn env(&self) -> &StackEnv {
        &self.env
    }

    /// Claim a construct path, failing if another construct already owns it.
    pub fn register_construct(&mut self, path: &ConstructPath) -> SynthResult<()> {
        if !self.constructs.insert(path.clone()) {
            return Err(SynthError::DuplicateConstruct {
                stack: self.name.clone(),
                path: path.to_string(),
            });
        }
        Ok(())
    }

    /// Add a resource emitted by the construct at `path`, returning its logical id.
    pub fn add_resource(&mut self, path: &ConstructPath, resource: CfnResource) -> SynthResult<String> {
        let id = logical_id(path.components());
        if self.resources.contains_key(&id) {
            return Err(SynthError::DuplicateLogicalId {
                stack: self.name.clone(),
                logical_id: id,
            });
        }

        tracing::debug!(
            stack = %self.name,
            path = %path,
            logical_id = %id,
            resource_type = %resource.resource_type,
            "added resource"
        );
        self.resources.insert(id.clone(), resource);
        Ok(id)
    }

    /// Mutable access to a resource already added to the stack.
    pub fn resource_mut(&mut self, logical_id: &str) -> Option<&mut CfnResource> {
        self.resources.get_mut(logical_id)
    }

    /// Render the stack's template.
    #[must_use]
    pub fn synth(&self) -> Template {
        tracing::info!(
            stack = %self.name,
            env = %self.env,
            resources = self.resources.len(),
            "synthesized stack"
        );
        Template {
            description: self.description.clone(),
            resources: self.resources.clone(),
        }
    }
}
