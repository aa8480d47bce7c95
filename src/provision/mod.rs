// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioning Orchestrator
//!
//! Planning is pure; provisioning is where I/O happens. The orchestrator
//! walks a [`ResourceGraph`](crate::graph::ResourceGraph) in dependency
//! order and hands each node to a [`Provisioner`], which is the seam where a
//! cloud SDK plugs in.
//!
//! ```text
//! plan()                      Orchestrator::run()
//! ──────                      ───────────────────
//! ResolvedSite                ResourceGraph
//!      │                           │ topological order
//!      ▼                           ▼
//! ┌─────────────┐  graph   ┌──────────────┐  node + inputs  ┌─────────────┐
//! │ (pure func) │ ───────> │  walk nodes  │ ──────────────> │ Provisioner │
//! └─────────────┘          └──────────────┘ <────────────── └─────────────┘
//!                                 │            Attributes
//!                                 ▼
//!                          ProvisionedStack
//! ```
//!
//! Ordering comes only from data: a node is handed over once every
//! attribute it references exists. The first failure stops the run and is
//! returned unchanged. Nothing is retried or rolled back.

pub mod dry_run;
pub mod orchestrator;

pub use dry_run::{DryRunProvisioner, RecordingProvisioner};
pub use orchestrator::{Orchestrator, ProvisionedStack, StackOutputs};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::errors::{ProvisioningError, ProvisioningErrorKind};
use crate::graph::{Attribute, Binding, Reference, ResourceId, ResourceNode};

/// Attributes produced by provisioning one resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(BTreeMap<Attribute, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attribute: Attribute, value: impl Into<String>) -> Self {
        self.0.insert(attribute, value.into());
        self
    }

    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.0.get(&attribute).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Attributes of every resource provisioned so far in a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeStore {
    resources: HashMap<ResourceId, Attributes>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: ResourceId, attributes: Attributes) {
        self.resources.insert(resource, attributes);
    }

    pub fn attributes(&self, resource: &ResourceId) -> Option<&Attributes> {
        self.resources.get(resource)
    }

    pub fn lookup(&self, reference: &Reference) -> Option<&str> {
        self.resources
            .get(&reference.resource)
            .and_then(|attrs| attrs.get(reference.attribute))
    }

    /// Concrete value of a binding
    ///
    /// `requester` is the node asking, and is what the error names.
    pub fn resolve(
        &self,
        requester: &ResourceId,
        binding: &Binding,
    ) -> Result<String, ProvisioningError> {
        match binding {
            Binding::Literal(value) => Ok(value.clone()),
            Binding::Ref(reference) => self
                .lookup(reference)
                .map(str::to_string)
                .ok_or_else(|| {
                    ProvisioningError::new(
                        requester.clone(),
                        ProvisioningErrorKind::UnresolvedReference,
                        format!("{} has not been provisioned", reference),
                    )
                }),
        }
    }
}

/// Creates real resources from resource descriptions
///
/// Implementations receive nodes in dependency order. `inputs` already
/// holds every attribute the node references.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Create (or look up) the resource described by `node`
    ///
    /// # Returns
    ///
    /// The attributes dependents may reference
    async fn provision(
        &mut self,
        node: &ResourceNode,
        inputs: &AttributeStore,
    ) -> Result<Attributes, ProvisioningError>;
}
