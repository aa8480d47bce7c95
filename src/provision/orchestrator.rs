// Copyright (c) 2025 - Cowboy AI, Inc.
//! Dependency-ordered walk over a resource graph

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{AttributeStore, Attributes, Provisioner};
use crate::errors::{StackError, StackResult};
use crate::graph::plan::{BUCKET_NAME_OUTPUT, DISTRIBUTION_DOMAIN_OUTPUT, SITE_URL_OUTPUT};
use crate::graph::{Attribute, ResourceGraph, ResourceId, ResourceNode, ResourceSpec};

/// The three values an operator gets back from a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackOutputs {
    pub site_url: String,
    pub bucket_name: String,
    pub distribution_domain_name: String,
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedStack {
    /// Resources in the order they were provisioned
    pub resources: Vec<ResourceId>,
    pub attributes: AttributeStore,
}

impl ProvisionedStack {
    pub fn output(&self, name: &str) -> Option<&str> {
        self.attributes
            .attributes(&ResourceId::new(name))
            .and_then(|attrs| attrs.get(Attribute::OutputValue))
    }

    pub fn outputs(&self) -> StackResult<StackOutputs> {
        let get = |name: &str| {
            self.output(name)
                .map(str::to_string)
                .ok_or_else(|| StackError::MissingOutput(name.to_string()))
        };
        Ok(StackOutputs {
            site_url: get(SITE_URL_OUTPUT)?,
            bucket_name: get(BUCKET_NAME_OUTPUT)?,
            distribution_domain_name: get(DISTRIBUTION_DOMAIN_OUTPUT)?,
        })
    }
}

/// Drives a [`Provisioner`] through a [`ResourceGraph`]
pub struct Orchestrator<P: Provisioner> {
    provisioner: P,
}

impl<P: Provisioner> Orchestrator<P> {
    pub fn new(provisioner: P) -> Self {
        Self { provisioner }
    }

    pub fn provisioner(&self) -> &P {
        &self.provisioner
    }

    pub fn into_inner(self) -> P {
        self.provisioner
    }

    /// Provision every node of `graph` in dependency order
    ///
    /// Stops at the first failure. Resources created before it are left in
    /// place and listed in the error log for the operator.
    pub async fn run(&mut self, graph: &ResourceGraph) -> StackResult<ProvisionedStack> {
        let mut store = AttributeStore::new();
        let mut provisioned: Vec<ResourceId> = Vec::with_capacity(graph.len());

        for node in graph.topological_order() {
            debug!(resource = %node.id, kind = %node.kind(), "Provisioning resource");

            match self.provision_node(node, &store).await {
                Ok(attributes) => {
                    info!(
                        resource = %node.id,
                        kind = %node.kind(),
                        attributes = attributes.len(),
                        "Resource ready"
                    );
                    store.insert(node.id.clone(), attributes);
                    provisioned.push(node.id.clone());
                }
                Err(e) => {
                    error!(
                        resource = %node.id,
                        error = %e,
                        left_in_place = ?provisioned,
                        "Provisioning aborted"
                    );
                    return Err(e.into());
                }
            }
        }

        info!(resources = provisioned.len(), "Stack provisioned");
        Ok(ProvisionedStack {
            resources: provisioned,
            attributes: store,
        })
    }

    async fn provision_node(
        &mut self,
        node: &ResourceNode,
        store: &AttributeStore,
    ) -> Result<Attributes, crate::errors::ProvisioningError> {
        // Every input must exist before the node is handed over
        for binding in node.spec.bindings() {
            store.resolve(&node.id, binding)?;
        }

        match &node.spec {
            // Outputs are emitted, not created
            ResourceSpec::Output { value, .. } => Ok(Attributes::new()
                .with(Attribute::OutputValue, store.resolve(&node.id, value)?)),
            _ => self.provisioner.provision(node, store).await,
        }
    }
}
