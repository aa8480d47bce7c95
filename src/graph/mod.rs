// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Description Graph
//!
//! The stack is an explicit DAG of resource-description values. Edges are
//! never declared by hand: a node depends on exactly the nodes its
//! properties reference through [`Binding::Ref`].
//!
//! ```text
//! HostedZone ─────────────────────┬──────────────────────┐
//!                                 ▼                      │
//! OriginAccessIdentity ──┐   SiteCertificate             │
//!        │               ▼        │                      │
//!        │        SiteBucketPolicy│                      │
//!        ▼               ▲        ▼                      ▼
//!   SiteBucket ──────────┴──► SiteDistribution ──► SiteAliasRecord*
//!                                 │
//!                                 ▼
//!                              Outputs
//! ```
//!
//! Nodes can only reference nodes added before them, so cycles cannot be
//! expressed and insertion order is always a valid provisioning order.

pub mod plan;
pub mod resources;

pub use plan::plan;
pub use resources::{
    CertificateValidation, ResourceKind, ResourceSpec, SslSupportMethod, ViewerProtocolPolicy,
};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::errors::GraphError;

/// Logical id of a node in the resource graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Named value a provisioned resource exposes to its dependents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    HostedZoneId,
    OriginAccessIdentityId,
    /// Canonical user of the origin access identity, used as policy principal
    CanonicalUserId,
    BucketName,
    BucketArn,
    BucketRegionalDomainName,
    CertificateArn,
    DistributionId,
    DistributionDomainName,
    RecordName,
    OutputValue,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Pointer to an attribute of another node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub resource: ResourceId,
    pub attribute: Attribute,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.attribute)
    }
}

/// A property value: known now, or produced by an earlier resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    Literal(String),
    Ref(Reference),
}

impl Binding {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn reference(resource: &ResourceId, attribute: Attribute) -> Self {
        Self::Ref(Reference {
            resource: resource.clone(),
            attribute,
        })
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Ref(r) => Some(r),
            Self::Literal(_) => None,
        }
    }
}

/// A resource description and the nodes it depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: ResourceId,
    pub spec: ResourceSpec,
    /// Distinct referenced nodes, in first-reference order
    pub depends_on: Vec<ResourceId>,
}

impl ResourceNode {
    pub fn kind(&self) -> ResourceKind {
        self.spec.kind()
    }
}

/// Directed acyclic graph of resource descriptions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGraph {
    nodes: Vec<ResourceNode>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node
    ///
    /// # Errors
    /// - [`GraphError::DuplicateResource`] if `id` is taken
    /// - [`GraphError::UnknownReference`] if `spec` references a node that
    ///   is not in the graph yet
    pub fn add(&mut self, id: impl Into<ResourceId>, spec: ResourceSpec) -> Result<(), GraphError> {
        let id = id.into();
        if self.get(&id).is_some() {
            return Err(GraphError::DuplicateResource(id));
        }

        let mut depends_on: Vec<ResourceId> = Vec::new();
        for reference in spec.references() {
            if self.get(&reference.resource).is_none() {
                return Err(GraphError::UnknownReference {
                    resource: id,
                    target: reference.resource.clone(),
                });
            }
            if !depends_on.contains(&reference.resource) {
                depends_on.push(reference.resource.clone());
            }
        }

        self.nodes.push(ResourceNode {
            id,
            spec,
            depends_on,
        });
        Ok(())
    }

    pub fn get(&self, id: &ResourceId) -> Option<&ResourceNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ResourceNode> {
        self.nodes.iter()
    }

    /// Nodes of one kind, in insertion order
    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceNode> {
        self.nodes.iter().filter(move |node| node.kind() == kind)
    }

    /// Dependency order (Kahn's algorithm)
    ///
    /// Among nodes that are ready at the same time, the one added first goes
    /// first, so the order is stable across runs.
    pub fn topological_order(&self) -> Vec<&ResourceNode> {
        let index: HashMap<&ResourceId, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (&node.id, i))
            .collect();

        let mut in_degree: Vec<usize> = self.nodes.iter().map(|n| n.depends_on.len()).collect();
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            for dep in &node.depends_on {
                if let Some(&d) = index.get(dep) {
                    dependents[d].push(i);
                }
            }
        }

        let mut ready: BTreeSet<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(i, _)| i)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(next) = ready.pop_first() {
            order.push(&self.nodes[next]);
            for &dependent in &dependents[next] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> ResourceSpec {
        ResourceSpec::HostedZoneLookup {
            domain_name: "example.com".to_string(),
        }
    }

    fn output(from: &ResourceId) -> ResourceSpec {
        ResourceSpec::Output {
            name: "ZoneId".to_string(),
            description: "zone".to_string(),
            value: Binding::reference(from, Attribute::HostedZoneId),
        }
    }

    #[test]
    fn test_dependencies_follow_references() {
        let mut graph = ResourceGraph::new();
        graph.add("Zone", zone()).unwrap();
        graph.add("ZoneOutput", output(&"Zone".into())).unwrap();

        let node = graph.get(&"ZoneOutput".into()).unwrap();
        assert_eq!(node.depends_on, vec![ResourceId::new("Zone")]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut graph = ResourceGraph::new();
        graph.add("Zone", zone()).unwrap();
        assert_eq!(
            graph.add("Zone", zone()),
            Err(GraphError::DuplicateResource("Zone".into()))
        );
    }

    #[test]
    fn test_forward_reference_rejected() {
        let mut graph = ResourceGraph::new();
        let err = graph.add("ZoneOutput", output(&"Zone".into())).unwrap_err();
        assert!(matches!(err, GraphError::UnknownReference { .. }));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_topological_order_prefers_insertion_order() {
        let mut graph = ResourceGraph::new();
        graph.add("ZoneA", zone()).unwrap();
        graph.add("ZoneB", zone()).unwrap();
        graph.add("OutA", output(&"ZoneA".into())).unwrap();

        let ids: Vec<&str> = graph
            .topological_order()
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["ZoneA", "ZoneB", "OutA"]);
    }
}
