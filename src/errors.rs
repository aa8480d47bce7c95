//! Error types for static site stack operations

use thiserror::Error;

use crate::domain::HostnameError;
use crate::graph::ResourceId;

/// Invalid or missing input, raised before any resource is touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Apex domain name was not supplied
    #[error("Configuration error: domain_name is required and must not be empty")]
    MissingDomainName,

    /// Non-production deployment without a subdomain
    #[error("Configuration error: site_sub_domain is required for non-production deployments")]
    MissingSubDomain,

    /// Required environment variable absent or empty
    #[error("Configuration error: environment variable {variable} is not set")]
    MissingEnvironment { variable: String },

    /// A field was supplied but does not validate
    #[error("Configuration error: invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Unknown deployment target name
    #[error("Configuration error: unknown deployment target {0:?} (expected \"prod\" or \"dev\")")]
    UnknownTarget(String),
}

impl ConfigurationError {
    pub(crate) fn invalid_hostname(field: &'static str, err: HostnameError) -> Self {
        Self::InvalidField {
            field,
            reason: err.to_string(),
        }
    }
}

/// Resource graph construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Two nodes share a logical id
    #[error("Resource {0} is already declared")]
    DuplicateResource(ResourceId),

    /// A node references a resource that has not been declared before it
    #[error("Resource {resource} references undeclared resource {target}")]
    UnknownReference {
        resource: ResourceId,
        target: ResourceId,
    },
}

/// Category of a provisioning failure reported by the orchestrator's backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningErrorKind {
    PermissionDenied,
    NameConflict,
    ValidationTimeout,
    /// A referenced attribute was not produced by an earlier resource
    UnresolvedReference,
    Failed,
}

impl std::fmt::Display for ProvisioningErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PermissionDenied => "permission denied",
            Self::NameConflict => "name conflict",
            Self::ValidationTimeout => "validation timeout",
            Self::UnresolvedReference => "unresolved reference",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Failure while creating a resource
///
/// Propagated to the operator unchanged; nothing in this crate retries or
/// rolls back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Provisioning error on {resource} ({kind}): {message}")]
pub struct ProvisioningError {
    pub resource: ResourceId,
    pub kind: ProvisioningErrorKind,
    pub message: String,
}

impl ProvisioningError {
    pub fn new(
        resource: ResourceId,
        kind: ProvisioningErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            resource,
            kind,
            message: message.into(),
        }
    }
}

/// Top-level error for a deployment run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),

    /// A required stack output was not produced
    #[error("Stack output {0} was not produced")]
    MissingOutput(String),
}

/// Result type for stack operations
pub type StackResult<T> = Result<T, StackError>;
