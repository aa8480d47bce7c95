//! Static website infrastructure: S3 bucket, CloudFront CDN, ACM certificate
//! and Route 53 records, described as a typed resource graph.
//!
//! The pipeline is split into a pure half and an effectful half:
//!
//! - [`config`] builds an immutable [`SiteConfig`] (production or
//!   non-production, as a sum type) and the deployment targets.
//! - [`resolver`] derives every domain-dependent value from a `SiteConfig`.
//! - [`graph`] turns the resolved site into a DAG of resource descriptions.
//! - [`provision`] walks the DAG in dependency order against a
//!   [`Provisioner`], the seam where a cloud SDK plugs in.
//! - [`template`] renders the DAG as a CloudFormation template instead.
//! - [`deploy`] ties one deployment run together.

pub mod config;
pub mod deploy;
pub mod domain;
pub mod errors;
pub mod graph;
pub mod provision;
pub mod resolver;
pub mod template;

// Re-export commonly used types
pub use config::{
    deployment_targets, DeploymentMode, DeploymentTarget, EnvironmentConfig, SiteConfig, TargetName,
};
pub use deploy::{plan_target, DeploymentReport, StackDeployer};
pub use domain::{AccountId, Hostname, Label, Region};
pub use errors::{
    ConfigurationError, GraphError, ProvisioningError, ProvisioningErrorKind, StackError,
    StackResult,
};
pub use graph::{plan, ResourceGraph, ResourceId, ResourceNode, ResourceSpec};
pub use provision::{
    DryRunProvisioner, Orchestrator, Provisioner, RecordingProvisioner, StackOutputs,
};
pub use resolver::{resolve, ResolvedSite};
pub use template::render_template;
