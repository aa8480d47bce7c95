// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioners that do not talk to a cloud provider
//!
//! - [`DryRunProvisioner`] logs each resource and fabricates deterministic
//!   attributes, so a full run can be exercised offline.
//! - [`RecordingProvisioner`] wraps another provisioner and remembers the
//!   order resources were handed to it.

use async_trait::async_trait;
use tracing::info;

use super::{AttributeStore, Attributes, Provisioner};
use crate::domain::{AccountId, Region};
use crate::errors::ProvisioningError;
use crate::graph::{Attribute, CertificateValidation, ResourceId, ResourceNode, ResourceSpec};

/// Logs resources instead of creating them
#[derive(Debug, Clone)]
pub struct DryRunProvisioner {
    account: String,
    region: Region,
}

impl DryRunProvisioner {
    pub fn new(account: &AccountId, region: Region) -> Self {
        Self {
            account: account.to_string(),
            region,
        }
    }

    fn fake_id(prefix: &str, resource: &ResourceId) -> String {
        format!("{}DRYRUN{}", prefix, resource.as_str().to_ascii_uppercase())
    }
}

impl Default for DryRunProvisioner {
    fn default() -> Self {
        Self {
            account: "000000000000".to_string(),
            region: Region::UsEast1,
        }
    }
}

#[async_trait]
impl Provisioner for DryRunProvisioner {
    async fn provision(
        &mut self,
        node: &ResourceNode,
        inputs: &AttributeStore,
    ) -> Result<Attributes, ProvisioningError> {
        let id = &node.id;
        let attributes = match &node.spec {
            ResourceSpec::HostedZoneLookup { domain_name } => {
                info!(resource = %id, zone = %domain_name, "[dry-run] Look up hosted zone");
                Attributes::new().with(Attribute::HostedZoneId, Self::fake_id("Z", id))
            }
            ResourceSpec::OriginAccessIdentity { comment } => {
                info!(resource = %id, comment = %comment, "[dry-run] Create origin access identity");
                Attributes::new()
                    .with(Attribute::OriginAccessIdentityId, Self::fake_id("E", id))
                    .with(
                        Attribute::CanonicalUserId,
                        format!("canonical-user-{}", id.as_str().to_ascii_lowercase()),
                    )
            }
            ResourceSpec::Bucket {
                bucket_name,
                block_public_access,
                ..
            } => {
                info!(
                    resource = %id,
                    bucket = %bucket_name,
                    block_public_access,
                    "[dry-run] Create bucket"
                );
                Attributes::new()
                    .with(Attribute::BucketName, bucket_name.clone())
                    .with(Attribute::BucketArn, format!("arn:aws:s3:::{bucket_name}"))
                    .with(
                        Attribute::BucketRegionalDomainName,
                        format!("{bucket_name}.s3.{}.amazonaws.com", self.region),
                    )
            }
            ResourceSpec::BucketPolicy {
                bucket,
                principal_canonical_user,
                actions,
                ..
            } => {
                info!(
                    resource = %id,
                    bucket = %inputs.resolve(id, bucket)?,
                    principal = %inputs.resolve(id, principal_canonical_user)?,
                    actions = ?actions,
                    "[dry-run] Attach bucket policy"
                );
                Attributes::new()
            }
            ResourceSpec::Certificate {
                domain_name,
                subject_alternative_names,
                validation: CertificateValidation::Dns { hosted_zone_id },
            } => {
                info!(
                    resource = %id,
                    domain = %domain_name,
                    sans = ?subject_alternative_names,
                    zone = %inputs.resolve(id, hosted_zone_id)?,
                    "[dry-run] Request DNS-validated certificate"
                );
                Attributes::new().with(
                    Attribute::CertificateArn,
                    format!(
                        "arn:aws:acm:{}:{}:certificate/dryrun-{}",
                        self.region, self.account, domain_name
                    ),
                )
            }
            ResourceSpec::Distribution {
                aliases,
                origin_domain_name,
                ..
            } => {
                info!(
                    resource = %id,
                    aliases = ?aliases,
                    origin = %inputs.resolve(id, origin_domain_name)?,
                    "[dry-run] Create distribution"
                );
                let host = aliases
                    .first()
                    .map(|alias| alias.replace('.', "-"))
                    .unwrap_or_else(|| id.as_str().to_ascii_lowercase());
                Attributes::new()
                    .with(Attribute::DistributionId, Self::fake_id("E", id))
                    .with(
                        Attribute::DistributionDomainName,
                        format!("dryrun-{host}.cloudfront.net"),
                    )
            }
            ResourceSpec::AliasRecord {
                record_name,
                target_domain_name,
                ..
            } => {
                info!(
                    resource = %id,
                    record = %record_name,
                    target = %inputs.resolve(id, target_domain_name)?,
                    "[dry-run] Create alias record"
                );
                Attributes::new().with(Attribute::RecordName, record_name.clone())
            }
            ResourceSpec::Output { value, .. } => {
                Attributes::new().with(Attribute::OutputValue, inputs.resolve(id, value)?)
            }
        };
        Ok(attributes)
    }
}

/// Records the provisioning order of an inner provisioner
#[derive(Debug, Clone, Default)]
pub struct RecordingProvisioner<P> {
    inner: P,
    provisioned: Vec<ResourceId>,
}

impl<P: Provisioner> RecordingProvisioner<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            provisioned: Vec::new(),
        }
    }

    /// Resources the inner provisioner completed, in order
    pub fn provisioned(&self) -> &[ResourceId] {
        &self.provisioned
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

#[async_trait]
impl<P: Provisioner> Provisioner for RecordingProvisioner<P> {
    async fn provision(
        &mut self,
        node: &ResourceNode,
        inputs: &AttributeStore,
    ) -> Result<Attributes, ProvisioningError> {
        let attributes = self.inner.provision(node, inputs).await?;
        self.provisioned.push(node.id.clone());
        Ok(attributes)
    }
}
