// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource descriptions
//!
//! One variant per provisioning step of the static site. These are plain
//! data; the provisioner behind the orchestrator decides what they become.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Binding, Reference};
use crate::resolver::ErrorResponse;

/// Read-only permission granted to the origin access identity
pub const GET_OBJECT_ACTION: &str = "s3:GetObject";

/// Lowest TLS version viewers may negotiate
pub const MINIMUM_PROTOCOL_VERSION: &str = "TLSv1.2_2021";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocolPolicy {
    RedirectToHttps,
    HttpsOnly,
    AllowAll,
}

impl ViewerProtocolPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RedirectToHttps => "redirect-to-https",
            Self::HttpsOnly => "https-only",
            Self::AllowAll => "allow-all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslSupportMethod {
    SniOnly,
    Vip,
}

impl SslSupportMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SniOnly => "sni-only",
            Self::Vip => "vip",
        }
    }
}

/// How the certificate proves domain ownership
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CertificateValidation {
    /// Validation records are written into the looked-up zone
    Dns { hosted_zone_id: Binding },
}

/// Discriminant of [`ResourceSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    HostedZoneLookup,
    OriginAccessIdentity,
    Bucket,
    BucketPolicy,
    Certificate,
    Distribution,
    AliasRecord,
    Output,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:?}", self))
    }
}

/// Description of one resource in the stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceSpec {
    /// Find the existing hosted zone for the apex domain
    HostedZoneLookup { domain_name: String },

    /// Principal the CDN uses to read from the bucket
    OriginAccessIdentity { comment: String },

    /// Private bucket holding the site content
    Bucket {
        bucket_name: String,
        block_public_access: bool,
        website_index_document: String,
    },

    /// Grant `actions` on the bucket's objects to the access identity only
    BucketPolicy {
        bucket: Binding,
        principal_canonical_user: Binding,
        actions: Vec<String>,
        /// ARN of the bucket; objects are `{arn}/*`
        bucket_arn: Binding,
    },

    Certificate {
        domain_name: String,
        subject_alternative_names: Vec<String>,
        validation: CertificateValidation,
    },

    Distribution {
        aliases: Vec<String>,
        certificate_arn: Binding,
        origin_domain_name: Binding,
        origin_access_identity: Binding,
        viewer_protocol_policy: ViewerProtocolPolicy,
        default_root_object: String,
        error_responses: Vec<ErrorResponse>,
        minimum_protocol_version: String,
        ssl_support_method: SslSupportMethod,
    },

    /// A record aliasing `record_name` to the CDN
    AliasRecord {
        record_name: String,
        hosted_zone_id: Binding,
        target_domain_name: Binding,
    },

    /// Value reported to the operator after a successful run
    Output {
        name: String,
        description: String,
        value: Binding,
    },
}

impl ResourceSpec {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::HostedZoneLookup { .. } => ResourceKind::HostedZoneLookup,
            Self::OriginAccessIdentity { .. } => ResourceKind::OriginAccessIdentity,
            Self::Bucket { .. } => ResourceKind::Bucket,
            Self::BucketPolicy { .. } => ResourceKind::BucketPolicy,
            Self::Certificate { .. } => ResourceKind::Certificate,
            Self::Distribution { .. } => ResourceKind::Distribution,
            Self::AliasRecord { .. } => ResourceKind::AliasRecord,
            Self::Output { .. } => ResourceKind::Output,
        }
    }

    /// Every binding this spec carries, in declaration order
    pub fn bindings(&self) -> Vec<&Binding> {
        match self {
            Self::HostedZoneLookup { .. }
            | Self::OriginAccessIdentity { .. }
            | Self::Bucket { .. } => Vec::new(),
            Self::BucketPolicy {
                bucket,
                principal_canonical_user,
                bucket_arn,
                ..
            } => vec![bucket, principal_canonical_user, bucket_arn],
            Self::Certificate {
                validation: CertificateValidation::Dns { hosted_zone_id },
                ..
            } => vec![hosted_zone_id],
            Self::Distribution {
                certificate_arn,
                origin_domain_name,
                origin_access_identity,
                ..
            } => vec![certificate_arn, origin_domain_name, origin_access_identity],
            Self::AliasRecord {
                hosted_zone_id,
                target_domain_name,
                ..
            } => vec![hosted_zone_id, target_domain_name],
            Self::Output { value, .. } => vec![value],
        }
    }

    /// References to other nodes
    pub fn references(&self) -> Vec<&Reference> {
        self.bindings()
            .into_iter()
            .filter_map(Binding::as_reference)
            .collect()
    }

    /// Whether provisioning only reads existing state
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::HostedZoneLookup { .. } | Self::Output { .. })
    }
}
