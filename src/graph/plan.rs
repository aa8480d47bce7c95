// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stack planning: [`ResolvedSite`] → [`ResourceGraph`]
//!
//! Pure. The node insertion order below is the provisioning order, and every
//! reference points backwards, so `topological_order()` reproduces it.

use super::resources::{GET_OBJECT_ACTION, MINIMUM_PROTOCOL_VERSION};
use super::{
    Attribute, Binding, CertificateValidation, ResourceGraph, ResourceId, ResourceSpec,
    SslSupportMethod, ViewerProtocolPolicy,
};
use crate::errors::GraphError;
use crate::resolver::{ResolvedSite, INDEX_DOCUMENT};

pub const HOSTED_ZONE: &str = "HostedZone";
pub const ORIGIN_ACCESS_IDENTITY: &str = "OriginAccessIdentity";
pub const SITE_BUCKET: &str = "SiteBucket";
pub const SITE_BUCKET_POLICY: &str = "SiteBucketPolicy";
pub const SITE_CERTIFICATE: &str = "SiteCertificate";
pub const SITE_DISTRIBUTION: &str = "SiteDistribution";
pub const SITE_ALIAS_RECORD: &str = "SiteAliasRecord";
pub const APEX_ALIAS_RECORD: &str = "ApexAliasRecord";

pub const SITE_URL_OUTPUT: &str = "SiteUrl";
pub const BUCKET_NAME_OUTPUT: &str = "BucketName";
pub const DISTRIBUTION_DOMAIN_OUTPUT: &str = "DistributionDomainName";

/// Build the resource graph for a resolved site
pub fn plan(site: &ResolvedSite) -> ResourceGraph {
    match try_plan(site) {
        Ok(graph) => graph,
        // Ids are constants and every node references only earlier ones
        Err(e) => unreachable!("static site plan is well formed: {e}"),
    }
}

fn try_plan(site: &ResolvedSite) -> Result<ResourceGraph, GraphError> {
    let zone = ResourceId::new(HOSTED_ZONE);
    let identity = ResourceId::new(ORIGIN_ACCESS_IDENTITY);
    let bucket = ResourceId::new(SITE_BUCKET);
    let certificate = ResourceId::new(SITE_CERTIFICATE);
    let distribution = ResourceId::new(SITE_DISTRIBUTION);

    let mut graph = ResourceGraph::new();

    graph.add(
        zone.clone(),
        ResourceSpec::HostedZoneLookup {
            domain_name: site.domain_name.to_string(),
        },
    )?;

    graph.add(
        identity.clone(),
        ResourceSpec::OriginAccessIdentity {
            comment: format!("OAI for {}", site.site_domain),
        },
    )?;

    graph.add(
        bucket.clone(),
        ResourceSpec::Bucket {
            bucket_name: site.bucket_name().to_string(),
            block_public_access: true,
            website_index_document: INDEX_DOCUMENT.to_string(),
        },
    )?;

    graph.add(
        SITE_BUCKET_POLICY,
        ResourceSpec::BucketPolicy {
            bucket: Binding::reference(&bucket, Attribute::BucketName),
            principal_canonical_user: Binding::reference(&identity, Attribute::CanonicalUserId),
            actions: vec![GET_OBJECT_ACTION.to_string()],
            bucket_arn: Binding::reference(&bucket, Attribute::BucketArn),
        },
    )?;

    graph.add(
        certificate.clone(),
        ResourceSpec::Certificate {
            domain_name: site.certificate.primary.to_string(),
            subject_alternative_names: site
                .certificate
                .subject_alternative_names
                .iter()
                .map(ToString::to_string)
                .collect(),
            validation: CertificateValidation::Dns {
                hosted_zone_id: Binding::reference(&zone, Attribute::HostedZoneId),
            },
        },
    )?;

    graph.add(
        distribution.clone(),
        ResourceSpec::Distribution {
            aliases: site
                .distribution_domains
                .iter()
                .map(ToString::to_string)
                .collect(),
            certificate_arn: Binding::reference(&certificate, Attribute::CertificateArn),
            origin_domain_name: Binding::reference(&bucket, Attribute::BucketRegionalDomainName),
            origin_access_identity: Binding::reference(&identity, Attribute::OriginAccessIdentityId),
            viewer_protocol_policy: ViewerProtocolPolicy::RedirectToHttps,
            default_root_object: INDEX_DOCUMENT.to_string(),
            error_responses: site.error_responses.clone(),
            minimum_protocol_version: MINIMUM_PROTOCOL_VERSION.to_string(),
            ssl_support_method: SslSupportMethod::SniOnly,
        },
    )?;

    for record in &site.dns_records {
        let id = if record.name == site.domain_name {
            APEX_ALIAS_RECORD
        } else {
            SITE_ALIAS_RECORD
        };
        graph.add(
            id,
            ResourceSpec::AliasRecord {
                record_name: record.name.to_string(),
                hosted_zone_id: Binding::reference(&zone, Attribute::HostedZoneId),
                target_domain_name: Binding::reference(&distribution, Attribute::DistributionDomainName),
            },
        )?;
    }

    graph.add(
        SITE_URL_OUTPUT,
        ResourceSpec::Output {
            name: SITE_URL_OUTPUT.to_string(),
            description: "Public URL of the site".to_string(),
            value: Binding::literal(site.site_url()),
        },
    )?;
    graph.add(
        BUCKET_NAME_OUTPUT,
        ResourceSpec::Output {
            name: BUCKET_NAME_OUTPUT.to_string(),
            description: "Bucket holding the site content".to_string(),
            value: Binding::reference(&bucket, Attribute::BucketName),
        },
    )?;
    graph.add(
        DISTRIBUTION_DOMAIN_OUTPUT,
        ResourceSpec::Output {
            name: DISTRIBUTION_DOMAIN_OUTPUT.to_string(),
            description: "Domain name of the CDN distribution".to_string(),
            value: Binding::reference(&distribution, Attribute::DistributionDomainName),
        },
    )?;

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::graph::ResourceKind;
    use crate::resolver::resolve;
    use pretty_assertions::assert_eq;

    fn order(graph: &ResourceGraph) -> Vec<&str> {
        graph
            .topological_order()
            .into_iter()
            .map(|n| n.id.as_str())
            .collect()
    }

    #[test]
    fn test_production_order() {
        let graph = plan(&resolve(&SiteConfig::production("example.com").unwrap()));
        assert_eq!(
            order(&graph),
            vec![
                "HostedZone",
                "OriginAccessIdentity",
                "SiteBucket",
                "SiteBucketPolicy",
                "SiteCertificate",
                "SiteDistribution",
                "SiteAliasRecord",
                "ApexAliasRecord",
                "SiteUrl",
                "BucketName",
                "DistributionDomainName",
            ]
        );
    }

    #[test]
    fn test_non_production_has_single_record() {
        let graph = plan(&resolve(
            &SiteConfig::non_production("example.com", "dev").unwrap(),
        ));
        assert_eq!(graph.of_kind(ResourceKind::AliasRecord).count(), 1);
        assert!(graph.get(&APEX_ALIAS_RECORD.into()).is_none());
    }

    #[test]
    fn test_site_domain_consistent_across_resources() {
        let site = resolve(&SiteConfig::non_production("example.com", "dev").unwrap());
        let graph = plan(&site);
        let domain = site.site_domain.to_string();

        match &graph.get(&SITE_BUCKET.into()).unwrap().spec {
            ResourceSpec::Bucket { bucket_name, .. } => assert_eq!(bucket_name, &domain),
            other => panic!("unexpected spec {:?}", other),
        }
        match &graph.get(&SITE_CERTIFICATE.into()).unwrap().spec {
            ResourceSpec::Certificate { domain_name, subject_alternative_names, .. } => {
                assert_eq!(domain_name, &domain);
                assert!(subject_alternative_names.is_empty());
            }
            other => panic!("unexpected spec {:?}", other),
        }
        match &graph.get(&SITE_DISTRIBUTION.into()).unwrap().spec {
            ResourceSpec::Distribution { aliases, viewer_protocol_policy, .. } => {
                assert_eq!(aliases, &vec![domain.clone()]);
                assert_eq!(*viewer_protocol_policy, ViewerProtocolPolicy::RedirectToHttps);
            }
            other => panic!("unexpected spec {:?}", other),
        }
        match &graph.get(&SITE_ALIAS_RECORD.into()).unwrap().spec {
            ResourceSpec::AliasRecord { record_name, .. } => assert_eq!(record_name, &domain),
            other => panic!("unexpected spec {:?}", other),
        }
    }

    #[test]
    fn test_bucket_is_private_and_policy_read_only() {
        let graph = plan(&resolve(&SiteConfig::production("example.com").unwrap()));

        match &graph.get(&SITE_BUCKET.into()).unwrap().spec {
            ResourceSpec::Bucket { block_public_access, .. } => assert!(*block_public_access),
            other => panic!("unexpected spec {:?}", other),
        }
        let policy = graph.get(&SITE_BUCKET_POLICY.into()).unwrap();
        match &policy.spec {
            ResourceSpec::BucketPolicy { actions, principal_canonical_user, .. } => {
                assert_eq!(actions, &vec!["s3:GetObject".to_string()]);
                assert_eq!(
                    principal_canonical_user,
                    &Binding::reference(&ORIGIN_ACCESS_IDENTITY.into(), Attribute::CanonicalUserId)
                );
            }
            other => panic!("unexpected spec {:?}", other),
        }
        assert_eq!(
            policy.depends_on,
            vec![ResourceId::new(SITE_BUCKET), ResourceId::new(ORIGIN_ACCESS_IDENTITY)]
        );
    }

    #[test]
    fn test_distribution_dependencies() {
        let graph = plan(&resolve(&SiteConfig::production("example.com").unwrap()));
        let distribution = graph.get(&SITE_DISTRIBUTION.into()).unwrap();
        assert_eq!(
            distribution.depends_on,
            vec![
                ResourceId::new(SITE_CERTIFICATE),
                ResourceId::new(SITE_BUCKET),
                ResourceId::new(ORIGIN_ACCESS_IDENTITY),
            ]
        );
    }
}
