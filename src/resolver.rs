// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site Configuration Resolver
//!
//! Pure derivation from a [`SiteConfig`] to every domain-dependent value the
//! stack needs. No I/O, no hidden state: resolving the same config twice
//! yields equal values.
//!
//! | mode            | effective subdomain | apex in cert / CDN / DNS |
//! |-----------------|---------------------|--------------------------|
//! | production      | `www`               | yes                      |
//! | non-production  | supplied label      | no                       |

use serde::{Deserialize, Serialize};

use crate::config::{DeploymentMode, SiteConfig};
use crate::domain::{Hostname, Label};

/// Subdomain every production site is served from
pub const PRODUCTION_SUB_DOMAIN: &str = "www";

/// Entry document of the single-page app
pub const INDEX_DOCUMENT: &str = "index.html";

/// Certificate primary domain plus subject alternative names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateDomains {
    pub primary: Hostname,
    pub subject_alternative_names: Vec<Hostname>,
}

impl CertificateDomains {
    /// Primary domain followed by the SANs
    pub fn all(&self) -> Vec<Hostname> {
        std::iter::once(self.primary.clone())
            .chain(self.subject_alternative_names.iter().cloned())
            .collect()
    }
}

/// A DNS alias record pointing a name at the CDN
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DnsRecord {
    pub name: Hostname,
}

/// Custom error response rewrite on the CDN
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status returned by the origin
    pub error_code: u16,
    /// Status returned to the viewer
    pub response_code: u16,
    pub response_page_path: String,
    /// Seconds the rewritten response may be cached
    pub error_caching_min_ttl: u64,
}

impl ErrorResponse {
    /// Rewrite `error_code` to the app entry document with 200, uncached
    ///
    /// Client-side routing needs every unknown path to load the app, so true
    /// not-found responses are masked as well.
    pub fn spa_fallback(error_code: u16) -> Self {
        Self {
            error_code,
            response_code: 200,
            response_page_path: format!("/{INDEX_DOCUMENT}"),
            error_caching_min_ttl: 0,
        }
    }
}

/// Everything derived from a [`SiteConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedSite {
    /// Apex domain, the hosted zone to look up
    pub domain_name: Hostname,
    pub effective_sub_domain: Label,
    /// Used verbatim as bucket name, certificate primary, CDN alias and
    /// DNS record name
    pub site_domain: Hostname,
    pub certificate: CertificateDomains,
    pub distribution_domains: Vec<Hostname>,
    pub dns_records: Vec<DnsRecord>,
    pub error_responses: Vec<ErrorResponse>,
}

impl ResolvedSite {
    pub fn site_url(&self) -> String {
        format!("https://{}", self.site_domain)
    }

    pub fn bucket_name(&self) -> &str {
        self.site_domain.as_str()
    }

    pub fn certificate_domains(&self) -> Vec<Hostname> {
        self.certificate.all()
    }
}

/// Resolve a site configuration
pub fn resolve(config: &SiteConfig) -> ResolvedSite {
    let (effective_sub_domain, include_apex) = match config.mode() {
        DeploymentMode::Production => (production_sub_domain(), true),
        DeploymentMode::NonProduction { sub_domain } => (sub_domain.clone(), false),
    };

    // SiteConfig construction already checked the joined name fits
    let site_domain = config.domain_name().prefixed_unchecked(&effective_sub_domain);

    let subject_alternative_names = if include_apex {
        vec![config.domain_name().clone()]
    } else {
        Vec::new()
    };

    let certificate = CertificateDomains {
        primary: site_domain.clone(),
        subject_alternative_names,
    };

    let distribution_domains = certificate.all();

    let dns_records = distribution_domains
        .iter()
        .cloned()
        .map(|name| DnsRecord { name })
        .collect();

    ResolvedSite {
        domain_name: config.domain_name().clone(),
        effective_sub_domain,
        site_domain,
        certificate,
        distribution_domains,
        dns_records,
        error_responses: vec![ErrorResponse::spa_fallback(403), ErrorResponse::spa_fallback(404)],
    }
}

fn production_sub_domain() -> Label {
    match Label::new(PRODUCTION_SUB_DOMAIN) {
        Ok(label) => label,
        Err(e) => unreachable!("\"www\" is a valid DNS label: {e}"),
    }
}
