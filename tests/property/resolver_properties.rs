// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Site Resolution
//!
//! `resolve` is a pure function of its configuration. These properties pin
//! down how the site domain, certificate names and DNS records relate for
//! any apex domain and sub-domain.

use proptest::prelude::*;
use static_site_infra::resolver::PRODUCTION_SUB_DOMAIN;
use static_site_infra::{resolve, SiteConfig};

// ============================================================================
// Strategies
// ============================================================================

fn apex_domain() -> impl Strategy<Value = String> {
    "[a-z]{1,10}\\.(com|org|net|dev)"
}

fn sub_domain() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,10}"
}

/// Either mode, with the sub-domain used when non-production
fn any_site() -> impl Strategy<Value = SiteConfig> {
    (apex_domain(), sub_domain(), any::<bool>()).prop_map(|(apex, sub, production)| {
        if production {
            SiteConfig::production(&apex).unwrap()
        } else {
            SiteConfig::non_production(&apex, &sub).unwrap()
        }
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Site domain is always `{effective sub-domain}.{apex}`
    #[test]
    fn prop_site_domain_is_sub_domain_dot_apex(site in any_site()) {
        let resolved = resolve(&site);
        prop_assert_eq!(
            resolved.site_domain.as_str(),
            format!("{}.{}", resolved.effective_sub_domain, resolved.domain_name)
        );
    }

    /// Production resolves to `www` and also serves the apex
    #[test]
    fn prop_production_adds_apex(apex in apex_domain()) {
        let resolved = resolve(&SiteConfig::production(&apex).unwrap());

        prop_assert_eq!(resolved.effective_sub_domain.as_str(), PRODUCTION_SUB_DOMAIN);
        prop_assert_eq!(resolved.certificate.subject_alternative_names.len(), 1);
        prop_assert_eq!(resolved.certificate.subject_alternative_names[0].as_str(), apex.as_str());
        prop_assert_eq!(resolved.dns_records.len(), 2);
    }

    /// Non-production serves exactly the site domain, never the apex
    #[test]
    fn prop_non_production_never_touches_apex(apex in apex_domain(), sub in sub_domain()) {
        let resolved = resolve(&SiteConfig::non_production(&apex, &sub).unwrap());

        prop_assert_eq!(resolved.effective_sub_domain.as_str(), sub.as_str());
        prop_assert!(resolved.certificate.subject_alternative_names.is_empty());
        prop_assert_eq!(resolved.dns_records.len(), 1);
        prop_assert!(resolved.distribution_domains.iter().all(|d| d.as_str() != apex));
    }

    /// Certificate names, CDN aliases and DNS records cover the same names
    #[test]
    fn prop_certificate_matches_aliases_and_records(site in any_site()) {
        let resolved = resolve(&site);
        let records: Vec<_> = resolved.dns_records.iter().map(|r| r.name.clone()).collect();

        prop_assert_eq!(&resolved.certificate_domains(), &resolved.distribution_domains);
        prop_assert_eq!(&records, &resolved.distribution_domains);
        prop_assert_eq!(resolved.bucket_name(), resolved.site_domain.as_str());
    }

    /// Same configuration, same result
    #[test]
    fn prop_resolve_is_deterministic(site in any_site()) {
        prop_assert_eq!(resolve(&site), resolve(&site.clone()));
    }
}
