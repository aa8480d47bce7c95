// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Stack Planning

use proptest::prelude::*;
use static_site_infra::graph::{Binding, ResourceKind, ResourceSpec};
use static_site_infra::{plan, resolve, SiteConfig};
use std::collections::HashSet;

fn any_site() -> impl Strategy<Value = SiteConfig> {
    (
        "[a-z]{1,10}\\.(com|org|net)",
        "[a-z][a-z0-9]{0,10}",
        any::<bool>(),
    )
        .prop_map(|(apex, sub, production)| {
            if production {
                SiteConfig::production(&apex).unwrap()
            } else {
                SiteConfig::non_production(&apex, &sub).unwrap()
            }
        })
}

proptest! {
    /// Every node comes after everything it depends on
    #[test]
    fn prop_order_respects_dependencies(site in any_site()) {
        let graph = plan(&resolve(&site));
        let order = graph.topological_order();
        prop_assert_eq!(order.len(), graph.len());

        let mut seen = HashSet::new();
        for node in order {
            for dep in &node.depends_on {
                prop_assert!(seen.contains(dep), "{} ran before {}", node.id, dep);
            }
            seen.insert(node.id.clone());
        }
    }

    /// Insertion order is already a valid provisioning order
    #[test]
    fn prop_order_matches_insertion(site in any_site()) {
        let graph = plan(&resolve(&site));
        let inserted: Vec<_> = graph.iter().map(|n| n.id.clone()).collect();
        let ordered: Vec<_> = graph.topological_order().into_iter().map(|n| n.id.clone()).collect();
        prop_assert_eq!(inserted, ordered);
    }

    /// Bucket, certificate, CDN and records all use the one site domain
    #[test]
    fn prop_site_domain_used_consistently(site in any_site()) {
        let resolved = resolve(&site);
        let site_domain = resolved.site_domain.to_string();
        let graph = plan(&resolved);

        for node in graph.iter() {
            match &node.spec {
                ResourceSpec::Bucket { bucket_name, block_public_access, .. } => {
                    prop_assert_eq!(bucket_name, &site_domain);
                    prop_assert!(*block_public_access);
                }
                ResourceSpec::Certificate { domain_name, .. } => {
                    prop_assert_eq!(domain_name, &site_domain);
                }
                ResourceSpec::Distribution { aliases, .. } => {
                    prop_assert_eq!(&aliases[0], &site_domain);
                }
                _ => {}
            }
        }

        let records = graph.of_kind(ResourceKind::AliasRecord).count();
        prop_assert_eq!(records, if site.is_production() { 2 } else { 1 });
    }

    /// Only outputs carry literal bindings; everything else is wired by reference
    #[test]
    fn prop_non_output_bindings_are_references(site in any_site()) {
        let graph = plan(&resolve(&site));
        for node in graph.iter().filter(|n| n.kind() != ResourceKind::Output) {
            for binding in node.spec.bindings() {
                prop_assert!(matches!(binding, Binding::Ref(_)), "{} has a literal", node.id);
            }
        }
    }
}
