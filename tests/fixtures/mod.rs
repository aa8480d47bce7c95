// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for static-site-infra
//!
//! Fixed domains and account ids so every test run plans the same stack.

#![allow(dead_code)]

use static_site_infra::{DeploymentTarget, EnvironmentConfig, SiteConfig};

pub const APEX_DOMAIN: &str = "example.com";
pub const ACCOUNT_ID: &str = "123456789012";
pub const PREVIEW_SUB_DOMAIN: &str = "preview";

pub fn environment() -> EnvironmentConfig {
    EnvironmentConfig::new(APEX_DOMAIN, ACCOUNT_ID).expect("fixture environment is valid")
}

pub fn production_site() -> SiteConfig {
    SiteConfig::production(APEX_DOMAIN).expect("fixture domain is valid")
}

pub fn preview_site() -> SiteConfig {
    SiteConfig::non_production(APEX_DOMAIN, PREVIEW_SUB_DOMAIN).expect("fixture domain is valid")
}

pub fn production_target() -> DeploymentTarget {
    DeploymentTarget::production(&environment()).expect("fixture target is valid")
}

pub fn development_target() -> DeploymentTarget {
    DeploymentTarget::development(&environment()).expect("fixture target is valid")
}
