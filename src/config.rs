// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site and Deployment Configuration
//!
//! [`SiteConfig`] is the only input to the resolver. Its deployment mode is a
//! sum type: production carries no subdomain at all, and non-production
//! cannot be built without one, so neither inconsistent shape exists.
//!
//! [`EnvironmentConfig`] is read once at startup and passed explicitly into
//! [`DeploymentTarget`] constructors; nothing downstream touches the process
//! environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{AccountId, Hostname, Label, Region};
use crate::errors::ConfigurationError;
use crate::resolver::PRODUCTION_SUB_DOMAIN;

/// Environment variable holding the apex domain name
pub const DOMAIN_NAME_VAR: &str = "DOMAIN_NAME";

/// Environment variable holding the account id
pub const ACCOUNT_VAR: &str = "CDK_DEFAULT_ACCOUNT";

/// Fallback for [`ACCOUNT_VAR`]
pub const ACCOUNT_FALLBACK_VAR: &str = "AWS_ACCOUNT_ID";

/// Subdomain used by the development target
pub const DEVELOPMENT_SUB_DOMAIN: &str = "dev";

/// Production or non-production deployment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DeploymentMode {
    /// Served from `www` plus the apex
    Production,
    /// Served from `{sub_domain}` only
    NonProduction { sub_domain: Label },
}

impl DeploymentMode {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Input to the site resolver
///
/// Fields are private: the constructors are the only way in, and they
/// guarantee the site domain built from them is a valid hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SiteConfig {
    domain_name: Hostname,
    mode: DeploymentMode,
}

impl SiteConfig {
    /// Production site for `domain_name`
    pub fn production(domain_name: &str) -> Result<Self, ConfigurationError> {
        let domain_name = parse_domain_name(domain_name)?;
        let www = Label::new(PRODUCTION_SUB_DOMAIN)
            .map_err(|e| ConfigurationError::invalid_hostname("site_sub_domain", e))?;
        check_site_domain(&domain_name, &www)?;

        Ok(Self {
            domain_name,
            mode: DeploymentMode::Production,
        })
    }

    /// Non-production site served only from `{sub_domain}.{domain_name}`
    pub fn non_production(domain_name: &str, sub_domain: &str) -> Result<Self, ConfigurationError> {
        let domain_name = parse_domain_name(domain_name)?;
        if sub_domain.trim().is_empty() {
            return Err(ConfigurationError::MissingSubDomain);
        }
        let sub_domain = Label::new(sub_domain)
            .map_err(|e| ConfigurationError::invalid_hostname("site_sub_domain", e))?;
        check_site_domain(&domain_name, &sub_domain)?;

        Ok(Self {
            domain_name,
            mode: DeploymentMode::NonProduction { sub_domain },
        })
    }

    /// Registered apex domain
    pub fn domain_name(&self) -> &Hostname {
        &self.domain_name
    }

    pub fn mode(&self) -> &DeploymentMode {
        &self.mode
    }

    pub fn is_production(&self) -> bool {
        self.mode.is_production()
    }
}

fn check_site_domain(domain_name: &Hostname, sub_domain: &Label) -> Result<(), ConfigurationError> {
    domain_name
        .with_subdomain(sub_domain)
        .map(|_| ())
        .map_err(|e| ConfigurationError::invalid_hostname("domain_name", e))
}

fn parse_domain_name(domain_name: &str) -> Result<Hostname, ConfigurationError> {
    if domain_name.trim().is_empty() {
        return Err(ConfigurationError::MissingDomainName);
    }
    Hostname::new(domain_name).map_err(|e| ConfigurationError::invalid_hostname("domain_name", e))
}

/// Process-wide inputs read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Raw apex domain; validated when a [`SiteConfig`] is built from it
    pub domain_name: String,
    pub account: AccountId,
}

impl EnvironmentConfig {
    pub fn new(domain_name: impl Into<String>, account: &str) -> Result<Self, ConfigurationError> {
        let domain_name = domain_name.into();
        if domain_name.trim().is_empty() {
            return Err(ConfigurationError::MissingDomainName);
        }
        let account = AccountId::new(account).map_err(|e| ConfigurationError::InvalidField {
            field: "account",
            reason: e.to_string(),
        })?;
        Ok(Self {
            domain_name,
            account,
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Missing or blank variables are errors, never empty strings.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let domain_name = non_empty(DOMAIN_NAME_VAR).ok_or_else(|| {
            ConfigurationError::MissingEnvironment {
                variable: DOMAIN_NAME_VAR.to_string(),
            }
        })?;

        let account = non_empty(ACCOUNT_VAR)
            .or_else(|| non_empty(ACCOUNT_FALLBACK_VAR))
            .ok_or_else(|| ConfigurationError::MissingEnvironment {
                variable: ACCOUNT_VAR.to_string(),
            })?;

        Self::new(domain_name, &account)
    }
}

/// Name of one of the two deployment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetName {
    Production,
    Development,
}

impl TargetName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "prod",
            Self::Development => "dev",
        }
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetName {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(Self::Production),
            "dev" | "development" => Ok(Self::Development),
            other => Err(ConfigurationError::UnknownTarget(other.to_string())),
        }
    }
}

/// A named stack: which site, in which account and region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub name: TargetName,
    pub account: AccountId,
    pub region: Region,
    pub site: SiteConfig,
}

impl DeploymentTarget {
    pub fn production(env: &EnvironmentConfig) -> Result<Self, ConfigurationError> {
        Ok(Self {
            name: TargetName::Production,
            account: env.account.clone(),
            region: Region::UsEast1,
            site: SiteConfig::production(&env.domain_name)?,
        })
    }

    pub fn development(env: &EnvironmentConfig) -> Result<Self, ConfigurationError> {
        Ok(Self {
            name: TargetName::Development,
            account: env.account.clone(),
            region: Region::UsEast1,
            site: SiteConfig::non_production(&env.domain_name, DEVELOPMENT_SUB_DOMAIN)?,
        })
    }

    pub fn named(name: TargetName, env: &EnvironmentConfig) -> Result<Self, ConfigurationError> {
        match name {
            TargetName::Production => Self::production(env),
            TargetName::Development => Self::development(env),
        }
    }

    pub fn stack_name(&self) -> String {
        format!("StaticSite-{}", self.name)
    }
}

/// Both deployment targets, production first
pub fn deployment_targets(env: &EnvironmentConfig) -> Result<Vec<DeploymentTarget>, ConfigurationError> {
    Ok(vec![
        DeploymentTarget::production(env)?,
        DeploymentTarget::development(env)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_non_production_requires_sub_domain() {
        assert_eq!(
            SiteConfig::non_production("example.com", ""),
            Err(ConfigurationError::MissingSubDomain)
        );
        assert_eq!(
            SiteConfig::non_production("example.com", "   "),
            Err(ConfigurationError::MissingSubDomain)
        );
    }

    #[test]
    fn test_empty_domain_name_rejected() {
        assert_eq!(
            SiteConfig::production(""),
            Err(ConfigurationError::MissingDomainName)
        );
        assert_eq!(
            SiteConfig::non_production("", "dev"),
            Err(ConfigurationError::MissingDomainName)
        );
    }

    #[test]
    fn test_invalid_sub_domain_names_field() {
        let err = SiteConfig::non_production("example.com", "dev.stage").unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidField {
                field: "site_sub_domain",
                ..
            }
        ));
    }

    #[test]
    fn test_site_domain_must_fit() {
        // 253 bytes: valid on its own, no room for another label
        let apex = format!(
            "{}.{}.{}.{}.com",
            "a".repeat(63),
            "b".repeat(63),
            "c".repeat(63),
            "d".repeat(57)
        );
        assert!(Hostname::new(apex.as_str()).is_ok());
        assert!(SiteConfig::production(&apex).is_err());
        assert!(matches!(
            SiteConfig::non_production(&apex, "dev"),
            Err(ConfigurationError::InvalidField {
                field: "domain_name",
                ..
            })
        ));
    }

    #[test]
    fn test_from_lookup_reads_both_variables() {
        let env = EnvironmentConfig::from_lookup(lookup(&[
            ("DOMAIN_NAME", "example.com"),
            ("CDK_DEFAULT_ACCOUNT", "123456789012"),
        ]))
        .unwrap();
        assert_eq!(env.domain_name, "example.com");
        assert_eq!(env.account.as_str(), "123456789012");
    }

    #[test]
    fn test_from_lookup_account_fallback() {
        let env = EnvironmentConfig::from_lookup(lookup(&[
            ("DOMAIN_NAME", "example.com"),
            ("AWS_ACCOUNT_ID", "210987654321"),
        ]))
        .unwrap();
        assert_eq!(env.account.as_str(), "210987654321");
    }

    #[test]
    fn test_from_lookup_missing_domain_fails_fast() {
        let err = EnvironmentConfig::from_lookup(lookup(&[
            ("DOMAIN_NAME", ""),
            ("CDK_DEFAULT_ACCOUNT", "123456789012"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingEnvironment {
                variable: "DOMAIN_NAME".to_string()
            }
        );
    }

    #[test]
    fn test_from_lookup_missing_account() {
        let err = EnvironmentConfig::from_lookup(lookup(&[("DOMAIN_NAME", "example.com")]))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingEnvironment { .. }));
    }

    #[test]
    fn test_deployment_targets() {
        let env = EnvironmentConfig::new("example.com", "123456789012").unwrap();
        let targets = deployment_targets(&env).unwrap();

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].name, TargetName::Production);
        assert!(targets[0].site.is_production());
        assert_eq!(targets[1].name, TargetName::Development);
        assert_eq!(
            *targets[1].site.mode(),
            DeploymentMode::NonProduction {
                sub_domain: Label::new("dev").unwrap()
            }
        );
        assert!(targets.iter().all(|t| t.region == Region::UsEast1));
        assert_eq!(targets[1].stack_name(), "StaticSite-dev");
    }

    #[test]
    fn test_target_name_parsing() {
        assert_eq!("prod".parse::<TargetName>().unwrap(), TargetName::Production);
        assert_eq!("DEV".parse::<TargetName>().unwrap(), TargetName::Development);
        assert!("staging".parse::<TargetName>().is_err());
    }
}
