// Copyright (c) 2025 - Cowboy AI, Inc.
//! Static Site Domain Models
//!
//! Value objects with validation invariants. Once one of these exists it is
//! valid, so nothing downstream re-checks DNS or account rules.
//!
//! - [`Hostname`] - DNS-validated hostnames (RFC 1123), lowercase
//! - [`Label`] - a single DNS label, used for non-production subdomains
//! - [`AccountId`] - 12-digit cloud account id
//! - [`Region`] - deployment region (pinned to `us-east-1`)

pub mod account;
pub mod hostname;

pub use account::{AccountId, AccountIdError, Region};
pub use hostname::{Hostname, HostnameError, Label};
