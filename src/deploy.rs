// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deployment Service
//!
//! Coordinates one deployment run of a [`DeploymentTarget`]:
//!
//! ```text
//! DeploymentTarget
//!     ↓ resolve()          (pure)
//! ResolvedSite
//!     ↓ plan()             (pure)
//! ResourceGraph
//!     ↓ Orchestrator::run  (I/O through the Provisioner)
//! DeploymentReport
//! ```
//!
//! Each run gets its own UUID v7 id, carried on the tracing span so every
//! log line of the run can be correlated.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::{DeploymentTarget, TargetName};
use crate::domain::Region;
use crate::errors::{StackError, StackResult};
use crate::graph::{plan, ResourceGraph, ResourceId};
use crate::provision::{Orchestrator, Provisioner, StackOutputs};
use crate::resolver::{resolve, ResolvedSite};

/// What a successful run reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentReport {
    pub run_id: Uuid,
    pub target: TargetName,
    pub stack_name: String,
    pub region: Region,
    pub outputs: StackOutputs,
    /// Resources in provisioning order
    pub resources: Vec<ResourceId>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Resolve and plan a target without provisioning anything
pub fn plan_target(target: &DeploymentTarget) -> (ResolvedSite, ResourceGraph) {
    let site = resolve(&target.site);
    let graph = plan(&site);
    (site, graph)
}

/// Deploys targets through a provisioner
pub struct StackDeployer<P: Provisioner> {
    orchestrator: Orchestrator<P>,
}

impl<P: Provisioner> StackDeployer<P> {
    pub fn new(provisioner: P) -> Self {
        Self {
            orchestrator: Orchestrator::new(provisioner),
        }
    }

    pub fn provisioner(&self) -> &P {
        self.orchestrator.provisioner()
    }

    /// Run one deployment of `target`
    ///
    /// # Errors
    ///
    /// The first [`ProvisioningError`](crate::errors::ProvisioningError),
    /// unchanged, or [`StackError::MissingOutput`](crate::errors::StackError)
    /// if the run finished without one of the three outputs.
    pub async fn deploy(&mut self, target: &DeploymentTarget) -> StackResult<DeploymentReport> {
        let run_id = Uuid::now_v7();
        let stack_name = target.stack_name();
        let span = info_span!(
            "deploy",
            %run_id,
            stack = %stack_name,
            account = %target.account,
            region = %target.region
        );

        async move {
            let started_at = Utc::now();
            let (site, graph) = plan_target(target);
            info!(
                site_domain = %site.site_domain,
                resources = graph.len(),
                "Deployment planned"
            );

            let stack = self.orchestrator.run(&graph).await?;
            let outputs = stack.outputs()?;

            info!(
                site_url = %outputs.site_url,
                bucket = %outputs.bucket_name,
                distribution = %outputs.distribution_domain_name,
                "Deployment complete"
            );

            Ok::<_, StackError>(DeploymentReport {
                run_id,
                target: target.name,
                stack_name,
                region: target.region,
                outputs,
                resources: stack.resources,
                started_at,
                finished_at: Utc::now(),
            })
        }
        .instrument(span)
        .await
    }
}
