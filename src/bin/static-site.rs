// Copyright (c) 2025 - Cowboy AI, Inc.
//! Static Site CLI
//!
//! Plans, renders or dry-runs one of the two deployment targets.
//!
//! Run with: cargo run --bin static-site -- plan prod
//!
//! Configuration (flags override the environment):
//! - `DOMAIN_NAME` - registered apex domain
//! - `CDK_DEFAULT_ACCOUNT` - 12-digit account id (`AWS_ACCOUNT_ID` as fallback)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use static_site_infra::{
    config::{ACCOUNT_FALLBACK_VAR, ACCOUNT_VAR, DOMAIN_NAME_VAR},
    plan_target, render_template, DeploymentTarget, DryRunProvisioner, EnvironmentConfig,
    StackDeployer, TargetName,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "static-site", version, about = "Static website infrastructure")]
struct Cli {
    /// Registered apex domain
    #[arg(long, env = DOMAIN_NAME_VAR, global = true)]
    domain_name: Option<String>,

    /// Account id to deploy into
    #[arg(long, env = ACCOUNT_VAR, global = true)]
    account: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print resources in provisioning order
    Plan { target: TargetName },
    /// Print the CloudFormation template
    Synth { target: TargetName },
    /// Walk the graph without creating anything and print the outputs
    DryRun { target: TargetName },
}

impl Command {
    fn target(&self) -> TargetName {
        match self {
            Self::Plan { target } | Self::Synth { target } | Self::DryRun { target } => *target,
        }
    }
}

impl Cli {
    /// Flags (or their env fallbacks) first; a missing value is an error
    fn environment(&self) -> Result<EnvironmentConfig> {
        let env = EnvironmentConfig::from_lookup(|key| match key {
            DOMAIN_NAME_VAR => self.domain_name.clone(),
            ACCOUNT_VAR => self.account.clone(),
            ACCOUNT_FALLBACK_VAR => std::env::var(ACCOUNT_FALLBACK_VAR).ok(),
            _ => None,
        })?;
        Ok(env)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let env = cli.environment().context("Failed to load configuration")?;
    let target = DeploymentTarget::named(cli.command.target(), &env)
        .context("Invalid deployment target configuration")?;

    info!(
        target = %target.name,
        stack = %target.stack_name(),
        account = %target.account,
        region = %target.region,
        "Configuration loaded"
    );

    match cli.command {
        Command::Plan { .. } => {
            let (site, graph) = plan_target(&target);
            println!("{} ({})", target.stack_name(), site.site_url());
            for (step, node) in graph.topological_order().into_iter().enumerate() {
                let deps: Vec<&str> = node.depends_on.iter().map(|d| d.as_str()).collect();
                println!(
                    "{:>2}. {:<24} {:<22} <- [{}]",
                    step + 1,
                    node.id,
                    node.kind(),
                    deps.join(", ")
                );
            }
        }
        Command::Synth { .. } => {
            let (site, graph) = plan_target(&target);
            let template = render_template(&graph, &format!("Static site for {}", site.site_domain));
            println!(
                "{}",
                serde_json::to_string_pretty(&template).context("Failed to serialize template")?
            );
        }
        Command::DryRun { .. } => {
            let mut deployer = StackDeployer::new(DryRunProvisioner::new(&target.account, target.region));
            let report = deployer
                .deploy(&target)
                .await
                .with_context(|| format!("Deployment of {} failed", target.stack_name()))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report.outputs).context("Failed to serialize outputs")?
            );
        }
    }

    Ok(())
}
