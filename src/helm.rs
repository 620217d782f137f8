// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Release manager: wraps the external helm binary for installing,
//! upgrading, and uninstalling a tenant's application release.

use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, instrument};

use crate::error::{Result, StockadeError};

/// Parameters for an install/upgrade invocation.
#[derive(Debug, Clone)]
pub struct ReleaseParams {
    pub release: String,
    pub namespace: String,
    /// Chart reference (a repository reference or a local chart path).
    pub chart: String,
    /// `--set key=value` overrides, applied in order.
    pub overrides: Vec<(String, String)>,
    /// Wait for the release's workloads to become ready before returning.
    pub wait: bool,
    pub timeout: Duration,
}

/// Interface the workflows use to manage releases. Object-safe so tests can
/// substitute a fake.
#[async_trait]
pub trait ReleaseManager: Send + Sync {
    /// Install the release, or upgrade it in place if it already exists.
    async fn install_or_upgrade(&self, params: &ReleaseParams) -> Result<()>;

    /// Remove the release and its bookkeeping from the namespace. Callers
    /// treat failure as non-fatal; a release may legitimately not exist.
    async fn uninstall(&self, release: &str, namespace: &str) -> Result<()>;
}

/// Runs the helm binary and captures its output for diagnostics.
pub struct HelmRunner {
    binary: String,
}

impl HelmRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    fn upgrade_args(params: &ReleaseParams) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "upgrade".to_string(),
            "--install".to_string(),
            params.release.clone(),
            params.chart.clone(),
            "--namespace".to_string(),
            params.namespace.clone(),
        ];
        for (key, value) in &params.overrides {
            args.push("--set".to_string());
            args.push(format!("{}={}", key, value));
        }
        if params.wait {
            args.push("--wait".to_string());
        }
        args.push("--timeout".to_string());
        args.push(format!("{}s", params.timeout.as_secs()));
        args
    }

    fn uninstall_args(release: &str, namespace: &str) -> Vec<String> {
        vec![
            "uninstall".to_string(),
            release.to_string(),
            "--namespace".to_string(),
            namespace.to_string(),
        ]
    }

    async fn run(&self, operation: &'static str, release: &str, args: &[String]) -> Result<()> {
        debug!("executing: {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| StockadeError::HelmError {
                operation,
                release: release.to_string(),
                detail: format!("failed to invoke {}: {}", self.binary, e),
                stdout: String::new(),
                stderr: String::new(),
            })?;

        if output.status.success() {
            info!("helm {} for release {} succeeded", operation, release);
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        error!(
            "helm {} for release {} failed ({}), stdout: {}, stderr: {}",
            operation,
            release,
            output.status,
            stdout.trim(),
            stderr.trim()
        );
        Err(StockadeError::HelmError {
            operation,
            release: release.to_string(),
            detail: format!("{}: {}", output.status, stderr.trim()),
            stdout,
            stderr,
        })
    }
}

#[async_trait]
impl ReleaseManager for HelmRunner {
    #[instrument(skip(self, params), fields(release = %params.release))]
    async fn install_or_upgrade(&self, params: &ReleaseParams) -> Result<()> {
        self.run("upgrade", &params.release, &Self::upgrade_args(params))
            .await
    }

    #[instrument(skip(self))]
    async fn uninstall(&self, release: &str, namespace: &str) -> Result<()> {
        self.run("uninstall", release, &Self::uninstall_args(release, namespace))
            .await
    }
}
