// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The provision and deprovision workflows, modeled as ordered step lists
//! run by a single driver. The abort/continue policy is an explicit
//! parameter instead of buried control flow.

use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::constants::helm::{INGRESS_HOST_KEY, TIMEOUT_SECS};
use crate::error::{Result, StockadeError};
use crate::helm::{ReleaseManager, ReleaseParams};
use crate::kubernetes::ClusterResources;
use crate::registry::TenantRegistry;
use crate::templates;
use crate::types::{Tenant, TenantStatus};

/// Everything a lifecycle workflow needs, injected so tests can substitute
/// fakes for the cluster, the release tool, and the registry.
#[derive(Clone)]
pub struct WorkflowContext {
    pub resources: ClusterResources,
    pub releases: Arc<dyn ReleaseManager>,
    pub registry: Arc<dyn TenantRegistry>,
    pub config: Config,
}

/// What the driver does when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailurePolicy {
    /// Stop at the first failure and report it (provisioning).
    Abort,
    /// Log a warning and keep going; the first failure is still reported
    /// at the end (deprovisioning's best-effort cleanup).
    ContinueWithWarning,
}

pub(crate) struct Step<'a> {
    name: &'static str,
    fut: BoxFuture<'a, Result<()>>,
}

impl<'a> Step<'a> {
    pub(crate) fn new<F>(name: &'static str, fut: F) -> Self
    where
        F: Future<Output = Result<()>> + Send + 'a,
    {
        Self {
            name,
            fut: Box::pin(fut),
        }
    }
}

#[derive(Debug)]
pub(crate) struct StepFailure {
    pub step: &'static str,
    pub error: StockadeError,
}

/// Run steps in order under the given policy. Steps already completed are
/// never rolled back.
pub(crate) async fn drive(
    tenant_id: &str,
    policy: FailurePolicy,
    steps: Vec<Step<'_>>,
) -> std::result::Result<(), StepFailure> {
    let mut first_failure = None;

    for step in steps {
        debug!(tenant = tenant_id, step = step.name, "running step");
        match step.fut.await {
            Ok(()) => {}
            Err(error) => match policy {
                // The caller reports the failure; it owns the diagnostics.
                FailurePolicy::Abort => {
                    return Err(StepFailure {
                        step: step.name,
                        error,
                    });
                }
                FailurePolicy::ContinueWithWarning => {
                    warn!(
                        tenant = tenant_id,
                        step = step.name,
                        %error,
                        "step failed, continuing"
                    );
                    if first_failure.is_none() {
                        first_failure = Some(StepFailure {
                            step: step.name,
                            error,
                        });
                    }
                }
            },
        }
    }

    match first_failure {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}

/// Provision a tenant: namespace, quota, limit range, network policies,
/// then the helm release. Aborts on the first non-idempotent failure and
/// marks the tenant FAILED; steps already completed stay behind for a
/// re-triggered run to pass over idempotently.
#[instrument(skip(ctx, tenant), fields(tenant = %tenant.id))]
pub async fn provision(ctx: &WorkflowContext, tenant: &Tenant) {
    let namespace = tenant.namespace();
    let release = tenant.release_name();
    info!(%namespace, "starting provisioning for {}", tenant.name);

    let quota = templates::quota();
    let limit_range = templates::limit_range();
    let policies = templates::network_policies(&release);
    let params = release_params(&ctx.config, tenant);

    let steps = vec![
        Step::new("create namespace", ctx.resources.create_namespace(&namespace)),
        Step::new("create resource quota", ctx.resources.create_quota(&namespace, &quota)),
        Step::new(
            "create limit range",
            ctx.resources.create_limit_range(&namespace, &limit_range),
        ),
        Step::new("create network policies", async {
            for policy in &policies {
                ctx.resources.create_network_policy(&namespace, policy).await?;
            }
            Ok(())
        }),
        Step::new("install release", ctx.releases.install_or_upgrade(&params)),
    ];

    match drive(&tenant.id, FailurePolicy::Abort, steps).await {
        Ok(()) => {
            let url = tenant.url(&ctx.config.base_domain);
            info!(%url, "provisioning succeeded");
            if let Err(error) = ctx
                .registry
                .update_status(&tenant.id, TenantStatus::Ready, Some(&url))
                .await
            {
                error!(%error, "failed to record READY status");
            }
        }
        Err(failure) => {
            error!(
                step = failure.step,
                error = %failure.error,
                "provisioning failed, marking tenant FAILED"
            );
            if let Err(error) = ctx
                .registry
                .update_status(&tenant.id, TenantStatus::Failed, None)
                .await
            {
                error!(%error, "failed to record FAILED status");
            }
        }
    }
}

/// Deprovision a tenant: best-effort release uninstall and namespace
/// deletion, then unconditional removal of the registry record. Cluster
/// cleanup failures downgrade to warnings; the record is removed either way.
#[instrument(skip(ctx, tenant), fields(tenant = %tenant.id))]
pub async fn deprovision(ctx: &WorkflowContext, tenant: &Tenant) {
    let namespace = tenant.namespace();
    let release = tenant.release_name();
    info!(%namespace, "starting deletion");

    let steps = vec![
        Step::new("uninstall release", ctx.releases.uninstall(&release, &namespace)),
        Step::new("delete namespace", ctx.resources.delete_namespace(&namespace)),
    ];

    if drive(&tenant.id, FailurePolicy::ContinueWithWarning, steps)
        .await
        .is_err()
    {
        warn!("cluster cleanup incomplete, removing registry record anyway");
    }

    match ctx.registry.delete_record(&tenant.id).await {
        Ok(()) => info!("deletion complete"),
        Err(error) => error!(%error, "failed to remove tenant record"),
    }
}

fn release_params(config: &Config, tenant: &Tenant) -> ReleaseParams {
    ReleaseParams {
        release: tenant.release_name(),
        namespace: tenant.namespace(),
        chart: config.chart_for(tenant.kind).to_string(),
        overrides: vec![
            (
                INGRESS_HOST_KEY.to_string(),
                tenant.hostname(&config.base_domain),
            ),
            (tenant.kind.title_key().to_string(), tenant.name.clone()),
        ],
        wait: true,
        timeout: Duration::from_secs(TIMEOUT_SECS),
    }
}
