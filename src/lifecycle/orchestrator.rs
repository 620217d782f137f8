// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Task queue in front of the lifecycle workflows. The triggering layer
//! enqueues fire-and-forget events through a handle and returns to its
//! caller immediately; every event runs as its own tokio task.

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::lifecycle::workflow::{self, WorkflowContext};
use crate::types::Tenant;

/// A lifecycle call submitted by the triggering layer. The tenant record
/// travels with the event; the caller has already set the entry status
/// (PROVISIONING or DELETING) in the registry.
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    Provision(Tenant),
    Deprovision(Tenant),
}

/// Receives lifecycle events and runs one workflow task per event.
///
/// Workflows for different tenants run with unbounded parallelism. Nothing
/// serializes concurrent calls for the same tenant id; the triggering layer
/// must do that.
pub struct Orchestrator {
    ctx: WorkflowContext,
    event_rx: mpsc::Receiver<LifecycleEvent>,
}

/// Handle for submitting lifecycle events to the orchestrator.
#[derive(Clone)]
pub struct OrchestratorHandle {
    event_tx: mpsc::Sender<LifecycleEvent>,
}

impl OrchestratorHandle {
    /// Enqueue a provisioning run for a tenant. Returns once the event is
    /// accepted; the workflow completes in the background.
    pub async fn provision(&self, tenant: Tenant) {
        self.send(LifecycleEvent::Provision(tenant)).await;
    }

    /// Enqueue a deprovisioning run for a tenant.
    pub async fn deprovision(&self, tenant: Tenant) {
        self.send(LifecycleEvent::Deprovision(tenant)).await;
    }

    async fn send(&self, event: LifecycleEvent) {
        if let Err(e) = self.event_tx.send(event).await {
            error!("failed to enqueue lifecycle event: {}", e);
        }
    }
}

impl Orchestrator {
    pub fn new(ctx: WorkflowContext) -> (Self, OrchestratorHandle) {
        let (event_tx, event_rx) = mpsc::channel(256);

        let orchestrator = Self { ctx, event_rx };
        let handle = OrchestratorHandle { event_tx };
        (orchestrator, handle)
    }

    /// Run until every handle is dropped, then drain in-flight workflows.
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!("orchestrator started, waiting for lifecycle events");
        let mut workflows = JoinSet::new();

        loop {
            tokio::select! {
                event = self.event_rx.recv() => match event {
                    Some(event) => {
                        let ctx = self.ctx.clone();
                        workflows.spawn(run_event(ctx, event));
                    }
                    None => break,
                },
                Some(result) = workflows.join_next(), if !workflows.is_empty() => {
                    if let Err(error) = result {
                        error!(%error, "lifecycle task aborted");
                    }
                }
            }
        }

        while let Some(result) = workflows.join_next().await {
            if let Err(error) = result {
                error!(%error, "lifecycle task aborted");
            }
        }
        info!("orchestrator stopped, all lifecycle tasks drained");
        Ok(())
    }
}

async fn run_event(ctx: WorkflowContext, event: LifecycleEvent) {
    match event {
        LifecycleEvent::Provision(tenant) => workflow::provision(&ctx, &tenant).await,
        LifecycleEvent::Deprovision(tenant) => workflow::deprovision(&ctx, &tenant).await,
    }
}
