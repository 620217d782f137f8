// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Tenant lifecycle orchestration: the provisioning and deprovisioning
//! workflows and the task queue that runs them.

pub mod orchestrator;
pub mod workflow;

pub use orchestrator::{LifecycleEvent, Orchestrator, OrchestratorHandle};
pub use workflow::WorkflowContext;
