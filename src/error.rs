// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockadeError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("helm {operation} for release {release} failed: {detail}")]
    HelmError {
        operation: &'static str,
        release: String,
        detail: String,
        /// Captured standard output of the helm invocation, kept for diagnostics.
        stdout: String,
        /// Captured standard error of the helm invocation, kept for diagnostics.
        stderr: String,
    },

    #[error("registry operation failed: {0}")]
    RegistryError(String),
}

pub type Result<T> = std::result::Result<T, StockadeError>;
