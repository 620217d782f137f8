// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use std::env;

use crate::types::TenantKind;

/// Platform configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base domain under which tenant hostnames are published; defaults to
    /// the local dev domain
    pub base_domain: String,
    /// Chart reference for woocommerce tenants
    pub woocommerce_chart: String,
    /// Chart reference for medusa-stub tenants
    pub medusa_chart: String,
    /// The helm binary to invoke
    pub helm_bin: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_domain =
            env::var("TENANT_BASE_DOMAIN").unwrap_or_else(|_| "localtest.me".to_string());
        // In production the charts would be pulled from a repository; the
        // defaults point at locally mounted chart directories.
        let woocommerce_chart = env::var("WOOCOMMERCE_CHART_PATH")
            .unwrap_or_else(|_| "../helm/tenant-woocommerce".to_string());
        let medusa_chart = env::var("MEDUSA_CHART_PATH")
            .unwrap_or_else(|_| "../helm/tenant-medusa-stub".to_string());
        let helm_bin = env::var("HELM_BIN").unwrap_or_else(|_| "helm".to_string());

        Ok(Config {
            base_domain,
            woocommerce_chart,
            medusa_chart,
            helm_bin,
        })
    }

    /// Chart reference for a tenant kind
    pub fn chart_for(&self, kind: TenantKind) -> &str {
        match kind {
            TenantKind::Woocommerce => &self.woocommerce_chart,
            TenantKind::MedusaStub => &self.medusa_chart,
        }
    }
}
