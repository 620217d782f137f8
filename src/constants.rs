// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Prefix for the namespace (and, by convention, release) derived from a tenant id.
pub const NAMESPACE_PREFIX: &str = "tenant-";

/// Names of the namespaced objects created for every tenant.
pub mod objects {
    pub const QUOTA_NAME: &str = "tenant-quota";
    pub const LIMIT_RANGE_NAME: &str = "tenant-limit-range";
    pub const POLICY_DENY_ALL: &str = "deny-all";
    pub const POLICY_ALLOW_WEB: &str = "allow-web-ingress";
    pub const POLICY_ALLOW_DB: &str = "allow-internal-db";
}

/// Pod label scheme assumed from the deployed charts.
pub mod labels {
    pub const APP: &str = "app";
    /// The charts label pods `app: <release>-<component>`. These component
    /// suffixes are an assumption about the chart, not verified against the
    /// deployed release; if the chart's labels change, the network isolation
    /// silently stops matching.
    pub const FRONTEND_COMPONENT: &str = "wordpress";
    pub const DATABASE_COMPONENT: &str = "mysql";
}

/// Release-tool invocation configuration.
pub mod helm {
    /// Fixed wait timeout handed to helm for install/upgrade.
    pub const TIMEOUT_SECS: u64 = 300;
    /// Chart override key carrying the tenant's public hostname.
    pub const INGRESS_HOST_KEY: &str = "ingress.host";
}
