// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::NAMESPACE_PREFIX;

/// One isolated customer instance, mapped 1:1 to a cluster namespace.
///
/// The record itself lives in the external registry; this type is the shape
/// it travels in. All cluster-side resource names are derived from `id` and
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Short opaque identifier, assigned once at creation.
    pub id: String,
    /// Human-facing label, DNS-label-safe, used to derive the hostname.
    pub name: String,
    pub kind: TenantKind,
    pub status: TenantStatus,
    /// Public URL, set only on successful provisioning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    /// The dedicated namespace for this tenant: `tenant-<id>`.
    /// Injective as long as tenant ids are unique.
    pub fn namespace(&self) -> String {
        format!("{}{}", NAMESPACE_PREFIX, self.id)
    }

    /// The helm release name, equal to the namespace name by convention.
    pub fn release_name(&self) -> String {
        self.namespace()
    }

    /// Public hostname: `<name>.<base-domain>`.
    pub fn hostname(&self, base_domain: &str) -> String {
        format!("{}.{}", self.name, base_domain)
    }

    /// Public URL derived from the hostname.
    pub fn url(&self, base_domain: &str) -> String {
        format!("http://{}", self.hostname(base_domain))
    }
}

/// Which application template gets deployed for a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TenantKind {
    Woocommerce,
    MedusaStub,
}

impl TenantKind {
    /// Chart override key carrying the tenant's display title
    pub fn title_key(&self) -> &'static str {
        match self {
            TenantKind::Woocommerce => "wordpress.title",
            TenantKind::MedusaStub => "medusa.title",
        }
    }
}

/// Lifecycle status of a tenant as stored in the registry.
///
/// Within provisioning the status only moves forward:
/// `Provisioning -> Ready | Failed`. A deleting tenant's record is removed
/// from the registry outright, so there is no terminal "deleted" value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantStatus {
    Provisioning,
    Ready,
    Failed,
    Deleting,
}
