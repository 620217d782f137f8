// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Narrow contract to the external tenant registry. Query, list, and insert
//! belong to the API layer; the workflows only ever write status or remove
//! a record.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::TenantStatus;

#[async_trait]
pub trait TenantRegistry: Send + Sync {
    /// Record a status change for a tenant, with the public URL once known.
    async fn update_status(&self, id: &str, status: TenantStatus, url: Option<&str>) -> Result<()>;

    /// Remove the tenant record entirely.
    async fn delete_record(&self, id: &str) -> Result<()>;
}
