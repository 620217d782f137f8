// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster resource client: namespace, quota, limit range, and network
//! policy operations with "already exists" treated as success on create.

use k8s_openapi::api::core::v1::{LimitRange, Namespace, ResourceQuota};
use k8s_openapi::api::networking::v1::NetworkPolicy;
use kube::{
    api::{DeleteParams, ObjectMeta, PostParams},
    Api, Client,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, instrument};

use crate::error::Result;

/// Handle to the cluster control plane, scoped to the operations the tenant
/// workflows need. Cheap to clone.
#[derive(Clone)]
pub struct ClusterResources {
    client: Client,
}

impl ClusterResources {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a namespace; an existing namespace with that name is success.
    #[instrument(skip(self))]
    pub async fn create_namespace(&self, name: &str) -> Result<()> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let ns = Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        create_accepting_conflict(&namespaces, &ns, &format!("namespace {}", name)).await
    }

    /// Delete a namespace. The cluster cascades deletion to everything
    /// inside it (quota, limit range, policies, release-created objects).
    #[instrument(skip(self))]
    pub async fn delete_namespace(&self, name: &str) -> Result<()> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        namespaces.delete(name, &DeleteParams::default()).await?;
        info!("namespace {} deletion requested", name);
        Ok(())
    }

    #[instrument(skip(self, quota))]
    pub async fn create_quota(&self, namespace: &str, quota: &ResourceQuota) -> Result<()> {
        let api: Api<ResourceQuota> = Api::namespaced(self.client.clone(), namespace);
        create_accepting_conflict(&api, quota, &format!("resource quota in {}", namespace)).await
    }

    #[instrument(skip(self, limit_range))]
    pub async fn create_limit_range(&self, namespace: &str, limit_range: &LimitRange) -> Result<()> {
        let api: Api<LimitRange> = Api::namespaced(self.client.clone(), namespace);
        create_accepting_conflict(&api, limit_range, &format!("limit range in {}", namespace)).await
    }

    #[instrument(skip(self, policy))]
    pub async fn create_network_policy(
        &self,
        namespace: &str,
        policy: &NetworkPolicy,
    ) -> Result<()> {
        let api: Api<NetworkPolicy> = Api::namespaced(self.client.clone(), namespace);
        create_accepting_conflict(&api, policy, &format!("network policy in {}", namespace)).await
    }
}

/// Create a resource, resolving an HTTP 409 conflict as success so a
/// re-triggered provisioning run can pass over steps it already completed.
/// Any other failure propagates unchanged, carrying status and message.
async fn create_accepting_conflict<K>(api: &Api<K>, resource: &K, what: &str) -> Result<()>
where
    K: Clone + DeserializeOwned + Serialize + std::fmt::Debug,
{
    match api.create(&PostParams::default(), resource).await {
        Ok(_) => {
            info!("created {}", what);
            Ok(())
        }
        Err(e) if is_conflict(&e) => {
            debug!("{} already exists, continuing", what);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn is_conflict(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 409)
}
