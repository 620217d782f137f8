// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: a mock Kubernetes API, a scripted release manager, and
//! an in-memory tenant registry.

use async_trait::async_trait;
use chrono::Utc;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

use crate::config::Config;
use crate::error::{Result, StockadeError};
use crate::helm::{ReleaseManager, ReleaseParams};
use crate::kubernetes::ClusterResources;
use crate::lifecycle::WorkflowContext;
use crate::registry::TenantRegistry;
use crate::types::{Tenant, TenantKind, TenantStatus};

/// A mock HTTP service that returns predefined responses based on request
/// method and path. Paths match exactly or by longest registered prefix, so
/// `/api/v1/namespaces` does not shadow `/api/v1/namespaces/x/resourcequotas`.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for POST requests matching the path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.insert("POST", path, status, body);
        self
    }

    /// Add a response for DELETE requests matching the path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.insert("DELETE", path, status, body);
        self
    }

    fn insert(&self, method: &str, path: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Longest-prefix match so nested resource paths route correctly.
        responses
            .iter()
            .filter(|((m, p), _)| m == method && path.starts_with(p.as_str()))
            .max_by_key(|((_, p), _)| p.len())
            .map(|(_, resp)| resp.clone())
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);

        Box::pin(async move {
            match response {
                Some((status, body)) => Ok(Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap()),
                None => {
                    // Default 404 for unmatched requests
                    let body = status_json(404, "Failure", "not found");
                    Ok(Response::builder()
                        .status(404)
                        .header("content-type", "application/json")
                        .body(Body::from(body.into_bytes()))
                        .unwrap())
                }
            }
        })
    }
}

/// JSON body for a created object of the given kind
pub fn object_json(api_version: &str, kind: &str, name: &str) -> String {
    serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
    .to_string()
}

/// JSON Status body with the given code
pub fn status_json(code: u16, status: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": status,
        "message": message,
        "code": code
    })
    .to_string()
}

/// JSON 409 AlreadyExists body for a resource
pub fn conflict_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": format!("{} \"{}\" already exists", resource, name),
        "reason": "AlreadyExists",
        "code": 409
    })
    .to_string()
}

/// Mock cluster that accepts every create a provisioning run performs for
/// the given namespace
pub fn provision_mock(namespace: &str) -> MockService {
    MockService::new()
        .on_post("/api/v1/namespaces", 201, &object_json("v1", "Namespace", namespace))
        .on_post(
            &format!("/api/v1/namespaces/{namespace}/resourcequotas"),
            201,
            &object_json("v1", "ResourceQuota", "tenant-quota"),
        )
        .on_post(
            &format!("/api/v1/namespaces/{namespace}/limitranges"),
            201,
            &object_json("v1", "LimitRange", "tenant-limit-range"),
        )
        .on_post(
            &format!("/apis/networking.k8s.io/v1/namespaces/{namespace}/networkpolicies"),
            201,
            &object_json("networking.k8s.io/v1", "NetworkPolicy", "deny-all"),
        )
}

/// Release manager whose outcomes are scripted per operation. Records every
/// invocation for assertions.
#[derive(Default)]
pub struct FakeReleaseManager {
    installs: Mutex<Vec<ReleaseParams>>,
    uninstalls: Mutex<Vec<(String, String)>>,
    install_error: Option<String>,
    uninstall_error: Option<String>,
}

impl FakeReleaseManager {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing_install(stderr: &str) -> Self {
        Self {
            install_error: Some(stderr.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_uninstall(stderr: &str) -> Self {
        Self {
            uninstall_error: Some(stderr.to_string()),
            ..Default::default()
        }
    }

    pub fn installs(&self) -> Vec<ReleaseParams> {
        self.installs.lock().unwrap().clone()
    }

    pub fn uninstalls(&self) -> Vec<(String, String)> {
        self.uninstalls.lock().unwrap().clone()
    }

    fn helm_error(operation: &'static str, release: &str, stderr: &str) -> StockadeError {
        StockadeError::HelmError {
            operation,
            release: release.to_string(),
            detail: format!("exit status: 1: {}", stderr),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

#[async_trait]
impl ReleaseManager for FakeReleaseManager {
    async fn install_or_upgrade(&self, params: &ReleaseParams) -> Result<()> {
        self.installs.lock().unwrap().push(params.clone());
        match &self.install_error {
            Some(stderr) => Err(Self::helm_error("upgrade", &params.release, stderr)),
            None => Ok(()),
        }
    }

    async fn uninstall(&self, release: &str, namespace: &str) -> Result<()> {
        self.uninstalls
            .lock()
            .unwrap()
            .push((release.to_string(), namespace.to_string()));
        match &self.uninstall_error {
            Some(stderr) => Err(Self::helm_error("uninstall", release, stderr)),
            None => Ok(()),
        }
    }
}

/// In-memory stand-in for the external tenant registry.
#[derive(Default)]
pub struct InMemoryRegistry {
    records: Mutex<HashMap<String, (TenantStatus, Option<String>)>>,
}

impl InMemoryRegistry {
    pub fn with_tenant(id: &str, status: TenantStatus) -> Self {
        let registry = Self::default();
        registry.insert(id, status);
        registry
    }

    pub fn insert(&self, id: &str, status: TenantStatus) {
        self.records
            .lock()
            .unwrap()
            .insert(id.to_string(), (status, None));
    }

    pub fn record(&self, id: &str) -> Option<(TenantStatus, Option<String>)> {
        self.records.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl TenantRegistry for InMemoryRegistry {
    async fn update_status(&self, id: &str, status: TenantStatus, url: Option<&str>) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(id.to_string(), (status, url.map(String::from)));
        Ok(())
    }

    async fn delete_record(&self, id: &str) -> Result<()> {
        self.records.lock().unwrap().remove(id);
        Ok(())
    }
}

/// A woocommerce tenant in PROVISIONING, as handed over by the API layer
pub fn sample_tenant(id: &str, name: &str) -> Tenant {
    Tenant {
        id: id.to_string(),
        name: name.to_string(),
        kind: TenantKind::Woocommerce,
        status: TenantStatus::Provisioning,
        url: None,
        created_at: Utc::now(),
    }
}

pub fn test_config() -> Config {
    Config {
        base_domain: "localtest.me".to_string(),
        woocommerce_chart: "../helm/tenant-woocommerce".to_string(),
        medusa_chart: "../helm/tenant-medusa-stub".to_string(),
        helm_bin: "helm".to_string(),
    }
}

/// Workflow context wired to the mock cluster and the given fakes
pub fn workflow_context(
    mock: MockService,
    releases: Arc<FakeReleaseManager>,
    registry: Arc<InMemoryRegistry>,
) -> WorkflowContext {
    WorkflowContext {
        resources: ClusterResources::new(mock.into_client()),
        releases,
        registry,
        config: test_config(),
    }
}
