// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pure builders for the namespaced isolation objects: quota, limit range,
//! and the deny-by-default network policy set. No I/O happens here.

use k8s_openapi::api::core::v1::{
    LimitRange, LimitRangeItem, LimitRangeSpec, ResourceQuota, ResourceQuotaSpec,
};
use k8s_openapi::api::networking::v1::{
    NetworkPolicy, NetworkPolicyIngressRule, NetworkPolicyPeer, NetworkPolicySpec,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

use crate::constants::{labels, objects};

/// Platform-wide hard caps for a tenant namespace. Not tenant-configurable.
pub fn quota() -> ResourceQuota {
    ResourceQuota {
        metadata: ObjectMeta {
            name: Some(objects::QUOTA_NAME.to_string()),
            ..Default::default()
        },
        spec: Some(ResourceQuotaSpec {
            hard: Some(BTreeMap::from([
                ("pods".to_string(), Quantity("10".to_string())),
                ("requests.cpu".to_string(), Quantity("1".to_string())),
                ("requests.memory".to_string(), Quantity("1Gi".to_string())),
                ("limits.cpu".to_string(), Quantity("2".to_string())),
                ("limits.memory".to_string(), Quantity("2Gi".to_string())),
            ])),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Per-container defaults applied to pods that do not declare their own
/// requests or limits.
pub fn limit_range() -> LimitRange {
    LimitRange {
        metadata: ObjectMeta {
            name: Some(objects::LIMIT_RANGE_NAME.to_string()),
            ..Default::default()
        },
        spec: Some(LimitRangeSpec {
            limits: vec![LimitRangeItem {
                type_: "Container".to_string(),
                default: Some(BTreeMap::from([
                    ("cpu".to_string(), Quantity("250m".to_string())),
                    ("memory".to_string(), Quantity("256Mi".to_string())),
                ])),
                default_request: Some(BTreeMap::from([
                    ("cpu".to_string(), Quantity("100m".to_string())),
                    ("memory".to_string(), Quantity("128Mi".to_string())),
                ])),
                ..Default::default()
            }],
        }),
    }
}

/// Pod label carried by the release's frontend pods, per the chart's
/// `app: <release>-<component>` convention.
pub fn frontend_label(release: &str) -> String {
    format!("{}-{}", release, labels::FRONTEND_COMPONENT)
}

/// Pod label carried by the release's database pods.
pub fn database_label(release: &str) -> String {
    format!("{}-{}", release, labels::DATABASE_COMPONENT)
}

/// The three-policy isolation model for a tenant namespace:
///
/// 1. `deny-all`: empty ingress rule set on all pods, blocks everything not
///    explicitly allowed below.
/// 2. `allow-web-ingress`: frontend pods accept ingress from any source, so
///    external traffic routed by the ingress controller can reach them.
/// 3. `allow-internal-db`: database pods accept ingress only from the same
///    release's frontend pods.
///
/// Selectors are computed from the release name using the chart's known
/// labeling convention; see `constants::labels`.
pub fn network_policies(release: &str) -> Vec<NetworkPolicy> {
    let deny_all = NetworkPolicy {
        metadata: ObjectMeta {
            name: Some(objects::POLICY_DENY_ALL.to_string()),
            ..Default::default()
        },
        spec: Some(NetworkPolicySpec {
            pod_selector: LabelSelector::default(),
            policy_types: Some(vec!["Ingress".to_string()]),
            // Empty rule list means no ingress is allowed.
            ingress: Some(vec![]),
            ..Default::default()
        }),
    };

    let allow_web = NetworkPolicy {
        metadata: ObjectMeta {
            name: Some(objects::POLICY_ALLOW_WEB.to_string()),
            ..Default::default()
        },
        spec: Some(NetworkPolicySpec {
            pod_selector: app_selector(&frontend_label(release)),
            policy_types: Some(vec!["Ingress".to_string()]),
            // A single empty rule admits traffic from any source.
            ingress: Some(vec![NetworkPolicyIngressRule::default()]),
            ..Default::default()
        }),
    };

    let allow_internal_db = NetworkPolicy {
        metadata: ObjectMeta {
            name: Some(objects::POLICY_ALLOW_DB.to_string()),
            ..Default::default()
        },
        spec: Some(NetworkPolicySpec {
            pod_selector: app_selector(&database_label(release)),
            policy_types: Some(vec!["Ingress".to_string()]),
            ingress: Some(vec![NetworkPolicyIngressRule {
                from: Some(vec![NetworkPolicyPeer {
                    pod_selector: Some(app_selector(&frontend_label(release))),
                    ..Default::default()
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        }),
    };

    vec![deny_all, allow_web, allow_internal_db]
}

fn app_selector(value: &str) -> LabelSelector {
    LabelSelector {
        match_labels: Some(BTreeMap::from([(
            labels::APP.to_string(),
            value.to_string(),
        )])),
        ..Default::default()
    }
}
