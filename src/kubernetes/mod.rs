// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Thin, conflict-tolerant wrappers around the cluster API.

pub mod resources;

pub use resources::ClusterResources;
