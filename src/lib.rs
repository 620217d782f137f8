// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod helm;
pub mod kubernetes;
pub mod lifecycle;
pub mod registry;
pub mod templates;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;
