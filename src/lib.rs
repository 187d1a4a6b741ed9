// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # crmgen - HA relation data generator for deployment charms
//!
//! crmgen builds the cluster high-availability configuration a deployment
//! charm hands to its HA-management peer: corosync/pacemaker resource
//! descriptions for virtual IPs or DNS-based HA, haproxy clone sets,
//! grouping and colocation rules, all encoded canonically for the
//! relation bus.
//!
//! ## Overview
//!
//! The charm supplies its configuration through the [`context::HaContext`]
//! trait; the builders are pure over it. Resource names are deterministic
//! functions of the service name and the configured input, so repeated
//! runs with identical configuration produce byte-identical relation
//! data and reconfiguration stays idempotent.
//!
//! ## Modules
//!
//! - [`relation_data`] - HA-expectation check and payload assembly
//! - [`vip_resources`] - VIP resource builder (IPv4/IPv6, iface fallback)
//! - [`dns_ha_resources`] - DNS-HA resource builder
//! - [`payload`] - payload model, merge semantics and wire encoding
//! - [`naming`] - deterministic resource and group naming
//! - [`context`] - collaborator seam to the deployment framework
//! - [`ha_errors`] - blocking configuration errors
//!
//! ## Example
//!
//! ```rust
//! use crmgen::payload::RelationPayload;
//!
//! let mut payload = RelationPayload::default();
//! payload
//!     .resources
//!     .insert("res_nova_haproxy".into(), "lsb:haproxy".into());
//! payload
//!     .resource_params
//!     .insert("res_nova_haproxy".into(), r#"op monitor interval="5s""#.into());
//!
//! let encoded = payload.encode();
//! assert_eq!(
//!     encoded.get("json_resources").map(String::as_str),
//!     Some(r#"{"res_nova_haproxy":"lsb:haproxy"}"#)
//! );
//! ```

pub mod constants;
pub mod context;
pub mod dns_ha_resources;
pub mod ha_errors;
pub mod naming;
pub mod payload;
pub mod relation_data;
pub mod vip_resources;

#[cfg(test)]
mod relation_data_tests;
