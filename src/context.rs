// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared context abstracting the surrounding deployment framework.
//!
//! The payload builders never talk to the operating system, the DNS layer,
//! or the relation bus directly. Everything they need is provided through
//! the [`HaContext`] trait:
//!
//! - charm configuration lookup
//! - related-unit discovery (goal state)
//! - endpoint address resolution
//! - network interface and netmask discovery for a VIP
//! - platform release identification
//! - unit status reporting and relation data publishing
//!
//! All calls are synchronous and, apart from [`HaContext::set_unit_status`]
//! and [`HaContext::publish_relation_data`], read-only. Implementations
//! return `None` for absent values; they are not expected to fail
//! transiently.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors from goal-state related-unit discovery.
///
/// Both variants mean the framework could not answer the query; callers
/// treat them as "zero related units", never as a fatal condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoalStateError {
    /// The deployment framework does not implement goal-state queries
    #[error("goal-state queries are not implemented by this framework")]
    Unimplemented,

    /// The requested relation type has no goal-state entry
    #[error("no goal-state entry for relation type '{relation_type}'")]
    NotFound {
        /// The relation type that was queried
        relation_type: String,
    },
}

/// Workload status reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    /// Unit is operating normally
    Active,
    /// Unit cannot proceed without operator intervention
    Blocked,
}

/// Cluster configuration relevant to VIP management.
///
/// Collected by the framework from charm config and peer relations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClusterVipConfig {
    /// Whitespace-separated list of VIP literals (IPv4 and IPv6 mixed)
    pub vip: String,
}

/// Collaborator interface supplied by the deployment framework.
///
/// The builders in [`crate::vip_resources`], [`crate::dns_ha_resources`]
/// and [`crate::relation_data`] are pure over this trait, which keeps them
/// testable with an in-memory stub.
pub trait HaContext {
    /// Units related over `relation_type` according to goal state.
    ///
    /// # Errors
    ///
    /// Returns [`GoalStateError`] when the framework cannot answer;
    /// callers must treat this as an empty unit list.
    fn related_units(&self, relation_type: &str) -> Result<Vec<String>, GoalStateError>;

    /// Charm configuration value for `key`, `None` when unset.
    fn config_value(&self, key: &str) -> Option<String>;

    /// Truthiness of a boolean-ish charm configuration option.
    fn config_enabled(&self, key: &str) -> bool;

    /// Canonical network address for an endpoint type (`admin`, `int`,
    /// `public`, `access`). `allow_override` controls whether configured
    /// hostname overrides participate in resolution.
    fn resolve_address(&self, endpoint_type: &str, allow_override: bool) -> String;

    /// Network interface carrying `ip`, `None` when undiscoverable.
    fn iface_for_address(&self, ip: &str) -> Option<String>;

    /// Netmask of the network carrying `ip`, `None` when undiscoverable.
    fn netmask_for_address(&self, ip: &str) -> Option<String>;

    /// Release identifier of the host platform (e.g. `"22.04"`).
    fn platform_release(&self) -> String;

    /// Report workload status to the operator. Fire-and-forget.
    fn set_unit_status(&self, state: UnitState, message: &str);

    /// Hand an encoded payload to the relation bus. `relation_id` of
    /// `None` targets the current relation context.
    fn publish_relation_data(&self, relation_id: Option<&str>, data: &BTreeMap<String, String>);

    /// Cluster VIP configuration gathered by the framework.
    fn cluster_vip_config(&self) -> ClusterVipConfig;
}
