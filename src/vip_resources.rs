// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! VIP resource builder.
//!
//! Turns the configured virtual IPs into cluster resource descriptions:
//! one `IPaddr2`/`IPv6addr` resource per VIP, a group collecting them, and
//! a pending-deletion list for resources named under the old iface-based
//! scheme.
//!
//! Interface and netmask are auto-detected per VIP. When detection
//! succeeds the parameter string omits `nic`/`cidr_netmask` so the cluster
//! manager picks them per node, which keeps a VIP portable across units
//! with inconsistent interface naming. When detection fails the charm
//! config fallbacks (`vip_iface`, `vip_cidr`) are pinned into the
//! parameters instead.

use std::net::Ipv6Addr;

use tracing::debug;

use crate::constants::{
    CONFIG_VIP_CIDR, CONFIG_VIP_IFACE, RESOURCE_AGENT_IPV4, RESOURCE_AGENT_IPV6, VIP_MONITOR_OP,
    VIP_PARAM_KEY_IPV4, VIP_PARAM_KEY_IPV6,
};
use crate::context::HaContext;
use crate::naming::{legacy_vip_resource_name, vip_group_name, vip_resource_name};
use crate::payload::RelationPayload;

/// Determine which interface and netmask carry the given VIP.
///
/// Discovery goes through the deployment framework; when either lookup
/// yields nothing the charm-supplied fallback config is substituted and
/// the returned flag is `true`.
pub fn vip_settings(
    ctx: &impl HaContext,
    vip: &str,
) -> (Option<String>, Option<String>, bool) {
    let mut iface = ctx.iface_for_address(vip);
    let mut netmask = ctx.netmask_for_address(vip);
    let mut fallback = false;
    if iface.is_none() {
        iface = ctx.config_value(CONFIG_VIP_IFACE);
        fallback = true;
    }
    if netmask.is_none() {
        netmask = ctx.config_value(CONFIG_VIP_CIDR);
        fallback = true;
    }
    (iface, netmask, fallback)
}

/// Build the VIP payload fragment for a service.
///
/// VIPs are processed in the order configured; group membership and
/// legacy-name disambiguation depend on that order. A VIP with no
/// identifiable interface is skipped. No VIPs configured yields an empty
/// fragment; whether that is acceptable is caller policy.
#[must_use]
pub fn build_vip_resources(ctx: &impl HaContext, service: &str) -> RelationPayload {
    let cluster_config = ctx.cluster_vip_config();
    let mut payload = RelationPayload::default();
    let mut vip_group: Vec<String> = Vec::new();

    for vip in cluster_config.vip.split_whitespace() {
        let (agent, param_key) = if vip.parse::<Ipv6Addr>().is_ok() {
            (RESOURCE_AGENT_IPV6, VIP_PARAM_KEY_IPV6)
        } else {
            (RESOURCE_AGENT_IPV4, VIP_PARAM_KEY_IPV4)
        };

        let (iface, netmask, fallback) = vip_settings(ctx, vip);
        let Some(iface) = iface else {
            debug!("No interface found for VIP {}, skipping", vip);
            continue;
        };

        // Old-scheme names encoded the interface, which breaks when
        // interface/subnet wiring differs between units. Collect them so
        // the HA-management peer removes any resource still using one.
        let mut legacy_key = legacy_vip_resource_name(service, &iface);
        if payload.delete_resources.contains(&legacy_key) {
            legacy_key = format!("{legacy_key}_{param_key}");
        }
        if !payload.delete_resources.contains(&legacy_key) {
            payload.delete_resources.push(legacy_key);
        }

        let vip_key = vip_resource_name(service, vip);
        payload.resources.insert(vip_key.clone(), agent.to_string());

        let params = if fallback {
            let netmask = netmask.unwrap_or_default();
            format!(
                r#"params {param_key}="{vip}" cidr_netmask="{netmask}" nic="{iface}" {VIP_MONITOR_OP}"#
            )
        } else {
            format!(r#"params {param_key}="{vip}" {VIP_MONITOR_OP}"#)
        };
        debug!("VIP {} -> {} ({}), fallback: {}", vip, vip_key, agent, fallback);
        payload.resource_params.insert(vip_key.clone(), params);

        vip_group.push(vip_key);
    }

    if !vip_group.is_empty() {
        payload
            .groups
            .insert(vip_group_name(service), vip_group.join(" "));
    }

    payload
}
