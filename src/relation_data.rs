// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HA relation data assembly.
//!
//! The assembler merges the haproxy clone-set block, caller-supplied extra
//! settings and the output of exactly one of the two resource builders
//! (DNS-HA when `dns-ha` is enabled, VIP otherwise) into a single payload,
//! then encodes it for the relation bus.
//!
//! Re-run on every relation-changed event from the surrounding workflow;
//! identical configuration always encodes to identical bytes, so the peer
//! can detect real changes by comparison.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::constants::{
    CONFIG_DNS_HA, CONFIG_VIP, HAPROXY_INIT_SERVICE, HAPROXY_MONITOR_OP, HA_RELATION_TYPE,
    RESOURCE_AGENT_HAPROXY,
};
use crate::context::{HaContext, UnitState};
use crate::dns_ha_resources::build_dns_ha_resources;
use crate::ha_errors::HaConfigError;
use crate::naming::{haproxy_clone_name, haproxy_resource_name};
use crate::payload::RelationPayload;
use crate::vip_resources::build_vip_resources;

/// Decide whether this unit should expect an HA relation.
///
/// True when goal state lists at least one related unit for the `ha`
/// relation, or when either the `vip` or `dns-ha` option is set. A failed
/// goal-state query counts as zero related units.
#[must_use]
pub fn expect_ha(ctx: &impl HaContext) -> bool {
    let related_units = ctx.related_units(HA_RELATION_TYPE).unwrap_or_default();
    !related_units.is_empty()
        || ctx.config_value(CONFIG_VIP).is_some_and(|vip| !vip.is_empty())
        || ctx.config_enabled(CONFIG_DNS_HA)
}

/// Generate the encoded relation data for the HA relation.
///
/// With `haproxy_enabled` the payload carries the haproxy resource, its
/// monitor parameter, init-service entry and clone set. `extra_settings`
/// are deep-merged next (extra wins inside each mapping), and finally the
/// DNS-HA or VIP builder contributes the service-level resources.
///
/// Returns the `json_`-prefixed encoded mapping; keys whose values are
/// empty are absent.
///
/// # Errors
///
/// Propagates blocking [`HaConfigError`]s from the DNS-HA builder; the
/// VIP path never fails at this layer.
pub fn generate_ha_relation_data(
    ctx: &impl HaContext,
    service: &str,
    haproxy_enabled: bool,
    extra_settings: Option<RelationPayload>,
) -> Result<BTreeMap<String, String>, HaConfigError> {
    let mut payload = RelationPayload::default();

    if haproxy_enabled {
        let haproxy_res = haproxy_resource_name(service);
        payload
            .resources
            .insert(haproxy_res.clone(), RESOURCE_AGENT_HAPROXY.to_string());
        payload
            .resource_params
            .insert(haproxy_res.clone(), HAPROXY_MONITOR_OP.to_string());
        payload
            .init_services
            .insert(haproxy_res.clone(), HAPROXY_INIT_SERVICE.to_string());
        payload
            .clones
            .insert(haproxy_clone_name(service), haproxy_res);
    }

    if let Some(extra) = extra_settings {
        payload.merge(extra);
    }

    if ctx.config_enabled(CONFIG_DNS_HA) {
        payload.merge(build_dns_ha_resources(ctx, service, None)?);
    } else {
        payload.merge(build_vip_resources(ctx, service));
    }

    debug!(
        "Generated HA relation data for {}: {} resources",
        service,
        payload.resources.len()
    );
    Ok(payload.encode())
}

/// Generate the HA relation data and publish it to the relation bus.
///
/// Glue for relation-joined/changed hooks; see
/// [`generate_ha_relation_data`] for the payload contents. A successful
/// publish clears any earlier Blocked status by reporting the unit
/// Active again.
///
/// # Errors
///
/// Propagates blocking [`HaConfigError`]s from payload generation;
/// nothing is published in that case and the Blocked status reported by
/// the builder stands.
pub fn publish_ha_relation_data(
    ctx: &impl HaContext,
    service: &str,
    relation_id: Option<&str>,
    haproxy_enabled: bool,
    extra_settings: Option<RelationPayload>,
) -> Result<(), HaConfigError> {
    let data = generate_ha_relation_data(ctx, service, haproxy_enabled, extra_settings)?;
    info!(
        "Publishing HA relation data for {} ({} keys)",
        service,
        data.len()
    );
    ctx.publish_relation_data(relation_id, &data);
    ctx.set_unit_status(UnitState::Active, "Unit is ready");
    Ok(())
}
