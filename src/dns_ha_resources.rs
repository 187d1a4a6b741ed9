// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS-HA resource builder.
//!
//! Instead of floating a VIP, DNS-based HA keeps a hostname pointed at the
//! active unit through a DNS resource agent. One resource is built per
//! configured `os-*-hostname` setting, keyed by endpoint type, and all of
//! them are collected into a hostname group.
//!
//! DNS HA requires platform capability that only exists from 16.04 onward;
//! the builder verifies that before reading any configuration. Blocking
//! conditions report a `Blocked` unit status before the error is returned
//! so the operator can see why reconfiguration halted.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::constants::{DEFAULT_DNS_HA_AGENT, DNS_HOSTNAME_SETTINGS, MIN_DNS_HA_RELEASE};
use crate::context::{HaContext, UnitState};
use crate::ha_errors::HaConfigError;
use crate::naming::{endpoint_type, hostname_group_name, hostname_resource_name};
use crate::payload::RelationPayload;

/// Report a blocking error to the operator before it is returned.
fn report_blocked(ctx: &impl HaContext, err: &HaConfigError) {
    warn!("Blocking HA configuration error ({}): {}", err.reason(), err);
    ctx.set_unit_status(UnitState::Blocked, &err.to_string());
}

/// Verify the host platform supports DNS HA.
///
/// The release identifier is compared lexicographically against
/// [`MIN_DNS_HA_RELEASE`].
///
/// # Errors
///
/// Returns [`HaConfigError::DnsHaUnsupported`] (after reporting Blocked
/// status) when the platform release is too old.
pub fn assert_supports_dns_ha(ctx: &impl HaContext) -> Result<(), HaConfigError> {
    if ctx.platform_release().as_str() < MIN_DNS_HA_RELEASE {
        let err = HaConfigError::DnsHaUnsupported;
        report_blocked(ctx, &err);
        return Err(err);
    }
    Ok(())
}

/// Build the DNS-HA payload fragment for a service.
///
/// The four hostname settings are processed in declared order; unset
/// settings are skipped with a debug note. `crm_ocf` overrides the
/// resource agent, defaulting to [`DEFAULT_DNS_HA_AGENT`].
///
/// # Errors
///
/// Returns a blocking [`HaConfigError`] when the platform is too old for
/// DNS HA, when a setting name does not follow the `os-*-hostname`
/// pattern, or when no setting produced a resource. Blocked unit status
/// is reported before each of these returns.
pub fn build_dns_ha_resources(
    ctx: &impl HaContext,
    service: &str,
    crm_ocf: Option<&str>,
) -> Result<RelationPayload, HaConfigError> {
    assert_supports_dns_ha(ctx)?;

    let agent = crm_ocf.unwrap_or(DEFAULT_DNS_HA_AGENT);
    let mut payload = RelationPayload::default();
    let mut hostname_group: Vec<String> = Vec::new();

    for setting in DNS_HOSTNAME_SETTINGS {
        let Some(hostname) = ctx.config_value(setting) else {
            debug!("DNS HA: Hostname setting {} is unset. Ignoring.", setting);
            continue;
        };

        let Some(endpoint) = endpoint_type(setting) else {
            let err = HaConfigError::UnexpectedHostnameSetting {
                setting: setting.to_string(),
            };
            report_blocked(ctx, &err);
            return Err(err);
        };

        let hostname_key = hostname_resource_name(service, &endpoint);
        if hostname_group.contains(&hostname_key) {
            debug!(
                "DNS HA: Resource {}: {} already exists in hostname group - skipping",
                hostname_key, hostname
            );
            continue;
        }

        let address = ctx.resolve_address(&endpoint, false);
        payload
            .resources
            .insert(hostname_key.clone(), agent.to_string());
        payload.resource_params.insert(
            hostname_key.clone(),
            format!(r#"params fqdn="{hostname}" ip_address="{address}""#),
        );
        hostname_group.push(hostname_key);
    }

    if hostname_group.is_empty() {
        let err = HaConfigError::EmptyHostnameGroup;
        report_blocked(ctx, &err);
        return Err(err);
    }

    debug!(
        "DNS HA: Hostname group is set with {} as members. Informing the ha relation",
        hostname_group.join(" ")
    );
    payload
        .groups
        .insert(hostname_group_name(service), hostname_group.join(" "));

    Ok(payload)
}

/// Fold DNS-HA resources into caller-owned resource maps and publish the
/// hostname group on the HA relation.
///
/// Convenience for charms that accumulate `resources`/`resource_params`
/// themselves across several build steps: the DNS-HA entries are merged
/// into the supplied maps (DNS-HA entries win on name collisions) and the
/// group mapping alone is published to `relation_id`.
///
/// # Errors
///
/// Propagates any blocking [`HaConfigError`] from
/// [`build_dns_ha_resources`].
pub fn update_dns_ha_resource_params(
    ctx: &impl HaContext,
    service: &str,
    relation_id: Option<&str>,
    resources: &mut BTreeMap<String, String>,
    resource_params: &mut BTreeMap<String, String>,
    crm_ocf: Option<&str>,
) -> Result<(), HaConfigError> {
    let fragment = build_dns_ha_resources(ctx, service, crm_ocf)?;

    let mut data = BTreeMap::new();
    data.insert(
        "groups".to_string(),
        serde_json::to_string(&fragment.groups).unwrap_or_default(),
    );

    resources.extend(fragment.resources);
    resource_params.extend(fragment.resource_params);
    ctx.publish_relation_data(relation_id, &data);
    Ok(())
}
