// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Deterministic name derivation for cluster resources and groups.
//!
//! Resource names must be stable across repeated runs with identical input:
//! the HA-management peer compares payloads to detect changes, and groups
//! reference resources by name. VIP resources are therefore named from a
//! hash of the VIP literal rather than from the network interface, which
//! may differ between units.
//!
//! # Naming Scheme
//!
//! | Name | Format |
//! |---|---|
//! | VIP resource | `res_{service}_{sha1(vip)[..7]}` |
//! | Legacy VIP resource | `res_{service}_{iface}` |
//! | VIP group | `grp_{service}_vips` |
//! | Hostname resource | `res_{service}_{endpoint_type}_hostname` |
//! | Hostname group | `grp_{service}_hostnames` |
//! | haproxy resource | `res_{service}_haproxy` |
//! | haproxy clone set | `cl_{service}_haproxy` |

use sha1::{Digest, Sha1};

/// Number of hex characters of the SHA-1 digest kept in a VIP resource name
const VIP_HASH_LEN: usize = 7;

/// Build the name of a VIP resource from the service name and VIP literal.
///
/// The name embeds the first seven hex characters of the SHA-1 digest of
/// the VIP, so it is identical on every unit regardless of local interface
/// naming.
///
/// # Example
///
/// ```rust
/// use crmgen::naming::vip_resource_name;
///
/// assert_eq!(vip_resource_name("nova", "10.5.100.1"), "res_nova_242d562");
/// ```
#[must_use]
pub fn vip_resource_name(service: &str, vip: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(vip.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("res_{service}_{}", &digest[..VIP_HASH_LEN])
}

/// Build the iface-derived name used by the old VIP naming scheme.
///
/// These names are only ever emitted into the pending-deletion list so the
/// HA-management peer can clean up resources created before hash-based
/// naming.
#[must_use]
pub fn legacy_vip_resource_name(service: &str, iface: &str) -> String {
    format!("res_{service}_{iface}")
}

/// Name of the group collecting all VIP resources of a service.
#[must_use]
pub fn vip_group_name(service: &str) -> String {
    format!("grp_{service}_vips")
}

/// Name of the group collecting all DNS-HA hostname resources of a service.
#[must_use]
pub fn hostname_group_name(service: &str) -> String {
    format!("grp_{service}_hostnames")
}

/// Build the name of a DNS-HA hostname resource for an endpoint type.
#[must_use]
pub fn hostname_resource_name(service: &str, endpoint_type: &str) -> String {
    format!("res_{service}_{endpoint_type}_hostname")
}

/// Name of the haproxy resource for a service.
#[must_use]
pub fn haproxy_resource_name(service: &str) -> String {
    format!("res_{service}_haproxy")
}

/// Name of the clone set running the haproxy resource on every node.
#[must_use]
pub fn haproxy_clone_name(service: &str) -> String {
    format!("cl_{service}_haproxy")
}

/// Extract the endpoint type from a DNS hostname setting name.
///
/// Strips the `os-` prefix and `-hostname` suffix. The `internal` endpoint
/// maps to the short token `int`, matching the address-resolution
/// convention of the deployment framework.
///
/// Returns `None` when the setting does not follow the `os-*-hostname`
/// pattern.
///
/// # Example
///
/// ```rust
/// use crmgen::naming::endpoint_type;
///
/// assert_eq!(endpoint_type("os-internal-hostname"), Some("int".to_string()));
/// assert_eq!(endpoint_type("os-public-hostname"), Some("public".to_string()));
/// assert_eq!(endpoint_type("public-hostname"), None);
/// ```
#[must_use]
pub fn endpoint_type(setting: &str) -> Option<String> {
    let inner = setting.strip_prefix("os-")?.strip_suffix("-hostname")?;
    if inner.is_empty() {
        return None;
    }
    match inner {
        "internal" => Some("int".to_string()),
        other => Some(other.to_string()),
    }
}
