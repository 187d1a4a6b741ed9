// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the crmgen payload generator.
//!
//! This module contains the string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Cluster Resource Agents
// ============================================================================

/// Resource agent managing an IPv4 virtual IP
pub const RESOURCE_AGENT_IPV4: &str = "ocf:heartbeat:IPaddr2";

/// Resource agent managing an IPv6 virtual IP
pub const RESOURCE_AGENT_IPV6: &str = "ocf:heartbeat:IPv6addr";

/// Resource agent managing the haproxy init service
pub const RESOURCE_AGENT_HAPROXY: &str = "lsb:haproxy";

/// Default resource agent for DNS-based HA (MAAS DNS updates)
pub const DEFAULT_DNS_HA_AGENT: &str = "ocf:maas:dns";

// ============================================================================
// Resource Parameter Fragments
// ============================================================================

/// Monitor operation appended to every VIP resource
pub const VIP_MONITOR_OP: &str = r#"op monitor depth="0" timeout="20s" interval="10s""#;

/// Monitor operation for the haproxy clone-set resource
pub const HAPROXY_MONITOR_OP: &str = r#"op monitor interval="5s""#;

/// Parameter key carrying an IPv4 VIP literal
pub const VIP_PARAM_KEY_IPV4: &str = "ip";

/// Parameter key carrying an IPv6 VIP literal
pub const VIP_PARAM_KEY_IPV6: &str = "ipv6addr";

// ============================================================================
// Relation and Configuration Keys
// ============================================================================

/// Relation type connecting this charm to its HA-management peer
pub const HA_RELATION_TYPE: &str = "ha";

/// Charm config key holding the whitespace-separated VIP list
pub const CONFIG_VIP: &str = "vip";

/// Charm config key enabling DNS-based HA
pub const CONFIG_DNS_HA: &str = "dns-ha";

/// Charm config key with the fallback network interface for VIPs
pub const CONFIG_VIP_IFACE: &str = "vip_iface";

/// Charm config key with the fallback netmask for VIPs
pub const CONFIG_VIP_CIDR: &str = "vip_cidr";

/// DNS hostname settings, iterated in this order when building DNS-HA
/// resources. The order is part of the group-membership contract.
pub const DNS_HOSTNAME_SETTINGS: [&str; 4] = [
    "os-admin-hostname",
    "os-internal-hostname",
    "os-public-hostname",
    "os-access-hostname",
];

/// Init service started alongside the haproxy resource
pub const HAPROXY_INIT_SERVICE: &str = "haproxy";

// ============================================================================
// Platform Requirements
// ============================================================================

/// Minimum platform release supporting DNS HA (lexicographic compare).
/// The MAAS DNS resource agent is only available from this release onward.
pub const MIN_DNS_HA_RELEASE: &str = "16.04";

// ============================================================================
// Wire Encoding
// ============================================================================

/// Prefix applied to every encoded top-level payload key on the relation bus
pub const WIRE_KEY_PREFIX: &str = "json_";
