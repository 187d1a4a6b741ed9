// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Blocking configuration errors for HA payload generation.
//!
//! These errors halt the current reconfiguration attempt and are surfaced
//! to the operator: the builder reports a `Blocked` unit status with the
//! same message before returning the error, so a human sees why
//! reconfiguration stopped. They are never retried automatically.
//!
//! Soft conditions (an unset hostname setting, a duplicate hostname key,
//! an unavailable goal-state query) are logged and skipped instead of
//! being raised as errors.

use thiserror::Error;

/// A configuration problem that blocks HA payload generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HaConfigError {
    /// The host platform is too old for DNS HA.
    ///
    /// The MAAS DNS resource agent only exists on 16.04 and later, so
    /// DNS HA cannot be configured on earlier releases.
    #[error("DNS HA is only supported on 16.04 and greater versions of Ubuntu.")]
    DnsHaUnsupported,

    /// A DNS hostname setting does not follow the `os-*-hostname` pattern.
    ///
    /// The endpoint type is derived from the setting name, so a setting
    /// outside the pattern indicates a charm programming error rather
    /// than a transient condition.
    #[error("Unexpected DNS hostname setting: {setting}. Cannot determine endpoint_type name")]
    UnexpectedHostnameSetting {
        /// The offending setting name
        setting: String,
    },

    /// DNS HA was requested but no hostname setting produced a resource.
    #[error("DNS HA: Hostname group has no members.")]
    EmptyHostnameGroup,
}

impl HaConfigError {
    /// CamelCase reason code for structured status reporting and logs.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::DnsHaUnsupported => "DnsHaUnsupported",
            Self::UnexpectedHostnameSetting { .. } => "UnexpectedHostnameSetting",
            Self::EmptyHostnameGroup => "EmptyHostnameGroup",
        }
    }
}
