// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Relation payload model: resource sets, parameters, groups and the
//! canonical wire encoding.
//!
//! A [`RelationPayload`] is built fresh on every invocation, assembled from
//! fragments returned by the VIP and DNS-HA builders plus caller-supplied
//! extra settings, and finally encoded for the relation bus. Nothing in
//! here has a lifetime beyond the call that returns the payload;
//! persistence belongs to the relation channel.
//!
//! The wire encoding must be byte-stable for identical logical input: the
//! HA-management peer compares encoded values to detect changes. Every
//! mapping is a `BTreeMap`, and `serde_json` emits compact output, which
//! together give a deterministic, whitespace-free, key-ordered encoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::WIRE_KEY_PREFIX;

/// Structured description of cluster resources for the HA relation.
///
/// Top-level keys mirror the hacluster relation schema. All mappings go
/// from a name to an opaque descriptor string the cluster resource
/// manager interprets; this crate only ever formats them.
///
/// Caller-supplied settings use the same type, so extra settings merge
/// with builder output through [`RelationPayload::merge`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationPayload {
    /// Resource name to resource-agent identifier
    pub resources: BTreeMap<String, String>,

    /// Resource name to parameter string. Every resource created by this
    /// crate has a matching entry here.
    pub resource_params: BTreeMap<String, String>,

    /// Group name to space-joined ordered member list
    pub groups: BTreeMap<String, String>,

    /// Clone-set name to cloned resource name
    pub clones: BTreeMap<String, String>,

    /// Colocation constraint name to constraint descriptor
    pub colocations: BTreeMap<String, String>,

    /// Resource name to init service it wraps
    pub init_services: BTreeMap<String, String>,

    /// Legacy-format resource names the peer should remove. Only ever
    /// holds old-scheme names, never current ones.
    pub delete_resources: Vec<String>,

    /// Any further caller-supplied top-level keys (e.g. `locations`,
    /// `orders`), passed through uninterpreted.
    #[serde(flatten)]
    pub extra: BTreeMap<String, BTreeMap<String, String>>,
}

impl RelationPayload {
    /// Deep-merge `other` into this payload.
    ///
    /// Mapping keys merge per entry with `other` winning on collisions;
    /// `delete_resources` entries from `other` are appended after the
    /// existing ones, preserving both insertion orders.
    pub fn merge(&mut self, other: RelationPayload) {
        self.resources.extend(other.resources);
        self.resource_params.extend(other.resource_params);
        self.groups.extend(other.groups);
        self.clones.extend(other.clones);
        self.colocations.extend(other.colocations);
        self.init_services.extend(other.init_services);
        self.delete_resources.extend(other.delete_resources);
        for (key, entries) in other.extra {
            self.extra.entry(key).or_default().extend(entries);
        }
    }

    /// Encode every non-empty top-level key for the relation bus.
    ///
    /// Each value becomes a compact, key-ordered JSON string under
    /// `json_<key>`. Keys with empty values are omitted entirely, so a
    /// payload with nothing configured encodes to an empty mapping.
    #[must_use]
    pub fn encode(&self) -> BTreeMap<String, String> {
        let mut encoded = BTreeMap::new();
        encode_mapping(&mut encoded, "resources", &self.resources);
        encode_mapping(&mut encoded, "resource_params", &self.resource_params);
        encode_mapping(&mut encoded, "groups", &self.groups);
        encode_mapping(&mut encoded, "clones", &self.clones);
        encode_mapping(&mut encoded, "colocations", &self.colocations);
        encode_mapping(&mut encoded, "init_services", &self.init_services);
        if !self.delete_resources.is_empty() {
            encoded.insert(
                wire_key("delete_resources"),
                serde_json::to_string(&self.delete_resources).unwrap_or_default(),
            );
        }
        for (key, entries) in &self.extra {
            encode_mapping(&mut encoded, key, entries);
        }
        encoded
    }
}

fn wire_key(key: &str) -> String {
    format!("{WIRE_KEY_PREFIX}{key}")
}

fn encode_mapping(
    encoded: &mut BTreeMap<String, String>,
    key: &str,
    entries: &BTreeMap<String, String>,
) {
    if !entries.is_empty() {
        encoded.insert(
            wire_key(key),
            serde_json::to_string(entries).unwrap_or_default(),
        );
    }
}
