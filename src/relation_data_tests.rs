// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `relation_data`

#[cfg(test)]
mod tests {
    use crate::context::{ClusterVipConfig, GoalStateError, HaContext, UnitState};
    use crate::ha_errors::HaConfigError;
    use crate::payload::RelationPayload;
    use crate::relation_data::{expect_ha, generate_ha_relation_data, publish_ha_relation_data};
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    /// In-memory deployment framework covering the full assembler flow.
    struct StubContext {
        related_units: Result<Vec<String>, GoalStateError>,
        vip: String,
        config: BTreeMap<String, String>,
        ifaces: BTreeMap<String, String>,
        netmasks: BTreeMap<String, String>,
        published: RefCell<Vec<(Option<String>, BTreeMap<String, String>)>>,
    }

    impl Default for StubContext {
        fn default() -> Self {
            StubContext {
                related_units: Ok(Vec::new()),
                vip: String::new(),
                config: BTreeMap::new(),
                ifaces: BTreeMap::new(),
                netmasks: BTreeMap::new(),
                published: RefCell::new(Vec::new()),
            }
        }
    }

    impl StubContext {
        /// The three-VIP network layout used across the assembler tests.
        fn with_vips() -> Self {
            let mut ctx = StubContext {
                vip: "10.5.100.1 ffff::1 ffaa::1".to_string(),
                ..Default::default()
            };
            for (addr, iface) in [
                ("10.5.100.1", "eth1"),
                ("ffff::1", "eth1"),
                ("ffaa::1", "eth2"),
            ] {
                ctx.ifaces.insert(addr.into(), iface.into());
            }
            for (addr, netmask) in [
                ("10.5.100.1", "255.255.255.0"),
                ("ffff::1", "64"),
                ("ffaa::1", "32"),
            ] {
                ctx.netmasks.insert(addr.into(), netmask.into());
            }
            ctx
        }
    }

    impl HaContext for StubContext {
        fn related_units(&self, _relation_type: &str) -> Result<Vec<String>, GoalStateError> {
            self.related_units.clone()
        }

        fn config_value(&self, key: &str) -> Option<String> {
            self.config.get(key).cloned()
        }

        fn config_enabled(&self, key: &str) -> bool {
            self.config.get(key).is_some_and(|value| value == "true")
        }

        fn resolve_address(&self, _endpoint_type: &str, _allow_override: bool) -> String {
            "10.0.0.1".to_string()
        }

        fn iface_for_address(&self, ip: &str) -> Option<String> {
            self.ifaces.get(ip).cloned()
        }

        fn netmask_for_address(&self, ip: &str) -> Option<String> {
            self.netmasks.get(ip).cloned()
        }

        fn platform_release(&self) -> String {
            "22.04".to_string()
        }

        fn set_unit_status(&self, _state: UnitState, _message: &str) {}

        fn publish_relation_data(
            &self,
            relation_id: Option<&str>,
            data: &BTreeMap<String, String>,
        ) {
            self.published
                .borrow_mut()
                .push((relation_id.map(String::from), data.clone()));
        }

        fn cluster_vip_config(&self) -> ClusterVipConfig {
            ClusterVipConfig {
                vip: self.vip.clone(),
            }
        }
    }

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    /// Extra settings mirroring a charm that manages its own console-auth
    /// resource alongside the generated ones.
    fn extra_settings() -> RelationPayload {
        RelationPayload {
            colocations: map(&[("vip_cauth", "inf: res_nova_cauth grp_nova_vips")]),
            init_services: map(&[("res_nova_cauth", "nova-cauth")]),
            groups: map(&[("grp_testservice_wombles", "res_testservice_orinoco")]),
            delete_resources: vec!["res_ceilometer_polling".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_expect_ha_nothing_configured() {
        assert!(!expect_ha(&StubContext::default()));
    }

    #[test]
    fn test_expect_ha_related_units() {
        let ctx = StubContext {
            related_units: Ok(vec![
                "hacluster-unit/0".into(),
                "hacluster-unit/1".into(),
                "hacluster-unit/2".into(),
            ]),
            ..Default::default()
        };
        assert!(expect_ha(&ctx));
    }

    #[test]
    fn test_expect_ha_vip_with_failed_goal_state() {
        let mut ctx = StubContext {
            related_units: Err(GoalStateError::Unimplemented),
            ..Default::default()
        };
        ctx.config.insert("vip".into(), "10.0.0.1".into());
        assert!(expect_ha(&ctx));
    }

    #[test]
    fn test_expect_ha_dns_ha_with_missing_goal_state() {
        let mut ctx = StubContext {
            related_units: Err(GoalStateError::NotFound {
                relation_type: "ha".into(),
            }),
            ..Default::default()
        };
        ctx.config.insert("dns-ha".into(), "true".into());
        assert!(expect_ha(&ctx));
    }

    #[test]
    fn test_expect_ha_empty_vip_is_not_enough() {
        let mut ctx = StubContext::default();
        ctx.config.insert("vip".into(), String::new());
        assert!(!expect_ha(&ctx));
    }

    #[test]
    fn test_generate_with_haproxy_and_extra_settings() {
        let ctx = StubContext::with_vips();

        let data =
            generate_ha_relation_data(&ctx, "testservice", true, Some(extra_settings())).unwrap();

        let expected = map(&[
            (
                "json_resources",
                r#"{"res_testservice_242d562":"ocf:heartbeat:IPaddr2","res_testservice_856d56f":"ocf:heartbeat:IPv6addr","res_testservice_f563c5d":"ocf:heartbeat:IPv6addr","res_testservice_haproxy":"lsb:haproxy"}"#,
            ),
            (
                "json_resource_params",
                r#"{"res_testservice_242d562":"params ip=\"10.5.100.1\" op monitor depth=\"0\" timeout=\"20s\" interval=\"10s\"","res_testservice_856d56f":"params ipv6addr=\"ffff::1\" op monitor depth=\"0\" timeout=\"20s\" interval=\"10s\"","res_testservice_f563c5d":"params ipv6addr=\"ffaa::1\" op monitor depth=\"0\" timeout=\"20s\" interval=\"10s\"","res_testservice_haproxy":"op monitor interval=\"5s\""}"#,
            ),
            (
                "json_groups",
                r#"{"grp_testservice_vips":"res_testservice_242d562 res_testservice_856d56f res_testservice_f563c5d","grp_testservice_wombles":"res_testservice_orinoco"}"#,
            ),
            (
                "json_clones",
                r#"{"cl_testservice_haproxy":"res_testservice_haproxy"}"#,
            ),
            (
                "json_colocations",
                r#"{"vip_cauth":"inf: res_nova_cauth grp_nova_vips"}"#,
            ),
            (
                "json_init_services",
                r#"{"res_nova_cauth":"nova-cauth","res_testservice_haproxy":"haproxy"}"#,
            ),
            (
                "json_delete_resources",
                r#"["res_ceilometer_polling","res_testservice_eth1","res_testservice_eth1_ipv6addr","res_testservice_eth2"]"#,
            ),
        ]);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_generate_haproxy_disabled() {
        let ctx = StubContext::with_vips();

        let data =
            generate_ha_relation_data(&ctx, "testservice", false, Some(extra_settings())).unwrap();

        assert!(!data.contains_key("json_clones"));
        let resources = data.get("json_resources").unwrap();
        assert!(!resources.contains("res_testservice_haproxy"));
        // Extra init services survive even without the haproxy block
        assert_eq!(
            data.get("json_init_services").map(String::as_str),
            Some(r#"{"res_nova_cauth":"nova-cauth"}"#)
        );
    }

    #[test]
    fn test_generate_dns_ha_branch() {
        let mut ctx = StubContext::with_vips();
        ctx.config.insert("dns-ha".into(), "true".into());
        ctx.config
            .insert("os-admin-hostname".into(), "test.admin.maas".into());
        ctx.config
            .insert("os-internal-hostname".into(), "test.internal.maas".into());
        ctx.config
            .insert("os-public-hostname".into(), "test.public.maas".into());

        let data = generate_ha_relation_data(&ctx, "testservice", true, None).unwrap();

        let expected = map(&[
            (
                "json_resources",
                r#"{"res_testservice_admin_hostname":"ocf:maas:dns","res_testservice_haproxy":"lsb:haproxy","res_testservice_int_hostname":"ocf:maas:dns","res_testservice_public_hostname":"ocf:maas:dns"}"#,
            ),
            (
                "json_resource_params",
                r#"{"res_testservice_admin_hostname":"params fqdn=\"test.admin.maas\" ip_address=\"10.0.0.1\"","res_testservice_haproxy":"op monitor interval=\"5s\"","res_testservice_int_hostname":"params fqdn=\"test.internal.maas\" ip_address=\"10.0.0.1\"","res_testservice_public_hostname":"params fqdn=\"test.public.maas\" ip_address=\"10.0.0.1\""}"#,
            ),
            (
                "json_groups",
                r#"{"grp_testservice_hostnames":"res_testservice_admin_hostname res_testservice_int_hostname res_testservice_public_hostname"}"#,
            ),
            (
                "json_clones",
                r#"{"cl_testservice_haproxy":"res_testservice_haproxy"}"#,
            ),
            (
                "json_init_services",
                r#"{"res_testservice_haproxy":"haproxy"}"#,
            ),
        ]);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_generate_dns_ha_without_hostnames_is_blocking() {
        let mut ctx = StubContext::default();
        ctx.config.insert("dns-ha".into(), "true".into());

        assert_eq!(
            generate_ha_relation_data(&ctx, "testservice", true, None).unwrap_err(),
            HaConfigError::EmptyHostnameGroup
        );
    }

    #[test]
    fn test_generate_minimal_payload_has_no_empty_keys() {
        let ctx = StubContext::default();

        let data = generate_ha_relation_data(&ctx, "testservice", false, None).unwrap();

        assert!(data.is_empty());
    }

    #[test]
    fn test_generate_is_byte_stable() {
        let ctx = StubContext::with_vips();
        assert_eq!(
            generate_ha_relation_data(&ctx, "testservice", true, Some(extra_settings())).unwrap(),
            generate_ha_relation_data(&ctx, "testservice", true, Some(extra_settings())).unwrap()
        );
    }

    #[test]
    fn test_publish_ha_relation_data() {
        let ctx = StubContext::with_vips();

        publish_ha_relation_data(&ctx, "testservice", Some("ha:1"), true, None).unwrap();

        let expected = generate_ha_relation_data(&ctx, "testservice", true, None).unwrap();
        let published = ctx.published.borrow();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0.as_deref(), Some("ha:1"));
        assert_eq!(published[0].1, expected);
    }

    #[test]
    fn test_publish_ha_relation_data_blocking_error_publishes_nothing() {
        let mut ctx = StubContext::default();
        ctx.config.insert("dns-ha".into(), "true".into());

        let err =
            publish_ha_relation_data(&ctx, "testservice", Some("ha:1"), true, None).unwrap_err();

        assert_eq!(err, HaConfigError::EmptyHostnameGroup);
        assert!(ctx.published.borrow().is_empty());
    }
}
