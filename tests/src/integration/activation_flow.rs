//! # Activation Flow
//!
//! Drives `PollPlugin::on_activate` end to end against the in-memory host.
//!
//! ## Properties Tested
//!
//! 1. **Version gate**: `5.9.0` is rejected, `5.10.0` activates
//! 2. **Fail-fast**: when stage N fails, no later stage reaches the host
//! 3. **No rollback**: side effects of completed stages survive a failure
//! 4. **Deactivation**: always succeeds, from any state

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pb_01_version_gate::VersionErrorKind;
    use pb_telemetry::{encode_metrics, register_metrics};
    use plugin_runtime::adapters::{CatalogLocalizer, HostCall, InMemoryHost};
    use plugin_runtime::{
        ActivationError, ActivationErrorKind, ActivationStage, LifecycleState, PluginConfig,
        PluginHost, PollPlugin,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn plugin_with(host: &Arc<InMemoryHost>) -> PollPlugin {
        PollPlugin::new(PluginConfig::default(), PluginHost::in_memory(host))
            .expect("default config is valid")
    }

    /// Host calls made by each stage, in order.
    const STAGE_CALLS: [HostCall; 9] = [
        HostCall::ServerVersion,
        HostCall::ServerConfig,
        HostCall::OpenStore,
        HostCall::NewBundle,
        HostCall::EnsureBot,
        HostCall::PatchBot,
        HostCall::ReadAsset,
        HostCall::SetProfileImage,
        HostCall::BuildRoutes,
    ];

    // =============================================================================
    // VERSION GATE
    // =============================================================================

    #[test]
    fn test_old_server_is_rejected() {
        let host = Arc::new(InMemoryHost::new());
        host.set_server_version("5.9.0");
        let plugin = plugin_with(&host);

        let err = plugin.on_activate().unwrap_err();

        match &err {
            ActivationError::Version(version) => {
                assert_eq!(version.kind(), VersionErrorKind::BelowMinimum)
            }
            other => panic!("expected a version error, got {other:?}"),
        }
        assert!(err
            .to_string()
            .contains("this plugin requires Mattermost v5.10.0 or later"));
        assert!(!plugin.is_activated());
        assert_eq!(host.calls(), vec![HostCall::ServerVersion]);
    }

    #[test]
    fn test_minimum_server_activates() {
        let host = Arc::new(InMemoryHost::new());
        host.set_server_version("5.10.0");
        let plugin = plugin_with(&host);

        plugin.on_activate().unwrap();

        assert!(plugin.is_activated());
        assert_eq!(host.calls(), STAGE_CALLS.to_vec());
    }

    #[test]
    fn test_prerelease_of_minimum_is_rejected() {
        let host = Arc::new(InMemoryHost::new());
        host.set_server_version("5.10.0-rc1");
        let plugin = plugin_with(&host);

        let err = plugin.on_activate().unwrap_err();
        assert_eq!(err.kind(), ActivationErrorKind::Version);
    }

    #[test]
    fn test_garbage_version_is_unparseable() {
        let host = Arc::new(InMemoryHost::new());
        host.set_server_version("v-next");
        let plugin = plugin_with(&host);

        match plugin.on_activate().unwrap_err() {
            ActivationError::Version(version) => {
                assert_eq!(version.kind(), VersionErrorKind::Unparseable)
            }
            other => panic!("expected a version error, got {other:?}"),
        }
    }

    // =============================================================================
    // FAIL-FAST ORDERING
    // =============================================================================

    #[test]
    fn test_missing_site_url_is_configuration_error() {
        let host = Arc::new(InMemoryHost::new());
        host.set_site_url(Some(""));
        let plugin = plugin_with(&host);

        let err = plugin.on_activate().unwrap_err();

        assert_eq!(err.kind(), ActivationErrorKind::Configuration);
        assert_eq!(
            err.to_string(),
            "siteURL is not set. Please set a siteURL and restart the plugin"
        );
        assert_eq!(host.calls(), STAGE_CALLS[..2].to_vec());
    }

    #[test]
    fn test_failing_stage_stops_all_later_stages() {
        // Every fallible call, with the index of the stage it belongs to.
        let fallible = [
            (2, HostCall::OpenStore, ActivationErrorKind::DependencyInit),
            (3, HostCall::NewBundle, ActivationErrorKind::DependencyInit),
            (4, HostCall::EnsureBot, ActivationErrorKind::Identity),
            (5, HostCall::PatchBot, ActivationErrorKind::Identity),
            (6, HostCall::ReadAsset, ActivationErrorKind::Identity),
            (7, HostCall::SetProfileImage, ActivationErrorKind::Identity),
        ];

        for (index, call, kind) in fallible {
            let host = Arc::new(InMemoryHost::new());
            host.fail_on(call);
            let plugin = plugin_with(&host);

            let err = plugin.on_activate().unwrap_err();

            assert_eq!(err.kind(), kind, "failing {call:?}");
            assert_eq!(host.calls(), STAGE_CALLS[..=index].to_vec(), "failing {call:?}");
            assert_eq!(plugin.state(), LifecycleState::Inactive);
            assert!(plugin.store().is_none());
        }
    }

    #[test]
    fn test_stage_errors_carry_stage_prefix() {
        let cases = [
            (HostCall::OpenStore, "failed to create store: "),
            (HostCall::NewBundle, "failed to init localisation bundle: "),
            (HostCall::EnsureBot, "failed to ensure bot user: "),
            (HostCall::PatchBot, "failed to patch bot description: "),
            (HostCall::SetProfileImage, "failed to set profile image: "),
        ];

        for (call, prefix) in cases {
            let host = Arc::new(InMemoryHost::new());
            host.fail_on(call);
            let err = plugin_with(&host).on_activate().unwrap_err();
            assert!(err.to_string().starts_with(prefix), "{err}");
        }
    }

    #[test]
    fn test_failure_is_counted_per_stage() {
        register_metrics().unwrap();
        let host = Arc::new(InMemoryHost::new());
        host.fail_on(HostCall::NewBundle);

        let err = plugin_with(&host).on_activate().unwrap_err();
        assert_eq!(err.stage(), Some(ActivationStage::InitBundle));

        let metrics = encode_metrics().unwrap();
        assert!(metrics.contains(r#"pb_activation_failures_total{stage="init_bundle"}"#));
    }

    // =============================================================================
    // NO ROLLBACK & REACTIVATION
    // =============================================================================

    #[test]
    fn test_bot_survives_failed_image_upload() {
        let host = Arc::new(InMemoryHost::new());
        host.remove_asset("assets/logo_dark.png");
        let plugin = plugin_with(&host);

        let err = plugin.on_activate().unwrap_err();
        assert_eq!(err.stage(), Some(ActivationStage::SetProfileImage));

        let bot = host.bot_id("matterpoll").expect("bot kept after failure");
        assert_eq!(host.patches().len(), 1);
        assert_eq!(host.profile_image(&bot), None);

        // Next attempt repeats every stage and reuses the same bot.
        host.put_asset("assets/logo_dark.png", b"png".to_vec());
        plugin.on_activate().unwrap();
        assert_eq!(plugin.bot_user_id(), Some(bot.clone()));
        assert_eq!(host.patches().len(), 2);
        assert_eq!(host.profile_image(&bot), Some(b"png".to_vec()));
    }

    #[test]
    fn test_description_uses_server_locale() {
        let host = Arc::new(InMemoryHost::new());
        host.set_server_locale("de");
        host.set_catalog(CatalogLocalizer::new().with_translation(
            "de",
            "bot.description",
            "Umfrage-Bot",
        ));
        let plugin = plugin_with(&host);

        plugin.on_activate().unwrap();

        let (_, patch) = &host.patches()[0];
        assert_eq!(patch.description.as_deref(), Some("Umfrage-Bot"));
    }

    #[test]
    fn test_store_namespace_follows_plugin_version() {
        let host = Arc::new(InMemoryHost::new());
        let mut config = PluginConfig::default();
        config.manifest.version = "1.4.0".to_string();
        let plugin = PollPlugin::new(config, PluginHost::in_memory(&host)).unwrap();

        plugin.on_activate().unwrap();
        assert_eq!(host.opened_namespaces(), vec!["1.4.0".to_string()]);
    }

    // =============================================================================
    // DEACTIVATION
    // =============================================================================

    #[test]
    fn test_deactivate_from_any_state() {
        let host = Arc::new(InMemoryHost::new());
        let plugin = plugin_with(&host);

        // Never activated.
        plugin.on_deactivate();
        plugin.on_deactivate();
        assert!(!plugin.is_activated());

        plugin.on_activate().unwrap();
        plugin.on_deactivate();
        assert!(!plugin.is_activated());
        assert!(plugin.routes().is_none());

        // Deactivation reverses nothing on the host.
        assert_eq!(host.bot_count(), 1);
    }

    #[test]
    fn test_reactivate_after_deactivate() {
        let host = Arc::new(InMemoryHost::new());
        let plugin = plugin_with(&host);

        plugin.on_activate().unwrap();
        plugin.on_deactivate();
        plugin.on_activate().unwrap();

        assert!(plugin.is_activated());
        assert_eq!(host.call_count(HostCall::EnsureBot), 2);
        assert_eq!(host.bot_count(), 1);
    }
}
