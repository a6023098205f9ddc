//! # Activation Gate Concurrency
//!
//! Many request handlers read the activation gate while lifecycle
//! transitions write it. Host calls are slowed down so that readers and
//! writers genuinely overlap.
//!
//! ## Properties Tested
//!
//! 1. **Single run**: concurrent `on_activate` calls run the stages once
//! 2. **Monotonic view**: readers never see the gate go back from `Active`
//!    without a deactivation
//! 3. **Non-blocking reads**: readers make progress while a host call stalls
//! 4. **Deactivation wins**: an activation overtaken by `on_deactivate`
//!    never commits

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use plugin_runtime::adapters::{HostCall, InMemoryHost};
    use plugin_runtime::ports::{HostEnvironment, ServerConfig};
    use plugin_runtime::{
        ActivationError, LifecycleState, PluginConfig, PluginHost, PollPlugin,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Host environment whose version lookup stalls.
    struct SlowEnvironment {
        inner: Arc<InMemoryHost>,
        delay: Duration,
    }

    impl HostEnvironment for SlowEnvironment {
        fn server_version(&self) -> String {
            std::thread::sleep(self.delay);
            self.inner.server_version()
        }

        fn server_config(&self) -> ServerConfig {
            self.inner.server_config()
        }
    }

    fn slow_plugin(delay: Duration) -> (Arc<PollPlugin>, Arc<InMemoryHost>) {
        let host = Arc::new(InMemoryHost::new());
        let wiring = PluginHost {
            environment: Arc::new(SlowEnvironment {
                inner: Arc::clone(&host),
                delay,
            }),
            ..PluginHost::in_memory(&host)
        };
        let plugin = PollPlugin::new(PluginConfig::default(), wiring).expect("valid config");
        (Arc::new(plugin), host)
    }

    fn wait_for_state(plugin: &PollPlugin, state: LifecycleState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while plugin.state() != state {
            assert!(Instant::now() < deadline, "timed out waiting for {state:?}");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    // =============================================================================
    // TESTS
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_activations_run_stages_once() {
        let (plugin, host) = slow_plugin(Duration::from_millis(50));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let plugin = Arc::clone(&plugin);
                tokio::task::spawn_blocking(move || plugin.on_activate())
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => succeeded += 1,
                Err(ActivationError::AlreadyActivating) => {}
                Err(other) => panic!("unexpected activation error: {other}"),
            }
        }

        assert!(succeeded >= 1);
        assert!(plugin.is_activated());
        assert_eq!(host.call_count(HostCall::EnsureBot), 1);
        assert_eq!(host.call_count(HostCall::OpenStore), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_progress_and_see_monotonic_gate() {
        let (plugin, _host) = slow_plugin(Duration::from_millis(100));
        let done = Arc::new(AtomicBool::new(false));
        let reads = Arc::new(AtomicUsize::new(0));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let plugin = Arc::clone(&plugin);
                let done = Arc::clone(&done);
                let reads = Arc::clone(&reads);
                tokio::task::spawn_blocking(move || {
                    let mut seen_active = false;
                    while !done.load(Ordering::SeqCst) {
                        let active = plugin.is_activated();
                        assert!(!(seen_active && !active), "gate went back to inactive");
                        seen_active |= active;

                        if let Some(routes) = plugin.routes() {
                            assert!(!routes.is_empty());
                        }
                        reads.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        let activator = {
            let plugin = Arc::clone(&plugin);
            tokio::task::spawn_blocking(move || plugin.on_activate())
        };

        // Readers keep going while the version lookup is stalled.
        wait_for_state(&plugin, LifecycleState::Activating);
        let before = reads.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        if plugin.state() == LifecycleState::Activating {
            assert!(reads.load(Ordering::SeqCst) > before);
        }

        activator.await.unwrap().unwrap();
        done.store(true, Ordering::SeqCst);
        for reader in readers {
            reader.await.unwrap();
        }
        assert!(plugin.is_activated());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_deactivation_overtakes_running_activation() {
        let (plugin, host) = slow_plugin(Duration::from_millis(200));

        let activator = {
            let plugin = Arc::clone(&plugin);
            tokio::task::spawn_blocking(move || plugin.on_activate())
        };

        {
            let plugin = Arc::clone(&plugin);
            tokio::task::spawn_blocking(move || {
                wait_for_state(&plugin, LifecycleState::Activating);
                plugin.on_deactivate();
            })
            .await
            .unwrap();
        }

        let err = activator.await.unwrap().unwrap_err();
        assert!(matches!(err, ActivationError::Superseded));
        assert!(!plugin.is_activated());
        assert!(plugin.bot_user_id().is_none());
        // Every stage still ran; only the commit was refused.
        assert_eq!(host.call_count(HostCall::BuildRoutes), 1);

        plugin.on_activate().unwrap();
        assert!(plugin.is_activated());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_permission_checks() {
        let host = Arc::new(InMemoryHost::new());
        host.add_user(shared_types::User::new("admin", "root").with_roles("system_admin"));
        let plugin = Arc::new(
            PollPlugin::new(PluginConfig::default(), PluginHost::in_memory(&host)).unwrap(),
        );
        plugin.on_activate().unwrap();
        let poll = Arc::new(shared_types::Poll::new("p1", "creator", "Lunch?"));

        let checks: Vec<_> = (0..32)
            .map(|i| {
                let plugin = Arc::clone(&plugin);
                let poll = Arc::clone(&poll);
                tokio::task::spawn_blocking(move || {
                    let principal = if i % 2 == 0 { "creator" } else { "admin" };
                    plugin.has_permission(&poll, &shared_types::UserId::new(principal))
                })
            })
            .collect();

        for check in checks {
            assert_eq!(check.await.unwrap(), Ok(true));
        }
        // Only the admin checks looked anyone up.
        assert_eq!(host.call_count(HostCall::GetUser), 16);
    }
}
