//! # Poll-Bot Activation Harness
//!
//! Runs the add-on's activation sequence once against an in-memory host and
//! prints the resulting metrics, then deactivates.
//!
//! ## Environment Variables
//!
//! Everything `PluginConfig::from_env` and `TelemetryConfig::from_env` read,
//! plus:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PB_SERVER_VERSION` | `5.10.0` | Version the simulated host reports |
//! | `PB_SITE_URL` | `https://chat.example.com` | Site URL; empty means unset |
//! | `PB_SERVER_LOCALE` | `en` | Server locale for the bot description |
//! | `PB_BUNDLE_PATH` | unset | Read bundle assets from this directory |
//! | `PB_PLUGIN_SETTINGS` | unset | Plugin settings JSON applied before activation |

use std::sync::Arc;

use anyhow::{Context, Result};
use pb_02_identity_bootstrap::FsBundleAssets;
use pb_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use plugin_runtime::adapters::InMemoryHost;
use plugin_runtime::{PluginConfig, PluginHost, PollPlugin};
use tracing::{error, info};

fn simulated_host() -> (Arc<InMemoryHost>, PluginHost) {
    let host = Arc::new(InMemoryHost::new());

    if let Ok(version) = std::env::var("PB_SERVER_VERSION") {
        host.set_server_version(version);
    }
    if let Ok(site_url) = std::env::var("PB_SITE_URL") {
        host.set_site_url(Some(site_url.as_str()).filter(|url| !url.is_empty()));
    }
    if let Ok(locale) = std::env::var("PB_SERVER_LOCALE") {
        host.set_server_locale(locale);
    }

    let mut wiring = PluginHost::in_memory(&host);
    if let Ok(bundle_path) = std::env::var("PB_BUNDLE_PATH") {
        info!(bundle_path = %bundle_path, "Reading bundle assets from disk");
        wiring.assets = Arc::new(FsBundleAssets::new(bundle_path));
    }

    (host, wiring)
}

fn main() -> Result<()> {
    let _telemetry =
        init_telemetry(TelemetryConfig::from_env()).context("failed to initialize telemetry")?;

    let config = PluginConfig::from_env();
    info!(
        plugin_id = %config.manifest.id,
        plugin_version = %config.manifest.version,
        minimum_server_version = %config.minimum_server_version,
        "Starting activation harness"
    );

    let (host, wiring) = simulated_host();
    let plugin = PollPlugin::new(config, wiring).context("invalid plugin configuration")?;

    if let Ok(settings) = std::env::var("PB_PLUGIN_SETTINGS") {
        plugin
            .on_configuration_change(&settings)
            .context("invalid plugin settings")?;
    }

    let outcome = plugin.on_activate();
    match &outcome {
        Ok(()) => info!(
            bot_user_id = ?plugin.bot_user_id(),
            routes = plugin.routes().map_or(0, |routes| routes.len()),
            host_calls = host.calls().len(),
            "Activation succeeded"
        ),
        Err(e) => error!(kind = ?e.kind(), stage = ?e.stage(), error = %e, "Activation failed"),
    }

    println!("{}", encode_metrics().context("failed to encode metrics")?);

    plugin.on_deactivate();
    outcome.context("activation failed")
}
