//! # Activation Sequencer
//!
//! Runs the activation stages in strict order and stops at the first
//! failure. Completed stages are not compensated: a bot created before a
//! later stage fails stays on the host, and the next attempt repeats every
//! stage from the start.

use std::sync::Arc;

use pb_01_version_gate::VersionGate;
use pb_02_identity_bootstrap::IdentityBootstrapper;
use tracing::{debug, error, info, instrument};

use super::error::ActivationError;
use super::stage::ActivationStage;
use super::state::ActiveComponents;
use crate::config::{ConfigError, PluginConfig};
use crate::ports::PluginHost;

/// Ordered startup procedure against a host.
pub struct ActivationSequencer {
    gate: VersionGate,
    plugin_version: String,
    host: PluginHost,
    bootstrapper: IdentityBootstrapper,
}

impl ActivationSequencer {
    /// Build a sequencer from validated configuration.
    pub fn new(config: &PluginConfig, host: &PluginHost) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            gate: config.version_gate()?,
            plugin_version: config.manifest.version.clone(),
            host: host.clone(),
            bootstrapper: IdentityBootstrapper::new(
                Arc::clone(&host.accounts),
                Arc::clone(&host.assets),
                config.bot.clone(),
            ),
        })
    }

    /// Run every stage up to `InitApi`.
    ///
    /// Committing the result (`MarkActivated`) is left to the caller, which
    /// owns the lifecycle state.
    #[instrument(skip(self), fields(plugin_version = %self.plugin_version))]
    pub fn run(&self) -> Result<ActiveComponents, ActivationError> {
        let server_version = self.stage(ActivationStage::CheckServerVersion, || {
            let reported = self.host.environment.server_version();
            Ok(self.gate.check(&reported)?)
        })?;

        let server_config = self.host.environment.server_config();
        let site_url = self.stage(ActivationStage::CheckSiteUrl, || {
            server_config
                .site_url()
                .map(str::to_string)
                .ok_or(ActivationError::MissingSiteUrl)
        })?;

        let store = self.stage(ActivationStage::CreateStore, || {
            self.host
                .stores
                .open_store(&self.plugin_version)
                .map_err(ActivationError::CreateStore)
        })?;

        let localizer = self.stage(ActivationStage::InitBundle, || {
            self.host
                .bundles
                .new_bundle()
                .map_err(ActivationError::InitBundle)
        })?;

        let identity = self.stage(ActivationStage::EnsureBot, || {
            Ok(self.bootstrapper.ensure_account()?)
        })?;

        self.stage(ActivationStage::PatchBotDescription, || {
            Ok(self.bootstrapper.patch_description(
                &identity,
                localizer.as_ref(),
                &server_config.default_server_locale,
            )?)
        })?;

        self.stage(ActivationStage::SetProfileImage, || {
            Ok(self.bootstrapper.set_profile_image(&identity)?)
        })?;

        let routes = self.stage(ActivationStage::InitApi, || {
            Ok(Arc::new(self.host.routes.build_routes()))
        })?;

        Ok(ActiveComponents {
            identity,
            store,
            localizer,
            routes,
            server_version,
            site_url,
        })
    }

    fn stage<T>(
        &self,
        stage: ActivationStage,
        step: impl FnOnce() -> Result<T, ActivationError>,
    ) -> Result<T, ActivationError> {
        debug!(stage = %stage, position = stage.position(), "Activation stage started");
        match step() {
            Ok(value) => {
                info!(stage = %stage, "Activation stage completed");
                Ok(value)
            }
            Err(e) => {
                error!(stage = %stage, error = %e, "Activation stage failed");
                Err(e)
            }
        }
    }
}
