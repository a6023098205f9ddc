//! # Poll Plugin
//!
//! The surface the host and the rest of the add-on talk to: lifecycle hooks,
//! the activation gate, and the per-request services.
//!
//! Request handlers call [`PollPlugin::is_activated`] (or one of the
//! component accessors, which return `None` while inactive) before doing any
//! work. Those reads never wait on a host call.

use std::sync::Arc;

use pb_03_authorization::{AuthorizationModel, Decision};
use pb_04_display_names::DisplayNameResolver;
use pb_telemetry::{
    log_event, ACTIVATION_ATTEMPTS, ACTIVATION_FAILURES, EPHEMERAL_POSTS_DROPPED,
    NAME_RESOLUTION_FAILURES, PERMISSION_CHECKS,
};
use shared_types::{ChannelId, Poll, Post, ResolutionError, UserId};
use tracing::{debug, instrument, warn};

use crate::activation::{
    ActivationError, ActivationSequencer, ActivationState, Admission, LifecycleState,
};
use crate::config::{ConfigError, PluginConfig, PluginSettings, SettingsError, SettingsStore};
use crate::ports::{Localizer, PluginHost, PollStore, RouteTable};

const COMPONENT: &str = "plugin";

/// The poll add-on.
pub struct PollPlugin {
    config: PluginConfig,
    host: PluginHost,
    sequencer: ActivationSequencer,
    state: ActivationState,
    settings: SettingsStore,
    authorization: AuthorizationModel,
    names: DisplayNameResolver,
}

impl PollPlugin {
    /// Create an inactive plugin. Fails if `config` is invalid.
    pub fn new(config: PluginConfig, host: PluginHost) -> Result<Self, ConfigError> {
        let sequencer = ActivationSequencer::new(&config, &host)?;
        Ok(Self {
            authorization: AuthorizationModel::new(Arc::clone(&host.users)),
            names: DisplayNameResolver::new(Arc::clone(&host.users)),
            sequencer,
            state: ActivationState::new(),
            settings: SettingsStore::default(),
            config,
            host,
        })
    }

    /// Deployment configuration.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Host hook: run activation.
    ///
    /// Returns `Ok` immediately if already active. A concurrent call while
    /// activation runs fails with [`ActivationError::AlreadyActivating`]
    /// instead of repeating the stages.
    #[instrument(skip(self))]
    pub fn on_activate(&self) -> Result<(), ActivationError> {
        let ticket = match self.state.begin() {
            Ok(Admission::Start(ticket)) => ticket,
            Ok(Admission::AlreadyActive) => {
                debug!("Activation requested while active, ignoring");
                ACTIVATION_ATTEMPTS
                    .with_label_values(&["already_active"])
                    .inc();
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, "Activation rejected");
                ACTIVATION_ATTEMPTS.with_label_values(&["rejected"]).inc();
                return Err(e);
            }
        };

        let components = match self.sequencer.run() {
            Ok(components) => components,
            Err(e) => {
                self.state.abort(ticket);
                self.record_failure(&e);
                return Err(e);
            }
        };

        match self.state.commit(ticket, components) {
            Ok(components) => {
                log_event!(
                    info,
                    COMPONENT,
                    "Plugin activated",
                    bot_user_id = %components.bot_user_id(),
                    server_version = %components.server_version,
                    routes = components.routes.len()
                );
                ACTIVATION_ATTEMPTS.with_label_values(&["activated"]).inc();
                Ok(())
            }
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    /// Host hook: stop serving. Always succeeds, even when already inactive.
    ///
    /// Host side effects of activation (bot, avatar, store) are left in place.
    pub fn on_deactivate(&self) {
        let previous = self.state.deactivate();
        log_event!(
            info,
            COMPONENT,
            "Plugin deactivated",
            previous_state = previous.as_str()
        );
    }

    fn record_failure(&self, error: &ActivationError) {
        let stage = error.stage().map_or("unknown", |s| s.as_str());
        log_event!(error, COMPONENT, "Plugin activation failed", stage = stage, error = %error);
        ACTIVATION_ATTEMPTS.with_label_values(&["failed"]).inc();
        ACTIVATION_FAILURES.with_label_values(&[stage]).inc();
    }

    /// True once every activation stage succeeded and until deactivation.
    pub fn is_activated(&self) -> bool {
        self.state.is_activated()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state.state()
    }

    /// The bot account, while active.
    pub fn bot_user_id(&self) -> Option<UserId> {
        self.state
            .components()
            .map(|components| components.bot_user_id().clone())
    }

    /// The poll store, while active.
    pub fn store(&self) -> Option<Arc<dyn PollStore>> {
        self.state
            .components()
            .map(|components| Arc::clone(&components.store))
    }

    /// The HTTP routes, while active.
    pub fn routes(&self) -> Option<Arc<RouteTable>> {
        self.state
            .components()
            .map(|components| Arc::clone(&components.routes))
    }

    /// The translation bundle, while active.
    pub fn localizer(&self) -> Option<Arc<dyn Localizer>> {
        self.state
            .components()
            .map(|components| Arc::clone(&components.localizer))
    }

    // =========================================================================
    // REQUEST SERVICES
    // =========================================================================

    /// `@handle` of a user.
    pub fn convert_user_id_to_display_name(
        &self,
        user_id: &UserId,
    ) -> Result<String, ResolutionError> {
        self.names.mention_name(user_id).inspect_err(|_| {
            NAME_RESOLUTION_FAILURES
                .with_label_values(&["mention"])
                .inc();
        })
    }

    /// Attribution name of a poll creator.
    pub fn convert_creator_id_to_display_name(
        &self,
        creator_id: &UserId,
    ) -> Result<String, ResolutionError> {
        self.names
            .creator_attribution_name(creator_id)
            .inspect_err(|_| {
                NAME_RESOLUTION_FAILURES
                    .with_label_values(&["attribution"])
                    .inc();
            })
    }

    /// True if `issuer_id` may end or delete `poll`.
    pub fn has_permission(&self, poll: &Poll, issuer_id: &UserId) -> Result<bool, ResolutionError> {
        let decision = self.authorization.decide(poll, issuer_id);
        let label = decision.as_ref().map_or("error", |d| d.as_str());
        PERMISSION_CHECKS.with_label_values(&[label]).inc();
        decision.map(Decision::is_permitted)
    }

    /// Show `message` to `user_id` in `channel_id`, posted as the bot.
    ///
    /// Best effort: nothing is returned to the caller. A send that fails, or
    /// cannot happen because the add-on is inactive, is counted and traced.
    pub fn send_ephemeral_post(&self, channel_id: &ChannelId, user_id: &UserId, message: &str) {
        let Some(bot_user_id) = self.bot_user_id() else {
            EPHEMERAL_POSTS_DROPPED.inc();
            debug!(channel_id = %channel_id, user_id = %user_id, "Ephemeral post dropped: plugin inactive");
            return;
        };

        let post = Post {
            channel_id: channel_id.clone(),
            user_id: bot_user_id,
            message: message.to_string(),
        };

        if let Err(e) = self.host.posts.send_ephemeral_post(user_id, &post) {
            EPHEMERAL_POSTS_DROPPED.inc();
            debug!(channel_id = %channel_id, user_id = %user_id, error = %e, "Ephemeral post dropped");
        }
    }

    // =========================================================================
    // SETTINGS
    // =========================================================================

    /// Current operator settings.
    pub fn settings(&self) -> Arc<PluginSettings> {
        self.settings.get()
    }

    /// Host hook: the operator changed the add-on settings.
    ///
    /// Invalid settings are rejected and the previous ones stay in force.
    pub fn on_configuration_change(&self, raw: &str) -> Result<(), SettingsError> {
        self.settings.apply_json(raw).inspect_err(|e| {
            warn!(error = %e, "Rejected plugin settings");
        })
    }
}
