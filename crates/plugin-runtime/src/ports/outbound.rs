//! # Outbound Ports
//!
//! Every host capability activation and request handling depend on.
//!
//! All calls are blocking and carry no timeout; the host bounds activation as
//! a whole. Implementations must be `Send + Sync` because handlers run
//! concurrently once the add-on is active.

use std::fmt;
use std::sync::Arc;

use shared_types::{HostError, Poll, PollId, Post, UserId};

pub use pb_02_identity_bootstrap::{AccountDirectory, AssetReader, Localizer};
pub use shared_types::UserDirectory;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Host configuration values activation reads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerConfig {
    /// Public base URL of the host, if configured.
    pub site_url: Option<String>,
    /// Locale of the server itself, used for server-wide text.
    pub default_server_locale: String,
}

impl ServerConfig {
    /// The site URL, treating an empty or blank value as absent.
    pub fn site_url(&self) -> Option<&str> {
        self.site_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Host version and configuration - outbound port.
pub trait HostEnvironment: Send + Sync {
    /// Version string of the running host.
    fn server_version(&self) -> String;

    /// Current host configuration.
    fn server_config(&self) -> ServerConfig;
}

// =============================================================================
// STORAGE
// =============================================================================

/// Poll persistence handle.
pub trait PollStore: Send + Sync {
    /// Load a poll.
    fn get(&self, poll_id: &PollId) -> Result<Option<Poll>, HostError>;

    /// Insert or replace a poll.
    fn save(&self, poll: &Poll) -> Result<(), HostError>;

    /// Remove a poll. Removing an absent poll is not an error.
    fn delete(&self, poll_id: &PollId) -> Result<(), HostError>;
}

/// Opens the poll store - outbound port.
pub trait StoreFactory: Send + Sync {
    /// Open the store namespaced by the plugin version.
    fn open_store(&self, plugin_version: &str) -> Result<Arc<dyn PollStore>, HostError>;
}

// =============================================================================
// LOCALIZATION
// =============================================================================

/// Loads the translation bundle - outbound port.
pub trait BundleLoader: Send + Sync {
    /// Load every translation shipped with the add-on.
    fn new_bundle(&self) -> Result<Arc<dyn Localizer>, HostError>;
}

// =============================================================================
// HTTP ROUTES
// =============================================================================

/// One HTTP route served by the add-on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    /// HTTP method.
    pub method: &'static str,
    /// Path template, `{name}` marks a parameter.
    pub path: String,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// The route table installed during activation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route.
    pub fn route(mut self, method: &'static str, path: impl Into<String>) -> Self {
        self.routes.push(Route {
            method,
            path: path.into(),
        });
        self
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if no route is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// True if `method path` is registered.
    pub fn contains(&self, method: &str, path: &str) -> bool {
        self.routes
            .iter()
            .any(|route| route.method == method && route.path == path)
    }

    /// Iterate routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}

/// Builds the HTTP route table - outbound port.
pub trait RouteBuilder: Send + Sync {
    /// Build the routes for the running add-on.
    fn build_routes(&self) -> RouteTable;
}

// =============================================================================
// MESSAGING
// =============================================================================

/// Delivers ephemeral posts - outbound port.
pub trait PostSender: Send + Sync {
    /// Show `post` to `user_id` only.
    fn send_ephemeral_post(&self, user_id: &UserId, post: &Post) -> Result<(), HostError>;
}

// =============================================================================
// AGGREGATE
// =============================================================================

/// All host collaborators, injected into the plugin at construction.
#[derive(Clone)]
pub struct PluginHost {
    /// Host version and configuration.
    pub environment: Arc<dyn HostEnvironment>,
    /// Poll store factory.
    pub stores: Arc<dyn StoreFactory>,
    /// Translation bundle loader.
    pub bundles: Arc<dyn BundleLoader>,
    /// Bot account management.
    pub accounts: Arc<dyn AccountDirectory>,
    /// Account lookup.
    pub users: Arc<dyn UserDirectory>,
    /// Bundle asset reader.
    pub assets: Arc<dyn AssetReader>,
    /// HTTP route builder.
    pub routes: Arc<dyn RouteBuilder>,
    /// Ephemeral post delivery.
    pub posts: Arc<dyn PostSender>,
}
