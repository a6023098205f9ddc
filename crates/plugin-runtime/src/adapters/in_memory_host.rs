//! # In-Memory Host
//!
//! One struct implementing every host port, recording each call in order.
//! Any fallible call can be told to fail, which is how the test suites prove
//! that a failing stage stops the rest.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use pb_02_identity_bootstrap::{BotDefinition, BotPatch, PROFILE_IMAGE_PATH};
use shared_types::{HostError, InMemoryUserDirectory, Post, User, UserId};

use super::catalog::CatalogLocalizer;
use super::poll_store::InMemoryPollStore;
use super::routes::poll_api_routes;
use crate::ports::{
    AccountDirectory, AssetReader, BundleLoader, HostEnvironment, Localizer, PluginHost,
    PollStore, PostSender, RouteBuilder, RouteTable, ServerConfig, StoreFactory, UserDirectory,
};

/// PNG signature, standing in for the bundled avatar.
const PLACEHOLDER_IMAGE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Host API calls, in the order the in-memory host saw them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCall {
    /// `HostEnvironment::server_version`
    ServerVersion,
    /// `HostEnvironment::server_config`
    ServerConfig,
    /// `StoreFactory::open_store`
    OpenStore,
    /// `BundleLoader::new_bundle`
    NewBundle,
    /// `AccountDirectory::ensure_bot`
    EnsureBot,
    /// `AccountDirectory::patch_bot`
    PatchBot,
    /// `AssetReader::read_asset`
    ReadAsset,
    /// `AccountDirectory::set_profile_image`
    SetProfileImage,
    /// `RouteBuilder::build_routes`
    BuildRoutes,
    /// `UserDirectory::get_user`
    GetUser,
    /// `PostSender::send_ephemeral_post`
    SendEphemeralPost,
}

/// In-memory host.
pub struct InMemoryHost {
    server_version: RwLock<String>,
    server_config: RwLock<ServerConfig>,
    calls: Mutex<Vec<HostCall>>,
    failures: Mutex<HashSet<HostCall>>,
    stores: Mutex<HashMap<String, Arc<InMemoryPollStore>>>,
    opened: Mutex<Vec<String>>,
    catalog: RwLock<CatalogLocalizer>,
    bots: Mutex<HashMap<String, UserId>>,
    patches: Mutex<Vec<(UserId, BotPatch)>>,
    images: Mutex<HashMap<UserId, Vec<u8>>>,
    users: InMemoryUserDirectory,
    assets: RwLock<HashMap<PathBuf, Vec<u8>>>,
    posts: Mutex<Vec<(UserId, Post)>>,
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHost {
    /// A healthy host: version `5.10.0`, site URL set, locale `en`, avatar
    /// asset present.
    pub fn new() -> Self {
        let mut assets = HashMap::new();
        assets.insert(PathBuf::from(PROFILE_IMAGE_PATH), PLACEHOLDER_IMAGE.to_vec());

        Self {
            server_version: RwLock::new("5.10.0".to_string()),
            server_config: RwLock::new(ServerConfig {
                site_url: Some("https://chat.example.com".to_string()),
                default_server_locale: "en".to_string(),
            }),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashSet::new()),
            stores: Mutex::new(HashMap::new()),
            opened: Mutex::new(Vec::new()),
            catalog: RwLock::new(CatalogLocalizer::new()),
            bots: Mutex::new(HashMap::new()),
            patches: Mutex::new(Vec::new()),
            images: Mutex::new(HashMap::new()),
            users: InMemoryUserDirectory::new(),
            assets: RwLock::new(assets),
            posts: Mutex::new(Vec::new()),
        }
    }

    // -------------------------------------------------------------------------
    // Setup
    // -------------------------------------------------------------------------

    /// Set the version string the host reports.
    pub fn set_server_version(&self, version: impl Into<String>) {
        *self.server_version.write() = version.into();
    }

    /// Set or clear the site URL.
    pub fn set_site_url(&self, site_url: Option<&str>) {
        self.server_config.write().site_url = site_url.map(str::to_string);
    }

    /// Set the server locale.
    pub fn set_server_locale(&self, locale: impl Into<String>) {
        self.server_config.write().default_server_locale = locale.into();
    }

    /// Replace the translation catalog served by `new_bundle`.
    pub fn set_catalog(&self, catalog: CatalogLocalizer) {
        *self.catalog.write() = catalog;
    }

    /// Add or replace a bundle asset.
    pub fn put_asset(&self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.assets.write().insert(path.into(), bytes);
    }

    /// Remove a bundle asset.
    pub fn remove_asset(&self, path: impl AsRef<Path>) {
        self.assets.write().remove(path.as_ref());
    }

    /// Make every subsequent `call` fail.
    pub fn fail_on(&self, call: HostCall) {
        self.failures.lock().insert(call);
    }

    /// Let `call` succeed again.
    pub fn recover(&self, call: HostCall) {
        self.failures.lock().remove(&call);
    }

    /// The account directory behind `get_user`.
    pub fn users(&self) -> &InMemoryUserDirectory {
        &self.users
    }

    /// Add or replace a human account.
    pub fn add_user(&self, user: User) {
        self.users.insert(user);
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    /// Every call seen so far, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    /// Number of times `call` was seen.
    pub fn call_count(&self, call: HostCall) -> usize {
        self.calls.lock().iter().filter(|c| **c == call).count()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Namespaces passed to `open_store`, in order.
    pub fn opened_namespaces(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    /// Account ID of the bot with `username`, if it was ensured.
    pub fn bot_id(&self, username: &str) -> Option<UserId> {
        self.bots.lock().get(username).cloned()
    }

    /// Number of bot accounts created.
    pub fn bot_count(&self) -> usize {
        self.bots.lock().len()
    }

    /// Patches applied to bots, in order.
    pub fn patches(&self) -> Vec<(UserId, BotPatch)> {
        self.patches.lock().clone()
    }

    /// Current avatar of an account.
    pub fn profile_image(&self, user_id: &UserId) -> Option<Vec<u8>> {
        self.images.lock().get(user_id).cloned()
    }

    /// Ephemeral posts delivered, with their recipient.
    pub fn ephemeral_posts(&self) -> Vec<(UserId, Post)> {
        self.posts.lock().clone()
    }

    fn record(&self, call: HostCall) -> Result<(), HostError> {
        self.calls.lock().push(call);
        if self.failures.lock().contains(&call) {
            return Err(HostError::new(
                "app.plugin.injected_failure",
                format!("{call:?} failed"),
            ));
        }
        Ok(())
    }
}

impl HostEnvironment for InMemoryHost {
    fn server_version(&self) -> String {
        self.calls.lock().push(HostCall::ServerVersion);
        self.server_version.read().clone()
    }

    fn server_config(&self) -> ServerConfig {
        self.calls.lock().push(HostCall::ServerConfig);
        self.server_config.read().clone()
    }
}

impl StoreFactory for InMemoryHost {
    fn open_store(&self, plugin_version: &str) -> Result<Arc<dyn PollStore>, HostError> {
        self.record(HostCall::OpenStore)?;
        self.opened.lock().push(plugin_version.to_string());
        let store = self
            .stores
            .lock()
            .entry(plugin_version.to_string())
            .or_insert_with(|| Arc::new(InMemoryPollStore::new(plugin_version)))
            .clone();
        Ok(store)
    }
}

impl BundleLoader for InMemoryHost {
    fn new_bundle(&self) -> Result<Arc<dyn Localizer>, HostError> {
        self.record(HostCall::NewBundle)?;
        Ok(Arc::new(self.catalog.read().clone()))
    }
}

impl AccountDirectory for InMemoryHost {
    fn ensure_bot(&self, bot: &BotDefinition) -> Result<UserId, HostError> {
        self.record(HostCall::EnsureBot)?;
        let mut bots = self.bots.lock();
        if let Some(id) = bots.get(&bot.username) {
            return Ok(id.clone());
        }

        let id = UserId::new(format!("bot-{}", bots.len() + 1));
        bots.insert(bot.username.clone(), id.clone());
        self.users.insert(
            User::new(id.clone(), bot.username.clone()).with_nickname(bot.display_name.clone()),
        );
        Ok(id)
    }

    fn patch_bot(&self, bot_user_id: &UserId, patch: &BotPatch) -> Result<(), HostError> {
        self.record(HostCall::PatchBot)?;
        self.patches
            .lock()
            .push((bot_user_id.clone(), patch.clone()));
        Ok(())
    }

    fn set_profile_image(&self, user_id: &UserId, image: &[u8]) -> Result<(), HostError> {
        self.record(HostCall::SetProfileImage)?;
        self.images.lock().insert(user_id.clone(), image.to_vec());
        Ok(())
    }
}

impl UserDirectory for InMemoryHost {
    fn get_user(&self, user_id: &UserId) -> Result<User, HostError> {
        self.record(HostCall::GetUser)?;
        self.users.get_user(user_id)
    }
}

impl AssetReader for InMemoryHost {
    fn read_asset(&self, relative_path: &Path) -> Result<Vec<u8>, HostError> {
        self.record(HostCall::ReadAsset)?;
        self.assets
            .read()
            .get(relative_path)
            .cloned()
            .ok_or_else(|| HostError::not_found(relative_path.display().to_string()))
    }
}

impl RouteBuilder for InMemoryHost {
    fn build_routes(&self) -> RouteTable {
        self.calls.lock().push(HostCall::BuildRoutes);
        poll_api_routes()
    }
}

impl PostSender for InMemoryHost {
    fn send_ephemeral_post(&self, user_id: &UserId, post: &Post) -> Result<(), HostError> {
        self.record(HostCall::SendEphemeralPost)?;
        self.posts.lock().push((user_id.clone(), post.clone()));
        Ok(())
    }
}

impl PluginHost {
    /// Wire every port to the same in-memory host.
    pub fn in_memory(host: &Arc<InMemoryHost>) -> Self {
        Self {
            environment: Arc::clone(host) as Arc<dyn HostEnvironment>,
            stores: Arc::clone(host) as Arc<dyn StoreFactory>,
            bundles: Arc::clone(host) as Arc<dyn BundleLoader>,
            accounts: Arc::clone(host) as Arc<dyn AccountDirectory>,
            users: Arc::clone(host) as Arc<dyn UserDirectory>,
            assets: Arc::clone(host) as Arc<dyn AssetReader>,
            routes: Arc::clone(host) as Arc<dyn RouteBuilder>,
            posts: Arc::clone(host) as Arc<dyn PostSender>,
        }
    }
}
