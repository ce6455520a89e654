//! Configuration management.
//!
//! The bridge has no on-disk configuration format. Values come from
//! defaults, the process environment (optionally seeded from a `.env` file),
//! and builder-style setters.

use crate::models::ScriptProfile;

/// Default logical prefix of bundled assets.
pub const DEFAULT_ASSET_PREFIX: &str = "models";

/// Default copy buffer size for asset materialization (8 KiB).
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Smallest accepted copy buffer.
const MIN_COPY_BUFFER_SIZE: usize = 512;

/// Default application identity.
pub const DEFAULT_APP_ID: &str = "app";

/// Runtime configuration for the capability bridge.
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `CAPBRIDGE_APP_ID` | string | `app` | Application identity (package name) |
/// | `CAPBRIDGE_ASSET_PREFIX` | string | `models` | Logical prefix of bundled assets |
/// | `CAPBRIDGE_COPY_BUFFER_SIZE` | usize | `8192` | Asset copy buffer size in bytes |
/// | `CAPBRIDGE_SCRIPT` | string | `devanagari` | Default recognition script profile |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Application identity; used for the file-provider authority and the
    /// per-app settings screen.
    pub app_id: String,
    /// Logical prefix under which bundled assets live.
    pub asset_prefix: String,
    /// Size of the intermediate buffer used when copying assets.
    pub copy_buffer_size: usize,
    /// Script profile used when `scanImage` is called without one.
    pub default_script: ScriptProfile,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
            default_script: ScriptProfile::default(),
        }
    }
}

impl BridgeConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a `.env` file if present, then reads the environment.
    #[must_use]
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Ignoring unreadable .env file");
            }
        }
        Self::from_env()
    }

    /// Creates a configuration from environment variables.
    ///
    /// Falls back to defaults for unset or unparseable variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(app_id) = lookup("CAPBRIDGE_APP_ID").filter(|v| !v.trim().is_empty()) {
            config.app_id = app_id.trim().to_string();
        }
        if let Some(prefix) = lookup("CAPBRIDGE_ASSET_PREFIX") {
            config.asset_prefix = prefix.trim().trim_matches('/').to_string();
        }
        if let Some(size) = lookup("CAPBRIDGE_COPY_BUFFER_SIZE").and_then(|v| v.trim().parse().ok())
        {
            config = config.with_copy_buffer_size(size);
        }
        if let Some(name) = lookup("CAPBRIDGE_SCRIPT") {
            match ScriptProfile::parse(&name) {
                Some(profile) => config.default_script = profile,
                None => tracing::warn!(script = %name, "Unknown CAPBRIDGE_SCRIPT, using default"),
            }
        }

        config
    }

    /// Returns the file-provider authority (`<app_id>.fileprovider`).
    #[must_use]
    pub fn file_provider_authority(&self) -> String {
        format!("{}.fileprovider", self.app_id)
    }

    /// Sets the application identity.
    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }

    /// Sets the asset prefix.
    #[must_use]
    pub fn with_asset_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.asset_prefix = prefix.into();
        self
    }

    /// Sets the copy buffer size, clamped to at least 512 bytes.
    #[must_use]
    pub fn with_copy_buffer_size(mut self, size: usize) -> Self {
        self.copy_buffer_size = size.max(MIN_COPY_BUFFER_SIZE);
        self
    }

    /// Sets the default script profile.
    #[must_use]
    pub const fn with_default_script(mut self, profile: ScriptProfile) -> Self {
        self.default_script = profile;
        self
    }
}
