//! Blog module configuration.

use std::env;

/// Default port the module binds.
pub const DEFAULT_PORT_ID: &str = "blog";

/// Default application version negotiated on channel open.
pub const DEFAULT_VERSION: &str = "blog-1";

/// Configuration for the IBC Blog module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogConfig {
    /// Port the module binds (default: `blog`).
    pub port_id: String,

    /// Application version string (default: `blog-1`).
    pub version: String,

    /// Maximum title length in bytes (default: 256).
    pub max_title_len: usize,

    /// Maximum content length in bytes (default: 4096).
    pub max_content_len: usize,

    /// Maximum creator address length in bytes (default: 128).
    pub max_creator_len: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            port_id: DEFAULT_PORT_ID.to_string(),
            version: DEFAULT_VERSION.to_string(),
            max_title_len: 256,
            max_content_len: 4096,
            max_creator_len: 128,
        }
    }
}

impl BlogConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_BLOG_PORT_ID`: Port identifier (default: blog)
    /// - `QC_BLOG_VERSION`: Application version (default: blog-1)
    /// - `QC_BLOG_MAX_TITLE_LEN`: Title limit in bytes (default: 256)
    /// - `QC_BLOG_MAX_CONTENT_LEN`: Content limit in bytes (default: 4096)
    /// - `QC_BLOG_MAX_CREATOR_LEN`: Creator limit in bytes (default: 128)
    ///
    /// Unparseable numbers fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port_id: env::var("QC_BLOG_PORT_ID").unwrap_or(defaults.port_id),
            version: env::var("QC_BLOG_VERSION").unwrap_or(defaults.version),
            max_title_len: env_usize("QC_BLOG_MAX_TITLE_LEN", defaults.max_title_len),
            max_content_len: env_usize("QC_BLOG_MAX_CONTENT_LEN", defaults.max_content_len),
            max_creator_len: env_usize("QC_BLOG_MAX_CREATOR_LEN", defaults.max_creator_len),
        }
    }

    /// Set the port identifier.
    pub fn with_port_id(mut self, port_id: impl Into<String>) -> Self {
        self.port_id = port_id.into();
        self
    }

    /// Set the application version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the title limit.
    pub fn with_max_title_len(mut self, max: usize) -> Self {
        self.max_title_len = max;
        self
    }

    /// Set the content limit.
    pub fn with_max_content_len(mut self, max: usize) -> Self {
        self.max_content_len = max;
        self
    }

    /// Set the creator limit.
    pub fn with_max_creator_len(mut self, max: usize) -> Self {
        self.max_creator_len = max;
        self
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
