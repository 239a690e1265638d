use std::time::Duration;

use tracing::warn;

use crate::{audio::config::AudioConfig, preview::sandbox::SandboxPolicy};

pub const DEFAULT_TABLE: &str = "aime_shared_conversations";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub panel: PanelConfig,
    pub sandbox: SandboxPolicy,
    pub audio: AudioConfig,
}

impl AppConfig {
    /// Reads overrides from the process environment. Call after `dotenv`.
    pub fn from_env() -> Self {
        let store = StoreConfig::from_env();
        let sandbox = SandboxPolicy {
            allow_forms: env_flag("AIMESHARE_SANDBOX_FORMS"),
            allow_popups: env_flag("AIMESHARE_SANDBOX_POPUPS"),
            allow_modals: env_flag("AIMESHARE_SANDBOX_MODALS"),
        };

        Self {
            store,
            sandbox,
            ..Self::default()
        }
    }
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: Option<String>,
    pub anon_key: Option<String>,
    pub table: String,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("SUPABASE_URL").ok().filter(|s| !s.is_empty());
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        if base_url.is_none() || anon_key.is_none() {
            warn!("Missing SUPABASE_URL or SUPABASE_ANON_KEY in environment");
        }

        Self {
            base_url,
            anon_key,
            table: std::env::var("AIMESHARE_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string()),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            anon_key: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PanelConfig {
    pub default_width_percent: f64,
    pub min_width_percent: f64,
    pub max_width_percent: f64,
    pub mobile_breakpoint_px: f64,
    pub sheet_transition: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_width_percent: 40.0,
            min_width_percent: 20.0,
            max_width_percent: 80.0,
            mobile_breakpoint_px: 768.0,
            sheet_transition: Duration::from_millis(300),
        }
    }
}
