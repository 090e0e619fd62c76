//! Settings document and operating mode.

use serde::{Deserialize, Serialize};

/// Sites blocked by flow mode when the user has not customized the list.
pub const DEFAULT_BLOCKED_SITES: &[&str] = &[
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "reddit.com",
    "youtube.com",
    "tiktok.com",
];

const DEFAULT_API_BASE_URL: &str = "https://flowstate-cli-production.up.railway.app";

/// Storage mode selecting which data manager handles operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Local,
    Cloud,
    #[default]
    Hybrid,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Local => write!(f, "local"),
            Mode::Cloud => write!(f, "cloud"),
            Mode::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Mode::Local),
            "cloud" => Ok(Mode::Cloud),
            "hybrid" => Ok(Mode::Hybrid),
            _ => Err(format!("Unknown mode: {} (expected local, cloud or hybrid)", s)),
        }
    }
}

/// The whole persisted configuration document.
///
/// Unknown keys in the file are ignored and missing keys fall back to
/// defaults, so older config files keep loading across upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    pub api_base_url: String,
    /// Bearer token for the cloud API. Stored in plaintext; accepted
    /// design limitation, not a vault.
    pub auth_token: Option<String>,
    /// Cached id of the single local user, set on first local operation.
    pub local_user_id: Option<i64>,
    pub pomo_duration: i64,
    pub short_break_duration: i64,
    pub long_break_duration: i64,
    pub notifications_enabled: bool,
    pub sound_enabled: bool,
    /// Intent flag consumed by the surrounding CLI; the sync engine itself
    /// only runs on demand.
    pub auto_sync: bool,
    pub blocked_sites: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_token: None,
            local_user_id: None,
            pomo_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,
            notifications_enabled: true,
            sound_enabled: true,
            auto_sync: false,
            blocked_sites: DEFAULT_BLOCKED_SITES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Settings {
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
