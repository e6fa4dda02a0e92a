//! Client configuration: REST base URL and UI timings.

use std::time::Duration;

use crate::FileId;

const DEFAULT_API_BASE: &str = "/api/files";
const TOAST_DURATION_MS: u64 = 3000;
const TOAST_FADE_MS: u64 = 300;
const AUTO_REFRESH_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base of the REST surface, without a trailing slash.
    pub api_base: String,
    /// How long a toast stays fully visible.
    pub toast_duration: Duration,
    /// Fade-out time between a toast expiring and its removal.
    pub toast_fade: Duration,
    /// Delay between automatic list refreshes while the files view is shown.
    pub auto_refresh_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_api_base(option_env!("FILEDOCK_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }
}

impl ClientConfig {
    pub fn with_api_base(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            toast_duration: Duration::from_millis(TOAST_DURATION_MS),
            toast_fade: Duration::from_millis(TOAST_FADE_MS),
            auto_refresh_interval: Duration::from_millis(AUTO_REFRESH_INTERVAL_MS),
        }
    }

    pub fn list_url(&self) -> String {
        self.api_base.clone()
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.api_base)
    }

    /// Used for both download (`GET`) and delete (`DELETE`).
    pub fn file_url(&self, id: &FileId) -> String {
        format!("{}/{}", self.api_base, urlencoding::encode(&id.to_string()))
    }
}
