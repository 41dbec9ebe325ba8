/// Application configuration and constants.

use std::env;

/// Placeholder origin used when nothing else is configured; the agent
/// backend binds here by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the agent base URL.
pub const BASE_URL_ENV: &str = "SOCIAL_AGENT_URL";

pub struct Config {
    /// Agent service origin, read once at startup.
    pub base_url: String,

    /// Main loop tick rate in milliseconds (target 60 FPS = ~16ms)
    pub tick_rate_ms: u64,

    /// How many ticks to show status messages (180 = ~3s at 60fps)
    pub status_timeout_ticks: u64,

    /// Lines to scroll per key press
    pub scroll_step: u16,

    /// Diagnostics log file name (the terminal stays clean)
    pub log_file: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tick_rate_ms: 16,
            status_timeout_ticks: 180,
            scroll_step: 3,
            log_file: "social-command-tui.log",
        }
    }
}

impl Config {
    /// Resolve the base URL: `--url <origin>` flag, else the environment,
    /// else the placeholder default.
    pub fn from_args<I>(mut args: I) -> Self
    where
        I: Iterator<Item = String>,
    {
        let mut config = Self::default();

        if let Ok(url) = env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                config.base_url = url;
            }
        }

        while let Some(arg) = args.next() {
            if arg == "--url" || arg == "-u" {
                if let Some(url) = args.next() {
                    config.base_url = url;
                }
            }
        }

        // A trailing slash would double up against the endpoint paths.
        while config.base_url.ends_with('/') {
            config.base_url.pop();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_is_placeholder() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_url_flag_overrides() {
        let args = ["--url", "http://agent.example:9000"]
            .into_iter()
            .map(String::from);
        let config = Config::from_args(args);
        assert_eq!(config.base_url, "http://agent.example:9000");
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let args = ["--url", "http://agent.example:9000/"]
            .into_iter()
            .map(String::from);
        let config = Config::from_args(args);
        assert_eq!(config.base_url, "http://agent.example:9000");
    }
}
