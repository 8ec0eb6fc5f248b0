//! Agent settings
//!
//! Loaded from settings.json next to the executable. Missing or unreadable
//! files fall back to the defaults:
//! - server.bind: "0.0.0.0"
//! - server.port: 9876
//! - server.api_key_file: ".zpool_agent_api"

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings loaded from settings.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: IpAddr,
    pub port: u16,
    pub api_key_file: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 9876,
            api_key_file: PathBuf::from(".zpool_agent_api"),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Load settings from settings.json or use defaults
/// Looks for settings.json in the same directory as the executable
pub fn load_settings() -> Settings {
    let settings_path = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("settings.json")))
        .unwrap_or_else(|| PathBuf::from("settings.json"));

    load_settings_from(&settings_path)
}

pub fn load_settings_from(settings_path: &Path) -> Settings {
    match fs::read_to_string(settings_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "Failed to parse {}: {}. Using defaults.",
                    settings_path.display(),
                    e
                );
                Settings::default()
            }
        },
        Err(_) => {
            info!(
                "{} not found, using default values.",
                settings_path.display()
            );
            Settings::default()
        }
    }
}
