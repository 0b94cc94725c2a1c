//! Console settings: defaults, then `admin_gui.toml`, then environment,
//! with the CLI flag applied last by `main`.

use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:6544".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("admin_gui.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("JOBQUEUE_SERVER_URL") {
        settings.server_url = v;
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_backend() {
        assert_eq!(Settings::default().server_url, "http://127.0.0.1:6544");
    }

    #[test]
    fn file_config_overrides_the_server_url() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "server_url = \"http://backend1:6544\"");
        assert_eq!(settings.server_url, "http://backend1:6544");
    }

    #[test]
    fn malformed_or_irrelevant_file_config_leaves_defaults_alone() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "not valid toml [");
        apply_file_config(&mut settings, "other_key = \"value\"");
        assert_eq!(settings.server_url, Settings::default().server_url);
    }
}
