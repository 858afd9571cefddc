//! Client configuration with TOML file support.
//!
//! Backend address, viewer container settings, colours and the initial
//! view toggles are consolidated here. Every section uses
//! `#[serde(default)]`, so a partial file (e.g. only `[server]`) works.

mod design;
mod server;
mod view;
mod viewer;

use std::path::Path;

pub use design::{parse_hex_color, DesignOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use server::ServerOptions;
pub use view::ViewOptions;
pub use viewer::{Quality, ViewerOptions};

use crate::error::PmwError;

/// Top-level configuration container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Config {
    /// Backend connection.
    pub server: ServerOptions,
    /// Viewer container.
    pub viewer: ViewerOptions,
    /// Colours and primitive sizes.
    pub design: DesignOptions,
    /// Initial view toggles.
    pub view: ViewOptions,
}

impl Config {
    /// Generate JSON Schema describing the configuration.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Load configuration from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, PmwError> {
        let content = std::fs::read_to_string(path).map_err(PmwError::Io)?;
        toml::from_str(&content)
            .map_err(|e| PmwError::OptionsParse(e.to_string()))
    }

    /// Save configuration to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), PmwError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PmwError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PmwError::Io)?;
        }
        std::fs::write(path, content).map_err(PmwError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::RenderMode;

    #[test]
    fn default_round_trips_through_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[server]
base_url = "https://pmw.example.org"

[view]
render_mode = "lineTrace"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url, "https://pmw.example.org");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.view.render_mode, RenderMode::LineTrace);
        assert!(config.view.render_contacts);
        assert_eq!(config.viewer.width, 400);
        assert_eq!(config.design.contact_radius, 0.2);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pmw.toml");
        let mut config = Config::default();
        config.view.render_membrane = false;
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn invalid_toml_is_options_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[viewer]\nwidth = \"wide\"\n").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(PmwError::OptionsParse(_))
        ));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value = serde_json::to_value(Config::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        for section in ["server", "viewer", "design", "view"] {
            assert!(props.contains_key(section), "missing {section}");
        }
    }
}
