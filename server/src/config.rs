use std::{env, path::PathBuf};

use model::DEFAULT_MODEL_PATH;

use crate::{Result, ServeErr};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_UI_PATH: &str = "iris_ui.html";

/// Where to listen and what to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    /// The manual testing page served at `/ui`.
    pub ui_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            ui_path: PathBuf::from(DEFAULT_UI_PATH),
        }
    }
}

impl ServerConfig {
    /// Reads the config from the `HOST`, `PORT`, `MODEL_PATH` and `UI_PATH` environment
    /// variables, falling back to the defaults for the unset ones.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reading the variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(port) => port.trim().parse().map_err(|e| {
                ServeErr::InvalidConfig(format!("PORT ({port:?}) is not a valid port: {e}"))
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            model_path: lookup("MODEL_PATH").map_or(defaults.model_path, PathBuf::from),
            ui_path: lookup("UI_PATH").map_or(defaults.ui_path, PathBuf::from),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| vars.get(key).cloned()
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "127.0.0.1:8000");
    }

    #[test]
    fn variables_override_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("MODEL_PATH", "/tmp/model.json"),
            ("UI_PATH", "/tmp/ui.html"),
        ]))
        .unwrap();

        assert_eq!(config.addr(), "0.0.0.0:9000");
        assert_eq!(config.model_path, PathBuf::from("/tmp/model.json"));
        assert_eq!(config.ui_path, PathBuf::from("/tmp/ui.html"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        for port in ["http", "-1", "70000"] {
            let err = ServerConfig::from_lookup(lookup(&[("PORT", port)])).unwrap_err();
            assert!(matches!(err, ServeErr::InvalidConfig(_)));
        }
    }
}
