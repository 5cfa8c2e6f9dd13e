use std::{fmt, path::PathBuf};

use config::{ConfigBuilder, ConfigError, Environment, File, builder::AsyncState};
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct SendSculptConfig {
    pub api_key: String,
    pub environment: Option<String>,
    pub base_url: Option<String>,
}

impl fmt::Debug for SendSculptConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendSculptConfig")
            .field("api_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SendSculptConfig {
    /// Reads the named JSON settings file (which must exist), then
    /// `SENDSCULPT__*` env vars (e.g. `SENDSCULPT__API_KEY`), which take precedence.
    pub async fn init(settings_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::<AsyncState>::default();

        if let Some(path) = settings_path {
            builder = builder.add_source(File::from(path));
        }

        let cfg = builder
            .add_source(
                Environment::with_prefix("SENDSCULPT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .await?;

        cfg.try_deserialize()
    }
}
