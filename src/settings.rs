use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "PAPER_TABLE";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Parse documents on the rayon pool.
    #[serde(default = "enabled")]
    pub parallel: bool,
    /// Show a progress bar while parsing.
    #[serde(default = "enabled")]
    pub progress: bool,
}

fn enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            parallel: true,
            progress: true,
        }
    }
}

impl Settings {
    /// Load from `PAPER_TABLE_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

// ── Tests ──
