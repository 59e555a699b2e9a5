use std::path::PathBuf;
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;
use serde_aux::prelude::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub application: ApplicationSettings,
    pub allow_cors: bool,
    pub round: RoundSettings,
    pub player: PlayerSettings,
    pub preferences: PreferencesSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RoundSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub duration_seconds: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub selection_ticks: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub selection_interval_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub countdown_interval_millis: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_reference_score: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub top_bracket_percent: u32,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl RoundSettings {
    // A round always lasts at least one countdown tick and one selection tick
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds.max(1)
    }

    pub fn selection_ticks(&self) -> u32 {
        self.selection_ticks.max(1)
    }

    pub fn max_reference_score(&self) -> u32 {
        self.max_reference_score.max(1)
    }

    pub fn selection_interval(&self) -> Duration {
        Duration::from_millis(self.selection_interval_millis)
    }

    pub fn countdown_interval(&self) -> Duration {
        Duration::from_millis(self.countdown_interval_millis)
    }
}

impl Default for RoundSettings {
    fn default() -> Self {
        RoundSettings {
            duration_seconds: 120,
            selection_ticks: 20,
            selection_interval_millis: 50,
            countdown_interval_millis: 1000,
            max_reference_score: 25,
            top_bracket_percent: 1,
            categories: Vec::default(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct PlayerSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub inactivity_timeout_seconds: u64,
}

impl PlayerSettings {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_seconds)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct PreferencesSettings {
    pub file_path: PathBuf,
}

impl Config {
    pub fn get() -> Result<Config, ConfigError> {
        let base_path = std::env::current_dir().map_err(|error| {
            ConfigError::Message(format!(
                "Failed to determine the current directory. Error: '{error}'."
            ))
        })?;
        let configuration_directory = base_path.join("config");

        let environment: Environment = std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| DEV.to_string())
            .try_into()
            .map_err(ConfigError::Message)?;

        let environment_filename = format!("{}.yaml", environment.as_str());

        let config = config::Config::builder()
            .add_source(config::File::from(
                configuration_directory.join("base.yaml"),
            ))
            .add_source(config::File::from(
                configuration_directory.join(environment_filename),
            ))
            .build()?;

        config.try_deserialize::<Config>()
    }
}

enum Environment {
    Dev,
    Prod,
}

const DEV: &str = "dev";
const PROD: &str = "prod";

impl Environment {
    fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => DEV,
            Environment::Prod => PROD,
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(string: String) -> Result<Self, Self::Error> {
        match string.to_lowercase().as_str() {
            DEV => Ok(Self::Dev),
            PROD => Ok(Self::Prod),
            other => Err(format!(
                "{other} is not a supported environment. Use either `{DEV}` or `{PROD}`.",
            )),
        }
    }
}
