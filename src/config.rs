use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_WORKOUT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub seed_samples: bool,
    pub workout_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed_samples: true,
            workout_delay: DEFAULT_WORKOUT_DELAY,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: lookup("FITNESS_DATA_DIR")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            seed_samples: lookup("FITNESS_SEED_SAMPLES")
                .and_then(|value| parse_flag(&value))
                .unwrap_or(defaults.seed_samples),
            workout_delay: lookup("FITNESS_WORKOUT_DELAY_MS")
                .and_then(|value| value.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.workout_delay),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn reads_every_setting() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("FITNESS_DATA_DIR", "/tmp/fit"),
            ("FITNESS_SEED_SAMPLES", "off"),
            ("FITNESS_WORKOUT_DELAY_MS", "50"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/fit"));
        assert!(!config.seed_samples);
        assert_eq!(config.workout_delay, Duration::from_millis(50));
    }

    #[test]
    fn garbage_falls_back() {
        let config = config_from(&[("PORT", "eighty"), ("FITNESS_SEED_SAMPLES", "maybe")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.seed_samples);
    }
}
