//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.fruitbell/config.toml` unless `--config` points
//! elsewhere. A missing file is not an error; every setting has a default.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::action::KeyBindings;
use crate::core::delay::LinearDelay;
use crate::core::state::DEFAULT_ROUNDS;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FruitbellConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub delay: DelayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GameConfig {
    pub rounds: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KeysConfig {
    pub start: Option<char>,
    pub bell: Option<char>,
    pub quit: Option<char>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DelayConfig {
    pub min_seconds: Option<f64>,
    pub max_seconds: Option<f64>,
    pub step_seconds: Option<f64>,
    pub floor_seconds: Option<f64>,
}

pub const DEFAULT_LOG_LEVEL: &str = "debug";

/// Longest AI reaction window the delay coefficients may produce.
pub const MAX_DELAY_SECONDS: f64 = 3600.0;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub rounds: u32,
    pub keys: KeyBindings,
    pub delay: LinearDelay,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

/// Values taken from the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub rounds: Option<u32>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.fruitbell/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fruitbell").join("config.toml"))
}

/// Load config from `path`, or from the default location when `path` is `None`.
///
/// A missing file yields `FruitbellConfig::default()`. A file that exists
/// but is malformed returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<FruitbellConfig, ConfigError> {
    let path = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FruitbellConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(FruitbellConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<FruitbellConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FruitbellConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment lookup injected.
pub fn resolve_with_env<F>(
    config: &FruitbellConfig,
    cli: &CliOverrides,
    env: F,
) -> Result<ResolvedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Rounds: CLI → env → config → default
    let env_rounds = match env("FRUITBELL_ROUNDS") {
        Some(raw) => Some(raw.trim().parse::<u32>().map_err(|e| {
            ConfigError::Invalid(format!("FRUITBELL_ROUNDS={raw:?}: {e}"))
        })?),
        None => None,
    };
    let rounds = cli
        .rounds
        .or(env_rounds)
        .or(config.game.rounds)
        .unwrap_or(DEFAULT_ROUNDS);

    // Log file: CLI → env → config
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("FRUITBELL_LOG_FILE").map(PathBuf::from))
        .or_else(|| config.general.log_file.clone());

    let defaults = KeyBindings::default();
    let keys = KeyBindings {
        start: config.keys.start.unwrap_or(defaults.start),
        bell: config.keys.bell.unwrap_or(defaults.bell),
        quit: config.keys.quit.unwrap_or(defaults.quit),
    };

    let base = LinearDelay::default();
    let delay = LinearDelay {
        min_seconds: config.delay.min_seconds.unwrap_or(base.min_seconds),
        max_seconds: config.delay.max_seconds.unwrap_or(base.max_seconds),
        step_seconds: config.delay.step_seconds.unwrap_or(base.step_seconds),
        floor_seconds: config.delay.floor_seconds.unwrap_or(base.floor_seconds),
    };

    let resolved = ResolvedConfig {
        rounds,
        keys,
        delay,
        seed: cli.seed,
        log_file,
        log_level: config
            .general
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    };
    validate(&resolved)?;
    Ok(resolved)
}

/// Resolves `loaded`, falling back to built-in defaults on any config problem.
///
/// Config never stops the game: every problem hit along the way is returned
/// for the caller to report. CLI values survive each fallback step.
pub fn resolve_or_fallback<F>(
    loaded: Result<FruitbellConfig, ConfigError>,
    cli: &CliOverrides,
    env: F,
) -> (ResolvedConfig, Vec<ConfigError>)
where
    F: Fn(&str) -> Option<String>,
{
    let mut problems = Vec::new();
    let file = loaded.unwrap_or_else(|e| {
        problems.push(e);
        FruitbellConfig::default()
    });

    let resolved = match resolve_with_env(&file, cli, &env) {
        Ok(resolved) => resolved,
        Err(e) => {
            problems.push(e);
            match resolve_with_env(&FruitbellConfig::default(), cli, &env) {
                Ok(resolved) => resolved,
                Err(e) => {
                    problems.push(e);
                    fallback_config(cli)
                }
            }
        }
    };
    for problem in &problems {
        warn!("Config problem, falling back: {}", problem);
    }
    (resolved, problems)
}

/// Built-in settings, ignoring file and environment. CLI values still apply.
fn fallback_config(cli: &CliOverrides) -> ResolvedConfig {
    ResolvedConfig {
        rounds: cli.rounds.filter(|&n| n > 0).unwrap_or(DEFAULT_ROUNDS),
        keys: KeyBindings::default(),
        delay: LinearDelay::default(),
        seed: cli.seed,
        log_file: cli.log_file.clone(),
        log_level: DEFAULT_LOG_LEVEL.to_string(),
    }
}

fn validate(config: &ResolvedConfig) -> Result<(), ConfigError> {
    if config.rounds == 0 {
        return Err(ConfigError::Invalid("rounds must be at least 1".into()));
    }

    let KeyBindings { start, bell, quit } = config.keys;
    if start == bell || start == quit || bell == quit {
        return Err(ConfigError::Invalid(format!(
            "keys must be distinct (start={start:?}, bell={bell:?}, quit={quit:?})"
        )));
    }

    let d = &config.delay;
    let coefficients = [
        ("min_seconds", d.min_seconds),
        ("max_seconds", d.max_seconds),
        ("step_seconds", d.step_seconds),
        ("floor_seconds", d.floor_seconds),
    ];
    for (name, value) in coefficients {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "delay.{name} must be a non-negative number, got {value}"
            )));
        }
    }
    if d.floor_seconds <= 0.0 {
        return Err(ConfigError::Invalid("delay.floor_seconds must be positive".into()));
    }
    if d.min_seconds + d.max_seconds.max(d.floor_seconds) > MAX_DELAY_SECONDS {
        return Err(ConfigError::Invalid(format!(
            "delay.min_seconds + delay.max_seconds must not exceed {MAX_DELAY_SECONDS}s"
        )));
    }
    if d.max_seconds < d.floor_seconds {
        return Err(ConfigError::Invalid(format!(
            "delay.max_seconds ({}) is below delay.floor_seconds ({})",
            d.max_seconds, d.floor_seconds
        )));
    }

    if config.log_level.parse::<log::LevelFilter>().is_err() {
        return Err(ConfigError::Invalid(format!(
            "unknown log level {:?}",
            config.log_level
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = FruitbellConfig::default();
        assert!(config.game.rounds.is_none());
        assert!(config.keys.bell.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved =
            resolve_with_env(&FruitbellConfig::default(), &CliOverrides::default(), no_env).unwrap();
        assert_eq!(resolved.rounds, DEFAULT_ROUNDS);
        assert_eq!(resolved.keys, KeyBindings::default());
        assert_eq!(resolved.delay, LinearDelay::default());
        assert_eq!(resolved.seed, None);
        assert_eq!(resolved.log_file, None);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_toml_values_override_defaults() {
        let toml_str = r#"
[general]
log_file = "/tmp/fruitbell.log"
log_level = "info"

[game]
rounds = 8

[keys]
start = "n"
bell = " "
quit = "x"

[delay]
min_seconds = 0.1
max_seconds = 1.5
step_seconds = 0.1
floor_seconds = 0.3
"#;
        let config = parse_config(toml_str).unwrap();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env).unwrap();
        assert_eq!(resolved.rounds, 8);
        assert_eq!(
            resolved.keys,
            KeyBindings {
                start: 'n',
                bell: ' ',
                quit: 'x'
            }
        );
        assert_eq!(resolved.delay.min_seconds, 0.1);
        assert_eq!(resolved.delay.floor_seconds, 0.3);
        assert_eq!(resolved.log_file, Some(PathBuf::from("/tmp/fruitbell.log")));
        assert_eq!(resolved.log_level, "info");
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let config = parse_config("[keys]\nbell = \"j\"\n").unwrap();
        assert_eq!(config.keys.bell, Some('j'));
        assert!(config.keys.start.is_none());
        assert!(config.delay.min_seconds.is_none());
    }

    #[test]
    fn test_multi_char_key_rejected() {
        assert!(matches!(
            parse_config("[keys]\nbell = \"bb\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides_file_and_cli_overrides_env() {
        let config = parse_config("[game]\nrounds = 3\n").unwrap();
        let env = |key: &str| (key == "FRUITBELL_ROUNDS").then(|| "7".to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env).unwrap();
        assert_eq!(resolved.rounds, 7);

        let cli = CliOverrides {
            rounds: Some(2),
            seed: Some(99),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env).unwrap();
        assert_eq!(resolved.rounds, 2);
        assert_eq!(resolved.seed, Some(99));
    }

    #[test]
    fn test_bad_env_rounds_rejected() {
        let env = |key: &str| (key == "FRUITBELL_ROUNDS").then(|| "five".to_string());
        let err = resolve_with_env(&FruitbellConfig::default(), &CliOverrides::default(), env)
            .unwrap_err();
        assert!(err.to_string().contains("FRUITBELL_ROUNDS"));
    }

    #[test]
    fn test_log_file_from_env() {
        let env = |key: &str| (key == "FRUITBELL_LOG_FILE").then(|| "game.log".to_string());
        let resolved =
            resolve_with_env(&FruitbellConfig::default(), &CliOverrides::default(), env).unwrap();
        assert_eq!(resolved.log_file, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let config = parse_config("[game]\nrounds = 0\n").unwrap();
        assert!(matches!(
            resolve_with_env(&config, &CliOverrides::default(), no_env),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let config = parse_config("[keys]\nbell = \"q\"\n").unwrap();
        let err = resolve_with_env(&config, &CliOverrides::default(), no_env).unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }

    #[test]
    fn test_bad_delay_rejected() {
        for toml_str in [
            "[delay]\nmin_seconds = -0.1\n",
            "[delay]\nfloor_seconds = 0.0\n",
            "[delay]\nmax_seconds = 0.2\nfloor_seconds = 0.5\n",
            "[delay]\nmin_seconds = 1e30\n",
            "[delay]\nmax_seconds = 4000.0\n",
            "[delay]\nmin_seconds = 3000.0\nfloor_seconds = 700.0\nmax_seconds = 700.0\n",
        ] {
            let config = parse_config(toml_str).unwrap();
            assert!(
                matches!(
                    resolve_with_env(&config, &CliOverrides::default(), no_env),
                    Err(ConfigError::Invalid(_))
                ),
                "{toml_str}"
            );
        }
    }

    #[test]
    fn test_largest_allowed_delay_accepted() {
        let config = parse_config("[delay]\nmin_seconds = 1600.0\nmax_seconds = 2000.0\n").unwrap();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env).unwrap();
        assert_eq!(resolved.delay.upper_bound(1), MAX_DELAY_SECONDS);
    }

    #[test]
    fn test_fallback_keeps_cli_when_env_is_bad() {
        let env = |key: &str| (key == "FRUITBELL_ROUNDS").then(|| "five".to_string());
        let cli = CliOverrides {
            rounds: Some(3),
            seed: Some(8),
            log_file: Some(PathBuf::from("run.log")),
        };

        let (resolved, problems) = resolve_or_fallback(Ok(FruitbellConfig::default()), &cli, env);

        assert_eq!(problems.len(), 2);
        assert_eq!(resolved.rounds, 3);
        assert_eq!(resolved.seed, Some(8));
        assert_eq!(resolved.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(resolved.delay, LinearDelay::default());
    }

    #[test]
    fn test_fallback_ignores_zero_cli_rounds() {
        let cli = CliOverrides {
            rounds: Some(0),
            ..Default::default()
        };
        let (resolved, problems) = resolve_or_fallback(Ok(FruitbellConfig::default()), &cli, no_env);
        assert_eq!(problems.len(), 2);
        assert_eq!(resolved.rounds, DEFAULT_ROUNDS);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults_with_cli() {
        let file = parse_config("[game]\nrounds = 9\n[delay]\nmin_seconds = 1e30\n");
        let cli = CliOverrides {
            rounds: Some(4),
            ..Default::default()
        };

        let (resolved, problems) = resolve_or_fallback(file, &cli, no_env);

        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], ConfigError::Invalid(_)));
        assert_eq!(resolved.rounds, 4);
        assert_eq!(resolved.delay, LinearDelay::default());
    }

    #[test]
    fn test_unparseable_file_falls_back_to_defaults() {
        let file = parse_config("[game\nrounds = ");
        let (resolved, problems) = resolve_or_fallback(file, &CliOverrides::default(), no_env);

        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], ConfigError::Parse(_)));
        assert_eq!(resolved.rounds, DEFAULT_ROUNDS);
        assert_eq!(resolved.keys, KeyBindings::default());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let config = parse_config("[general]\nlog_level = \"chatty\"\n").unwrap();
        assert!(resolve_with_env(&config, &CliOverrides::default(), no_env).is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("fruitbell-does-not-exist.toml");
        let config = load_config(Some(path.as_path())).unwrap();
        assert!(config.game.rounds.is_none());
    }
}
