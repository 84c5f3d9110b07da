use std::env;
use std::path::PathBuf;

use crate::engine::Banding;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub content_dir: PathBuf,
    pub pass_threshold: Option<f64>,
    pub marginal_threshold: Option<f64>,
    pub max_active_assessments: usize,
    /// Assessments untouched for this long are dropped to make room for new ones.
    pub idle_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0:8081".to_string(),
            content_dir: PathBuf::from("content"),
            pass_threshold: None,
            marginal_threshold: None,
            max_active_assessments: 10_000,
            idle_timeout_secs: 3_600,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Local .env is optional; real environment always wins
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let defaults = Config::default();

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or(defaults.bind_addr);

        let content_dir = settings
            .get_string("content.dir")
            .or_else(|_| env::var("CONTENT_DIR"))
            .map(PathBuf::from)
            .unwrap_or(defaults.content_dir);

        let pass_threshold = optional_float(&settings, "assessment.pass_threshold", "PASS_THRESHOLD")?;
        let marginal_threshold =
            optional_float(&settings, "assessment.marginal_threshold", "MARGINAL_THRESHOLD")?;

        let max_active_assessments = positive_int(
            &settings,
            "assessment.max_active",
            "MAX_ACTIVE_ASSESSMENTS",
            defaults.max_active_assessments as u64,
        )? as usize;
        let idle_timeout_secs = positive_int(
            &settings,
            "assessment.idle_timeout_secs",
            "ASSESSMENT_IDLE_TIMEOUT_SECS",
            defaults.idle_timeout_secs,
        )?;

        let loaded = Config {
            bind_addr,
            content_dir,
            pass_threshold,
            marginal_threshold,
            max_active_assessments,
            idle_timeout_secs,
        };

        // Thresholds must form a valid banding
        Banding::new(loaded.pass_threshold, loaded.marginal_threshold)
            .map_err(config::ConfigError::Message)?;

        Ok(loaded)
    }

    /// Default banding applied to quizzes that do not bring their own thresholds.
    pub fn banding(&self) -> Banding {
        Banding {
            pass_threshold: self.pass_threshold,
            marginal_threshold: self.marginal_threshold,
        }
    }
}

fn optional_float(
    settings: &config::Config,
    key: &str,
    env_key: &str,
) -> Result<Option<f64>, config::ConfigError> {
    if let Ok(value) = settings.get_float(key) {
        return Ok(Some(value));
    }

    match env::var(env_key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse::<f64>().map(Some).map_err(|e| {
            config::ConfigError::Message(format!("{}={} is not a number: {}", env_key, raw, e))
        }),
        Err(_) => Ok(None),
    }
}

fn positive_int(
    settings: &config::Config,
    key: &str,
    env_key: &str,
    default: u64,
) -> Result<u64, config::ConfigError> {
    let value = match settings.get_int(key) {
        Ok(value) => u64::try_from(value).map_err(|_| {
            config::ConfigError::Message(format!("{} must be positive, got {}", key, value))
        })?,
        Err(_) => match env::var(env_key) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                config::ConfigError::Message(format!("{}={} is not a valid count: {}", env_key, raw, e))
            })?,
            Err(_) => default,
        },
    };

    if value == 0 {
        return Err(config::ConfigError::Message(format!(
            "{} must be at least 1",
            key
        )));
    }
    Ok(value)
}
