use crate::chart::annotation::DEFAULT_BILLING_DAY;
use crate::error::AppError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "usage-chart";

fn app_home_dir() -> Result<PathBuf, AppError> {
    if let Ok(custom) = std::env::var("USAGE_CHART_HOME") {
        return Ok(PathBuf::from(custom));
    }

    if let Some(dirs) = ProjectDirs::from("com", "usage-chart", APP_NAME) {
        let candidate = dirs.data_local_dir().to_path_buf();
        if fs::create_dir_all(&candidate).is_ok() {
            return Ok(candidate);
        }
    }

    let cwd = std::env::current_dir()?;
    Ok(cwd.join(".usage-chart"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub billing_day: u32,
    pub pan_step_px: f64,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            billing_day: DEFAULT_BILLING_DAY,
            pan_step_px: 70.0,
            log_level: "info".into(),
        }
    }
}

pub fn config_dir() -> Result<PathBuf, AppError> {
    Ok(app_home_dir()?.join("config"))
}

pub fn log_dir() -> Result<PathBuf, AppError> {
    Ok(app_home_dir()?.join("logs"))
}

pub fn config_path() -> Result<PathBuf, AppError> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn log_path() -> Result<PathBuf, AppError> {
    Ok(log_dir()?.join("usage-chart.log"))
}

pub fn ensure_dirs() -> Result<(), AppError> {
    fs::create_dir_all(config_dir()?)?;
    fs::create_dir_all(log_dir()?)?;
    Ok(())
}

fn validate_config(config: &AppConfig) -> Result<(), AppError> {
    if !(1..=31).contains(&config.billing_day) {
        return Err(AppError::Config(format!(
            "billing_day must be between 1 and 31, got {}",
            config.billing_day
        )));
    }
    if !config.pan_step_px.is_finite() || config.pan_step_px <= 0.0 {
        return Err(AppError::Config(
            "pan_step_px must be a positive number".into(),
        ));
    }
    Ok(())
}

pub fn parse_config(raw: &str) -> Result<AppConfig, AppError> {
    let mut parsed: AppConfig = toml::from_str(raw)?;
    parsed.log_level = parsed.log_level.trim().to_ascii_lowercase();
    validate_config(&parsed)?;
    Ok(parsed)
}

pub fn load_config() -> Result<AppConfig, AppError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(&path)?;
    parse_config(&raw)
}

pub fn save_config(config: &AppConfig) -> Result<(), AppError> {
    validate_config(config)?;
    ensure_dirs()?;
    let path = config_path()?;
    let raw = toml::to_string_pretty(config)?;
    fs::write(path, raw)?;
    Ok(())
}

pub fn ensure_initialized() -> Result<(), AppError> {
    ensure_dirs()?;
    let cfg_path = config_path()?;
    if !Path::new(&cfg_path).exists() {
        save_config(&AppConfig::default())?;
    }
    Ok(())
}
