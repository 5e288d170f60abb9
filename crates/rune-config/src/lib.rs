//! Rune stack configuration system
//!
//! This crate provides centralized configuration for the stack navigator's
//! transition engine, loading settings from `rune.toml` with environment variable
//! overrides.
//!
//! ```toml
//! [stack]
//! mode = "card"
//! platform = "ios"
//! header_mode = "float"
//! native_driver_available = true
//!
//! [gesture]
//! response_distance = 30.0
//!
//! [timing]
//! duration_ms = 250.0
//! easing = "ease_in_out"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A keyword value is not one of the accepted variants.
    #[error("invalid {field} value: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneConfig {
    /// Stack presentation settings
    pub stack: StackConfig,
    /// Back-swipe gesture thresholds
    pub gesture: GestureThresholds,
    /// Timing of programmatic route-change transitions
    pub timing: TimingConfig,
}

/// How screens are presented on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// Screens slide in horizontally; back-swipe from the left edge.
    #[default]
    Card,
    /// Screens rise from the bottom; back-swipe from the top edge.
    Modal,
}

/// How the navigation header is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMode {
    /// One shared header that animates between screens.
    Float,
    /// Each screen renders its own header.
    Screen,
    /// No header.
    None,
}

/// Target platform conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Ios,
    Android,
}

/// Named easing curves for time-driven progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingKind {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

fn keyword(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace('-', "_")
}

impl FromStr for PresentationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match keyword(s).as_str() {
            "card" => Ok(Self::Card),
            "modal" => Ok(Self::Modal),
            _ => Err(ConfigError::InvalidValue {
                field: "stack.mode",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for HeaderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match keyword(s).as_str() {
            "float" => Ok(Self::Float),
            "screen" => Ok(Self::Screen),
            "none" => Ok(Self::None),
            _ => Err(ConfigError::InvalidValue {
                field: "stack.header_mode",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match keyword(s).as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            _ => Err(ConfigError::InvalidValue {
                field: "stack.platform",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for EasingKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match keyword(s).as_str() {
            "linear" => Ok(Self::Linear),
            "ease" => Ok(Self::Ease),
            "ease_in" => Ok(Self::EaseIn),
            "ease_out" => Ok(Self::EaseOut),
            "ease_in_out" => Ok(Self::EaseInOut),
            _ => Err(ConfigError::InvalidValue {
                field: "timing.easing",
                value: s.to_string(),
            }),
        }
    }
}

/// Stack presentation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    /// Card or modal presentation
    pub mode: PresentationMode,
    /// Explicit header mode; derived from platform and mode when unset
    pub header_mode: Option<HeaderMode>,
    /// Platform conventions to follow
    pub platform: Platform,
    /// Enable the back-swipe gesture; defaults to on for iOS only
    pub gestures_enabled: Option<bool>,
    /// Whether the host can run animations on a native driver
    pub native_driver_available: bool,
    /// Seed for random transition parameters (random when unset)
    pub seed: Option<u64>,
}

/// Back-swipe gesture configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Distance in px from the leading edge where a swipe may start (default: 30)
    pub response_distance: f64,
    /// Fraction of the screen past which a slow release goes back (default: 0.5)
    pub position_threshold: f64,
    /// Release speed in px/ms that decides regardless of distance (default: 0.5)
    pub velocity_threshold: f64,
    /// Duration of the post-release settle animation in ms (default: 250)
    pub settle_duration_ms: f64,
}

/// Route-change transition timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Duration in milliseconds (default: 250)
    pub duration_ms: f64,
    /// Easing curve (default: ease_in_out)
    pub easing: EasingKind,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            mode: PresentationMode::Card,
            header_mode: None,
            platform: Platform::Ios,
            gestures_enabled: None,
            native_driver_available: false,
            seed: None,
        }
    }
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            response_distance: 30.0,
            position_threshold: 0.5,
            velocity_threshold: 0.5,
            settle_duration_ms: 250.0,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 250.0,
            easing: EasingKind::EaseInOut,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn parse_or_warn<T: FromStr>(var: &str, val: &str) -> Option<T> {
    match val.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("ignoring {var}={val:?}: invalid value");
            None
        }
    }
}

fn is_valid_duration(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn parse_duration_or_warn(var: &str, val: &str) -> Option<f64> {
    let duration = parse_or_warn::<f64>(var, val)?;
    if is_valid_duration(duration) {
        Some(duration)
    } else {
        log::warn!("ignoring {var}={val:?}: duration must be finite and non-negative");
        None
    }
}

impl RuneConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune.toml configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject durations an animation could never finish.
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("timing.duration_ms", self.timing.duration_ms),
            ("gesture.settle_duration_ms", self.gesture.settle_duration_ms),
        ];
        for (field, value) in durations {
            if !is_valid_duration(value) {
                return Err(ConfigError::InvalidValue {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if the file is missing or invalid
    pub fn load_or_default() -> Self {
        match Self::load_from_file("rune.toml") {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// This allows for temporary overrides without modifying the config file.
    pub fn merge_with_env(&mut self) {
        self.merge_with_vars(|name| std::env::var(name).ok());
    }

    /// Merge overrides from an arbitrary variable source.
    pub fn merge_with_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Stack settings
        if let Some(val) = var("RUNE_STACK_MODE") {
            if let Some(mode) = parse_or_warn("RUNE_STACK_MODE", &val) {
                self.stack.mode = mode;
            }
        }
        if let Some(val) = var("RUNE_HEADER_MODE") {
            if let Some(header_mode) = parse_or_warn("RUNE_HEADER_MODE", &val) {
                self.stack.header_mode = Some(header_mode);
            }
        }
        if let Some(val) = var("RUNE_PLATFORM") {
            if let Some(platform) = parse_or_warn("RUNE_PLATFORM", &val) {
                self.stack.platform = platform;
            }
        }
        if let Some(val) = var("RUNE_GESTURES_ENABLED") {
            self.stack.gestures_enabled = Some(parse_flag(&val));
        }
        if let Some(val) = var("RUNE_SEED") {
            if let Some(seed) = parse_or_warn("RUNE_SEED", &val) {
                self.stack.seed = Some(seed);
            }
        }

        // Gesture settings
        if let Some(val) = var("RUNE_GESTURE_DISTANCE") {
            if let Some(distance) = parse_or_warn("RUNE_GESTURE_DISTANCE", &val) {
                self.gesture.response_distance = distance;
            }
        }

        // Timing settings
        if let Some(val) = var("RUNE_TRANSITION_MS") {
            if let Some(duration) = parse_duration_or_warn("RUNE_TRANSITION_MS", &val) {
                self.timing.duration_ms = duration;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// This is the recommended way to load configuration:
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    /// Whether the back-swipe gesture is on: explicit setting, else iOS only.
    pub fn gestures_enabled(&self) -> bool {
        self.stack
            .gestures_enabled
            .unwrap_or(self.stack.platform == Platform::Ios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = RuneConfig::default();
        assert_eq!(config.stack.mode, PresentationMode::Card);
        assert_eq!(config.stack.platform, Platform::Ios);
        assert_eq!(config.gesture.response_distance, 30.0);
        assert_eq!(config.timing.easing, EasingKind::EaseInOut);
        assert!(config.gestures_enabled());
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = RuneConfig::default();
        config.stack.header_mode = Some(HeaderMode::None);
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: RuneConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml() {
        let parsed: RuneConfig = toml::from_str(
            r#"
            [stack]
            mode = "modal"
            platform = "android"

            [timing]
            easing = "linear"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.stack.mode, PresentationMode::Modal);
        assert!(!parsed.gestures_enabled());
        assert_eq!(parsed.timing.easing, EasingKind::Linear);
        assert_eq!(parsed.timing.duration_ms, 250.0);
        assert_eq!(parsed.gesture.position_threshold, 0.5);
    }

    #[test]
    fn test_invalid_toml() {
        let result: std::result::Result<RuneConfig, _> = toml::from_str("[stack]\nmode = \"sideways\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = RuneConfig::load_from_file("does-not-exist/rune.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if rune.toml doesn't exist
        let config = RuneConfig::load_or_default();
        assert!(config.timing.duration_ms > 0.0);
    }

    #[test]
    fn test_keyword_parsing() {
        assert_eq!("Modal".parse::<PresentationMode>().unwrap(), PresentationMode::Modal);
        assert_eq!("ease-in-out".parse::<EasingKind>().unwrap(), EasingKind::EaseInOut);
        assert_eq!("none".parse::<HeaderMode>().unwrap(), HeaderMode::None);
        assert!(matches!(
            "web".parse::<Platform>(),
            Err(ConfigError::InvalidValue { field: "stack.platform", .. })
        ));
    }

    #[test]
    fn test_merge_with_vars() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RUNE_STACK_MODE", "modal"),
            ("RUNE_HEADER_MODE", "screen"),
            ("RUNE_PLATFORM", "android"),
            ("RUNE_GESTURES_ENABLED", "true"),
            ("RUNE_GESTURE_DISTANCE", "50"),
            ("RUNE_TRANSITION_MS", "400"),
            ("RUNE_SEED", "not-a-number"),
        ]);

        let mut config = RuneConfig::default();
        config.merge_with_vars(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.stack.mode, PresentationMode::Modal);
        assert_eq!(config.stack.header_mode, Some(HeaderMode::Screen));
        assert_eq!(config.stack.platform, Platform::Android);
        assert!(config.gestures_enabled());
        assert_eq!(config.gesture.response_distance, 50.0);
        assert_eq!(config.timing.duration_ms, 400.0);
        assert_eq!(config.stack.seed, None);
    }

    #[test]
    fn test_unfinishable_durations_rejected() {
        for bad in ["inf", "NaN", "-5"] {
            let mut config = RuneConfig::default();
            config.merge_with_vars(|name| (name == "RUNE_TRANSITION_MS").then(|| bad.to_string()));
            assert_eq!(config.timing.duration_ms, 250.0, "{bad}");
        }

        let parsed: RuneConfig = toml::from_str("[gesture]\nsettle_duration_ms = inf").unwrap();
        assert!(matches!(
            parsed.validate(),
            Err(ConfigError::InvalidValue { field: "gesture.settle_duration_ms", .. })
        ));
        assert!(RuneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_merge_with_env() {
        // Set environment variable
        unsafe {
            std::env::set_var("RUNE_SEED", "42");
        }

        let mut config = RuneConfig::default();
        config.merge_with_env();

        assert_eq!(config.stack.seed, Some(42));

        // Clean up
        unsafe {
            std::env::remove_var("RUNE_SEED");
        }
    }
}
