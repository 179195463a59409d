//! Deck configuration module.
//!
//! Handles loading, validating, and merging `gesture-deck.toml`. The file is
//! looked up in the media directory itself, next to the pictures it
//! describes, or passed explicitly with `--config`:
//!
//! ```text
//! references/
//! ├── gesture-deck.toml   # optional, overrides stock defaults
//! ├── pose-01.jpg
//! └── dance.mp4
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [session]
//! length = 20            # Items per practice run (1-500)
//! duration_secs = 3.0    # Seconds per item (1-120)
//! loop = false           # Wrap to the first item instead of stopping
//!
//! [frames]
//! max_dimension = 1600   # Longest edge after acquisition, in pixels
//! max_videos = 10        # Distinct videos sampled per session
//!
//! [video]
//! ffmpeg = "ffmpeg"      # Frame extractor (name on PATH or absolute path)
//! ffprobe = "ffprobe"    # Stream prober
//! decode_timeout_secs = 20
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [session]
//! duration_secs = 30.0
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{DEFAULT_MAX_DIMENSION, VideoTools};
use crate::session::DEFAULT_MAX_VIDEOS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// File name looked up in the media directory.
pub const CONFIG_FILE_NAME: &str = "gesture-deck.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Deck configuration loaded from `gesture-deck.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    /// Practice run settings (length, per-item duration).
    pub session: SessionConfig,
    /// Frame acquisition settings (resolution cap, video pool bound).
    pub frames: FramesConfig,
    /// External video tools.
    pub video: VideoConfig,
}

impl DeckConfig {
    pub const MAX_SESSION_LENGTH: usize = 500;
    pub const MIN_DURATION_SECS: f64 = 1.0;
    pub const MAX_DURATION_SECS: f64 = 120.0;

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.length == 0 || self.session.length > Self::MAX_SESSION_LENGTH {
            return Err(ConfigError::Validation(format!(
                "session.length must be 1-{}",
                Self::MAX_SESSION_LENGTH
            )));
        }
        let duration = self.session.duration_secs;
        if !(Self::MIN_DURATION_SECS..=Self::MAX_DURATION_SECS).contains(&duration) {
            return Err(ConfigError::Validation(format!(
                "session.duration_secs must be {}-{}",
                Self::MIN_DURATION_SECS,
                Self::MAX_DURATION_SECS
            )));
        }
        if self.frames.max_dimension == 0 {
            return Err(ConfigError::Validation(
                "frames.max_dimension must be non-zero".into(),
            ));
        }
        if self.frames.max_videos == 0 {
            return Err(ConfigError::Validation(
                "frames.max_videos must be non-zero".into(),
            ));
        }
        if self.video.decode_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "video.decode_timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn item_duration(&self) -> Duration {
        Duration::from_secs_f64(self.session.duration_secs)
    }

    /// Apply command-line session overrides, then validate the result.
    ///
    /// `looping` can only switch looping on; `None` keeps the file's value.
    pub fn override_session(
        &mut self,
        length: Option<usize>,
        duration_secs: Option<f64>,
        looping: bool,
    ) -> Result<(), ConfigError> {
        if let Some(length) = length {
            self.session.length = length;
        }
        if let Some(duration_secs) = duration_secs {
            self.session.duration_secs = duration_secs;
        }
        self.session.looping |= looping;
        self.validate()
    }
}

/// Practice run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Number of items drawn per session.
    pub length: usize,
    /// Seconds each item stays on screen during playback.
    pub duration_secs: f64,
    /// Wrap to the first item after the last one expires.
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            length: 20,
            duration_secs: 3.0,
            looping: false,
        }
    }
}

/// Frame acquisition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FramesConfig {
    /// Longest edge, in pixels, of an acquired frame.
    pub max_dimension: u32,
    /// Maximum distinct videos sampled into one session.
    pub max_videos: usize,
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_videos: DEFAULT_MAX_VIDEOS,
        }
    }
}

/// External video tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoConfig {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    /// Wall-clock budget for one ffprobe/ffmpeg invocation.
    pub decode_timeout_secs: u64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        let tools = VideoTools::default();
        Self {
            ffmpeg: tools.ffmpeg,
            ffprobe: tools.ffprobe,
            decode_timeout_secs: tools.timeout.as_secs(),
        }
    }
}

impl VideoConfig {
    pub fn to_video_tools(&self) -> VideoTools {
        VideoTools {
            ffmpeg: self.ffmpeg.clone(),
            ffprobe: self.ffprobe.clone(),
            timeout: Duration::from_secs(self.decode_timeout_secs),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(DeckConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

fn read_toml(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load `gesture-deck.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    read_toml(&config_path).map(Some)
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<DeckConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: DeckConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `gesture-deck.toml` in the given media directory.
///
/// A missing file yields the validated stock defaults.
pub fn load_config(dir: &Path) -> Result<DeckConfig, ConfigError> {
    let config = resolve_config(load_raw_config(dir)?)?;
    tracing::debug!(dir = %dir.display(), "config resolved");
    Ok(config)
}

/// Load config from an explicit file path. The file must exist.
pub fn load_config_file(path: &Path) -> Result<DeckConfig, ConfigError> {
    resolve_config(Some(read_toml(path)?))
}

/// Returns a fully-commented stock `gesture-deck.toml` with all keys.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gesture Deck Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the media directory as gesture-deck.toml,
# or pass it explicitly with --config.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Practice session
# ---------------------------------------------------------------------------
[session]
# Number of items drawn per session (1-500).
length = 20

# Seconds each item stays on screen (1-120).
duration_secs = 3.0

# Start over from the first item instead of stopping after the last one.
loop = false

# ---------------------------------------------------------------------------
# Frame acquisition
# ---------------------------------------------------------------------------
[frames]
# Longest edge of an acquired frame, in pixels. Larger media is downscaled.
max_dimension = 1600

# Distinct videos sampled into one session. Bounds how many video files a
# session opens, however many are in the directory.
max_videos = 10

# ---------------------------------------------------------------------------
# Video tools
# ---------------------------------------------------------------------------
[video]
# Names on PATH or absolute paths.
ffmpeg = "ffmpeg"
ffprobe = "ffprobe"

# Give up on a single probe or frame read after this many seconds.
decode_timeout_secs = 20
"##
}
