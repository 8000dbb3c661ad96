//! Engine and endpoint configuration.
//!
//! Both structs deserialize from partial JSON; anything missing takes the
//! default below.

use serde::Deserialize;

use crate::color::Palette;
use crate::coords::PlotLayout;
use crate::input::{DEFAULT_FFT_SIZE, FFT_SIZES};
use crate::playback::{DEFAULT_FPS, PLAYBACK_SPEEDS};
use crate::viewport::DEFAULT_WINDOW_SIZE;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_size: usize,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub left_gutter: f64,
    pub right_gutter: f64,
    pub default_fps: u32,
    pub default_palette: Palette,
    pub fft_size: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let layout = PlotLayout::default();
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            margin_top: layout.margin_top,
            margin_bottom: layout.margin_bottom,
            left_gutter: layout.left_gutter,
            right_gutter: layout.right_gutter,
            default_fps: DEFAULT_FPS,
            default_palette: Palette::default(),
            fft_size: DEFAULT_FFT_SIZE,
        }
    }
}

/// Nearest entry of `allowed`, so the matching selector always has an option.
fn snap_to(value: u32, allowed: &[u32], what: &str) -> u32 {
    if allowed.contains(&value) {
        return value;
    }
    let snapped = allowed
        .iter()
        .copied()
        .min_by_key(|a| a.abs_diff(value))
        .unwrap_or(value);
    log::warn!("{what} {value} is not offered, using {snapped}");
    snapped
}

impl EngineConfig {
    /// Snap `default_fps` and `fft_size` to the values the controls offer.
    pub fn normalized(mut self) -> Self {
        self.default_fps = snap_to(self.default_fps, &PLAYBACK_SPEEDS, "default_fps");
        self.fft_size = snap_to(self.fft_size, &FFT_SIZES, "fft_size");
        self
    }

    /// Initial layout; width and height are replaced on first resize.
    pub fn layout(&self) -> PlotLayout {
        PlotLayout {
            margin_top: self.margin_top,
            margin_bottom: self.margin_bottom,
            left_gutter: self.left_gutter,
            right_gutter: self.right_gutter,
            ..PlotLayout::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Collection path the capture id is appended to.
    pub base_path: String,
    pub capture_id: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: "/api/latest/assets/captures".to_string(),
            capture_id: String::new(),
        }
    }
}

impl ApiConfig {
    fn capture_path(&self) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), self.capture_id)
    }

    pub fn status_url(&self) -> String {
        format!("{}/post_processing_status/", self.capture_path())
    }

    pub fn download_url(&self) -> String {
        format!(
            "{}/download_post_processed_data/?processing_type=waterfall",
            self.capture_path()
        )
    }
}

/// Viewer configuration block embedded in the host page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub engine: EngineConfig,
    pub api: ApiConfig,
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.engine = config.engine.normalized();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = ViewerConfig::from_json(
            r#"{"engine": {"window_size": 50, "default_palette": "hot"}, "api": {"capture_id": "abc"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.engine.window_size, 50);
        assert_eq!(cfg.engine.default_palette, Palette::Hot);
        assert_eq!(cfg.engine.default_fps, DEFAULT_FPS);
        assert_eq!(cfg.api.base_path, "/api/latest/assets/captures");
    }

    #[test]
    fn test_endpoint_urls() {
        let api = ApiConfig { base_path: "/api/captures/".into(), capture_id: "42".into() };
        assert_eq!(api.status_url(), "/api/captures/42/post_processing_status/");
        assert_eq!(
            api.download_url(),
            "/api/captures/42/download_post_processed_data/?processing_type=waterfall"
        );
    }

    #[test]
    fn test_unlisted_speed_and_fft_size_snap() {
        let cfg = ViewerConfig::from_json(r#"{"engine": {"default_fps": 7, "fft_size": 1000}}"#).unwrap();
        assert_eq!(cfg.engine.default_fps, 5);
        assert_eq!(cfg.engine.fft_size, 1024);

        let cfg = ViewerConfig::from_json(r#"{"engine": {"default_fps": 0}}"#).unwrap();
        assert_eq!(cfg.engine.default_fps, 1);
        let cfg = ViewerConfig::from_json(r#"{"engine": {"default_fps": 15}}"#).unwrap();
        assert_eq!(cfg.engine.default_fps, 15);
    }

    #[test]
    fn test_unknown_palette_rejected() {
        assert!(ViewerConfig::from_json(r#"{"engine": {"default_palette": "rainbow"}}"#).is_err());
    }
}
