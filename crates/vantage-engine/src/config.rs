use std::time::Duration;

use winit::dpi::LogicalSize;

use crate::error::ConfigError;

/// Multisampling settings for the offscreen render target.
#[derive(Debug, Clone, PartialEq)]
pub struct MsaaConfig {
    /// When false, drawing goes straight to the visible surface.
    pub enabled: bool,

    /// Ceiling on the sample count. A power of two in `1..=16`.
    pub max_samples: u32,
}

impl Default for MsaaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_samples: 8,
        }
    }
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,

    /// Initial window size in logical pixels.
    pub window_size: LogicalSize<f64>,

    /// Fixed design resolution the application draws in.
    pub virtual_width: f32,
    pub virtual_height: f32,

    pub msaa: MsaaConfig,

    /// Releasing Escape requests close.
    pub close_on_escape: bool,

    /// Upper bound on how long a poll may block while nothing can be drawn.
    pub idle_wait: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "vantage".to_string(),
            window_size: LogicalSize::new(500.0, 500.0),
            virtual_width: 1920.0,
            virtual_height: 1080.0,
            msaa: MsaaConfig::default(),
            close_on_escape: true,
            idle_wait: Duration::from_millis(16),
        }
    }
}

impl RuntimeConfig {
    /// Rejects configurations the loop cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.virtual_width, self.virtual_height);
        if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
            return Err(ConfigError::InvalidVirtualSize { width: w, height: h });
        }

        let max = self.msaa.max_samples;
        if self.msaa.enabled && (!max.is_power_of_two() || max > 16) {
            return Err(ConfigError::UnsupportedSampleCount(max));
        }

        if !(self.window_size.width >= 1.0 && self.window_size.height >= 1.0) {
            return Err(ConfigError::ZeroWindowSize);
        }

        Ok(())
    }
}
