// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport configuration and its validation.

use core::fmt::{self, Display};

/// Pixels per logical unit at scale 1.
pub const DEFAULT_BASE_SIZE: f64 = 100.0;
/// Smallest allowed scale.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
/// Largest allowed scale.
pub const DEFAULT_MAX_ZOOM: f64 = 3.0;

/// Initial state and limits for a [`Viewport`](crate::Viewport).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewportConfig {
    /// Pixels per logical unit at scale 1.
    pub base_size: f64,
    /// Lower scale bound.
    pub min_zoom: f64,
    /// Upper scale bound.
    pub max_zoom: f64,
    /// Initial scale.
    pub scale: f64,
    /// Initial horizontal pan in pixels.
    pub pan_x: f64,
    /// Initial vertical pan in pixels.
    pub pan_y: f64,
    /// Drawing surface width in pixels.
    pub surface_width: f64,
    /// Drawing surface height in pixels.
    pub surface_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            base_size: DEFAULT_BASE_SIZE,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            surface_width: 800.0,
            surface_height: 800.0,
        }
    }
}

impl ViewportConfig {
    /// Check that the configuration describes a usable viewport.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_size.is_finite() || self.base_size <= 0.0 {
            return Err(ConfigError::BaseSize(self.base_size));
        }
        if !self.min_zoom.is_finite() || self.min_zoom <= 0.0 {
            return Err(ConfigError::MinZoom(self.min_zoom));
        }
        if !self.max_zoom.is_finite() || self.min_zoom > self.max_zoom {
            return Err(ConfigError::ZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.scale) {
            return Err(ConfigError::Scale(self.scale));
        }
        if !self.pan_x.is_finite() || !self.pan_y.is_finite() {
            return Err(ConfigError::Pan);
        }
        let extent_ok = |v: f64| v.is_finite() && v >= 0.0;
        if !extent_ok(self.surface_width) || !extent_ok(self.surface_height) {
            return Err(ConfigError::Surface);
        }
        Ok(())
    }
}

/// A [`ViewportConfig`] field outside its valid domain.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Base size must be finite and positive.
    BaseSize(f64),
    /// Minimum zoom must be finite and positive.
    MinZoom(f64),
    /// Maximum zoom must be finite and not below the minimum.
    ZoomRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// Initial scale lies outside the zoom range.
    Scale(f64),
    /// Pan offsets must be finite.
    Pan,
    /// Surface size must be finite and non-negative.
    Surface,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseSize(v) => write!(f, "base size must be finite and positive, got {v}"),
            Self::MinZoom(v) => write!(f, "minimum zoom must be finite and positive, got {v}"),
            Self::ZoomRange { min, max } => write!(f, "invalid zoom range {min}..={max}"),
            Self::Scale(v) => write!(f, "initial scale {v} is outside the zoom range"),
            Self::Pan => f.write_str("pan offsets must be finite"),
            Self::Surface => f.write_str("surface size must be finite and non-negative"),
        }
    }
}

impl core::error::Error for ConfigError {}
