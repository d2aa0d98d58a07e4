// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::{self, Display};

use gridscape_index::ROOT_CAPACITY;
use gridscape_view::{ConfigError, ViewportConfig};

use crate::paint::Color;

bitflags::bitflags! {
    /// Frame layers drawn by [`CanvasSession::draw`](crate::CanvasSession::draw).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RenderLayers: u8 {
        /// Grid lines over the whole extent.
        const GRID      = 0b0000_0001;
        /// Indexed objects inside the visible region.
        const OBJECTS   = 0b0000_0010;
        /// Outlines of selected objects.
        const SELECTION = 0b0000_0100;
        /// Drafts being created.
        const DRAFTS    = 0b0000_1000;
    }
}

impl Default for RenderLayers {
    fn default() -> Self {
        Self::all()
    }
}

/// Everything needed to start a [`CanvasSession`](crate::CanvasSession).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CanvasConfig {
    /// Logical width of the grid.
    pub tree_width: f64,
    /// Logical height of the grid.
    pub tree_height: f64,
    /// Leaf capacity of the index.
    pub capacity: usize,
    /// Viewport limits and initial framing.
    pub viewport: ViewportConfig,
    /// Start in edit mode.
    pub editing: bool,
    /// Record index changes for [`CanvasSession::take_damage`](crate::CanvasSession::take_damage).
    pub record_changes: bool,
    /// Surface background.
    pub background: Color,
    /// Grid line color.
    pub grid_color: Color,
    /// Selection outline color.
    pub selection_color: Color,
    /// Color of drafts and of objects created from them.
    pub draft_color: Color,
    /// Layers drawn each frame.
    pub layers: RenderLayers,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            tree_width: 400.0,
            tree_height: 400.0,
            capacity: ROOT_CAPACITY,
            viewport: ViewportConfig::default(),
            editing: false,
            record_changes: false,
            background: Color::BACKGROUND,
            grid_color: Color::BLACK,
            selection_color: Color::PURPLE,
            draft_color: Color::YELLOW,
            layers: RenderLayers::default(),
        }
    }
}

impl CanvasConfig {
    /// Check the grid extent and the viewport configuration.
    pub fn validate(&self) -> Result<(), CanvasError> {
        let extent_ok = |v: f64| v.is_finite() && v > 0.0;
        if !extent_ok(self.tree_width) || !extent_ok(self.tree_height) {
            return Err(CanvasError::Extent {
                width: self.tree_width,
                height: self.tree_height,
            });
        }
        self.viewport.validate().map_err(CanvasError::Viewport)
    }
}

/// Why a [`CanvasConfig`] was refused.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CanvasError {
    /// The grid extent must be finite and positive.
    Extent {
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },
    /// The viewport configuration is invalid.
    Viewport(ConfigError),
}

impl Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extent { width, height } => {
                write!(f, "grid extent {width}x{height} must be finite and positive")
            }
            Self::Viewport(_) => f.write_str("invalid viewport configuration"),
        }
    }
}

impl core::error::Error for CanvasError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Extent { .. } => None,
            Self::Viewport(err) => Some(err),
        }
    }
}
