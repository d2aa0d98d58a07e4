// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between a viewport's scale and pan and external key/value storage.
//!
//! A host typically keeps the view in its URL (`?scale=1.5&panX=-25&panY=0`) so a reload
//! restores the same framing. Missing or unparsable values fall back to the defaults.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Query key for the scale.
pub const SCALE_KEY: &str = "scale";
/// Query key for the horizontal pan.
pub const PAN_X_KEY: &str = "panX";
/// Query key for the vertical pan.
pub const PAN_Y_KEY: &str = "panY";

/// Persistable part of a viewport: scale and pan.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ViewState {
    /// Zoom factor.
    pub scale: f64,
    /// Horizontal pan in pixels.
    pub pan_x: f64,
    /// Vertical pan in pixels.
    pub pan_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl ViewState {
    /// Read `scale`, `panX` and `panY` from key/value pairs.
    ///
    /// Unknown keys are ignored; a later duplicate key wins.
    ///
    /// ```
    /// use gridscape_view::ViewState;
    ///
    /// let state = ViewState::from_query_pairs([("scale", "1.5"), ("panX", "oops"), ("panY", "-40")]);
    /// assert_eq!(state, ViewState { scale: 1.5, pan_x: 0.0, pan_y: -40.0 });
    /// ```
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut state = Self::default();
        for (key, value) in pairs {
            let slot = match key {
                SCALE_KEY => &mut state.scale,
                PAN_X_KEY => &mut state.pan_x,
                PAN_Y_KEY => &mut state.pan_y,
                _ => continue,
            };
            *slot = parse_or(value, *slot);
        }
        state
    }

    /// Parse a `key=value&key=value` query string, with or without a leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_query_pairs(
            query
                .split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| pair.split_once('=').unwrap_or((pair, ""))),
        )
    }

    /// Key/value pairs for storage, in `scale`, `panX`, `panY` order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        alloc::vec![
            (SCALE_KEY, self.scale.to_string()),
            (PAN_X_KEY, self.pan_x.to_string()),
            (PAN_Y_KEY, self.pan_y.to_string()),
        ]
    }

    /// The pairs joined as a query string without a leading `?`.
    pub fn to_query(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.to_query_pairs().into_iter().enumerate() {
            if i > 0 {
                out.push('&');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(&value);
        }
        out
    }
}

fn parse_or(value: &str, fallback: f64) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_garbage_values_fall_back() {
        assert_eq!(ViewState::from_query(""), ViewState::default());
        let state = ViewState::from_query("?scale=NaN&panX=12.5&panY=&zoom=4");
        assert_eq!(
            state,
            ViewState {
                scale: 1.0,
                pan_x: 12.5,
                pan_y: 0.0
            }
        );
    }

    #[test]
    fn formats_in_key_order() {
        let state = ViewState {
            scale: 1.5,
            pan_x: -25.0,
            pan_y: 0.0,
        };
        assert_eq!(state.to_query(), "scale=1.5&panX=-25&panY=0");
        assert_eq!(ViewState::from_query(&state.to_query()), state);
    }

    #[test]
    fn zero_is_a_real_value() {
        let state = ViewState::from_query("scale=2&panX=0&panY=0");
        assert_eq!(state.pan_x, 0.0);
        assert_eq!(state.scale, 2.0);
    }
}
