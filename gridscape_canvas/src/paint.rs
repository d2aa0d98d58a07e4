// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing capability consumed by [`Renderable`](crate::Renderable) and the frame planner.
//!
//! The canvas never rasterizes. It describes each frame as calls on a [`Painter`], in pixel
//! coordinates, and leaves the actual drawing to the host. [`DisplayList`] is a painter that
//! records the calls as [`Command`]s, for hosts that replay them later and for tests.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Circle, Line, Point, Rect, RoundedRect, Size, Vec2};

/// An sRGB color with straight alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Canvas background, `#242336`.
    pub const BACKGROUND: Self = Self::rgb(0x24, 0x23, 0x36);
    /// Grid lines.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Default cell fill.
    pub const GREEN: Self = Self::rgb(0x00, 0x80, 0x00);
    /// Selection outline.
    pub const PURPLE: Self = Self::rgb(0x80, 0x00, 0x80);
    /// Drafts and objects created by hand.
    pub const YELLOW: Self = Self::rgb(0xff, 0xff, 0x00);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Host-side handle of an image. The canvas only passes it through to [`Painter::draw_image`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageId(pub u32);

/// Sink for drawing calls, in pixels.
///
/// Between [`Self::push_translation`] and [`Self::pop_translation`] coordinates are relative to
/// the pushed offset.
pub trait Painter {
    /// Clear the whole surface.
    fn clear(&mut self, size: Size);
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Stroke an axis-aligned rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
    /// Fill a rounded rectangle.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color);
    /// Stroke a rounded rectangle.
    fn stroke_rounded_rect(&mut self, rect: RoundedRect, color: Color, width: f64);
    /// Fill a circle.
    fn fill_circle(&mut self, circle: Circle, color: Color);
    /// Stroke a batch of line segments with one style.
    fn stroke_lines(&mut self, lines: &[Line], color: Color, width: f64);
    /// Draw an image scaled into `rect`.
    fn draw_image(&mut self, image: ImageId, rect: Rect);
    /// Draw a single line of text horizontally centered on `anchor`.
    fn fill_text(&mut self, text: &str, anchor: Point, font_size: f64, color: Color);
    /// Offset all following calls by `offset`.
    fn push_translation(&mut self, offset: Vec2);
    /// Undo the most recent [`Self::push_translation`].
    fn pop_translation(&mut self);
}

/// One recorded [`Painter`] call. Fields mirror the method arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// [`Painter::clear`].
    Clear(Size),
    /// [`Painter::fill_rect`].
    FillRect(Rect, Color),
    /// [`Painter::stroke_rect`].
    StrokeRect(Rect, Color, f64),
    /// [`Painter::fill_rounded_rect`].
    FillRoundedRect(RoundedRect, Color),
    /// [`Painter::stroke_rounded_rect`].
    StrokeRoundedRect(RoundedRect, Color, f64),
    /// [`Painter::fill_circle`].
    FillCircle(Circle, Color),
    /// [`Painter::stroke_lines`].
    StrokeLines(Vec<Line>, Color, f64),
    /// [`Painter::draw_image`].
    DrawImage(ImageId, Rect),
    /// [`Painter::fill_text`].
    FillText {
        /// Label.
        text: String,
        /// Horizontal center of the baseline.
        anchor: Point,
        /// Font size in pixels.
        font_size: f64,
        /// Fill color.
        color: Color,
    },
    /// [`Painter::push_translation`].
    PushTranslation(Vec2),
    /// [`Painter::pop_translation`].
    PopTranslation,
}

/// A [`Painter`] that records every call in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<Command>,
}

impl DisplayList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in call order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty for the next frame.
    pub fn take(&mut self) -> Vec<Command> {
        core::mem::take(&mut self.commands)
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Painter for DisplayList {
    fn clear(&mut self, size: Size) {
        self.commands.push(Command::Clear(size));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(Command::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.commands.push(Command::StrokeRect(rect, color, width));
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        self.commands.push(Command::FillRoundedRect(rect, color));
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, color: Color, width: f64) {
        self.commands
            .push(Command::StrokeRoundedRect(rect, color, width));
    }

    fn fill_circle(&mut self, circle: Circle, color: Color) {
        self.commands.push(Command::FillCircle(circle, color));
    }

    fn stroke_lines(&mut self, lines: &[Line], color: Color, width: f64) {
        self.commands
            .push(Command::StrokeLines(lines.to_vec(), color, width));
    }

    fn draw_image(&mut self, image: ImageId, rect: Rect) {
        self.commands.push(Command::DrawImage(image, rect));
    }

    fn fill_text(&mut self, text: &str, anchor: Point, font_size: f64, color: Color) {
        self.commands.push(Command::FillText {
            text: text.to_string(),
            anchor,
            font_size,
            color,
        });
    }

    fn push_translation(&mut self, offset: Vec2) {
        self.commands.push(Command::PushTranslation(offset));
    }

    fn pop_translation(&mut self) {
        self.commands.push(Command::PopTranslation);
    }
}
