// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of things drawn on the grid and the pixel geometry of each.
//!
//! All lengths below are fractions of `unity`, the pixel size of one logical unit, unless noted.

use alloc::format;

use gridscape_index::{Bounded, BoundsObject, Rect};
use kurbo::{Circle, Point, RoundedRect, Vec2};

use crate::gesture::diagonal_points_to_rect;
use crate::paint::{Color, ImageId, Painter};

/// Inset between an object's cell boundary and its painted body, split evenly on both sides.
pub const PADDING: f64 = 0.3;
/// Corner radius of painted bodies.
pub const CORNER_RADIUS: f64 = 0.1;
/// Width of selection outlines and grid lines.
pub const LINE_WIDTH: f64 = 0.05;
/// Font size of the draft size label.
pub const LABEL_SIZE: f64 = 0.3;
/// Radius of a draft's anchor dot, in pixels.
pub const ANCHOR_DOT_RADIUS: f64 = 3.0;
/// Alpha applied to a draft's color for its preview cells.
pub const PREVIEW_ALPHA: u8 = 0x4d;

/// Per-frame inputs shared by every renderable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderContext {
    /// Pixels per logical unit.
    pub unity: f64,
    /// Current pan, used to bring the cursor into the translated drawing space.
    pub pan: Vec2,
    /// Cursor position in screen pixels, if known.
    pub cursor: Option<Point>,
    /// Outline color of selected objects.
    pub selection: Color,
    /// Whether selection outlines are drawn.
    pub show_selection: bool,
}

/// An object being created: anchored at a cell and sized by the cursor until committed.
#[derive(Clone, Debug)]
pub struct Draft {
    object: BoundsObject,
    color: Color,
}

impl Draft {
    /// Start a draft whose anchor cell has its top-left corner at `anchor`.
    pub fn new(anchor: Point, color: Color) -> Self {
        Self {
            object: BoundsObject::new(Rect::new(anchor.x, anchor.y, 1.0, 1.0)),
            color,
        }
    }

    /// Top-left corner of the anchor cell.
    pub fn anchor(&self) -> Point {
        Point::new(self.object.rect.x, self.object.rect.y)
    }

    /// Draft color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Turn the draft into a plain object spanning from its anchor to `corner`.
    pub fn finish(self, corner: Point) -> Renderable {
        Renderable::Plain {
            object: BoundsObject::new(diagonal_points_to_rect(self.anchor(), corner)),
            color: self.color,
        }
    }

    /// Preview size in whole cells from the anchor toward a point in translated pixels.
    fn preview_cells(&self, span: Vec2, unity: f64) -> (f64, f64) {
        let cells = Point::new(span.x / unity, span.y / unity).ceil();
        // `+ 0.0` normalizes a negative zero so labels never read "-0".
        (cells.x + 0.0, cells.y + 0.0)
    }

    /// Draw the anchor dot and, when the cursor is known, the preview cells, size label and
    /// outline toward it.
    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P, cx: &RenderContext) {
        let u = cx.unity;
        let anchor = self.anchor();
        let center = Point::new(anchor.x * u + u / 2.0, anchor.y * u + u / 2.0);
        painter.fill_circle(Circle::new(center, ANCHOR_DOT_RADIUS), self.color);

        let Some(cursor) = cx.cursor else {
            return;
        };
        let local = cursor - cx.pan;
        let span = Vec2::new(local.x - anchor.x * u, local.y - anchor.y * u);
        let (w, h) = self.preview_cells(span, u);

        let preview = self.color.with_alpha(PREVIEW_ALPHA);
        let mut dx = 0.0;
        while dx < w {
            let mut dy = 0.0;
            while dy < h {
                let cell = Rect::new(anchor.x + dx, anchor.y + dy, 1.0, 1.0);
                painter.fill_rounded_rect(padded_body(&cell, u), preview);
                dy += 1.0;
            }
            dx += 1.0;
        }

        painter.fill_text(
            &format!("{w}x{h}"),
            center + span / 2.0,
            LABEL_SIZE * u,
            self.color,
        );
        let outline_end = center + Vec2::new(span.x - u / 2.0, span.y - u / 2.0);
        painter.stroke_rect(
            kurbo::Rect::from_points(center, outline_end),
            self.color,
            LINE_WIDTH * u,
        );
    }
}

/// Anything the canvas draws.
#[derive(Clone, Debug)]
pub enum Renderable {
    /// A padded rounded rectangle filled with a color.
    Plain {
        /// Geometry and selection.
        object: BoundsObject,
        /// Fill color.
        color: Color,
    },
    /// A padded rectangle showing an image.
    Image {
        /// Geometry and selection.
        object: BoundsObject,
        /// Host image handle.
        image: ImageId,
    },
    /// An object still being sized by the user.
    Draft(Draft),
}

impl Renderable {
    /// A plain rounded rectangle.
    pub fn plain(rect: Rect, color: Color) -> Self {
        Self::Plain {
            object: BoundsObject::new(rect),
            color,
        }
    }

    /// An image-backed rectangle.
    pub fn image(rect: Rect, image: ImageId) -> Self {
        Self::Image {
            object: BoundsObject::new(rect),
            image,
        }
    }

    /// Shared geometry and selection payload.
    pub fn object(&self) -> &BoundsObject {
        match self {
            Self::Plain { object, .. } | Self::Image { object, .. } => object,
            Self::Draft(draft) => &draft.object,
        }
    }

    /// Mutable access to the payload, for toggling selection.
    pub fn object_mut(&mut self) -> &mut BoundsObject {
        match self {
            Self::Plain { object, .. } | Self::Image { object, .. } => object,
            Self::Draft(draft) => &mut draft.object,
        }
    }

    /// Issue the painter calls for this object, in coordinates translated by the pan.
    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P, cx: &RenderContext) {
        match self {
            Self::Plain { object, color } => {
                painter.fill_rounded_rect(padded_body(&object.rect, cx.unity), *color);
                render_selection(painter, object, cx);
            }
            Self::Image { object, image } => {
                painter.draw_image(*image, padded_rect(&object.rect, cx.unity));
                render_selection(painter, object, cx);
            }
            Self::Draft(draft) => draft.render(painter, cx),
        }
    }
}

impl Bounded for Renderable {
    fn bounds(&self) -> Rect {
        self.object().rect
    }
}

/// Pixel rectangle of an object's body: its cell scaled by `unity` and inset by [`PADDING`].
pub fn padded_rect(rect: &Rect, unity: f64) -> kurbo::Rect {
    let pad = PADDING * unity;
    kurbo::Rect::from_origin_size(
        (rect.x * unity + pad / 2.0, rect.y * unity + pad / 2.0),
        (rect.w * unity - pad, rect.h * unity - pad),
    )
}

/// [`padded_rect`] with [`CORNER_RADIUS`] corners, shrunk to fit small bodies.
pub fn padded_body(rect: &Rect, unity: f64) -> RoundedRect {
    let body = padded_rect(rect, unity);
    let radius = (CORNER_RADIUS * unity)
        .min(body.width() / 2.0)
        .min(body.height() / 2.0)
        .abs();
    RoundedRect::from_rect(body, radius)
}

fn render_selection<P: Painter + ?Sized>(painter: &mut P, object: &BoundsObject, cx: &RenderContext) {
    if cx.show_selection && object.is_selected() {
        painter.stroke_rounded_rect(
            padded_body(&object.rect, cx.unity),
            cx.selection,
            LINE_WIDTH * cx.unity,
        );
    }
}
