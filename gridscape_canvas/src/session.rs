// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`CanvasSession`]: one interactive grid, its index, its viewport and its input state.

use alloc::vec::Vec;

use gridscape_index::{Bounded, InsertError, ObjectId, Quadtree, Rect, Rejected};
use gridscape_view::{ViewChanges, ViewState, Viewport};
use kurbo::{Line, Point, Size};

use crate::config::{CanvasConfig, CanvasError, RenderLayers};
use crate::gesture::EditKey;
use crate::paint::{Color, Painter};
use crate::pointer::{PointerState, Release};
use crate::renderable::{Draft, LINE_WIDTH, RenderContext, Renderable};

/// What an input event did. Every event means the frame is stale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CanvasEvent {
    /// Scale or pan changed.
    ViewChanged(ViewChanges),
    /// Nothing structural changed but the frame depends on the cursor (draft previews).
    Redraw,
    /// Press and release without a drag, at the press position.
    Click(Point),
    /// A double-click outside edit mode toggled the selection of the object under it, if any.
    Selected {
        /// Screen position of the double-click.
        position: Point,
        /// The toggled object.
        object: Option<ObjectId>,
    },
    /// A draft was anchored at this logical cell.
    DraftStarted(Point),
    /// A new object was added to the index.
    Committed(ObjectId),
    /// The index refused a new object.
    Refused {
        /// Bounds of the refused object.
        bounds: Rect,
        /// Why it was refused.
        reason: InsertError,
    },
}

/// An interactive grid: a quadtree of [`Renderable`]s seen through a [`Viewport`].
///
/// Feed it pointer, wheel and key events; each handler returns the resulting [`CanvasEvent`].
/// Call [`Self::draw`] to describe the current frame.
///
/// ```
/// use gridscape_canvas::{CanvasConfig, CanvasEvent, CanvasSession, DisplayList};
/// use kurbo::Point;
///
/// let mut session = CanvasSession::new(CanvasConfig {
///     editing: true,
///     ..CanvasConfig::default()
/// })
/// .unwrap();
///
/// // Double-click in edit mode creates a 1x1 object in the cell under the cursor.
/// let event = session.double_click(Point::new(250.0, 120.0));
/// assert!(matches!(event, CanvasEvent::Committed(_)));
/// assert_eq!(session.tree().size(), 1);
///
/// let mut frame = DisplayList::new();
/// session.draw(&mut frame);
/// assert!(!frame.is_empty());
/// ```
#[derive(Debug)]
pub struct CanvasSession {
    tree: Quadtree<Renderable>,
    viewport: Viewport,
    pointer: PointerState,
    drafts: Vec<Draft>,
    editing: bool,
    config: CanvasConfig,
}

impl CanvasSession {
    /// Start a session with an empty index.
    pub fn new(config: CanvasConfig) -> Result<Self, CanvasError> {
        config.validate()?;
        let viewport = Viewport::new(&config.viewport).map_err(CanvasError::Viewport)?;
        let mut tree =
            Quadtree::with_capacity(config.tree_width, config.tree_height, config.capacity);
        tree.record_changes(config.record_changes);
        Ok(Self {
            tree,
            viewport,
            pointer: PointerState::new(),
            drafts: Vec::new(),
            editing: config.editing,
            config,
        })
    }

    /// The object index.
    pub fn tree(&self) -> &Quadtree<Renderable> {
        &self.tree
    }

    /// Mutable access to the object index.
    pub fn tree_mut(&mut self) -> &mut Quadtree<Renderable> {
        &mut self.tree
    }

    /// Add an object to the index.
    pub fn insert(&mut self, item: Renderable) -> Result<ObjectId, Rejected<Renderable>> {
        self.tree.insert(item)
    }

    /// Drain the index changes recorded since the last call and return the logical
    /// region they cover, for invalidating a minimap or cached tiles.
    ///
    /// Always `None` unless [`CanvasConfig::record_changes`] is set. Hosts that record
    /// should call this once per frame.
    pub fn take_damage(&mut self) -> Option<Rect> {
        self.tree.take_changes().union()
    }

    /// The viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable access to the viewport.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Pointer press state.
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Drafts not yet committed, oldest first.
    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    /// Whether edit-mode gestures are active.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Toggle edit mode. Pending drafts are kept.
    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    /// Layers drawn by [`Self::draw`].
    pub fn layers(&self) -> RenderLayers {
        self.config.layers
    }

    /// Choose the layers drawn by [`Self::draw`].
    pub fn set_layers(&mut self, layers: RenderLayers) {
        self.config.layers = layers;
    }

    /// Restore a persisted view.
    pub fn apply_state(&mut self, state: &ViewState) -> CanvasEvent {
        self.viewport.apply(state);
        CanvasEvent::ViewChanged(self.viewport.changes())
    }

    /// The drawing surface changed size.
    pub fn resize(&mut self, size: Size) -> CanvasEvent {
        self.viewport.set_surface_size(size);
        CanvasEvent::ViewChanged(self.viewport.changes())
    }

    /// Button pressed at a screen position.
    pub fn pointer_down(&mut self, position: Point) {
        self.pointer.on_down(position);
    }

    /// Pointer moved. Drags pan the view; hovering in edit mode refreshes draft previews.
    pub fn pointer_move(&mut self, position: Point) -> Option<CanvasEvent> {
        if let Some(delta) = self.pointer.on_move(position) {
            self.viewport.pan_by(delta);
            return Some(CanvasEvent::ViewChanged(self.viewport.changes()));
        }
        self.editing.then_some(CanvasEvent::Redraw)
    }

    /// Button released. Reports a click when the pointer did not drag.
    pub fn pointer_up(&mut self, position: Point) -> Option<CanvasEvent> {
        match self.pointer.on_up(position) {
            Release::Click(origin) => Some(CanvasEvent::Click(origin)),
            Release::DragEnd | Release::Ignored => None,
        }
    }

    /// Wheel scrolled over a screen position. Positive deltas zoom out.
    pub fn wheel(&mut self, position: Point, delta_y: f64) -> Option<CanvasEvent> {
        self.pointer.track(position);
        self.viewport
            .wheel_zoom(position, delta_y)
            .then(|| CanvasEvent::ViewChanged(self.viewport.changes()))
    }

    /// Double-click at a screen position.
    ///
    /// In edit mode this commits a 1×1 object in the cell under the cursor. Otherwise it toggles
    /// the selection of the object found by a point query.
    pub fn double_click(&mut self, position: Point) -> CanvasEvent {
        self.pointer.track(position);
        if self.editing {
            return self.place_cell(position);
        }
        let logical = self.viewport.screen_to_logical(position);
        let hit = self.tree.query_point(logical.x, logical.y).map(|(id, _)| id);
        if let Some(id) = hit {
            if let Some(item) = self.tree.get_mut(id) {
                item.object_mut().toggle();
            }
            self.tree.mark_updated(id);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?position, ?hit, "selection toggled");
        CanvasEvent::Selected {
            position,
            object: hit,
        }
    }

    /// A key was released. Only edit-mode keys have an effect.
    pub fn key(&mut self, key: char) -> Option<CanvasEvent> {
        self.edit(EditKey::from_char(key)?)
    }

    /// Run an edit command at the last known cursor position.
    ///
    /// Does nothing outside edit mode or before any pointer position is known.
    pub fn edit(&mut self, key: EditKey) -> Option<CanvasEvent> {
        if !self.editing {
            return None;
        }
        let position = self.pointer.position()?;
        match key {
            EditKey::StartDraft => {
                let cell = self.viewport.floor_logical(position);
                self.drafts.push(Draft::new(cell, self.config.draft_color));
                Some(CanvasEvent::DraftStarted(cell))
            }
            EditKey::FinishDraft => {
                let draft = self.drafts.pop()?;
                let corner = self.viewport.ceil_logical(position);
                let event = self.commit(draft.clone().finish(corner));
                if matches!(event, CanvasEvent::Refused { .. }) {
                    self.drafts.push(draft);
                }
                Some(event)
            }
            EditKey::PlaceCell => Some(self.place_cell(position)),
        }
    }

    fn place_cell(&mut self, position: Point) -> CanvasEvent {
        let cell = self.viewport.floor_logical(position);
        self.commit(Renderable::plain(
            Rect::new(cell.x, cell.y, 1.0, 1.0),
            self.config.draft_color,
        ))
    }

    fn commit(&mut self, item: Renderable) -> CanvasEvent {
        match self.tree.insert(item) {
            Ok(id) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?id, "object committed");
                CanvasEvent::Committed(id)
            }
            Err(rejected) => {
                let bounds = rejected.object.bounds();
                #[cfg(feature = "tracing")]
                tracing::debug!(?bounds, reason = %rejected.reason, "object refused");
                CanvasEvent::Refused {
                    bounds,
                    reason: rejected.reason,
                }
            }
        }
    }

    /// Objects overlapping the visible region, in query order.
    pub fn visible(&self) -> impl Iterator<Item = (ObjectId, &Renderable)> + '_ {
        self.tree.query(&self.viewport.visible_region())
    }

    /// Describe the current frame.
    ///
    /// Clears the surface and fills the background, then, translated by the pan: grid lines,
    /// the objects in the visible region, and the drafts.
    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        let size = self.viewport.surface_size();
        let changes = self.viewport.changes();
        let layers = self.config.layers;

        painter.clear(size);
        painter.fill_rect(
            kurbo::Rect::from_origin_size(Point::ZERO, size),
            self.config.background,
        );
        painter.push_translation(changes.pan());

        if layers.contains(RenderLayers::GRID) {
            self.draw_grid(painter, changes.unity, self.config.grid_color);
        }

        let cx = RenderContext {
            unity: changes.unity,
            pan: changes.pan(),
            cursor: self.pointer.position(),
            selection: self.config.selection_color,
            show_selection: layers.contains(RenderLayers::SELECTION),
        };
        if layers.contains(RenderLayers::OBJECTS) {
            for (_, item) in self.visible() {
                item.render(painter, &cx);
            }
        }
        if layers.contains(RenderLayers::DRAFTS) {
            for draft in &self.drafts {
                draft.render(painter, &cx);
            }
        }

        painter.pop_translation();
    }

    fn draw_grid<P: Painter + ?Sized>(&self, painter: &mut P, unity: f64, color: Color) {
        let (width, height) = (self.tree.width(), self.tree.height());
        let mut lines = Vec::new();
        let mut x = 0.0;
        while x <= width {
            lines.push(Line::new((x * unity, 0.0), (x * unity, height * unity)));
            x += 1.0;
        }
        let mut y = 0.0;
        while y <= height {
            lines.push(Line::new((0.0, y * unity), (width * unity, y * unity)));
            y += 1.0;
        }
        painter.stroke_lines(&lines, color, LINE_WIDTH * unity);
    }
}
