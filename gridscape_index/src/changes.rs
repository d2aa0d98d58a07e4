// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications emitted by quadtree nodes and drained through
//! [`Quadtree::take_changes`](crate::Quadtree::take_changes).

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::object::ObjectId;
use crate::types::Rect;

/// What happened to a region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChangeEvent {
    /// An object was stored in the leaf covering the region.
    Inserted(ObjectId),
    /// The node covering the region split into four quadrants.
    Subdivided,
    /// An object's state changed in place (for example its selection flag).
    Updated(ObjectId),
}

/// A change record: the region it decorates plus the event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeChange {
    /// Region of the node that emitted the change, or the object's bounds for updates.
    pub region: Rect,
    /// The event payload.
    pub event: ChangeEvent,
}

#[derive(Debug)]
struct Buffer {
    recording: bool,
    pending: Vec<NodeChange>,
}

/// Shared sink for node changes.
///
/// The tree owns one log and every node holds a clone of the handle, so all nodes
/// append to the same buffer. A log that is not recording drops what it is given.
#[derive(Clone, Debug)]
pub struct ChangeLog {
    buffer: Rc<RefCell<Buffer>>,
}

impl Default for ChangeLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeLog {
    /// Create an empty log that records.
    pub fn new() -> Self {
        Self {
            buffer: Rc::new(RefCell::new(Buffer {
                recording: true,
                pending: Vec::new(),
            })),
        }
    }

    /// Turn recording on or off for every handle. Turning it off clears the buffer.
    pub fn set_recording(&self, on: bool) {
        let mut buffer = self.buffer.borrow_mut();
        buffer.recording = on;
        if !on {
            buffer.pending = Vec::new();
        }
    }

    /// Whether emitted changes are kept.
    pub fn is_recording(&self) -> bool {
        self.buffer.borrow().recording
    }

    /// Append a change for `region`, if recording.
    pub fn emit(&self, region: Rect, event: ChangeEvent) {
        let mut buffer = self.buffer.borrow_mut();
        if buffer.recording {
            buffer.pending.push(NodeChange { region, event });
        }
    }

    /// Number of changes waiting to be drained.
    pub fn pending(&self) -> usize {
        self.buffer.borrow().pending.len()
    }

    /// Drain all pending changes into a batch.
    pub fn take(&self) -> ChangeBatch {
        ChangeBatch {
            changes: core::mem::take(&mut self.buffer.borrow_mut().pending),
        }
    }
}

/// Batched changes returned by [`Quadtree::take_changes`](crate::Quadtree::take_changes).
#[derive(Clone, Debug, Default)]
pub struct ChangeBatch {
    /// Changes in emission order.
    pub changes: Vec<NodeChange>,
}

impl ChangeBatch {
    /// True if no changes were recorded.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of recorded changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Union of all changed regions. Returns `None` if empty.
    pub fn union(&self) -> Option<Rect> {
        let mut it = self.changes.iter().map(|c| c.region);
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(&r)))
    }

    /// Objects stored since the last drain, in insertion order.
    ///
    /// Objects moved during a subdivision show up again here, once per re-insertion.
    pub fn inserted(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.changes.iter().filter_map(|c| match c.event {
            ChangeEvent::Inserted(id) => Some(id),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_buffer() {
        let log = ChangeLog::new();
        let other = log.clone();
        other.emit(Rect::new(0.0, 0.0, 1.0, 1.0), ChangeEvent::Subdivided);
        log.emit(
            Rect::new(3.0, 3.0, 1.0, 1.0),
            ChangeEvent::Inserted(ObjectId::new(0)),
        );
        assert_eq!(log.pending(), 2);

        let batch = other.take();
        assert_eq!(batch.len(), 2);
        assert_eq!(log.pending(), 0);
        assert_eq!(batch.union(), Some(Rect::new(0.0, 0.0, 4.0, 4.0)));
        assert_eq!(batch.inserted().collect::<Vec<_>>(), [ObjectId::new(0)]);
    }

    #[test]
    fn paused_log_drops_changes() {
        let log = ChangeLog::new();
        log.emit(Rect::new(0.0, 0.0, 1.0, 1.0), ChangeEvent::Subdivided);
        log.clone().set_recording(false);
        assert!(!log.is_recording());
        assert_eq!(log.pending(), 0);
        log.emit(Rect::new(0.0, 0.0, 1.0, 1.0), ChangeEvent::Subdivided);
        assert!(log.take().is_empty());
    }

    #[test]
    fn empty_batch_has_no_union() {
        let batch = ChangeLog::new().take();
        assert!(batch.is_empty());
        assert!(batch.union().is_none());
    }
}
