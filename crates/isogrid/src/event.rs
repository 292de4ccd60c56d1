//! Change notification.
//!
//! The grid raises [`GridEvent`]s synchronously, in the order its operations
//! perform them. Collaborators (renderers, plugins) subscribe through
//! [`crate::Grid::on`] or [`crate::GridBuilder::on`] and receive each event
//! together with a shared reference to the grid, so they can look up cells
//! and entities but cannot mutate the grid from inside a callback.
//!
//! # Example
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//!
//! use isogrid::{GridBuilder, event::{EventKind, GridEvent}};
//!
//! let created = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&created);
//!
//! let _grid = GridBuilder::new(3, 2)
//!     .on(EventKind::CellCreated, move |event, _grid| {
//!         if let GridEvent::CellCreated { .. } = event {
//!             counter.set(counter.get() + 1);
//!         }
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(created.get(), 6);
//! ```

use std::{fmt, rc::Rc, str::FromStr};

use indexmap::IndexMap;

use isogrid_core::{
    depth::Depth,
    geometry::{Area, Coord},
    orientation::Orientation,
};

use crate::{entity::EntityId, grid::Grid};

/// An event raised by the grid, with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// Grid construction is about to create its cells.
    BeforeInit,
    /// A cell was created during construction.
    CellCreated { coord: Coord },
    /// All cells exist.
    AfterInit,
    /// An entity was placed with its anchor at `root`.
    EntityAdded { entity: EntityId, root: Coord },
    /// An attached entity was re-anchored.
    EntityMoved {
        entity: EntityId,
        from: Coord,
        to: Coord,
    },
    /// An entity left the grid; `from` is its last anchor.
    EntityRemoved { entity: EntityId, from: Coord },
    /// An entity turned to face `orientation`.
    EntityRotated {
        entity: EntityId,
        orientation: Orientation,
    },
    /// A cell's depth differs from the value last published.
    CellDepthAssigned { coord: Coord, depth: Option<Depth> },
    /// A draw finished; `area` is the region that was recomputed.
    DrawCompleted { area: Area, partial: bool },
}

impl GridEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::BeforeInit => EventKind::BeforeInit,
            Self::CellCreated { .. } => EventKind::CellCreated,
            Self::AfterInit => EventKind::AfterInit,
            Self::EntityAdded { .. } => EventKind::EntityAdded,
            Self::EntityMoved { .. } => EventKind::EntityMoved,
            Self::EntityRemoved { .. } => EventKind::EntityRemoved,
            Self::EntityRotated { .. } => EventKind::EntityRotated,
            Self::CellDepthAssigned { .. } => EventKind::CellDepthAssigned,
            Self::DrawCompleted { .. } => EventKind::DrawCompleted,
        }
    }
}

/// Names of the events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    BeforeInit,
    CellCreated,
    AfterInit,
    EntityAdded,
    EntityMoved,
    EntityRemoved,
    EntityRotated,
    CellDepthAssigned,
    DrawCompleted,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::BeforeInit,
        EventKind::CellCreated,
        EventKind::AfterInit,
        EventKind::EntityAdded,
        EventKind::EntityMoved,
        EventKind::EntityRemoved,
        EventKind::EntityRotated,
        EventKind::CellDepthAssigned,
        EventKind::DrawCompleted,
    ];

    /// The event's external name, e.g. `"entityAdded"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeforeInit => "beforeInit",
            Self::CellCreated => "cellCreated",
            Self::AfterInit => "afterInit",
            Self::EntityAdded => "entityAdded",
            Self::EntityMoved => "entityMoved",
            Self::EntityRemoved => "entityRemoved",
            Self::EntityRotated => "entityRotated",
            Self::CellDepthAssigned => "cellDepthAssigned",
            Self::DrawCompleted => "drawCompleted",
        }
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown event `{s}`"))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One or more event kinds to subscribe a listener to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventKinds(Vec<EventKind>);

impl EventKinds {
    pub fn as_slice(&self) -> &[EventKind] {
        &self.0
    }
}

impl From<EventKind> for EventKinds {
    fn from(kind: EventKind) -> Self {
        Self(vec![kind])
    }
}

impl<const N: usize> From<[EventKind; N]> for EventKinds {
    fn from(kinds: [EventKind; N]) -> Self {
        Self(kinds.to_vec())
    }
}

impl From<&[EventKind]> for EventKinds {
    fn from(kinds: &[EventKind]) -> Self {
        Self(kinds.to_vec())
    }
}

impl From<Vec<EventKind>> for EventKinds {
    fn from(kinds: Vec<EventKind>) -> Self {
        Self(kinds)
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback invoked for each subscribed event.
pub type Listener = Rc<dyn Fn(&GridEvent, &Grid)>;

/// Listener registry owned by a grid.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: IndexMap<EventKind, Vec<(ListenerId, Listener)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `listener` to every kind in `kinds`.
    ///
    /// The same [`ListenerId`] identifies the listener under each kind.
    pub fn on<F>(&mut self, kinds: impl Into<EventKinds>, listener: F) -> ListenerId
    where
        F: Fn(&GridEvent, &Grid) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;

        let listener: Listener = Rc::new(listener);
        for kind in kinds.into().0 {
            self.listeners
                .entry(kind)
                .or_default()
                .push((id, Rc::clone(&listener)));
        }
        id
    }

    /// Unsubscribes `id` from `kind`. Returns `true` if it was subscribed.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let Some(handlers) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    /// Unsubscribes `id` from every kind.
    pub fn off_all(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        for kind in EventKind::ALL {
            removed |= self.off(kind, id);
        }
        removed
    }

    /// Number of listeners subscribed to `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    pub(crate) fn emit(&self, event: &GridEvent, grid: &Grid) {
        let Some(handlers) = self.listeners.get(&event.kind()) else {
            return;
        };
        for (_, handler) in handlers {
            handler(event, grid);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<_> = self
            .listeners
            .iter()
            .map(|(kind, handlers)| (kind.name(), handlers.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("listeners", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_roundtrip() {
        for kind in EventKind::ALL {
            assert_eq!(kind.name().parse::<EventKind>(), Ok(kind));
        }
        assert!("itemAdded".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_event_kind_of_payload() {
        let event = GridEvent::EntityMoved {
            entity: EntityId::new(1),
            from: Coord::new(0, 0),
            to: Coord::new(1, 0),
        };
        assert_eq!(event.kind(), EventKind::EntityMoved);
    }

    #[test]
    fn test_on_multiple_kinds_shares_id() {
        let mut bus = EventBus::new();
        let id = bus.on([EventKind::EntityAdded, EventKind::EntityRemoved], |_, _| {});

        assert_eq!(bus.listener_count(EventKind::EntityAdded), 1);
        assert_eq!(bus.listener_count(EventKind::EntityRemoved), 1);

        assert!(bus.off(EventKind::EntityAdded, id));
        assert_eq!(bus.listener_count(EventKind::EntityAdded), 0);
        assert_eq!(bus.listener_count(EventKind::EntityRemoved), 1);
    }

    #[test]
    fn test_off_only_removes_matching_listener() {
        let mut bus = EventBus::new();
        let first = bus.on(EventKind::DrawCompleted, |_, _| {});
        let second = bus.on(EventKind::DrawCompleted, |_, _| {});
        assert_ne!(first, second);

        assert!(bus.off(EventKind::DrawCompleted, first));
        assert!(!bus.off(EventKind::DrawCompleted, first));
        assert_eq!(bus.listener_count(EventKind::DrawCompleted), 1);
    }

    #[test]
    fn test_off_all() {
        let mut bus = EventBus::new();
        let id = bus.on(EventKind::ALL.as_slice(), |_, _| {});
        assert!(bus.off_all(id));
        assert!(EventKind::ALL.iter().all(|k| bus.listener_count(*k) == 0));
        assert!(!bus.off_all(id));
    }
}
