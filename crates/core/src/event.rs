//! Event module - notifications emitted by the board and the observers that consume them
//!
//! Each board owns its own subscription list. Events are delivered synchronously, in
//! subscription order, before the command that caused them returns. Observers only ever
//! see `&BoardEvent`, so they cannot change engine state.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use crate::snapshot::BoardSnapshot;
use crate::types::ShapeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// Grid or active piece changed; full snapshot for rendering
    BoardChanged(BoardSnapshot),
    /// The queued piece that will spawn after the active one locks
    NextPieceChanged(ShapeKind),
    /// Rows removed by the most recent lock (may be 0)
    LinesCompleted(u32),
    /// `true` once a spawn collides; `false` when a new game starts (or a restore
    /// leaves a finished game)
    GameOver(bool),
}

impl BoardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            BoardEvent::BoardChanged(_) => "board_changed",
            BoardEvent::NextPieceChanged(_) => "next_piece_changed",
            BoardEvent::LinesCompleted(_) => "lines_completed",
            BoardEvent::GameOver(_) => "game_over",
        }
    }
}

/// A consumer of board notifications
pub trait BoardObserver {
    fn on_event(&mut self, event: &BoardEvent);
}

/// Shared handle: the caller keeps one clone and subscribes another
impl<T: BoardObserver> BoardObserver for Rc<RefCell<T>> {
    fn on_event(&mut self, event: &BoardEvent) {
        self.borrow_mut().on_event(event);
    }
}

/// Forward to another thread. A dropped receiver is not an engine error.
impl BoardObserver for Sender<BoardEvent> {
    fn on_event(&mut self, event: &BoardEvent) {
        let _ = self.send(event.clone());
    }
}

/// Records every event it sees
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<BoardEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    /// Remove and return everything recorded so far
    pub fn take(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Most recent `BoardChanged` payload
    pub fn last_board(&self) -> Option<&BoardSnapshot> {
        self.events.iter().rev().find_map(|e| match e {
            BoardEvent::BoardChanged(snapshot) => Some(snapshot),
            _ => None,
        })
    }

    /// Event names in order, handy for asserting emission sequences
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(BoardEvent::name).collect()
    }
}

impl BoardObserver for EventLog {
    fn on_event(&mut self, event: &BoardEvent) {
        self.events.push(event.clone());
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Per-board subscription list
#[derive(Default)]
pub struct Subscribers {
    entries: Vec<(SubscriptionId, Box<dyn BoardObserver>)>,
    next_id: u64,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn BoardObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn emit(&mut self, event: &BoardEvent) {
        for (_, observer) in &mut self.entries {
            observer.on_event(event);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.entries.len())
            .finish()
    }
}
