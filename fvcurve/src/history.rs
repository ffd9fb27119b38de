//! Linear undo/redo over deep snapshots of one group's data.
//!
//! `stack[pointer]` is the slot matching the live data. A checkpoint stores the
//! pre-mutation state in that slot and appends a fresh slot for the state the
//! mutation is about to produce; undo first records the live data into the
//! current slot so that redo can return to it. The live slot does not count
//! against the capacity: a full stack holds `capacity` undo targets.

use crate::model::GroupData;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryCommand {
    Undo,
    Redo,
}

/// Ctrl/Cmd+Z undoes; Ctrl/Cmd+Shift+Z and Ctrl/Cmd+Y redo.
pub fn shortcut(key: &str, ctrl_or_meta: bool, shift: bool) -> Option<HistoryCommand> {
    if !ctrl_or_meta { return None; }
    if key.eq_ignore_ascii_case("z") {
        Some(if shift { HistoryCommand::Redo } else { HistoryCommand::Undo })
    } else if key.eq_ignore_ascii_case("y") {
        Some(HistoryCommand::Redo)
    } else {
        None
    }
}

#[derive(Clone, Debug)]
pub struct History {
    stack: Vec<GroupData>,
    pointer: usize,
    capacity: usize,
}

impl History {
    pub fn new(initial: &GroupData, capacity: usize) -> Self {
        History { stack: vec![initial.clone()], pointer: 0, capacity: capacity.max(1) }
    }

    pub fn len(&self) -> usize { self.stack.len() }
    pub fn is_empty(&self) -> bool { self.stack.is_empty() }
    pub fn pointer(&self) -> usize { self.pointer }
    pub fn capacity(&self) -> usize { self.capacity }
    pub fn can_undo(&self) -> bool { self.pointer > 0 }
    pub fn can_redo(&self) -> bool { self.pointer + 1 < self.stack.len() }
    pub fn snapshot(&self, index: usize) -> Option<&GroupData> { self.stack.get(index) }

    /// Record `current` (the state before a mutation). Discards the redo
    /// branch and evicts the oldest checkpoints past capacity.
    pub fn checkpoint(&mut self, current: &GroupData) {
        self.stack.truncate(self.pointer + 1);
        self.stack[self.pointer] = current.clone();
        self.stack.push(current.clone());
        self.pointer = self.stack.len() - 1;
        while self.stack.len() > self.capacity + 1 {
            self.stack.remove(0);
            self.pointer -= 1;
        }
        debug!("history checkpoint: {} snapshots", self.stack.len());
    }

    /// Step back. `live` is the data as it is now, kept for redo.
    pub fn undo(&mut self, live: &GroupData) -> Option<GroupData> {
        if self.pointer == 0 { return None; }
        self.stack[self.pointer] = live.clone();
        self.pointer -= 1;
        debug!("history undo -> {}/{}", self.pointer, self.stack.len());
        Some(self.stack[self.pointer].clone())
    }

    pub fn redo(&mut self) -> Option<GroupData> {
        if !self.can_redo() { return None; }
        self.pointer += 1;
        debug!("history redo -> {}/{}", self.pointer, self.stack.len());
        Some(self.stack[self.pointer].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    fn data(v: i64) -> GroupData {
        GroupData::new(vec![("c".to_string(), vec![Point::from_ints(v, v)])]).unwrap()
    }

    #[test]
    fn undo_redo_walks_states() {
        let mut h = History::new(&data(0), 10);
        h.checkpoint(&data(0));
        // live is now data(1)
        assert_eq!(h.len(), 2);
        assert_eq!(h.undo(&data(1)), Some(data(0)));
        assert_eq!(h.undo(&data(0)), None);
        assert_eq!(h.redo(), Some(data(1)));
        assert_eq!(h.redo(), None);
    }

    #[test]
    fn new_edit_after_undo_drops_redo_branch() {
        let mut h = History::new(&data(0), 10);
        h.checkpoint(&data(0));
        h.checkpoint(&data(1));
        assert_eq!(h.undo(&data(2)), Some(data(1)));
        h.checkpoint(&data(1));
        assert!(!h.can_redo());
        assert_eq!(h.len(), 3);
        assert_eq!(h.undo(&data(7)), Some(data(1)));
        assert_eq!(h.redo(), Some(data(7)));
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut h = History::new(&data(0), 10);
        for i in 0..15 {
            h.checkpoint(&data(i));
        }
        // checkpoints 6..=15 are kept; the 6th recorded data(5)
        assert_eq!(h.len(), 11);
        assert_eq!(h.pointer(), 10);
        assert_eq!(h.snapshot(0), Some(&data(5)));
        assert_eq!(h.snapshot(9), Some(&data(14)));
    }

    #[test]
    fn full_stack_allows_capacity_undos() {
        let mut h = History::new(&data(0), 10);
        for i in 0..15 {
            h.checkpoint(&data(i));
        }
        let mut steps = 0;
        let mut last = None;
        while let Some(d) = h.undo(&data(15)) {
            steps += 1;
            last = Some(d);
        }
        assert_eq!(steps, 10);
        assert_eq!(last, Some(data(5)));
    }

    #[test]
    fn shortcuts() {
        assert_eq!(shortcut("z", true, false), Some(HistoryCommand::Undo));
        assert_eq!(shortcut("Z", true, true), Some(HistoryCommand::Redo));
        assert_eq!(shortcut("y", true, false), Some(HistoryCommand::Redo));
        assert_eq!(shortcut("z", false, false), None);
        assert_eq!(shortcut("x", true, false), None);
    }

    #[test]
    fn restore_copies_out() {
        let mut h = History::new(&data(0), 10);
        h.checkpoint(&data(0));
        let mut restored = h.undo(&data(1)).unwrap();
        restored.replace_points(vec![vec![Point::from_ints(99, 99)]]);
        assert_eq!(h.snapshot(0), Some(&data(0)));
    }
}
