//! Deferred work on the simulated week clock.
//!
//! Tasks are tagged with the season that scheduled them so a rollover can
//! cancel everything that belongs to the finished season.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Resolve a scouting mission into prospects.
    ResolveScouting { mission_id: u32 },
    /// Fire the next random event.
    TriggerEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: u32,
    pub due_week: u32,
    pub season: u32,
    pub kind: TaskKind,
}

/// Cancellable queue of deferred tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskScheduler {
    tasks: Vec<ScheduledTask>,
    next_id: u32,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `kind` to run at `due_week`. Returns the task id.
    pub fn schedule(&mut self, due_week: u32, season: u32, kind: TaskKind) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            due_week,
            season,
            kind,
        });
        id
    }

    pub fn cancel(&mut self, id: u32) -> Option<ScheduledTask> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Remove every task scheduled by `season`.
    pub fn cancel_season(&mut self, season: u32) -> Vec<ScheduledTask> {
        let (cancelled, kept) = self.tasks.drain(..).partition(|t| t.season == season);
        self.tasks = kept;
        cancelled
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Remove and return every task due at or before `week`, ordered by due
    /// week and then by scheduling order.
    pub fn take_due(&mut self, week: u32) -> Vec<ScheduledTask> {
        let (mut due, kept): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due_week <= week);
        self.tasks = kept;
        due.sort_by_key(|t| (t.due_week, t.id));
        due
    }

    pub fn pending(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    pub fn has_pending(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_due_orders_by_week_then_insertion() {
        let mut s = TaskScheduler::new();
        let late = s.schedule(4, 1, TaskKind::TriggerEvent);
        let first = s.schedule(2, 1, TaskKind::ResolveScouting { mission_id: 1 });
        let second = s.schedule(2, 1, TaskKind::ResolveScouting { mission_id: 2 });

        let due: Vec<u32> = s.take_due(3).iter().map(|t| t.id).collect();
        assert_eq!(due, vec![first, second]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.take_due(10)[0].id, late);
        assert!(s.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut s = TaskScheduler::new();
        let id = s.schedule(1, 1, TaskKind::TriggerEvent);
        assert!(s.cancel(id).is_some());
        assert!(s.cancel(id).is_none());
        assert!(s.take_due(5).is_empty());
    }

    #[test]
    fn test_cancel_season_keeps_other_seasons() {
        let mut s = TaskScheduler::new();
        s.schedule(3, 1, TaskKind::ResolveScouting { mission_id: 1 });
        s.schedule(5, 1, TaskKind::TriggerEvent);
        s.schedule(6, 2, TaskKind::TriggerEvent);
        let cancelled = s.cancel_season(1);
        assert_eq!(cancelled.len(), 2);
        assert_eq!(s.len(), 1);
        assert_eq!(s.pending()[0].season, 2);
    }

    #[test]
    fn test_has_pending_and_clear() {
        let mut s = TaskScheduler::new();
        s.schedule(3, 1, TaskKind::TriggerEvent);
        assert!(s.has_pending(TaskKind::TriggerEvent));
        assert!(!s.has_pending(TaskKind::ResolveScouting { mission_id: 0 }));
        s.clear();
        assert!(s.is_empty());
    }
}
