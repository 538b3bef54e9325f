//! Builder for hand-assigned schedules.
//!
//! # Example
//!
//! ```
//! use clubplan_core::{AgeGroup, Weekday};
//! use clubplan_test::{slot, team, trainer, ScheduleBuilder};
//!
//! let schedule = ScheduleBuilder::new(60)
//!     .trainer(trainer("ann", 4, &[AgeGroup::U8]))
//!     .team(team("u8a", AgeGroup::U8, 12, 2, &[Weekday::Monday], (17, 19)))
//!     .slot(slot(Weekday::Monday, 17))
//!     .assign(0, 0, 0)
//!     .build();
//!
//! assert_eq!(schedule.sessions.len(), 2);
//! assert!(schedule.sessions[0].is_assigned());
//! assert!(!schedule.sessions[1].is_assigned());
//! ```

use clubplan_core::{SolveRequest, Team, TimeSlot, Trainer, TrainingSchedule, Weekday};

use crate::facts::slot;

/// Collects facts and explicit assignments, then builds the schedule.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    request: SolveRequest,
    assignments: Vec<(usize, Option<usize>, Option<usize>)>,
}

impl ScheduleBuilder {
    pub fn new(field_capacity: u32) -> Self {
        Self {
            request: SolveRequest {
                field_capacity,
                ..SolveRequest::default()
            },
            assignments: Vec::new(),
        }
    }

    pub fn trainer(mut self, trainer: Trainer) -> Self {
        self.request.trainers.push(trainer);
        self
    }

    pub fn team(mut self, team: Team) -> Self {
        self.request.teams.push(team);
        self
    }

    pub fn slot(mut self, slot: TimeSlot) -> Self {
        self.request.time_slots.push(slot);
        self
    }

    /// Adds one slot per (day, hour) in `hours`.
    pub fn slots(mut self, days: &[Weekday], hours: std::ops::Range<u32>) -> Self {
        for &day in days {
            for hour in hours.clone() {
                self.request.time_slots.push(slot(day, hour));
            }
        }
        self
    }

    /// Assigns session `session` to slot and trainer indices.
    pub fn assign(mut self, session: usize, slot: usize, trainer: usize) -> Self {
        self.assignments.push((session, Some(slot), Some(trainer)));
        self
    }

    /// Sets only the time slot of a session.
    pub fn assign_slot(mut self, session: usize, slot: usize) -> Self {
        self.assignments.push((session, Some(slot), None));
        self
    }

    pub fn request(&self) -> &SolveRequest {
        &self.request
    }

    pub fn build(self) -> TrainingSchedule {
        let mut schedule = self.request.into_schedule();
        for (session, slot, trainer) in self.assignments {
            let entity = &mut schedule.sessions[session];
            entity.time_slot = slot;
            entity.trainer = trainer;
        }
        schedule
    }
}
