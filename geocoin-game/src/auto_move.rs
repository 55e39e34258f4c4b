//! Cancellable repeating movement.
//!
//! The platform owns the timer; this task owns the decision to move. Once
//! [`AutoMoveHandle::stop`] is called, no later [`AutoMove::fire`] moves the
//! player. A move already inside `fire` completes normally.
use std::cell::Cell;
use std::rc::Rc;

use crate::DurableStore;
use crate::geo::Direction;
use crate::grid::GridCell;
use crate::luck::Luck;
use crate::session::{GameSession, Outcome, SessionResult};

#[derive(Debug)]
pub struct AutoMove {
    direction: Direction,
    stopped: Rc<Cell<bool>>,
    fired: u32,
}

/// Stop switch shared with whoever schedules the task.
#[derive(Debug, Clone)]
pub struct AutoMoveHandle {
    stopped: Rc<Cell<bool>>,
}

impl AutoMoveHandle {
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

impl AutoMove {
    #[must_use]
    pub fn new(direction: Direction) -> (Self, AutoMoveHandle) {
        let stopped = Rc::new(Cell::new(false));
        let handle = AutoMoveHandle {
            stopped: Rc::clone(&stopped),
        };
        (
            Self {
                direction,
                stopped,
                fired: 0,
            },
            handle,
        )
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub const fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Moves completed so far.
    #[must_use]
    pub const fn fired(&self) -> u32 {
        self.fired
    }

    /// One timer tick. Returns `None` once stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session fails to persist the move.
    pub fn fire<L: Luck, S: DurableStore>(
        &mut self,
        session: &mut GameSession<L, S>,
    ) -> SessionResult<Option<Outcome<Rc<GridCell>>>, S> {
        if self.is_stopped() {
            return Ok(None);
        }
        let outcome = session.step(self.direction)?;
        if outcome.is_done() {
            self.fired = self.fired.saturating_add(1);
        }
        Ok(Some(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::persistence::MemoryStore;

    #[test]
    fn no_moves_after_stop() {
        let mut session = GameSession::with_default_luck(GameConfig::default(), MemoryStore::new());
        session.start().unwrap();
        let (mut task, handle) = AutoMove::new(Direction::North);

        let start = session.player_cell();
        assert!(task.fire(&mut session).unwrap().is_some());
        assert!(task.fire(&mut session).unwrap().is_some());
        assert_eq!(task.fired(), 2);
        assert_eq!(session.player_cell().i, start.i + 2);

        handle.stop();
        assert!(task.is_stopped());
        let before = session.player().position;
        assert!(task.fire(&mut session).unwrap().is_none());
        assert_eq!(session.player().position, before);
        assert_eq!(task.fired(), 2);
    }

    #[test]
    fn direction_can_change_between_ticks() {
        let mut session = GameSession::with_default_luck(GameConfig::default(), MemoryStore::new());
        session.start().unwrap();
        let (mut task, _handle) = AutoMove::new(Direction::East);
        let start = session.player_cell();
        task.fire(&mut session).unwrap();
        task.set_direction(Direction::West);
        assert_eq!(task.direction(), Direction::West);
        task.fire(&mut session).unwrap();
        assert_eq!(session.player_cell().j, start.j);
    }
}
