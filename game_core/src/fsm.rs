//! Session State Machine
//!
//! Transition table for the start -> calibrate -> play -> game over flow.

use crate::Side;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmState {
    Start,
    Calibrating,
    Playing,
    Paused,
    GameOver(Side),
    Terminated,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    BeginMatch,
    CalibrationDone,
    TogglePause,
    MatchWon(Side),
    PlayAgain,
    Quit,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    success: bool,
    from_state: FsmState,
    to_state: FsmState,
    action: GameAction,
}

impl TransitionResult {
    pub fn success(&self) -> bool {
        self.success
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn from_state(&self) -> FsmState {
        self.from_state
    }

    pub fn to_state(&self) -> FsmState {
        self.to_state
    }

    pub fn action(&self) -> GameAction {
        self.action
    }
}

/// Session Finite State Machine
#[derive(Debug, Clone)]
pub struct GameFsm {
    state: FsmState,
}

impl GameFsm {
    pub fn new() -> Self {
        Self {
            state: FsmState::Start,
        }
    }

    /// Get current state
    pub fn state(&self) -> FsmState {
        self.state
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    /// Get next state for a given action (if valid)
    fn get_next_state(&self, action: GameAction) -> Option<FsmState> {
        match (self.state, action) {
            // Nothing leaves Terminated
            (FsmState::Terminated, _) => None,

            // Quit is honoured everywhere else
            (_, GameAction::Quit) => Some(FsmState::Terminated),

            // From Start
            (FsmState::Start, GameAction::BeginMatch) => Some(FsmState::Calibrating),

            // From Calibrating
            (FsmState::Calibrating, GameAction::CalibrationDone) => Some(FsmState::Playing),

            // From Playing
            (FsmState::Playing, GameAction::TogglePause) => Some(FsmState::Paused),
            (FsmState::Playing, GameAction::MatchWon(winner)) => Some(FsmState::GameOver(winner)),

            // From Paused
            (FsmState::Paused, GameAction::TogglePause) => Some(FsmState::Playing),

            // From GameOver
            (FsmState::GameOver(_), GameAction::PlayAgain) => Some(FsmState::Start),

            // Invalid transition
            _ => None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.state == FsmState::Terminated
    }
}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let fsm = GameFsm::new();
        assert_eq!(fsm.state(), FsmState::Start);
    }

    #[test]
    fn test_valid_transition() {
        let mut fsm = GameFsm::new();
        let result = fsm.transition(GameAction::BeginMatch);
        assert!(result.success());
        assert_eq!(result.from_state(), FsmState::Start);
        assert_eq!(fsm.state(), FsmState::Calibrating);
    }

    #[test]
    fn test_invalid_transition() {
        let mut fsm = GameFsm::new();
        let result = fsm.transition(GameAction::TogglePause);
        assert!(!result.success());
        assert_eq!(result.to_state(), FsmState::Start);
        assert_eq!(fsm.state(), FsmState::Start);
    }

    #[test]
    fn test_full_match_flow() {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::BeginMatch);
        fsm.transition(GameAction::CalibrationDone);
        assert_eq!(fsm.state(), FsmState::Playing);
        fsm.transition(GameAction::TogglePause);
        assert_eq!(fsm.state(), FsmState::Paused);
        fsm.transition(GameAction::TogglePause);
        assert_eq!(fsm.state(), FsmState::Playing);
        fsm.transition(GameAction::MatchWon(Side::Opponent));
        assert_eq!(fsm.state(), FsmState::GameOver(Side::Opponent));
        fsm.transition(GameAction::PlayAgain);
        assert_eq!(fsm.state(), FsmState::Start);
    }

    #[test]
    fn test_quit_from_every_state() {
        let paths: [&[GameAction]; 5] = [
            &[],
            &[GameAction::BeginMatch],
            &[GameAction::BeginMatch, GameAction::CalibrationDone],
            &[
                GameAction::BeginMatch,
                GameAction::CalibrationDone,
                GameAction::TogglePause,
            ],
            &[
                GameAction::BeginMatch,
                GameAction::CalibrationDone,
                GameAction::MatchWon(Side::Player),
            ],
        ];
        for path in paths {
            let mut fsm = GameFsm::new();
            for action in path {
                assert!(fsm.transition(*action).success());
            }
            assert!(fsm.transition(GameAction::Quit).success());
            assert!(fsm.is_terminated());
        }
    }

    #[test]
    fn test_paused_match_cannot_be_won() {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::BeginMatch);
        fsm.transition(GameAction::CalibrationDone);
        fsm.transition(GameAction::TogglePause);
        assert!(!fsm.transition(GameAction::MatchWon(Side::Player)).success());
        assert_eq!(fsm.state(), FsmState::Paused);
    }

    #[test]
    fn test_terminated_is_final() {
        let mut fsm = GameFsm::new();
        fsm.transition(GameAction::Quit);
        assert!(!fsm.transition(GameAction::BeginMatch).success());
        assert!(!fsm.transition(GameAction::Quit).success());
    }
}
