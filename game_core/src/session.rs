//! Session controller
//!
//! Drives one player's visit from the start screen through calibration,
//! play and game over, for as many rematches as they want. The caller owns
//! the clock and the event source: once per tick it hands over the input
//! signals seen since the last tick and the current time in seconds.

use tracing::{debug, info, warn};

use crate::{
    CalibrationRange, CalibrationStatus, Calibrator, Config, FsmState, Game, GameAction, GameFsm,
    GameRng, GameSnapshot, HandSensor, PreviewFrame,
};

/// Discrete user intents, already decoded from keys/clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    Quit,
    TogglePause,
    BeginMatch,
    PlayAgain,
    QuitToDesktop,
}

impl InputSignal {
    fn action(self) -> GameAction {
        match self {
            InputSignal::Quit | InputSignal::QuitToDesktop => GameAction::Quit,
            InputSignal::TogglePause => GameAction::TogglePause,
            InputSignal::BeginMatch => GameAction::BeginMatch,
            InputSignal::PlayAgain => GameAction::PlayAgain,
        }
    }
}

/// What a scene needs to draw the current tick
pub struct SessionView<'a> {
    pub state: FsmState,
    pub game: GameSnapshot,
    pub calibration: Option<CalibrationStatus>,
    pub preview: Option<&'a PreviewFrame>,
}

pub struct Session<S: HandSensor> {
    fsm: GameFsm,
    game: Game,
    sensor: S,
    calibrator: Option<Calibrator>,
    calibration: Option<CalibrationStatus>,
}

impl<S: HandSensor> Session<S> {
    pub fn new(config: Config, rng: GameRng, sensor: S) -> Self {
        Self {
            fsm: GameFsm::new(),
            game: Game::new(config, rng),
            sensor,
            calibrator: None,
            calibration: None,
        }
    }

    pub fn state(&self) -> FsmState {
        self.fsm.state()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Latest calibration progress while calibrating
    pub fn calibration_status(&self) -> Option<CalibrationStatus> {
        match self.fsm.state() {
            FsmState::Calibrating => self.calibration,
            _ => None,
        }
    }

    /// Camera preview, only while the sensor is being read
    pub fn preview(&self) -> Option<&PreviewFrame> {
        match self.fsm.state() {
            FsmState::Calibrating | FsmState::Playing => self.sensor.preview(),
            _ => None,
        }
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            state: self.fsm.state(),
            game: self.game.snapshot(),
            calibration: self.calibration_status(),
            preview: self.preview(),
        }
    }

    /// Run one tick: apply inputs in order, then do the current state's work
    pub fn tick(&mut self, inputs: &[InputSignal], now: f32) -> FsmState {
        for input in inputs {
            self.apply(input.action(), now);
            if self.fsm.is_terminated() {
                return FsmState::Terminated;
            }
        }

        match self.fsm.state() {
            FsmState::Calibrating => self.run_calibration(now),
            FsmState::Playing => self.run_play(),
            _ => {}
        }

        self.fsm.state()
    }

    fn apply(&mut self, action: GameAction, now: f32) {
        let result = self.fsm.transition(action);
        if !result.success() {
            debug!(?action, state = ?result.from_state(), "Ignored input");
            return;
        }
        info!(from = ?result.from_state(), to = ?result.to_state(), "Session transition");

        match (result.from_state(), result.to_state()) {
            (_, FsmState::Calibrating) => {
                let countdown = self.game.config().calibration_countdown;
                let mut calibrator = Calibrator::new(countdown, now);
                self.calibration = Some(calibrator.tick(now, None));
                self.calibrator = Some(calibrator);
            }
            (FsmState::GameOver(_), FsmState::Start) => {
                self.game.reset();
            }
            _ => {}
        }
    }

    fn run_calibration(&mut self, now: f32) {
        let Some(calibrator) = self.calibrator.as_mut() else {
            return;
        };
        let reading = self.sensor.poll();
        self.calibration = Some(calibrator.tick(now, reading));

        if !calibrator.is_finished() {
            return;
        }
        let range = calibrator.finish().unwrap_or_else(|err| {
            warn!(%err, "Calibration failed, using default range");
            CalibrationRange::fallback()
        });
        self.calibrator = None;
        self.game.set_range(range);
        self.apply(GameAction::CalibrationDone, now);
    }

    fn run_play(&mut self) {
        let reading = self.sensor.poll();
        if let Some(winner) = self.game.step(reading) {
            self.apply(GameAction::MatchWon(winner), 0.0);
        }
    }
}
