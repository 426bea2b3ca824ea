//! Window events to session input signals

use game_core::{FsmState, InputSignal};
use glam::Vec2;
use minifb::Key;

use crate::layout::{Button, Layout};

/// Everything the window reported since the last frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub close_requested: bool,
    /// Keys that went down this frame, no repeats
    pub keys: Vec<Key>,
    /// Left-button press position, in screen pixels
    pub click: Option<Vec2>,
}

/// Map raw input to signals, in the order they happened. Clicks only count
/// on buttons visible in `state`.
pub fn map_input(state: FsmState, input: &FrameInput, layout: &Layout) -> Vec<InputSignal> {
    let mut signals = Vec::new();
    if input.close_requested {
        signals.push(InputSignal::Quit);
    }

    for key in &input.keys {
        let signal = match key {
            Key::Q | Key::Escape => Some(InputSignal::Quit),
            Key::P => Some(InputSignal::TogglePause),
            Key::Enter | Key::NumPadEnter => match state {
                FsmState::Start => Some(InputSignal::BeginMatch),
                FsmState::GameOver(_) => Some(InputSignal::PlayAgain),
                _ => None,
            },
            _ => None,
        };
        signals.extend(signal);
    }

    if let Some(point) = input.click {
        let clicked = match state {
            FsmState::Start => layout.hit(point, &[Button::Start]),
            FsmState::GameOver(_) => layout.hit(point, &[Button::PlayAgain, Button::Quit]),
            _ => None,
        };
        signals.extend(clicked.map(|button| match button {
            Button::Start => InputSignal::BeginMatch,
            Button::PlayAgain => InputSignal::PlayAgain,
            Button::Quit => InputSignal::QuitToDesktop,
        }));
    }

    signals
}
