//! Real-time loop: input, session tick, draw, present.

use std::fs;
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use game_core::{Config, FsmState, GameRng, HandSensor, Session};
use tracing::info;

use crate::cli::Args;
use crate::input::{map_input, FrameInput};
use crate::layout::Layout;
use crate::renderer::MinifbCanvas;
use crate::scene::{draw_view, Canvas};
use crate::sensor::DetectorSidecar;

/// A canvas that can also report user input
pub trait Frontend: Canvas {
    fn poll_input(&mut self) -> FrameInput;
}

impl Frontend for MinifbCanvas {
    fn poll_input(&mut self) -> FrameInput {
        MinifbCanvas::poll_input(self)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => Config::new(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(12345)
}

/// Open the camera and the window, then play until the user quits
pub fn run(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(time_seed);
    info!(seed, fps = config.fps, "Starting hand pong");

    let sensor =
        DetectorSidecar::spawn(&args.detector, &args.detector_args, args.startup_timeout())?;
    let mut canvas =
        MinifbCanvas::new(&config).map_err(|e| anyhow!("failed to open window: {e}"))?;

    let layout = Layout::new(&config);
    let mut session = Session::new(config, GameRng::new(seed), sensor);

    let started = Instant::now();
    run_loop(&mut session, &mut canvas, &layout, || {
        started.elapsed().as_secs_f32()
    })
}

/// Drive the session once per frame until it terminates. Frame pacing is
/// left to the frontend's `present`.
pub fn run_loop<S, F, C>(
    session: &mut Session<S>,
    frontend: &mut F,
    layout: &Layout,
    mut clock: C,
) -> Result<()>
where
    S: HandSensor,
    F: Frontend,
    C: FnMut() -> f32,
{
    loop {
        let input = frontend.poll_input();
        let signals = map_input(session.state(), &input, layout);

        if session.tick(&signals, clock()) == FsmState::Terminated {
            let score = session.game().score();
            info!(
                player = score.player,
                opponent = score.opponent,
                "Session ended"
            );
            return Ok(());
        }

        draw_view(frontend, layout, &session.view());
        frontend
            .present()
            .map_err(|e| anyhow!("failed to present frame: {e}"))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::tests::{Op, RecordingCanvas};
    use crate::scene::{Align, FontSize};
    use game_core::{CalibrationStage, PreviewFrame, Rect, ScriptedSensor};
    use glam::Vec2;
    use minifb::Key;
    use std::collections::VecDeque;
    use std::io::Write;

    /// Recording canvas fed by a per-frame input script
    struct ScriptedFrontend {
        canvas: RecordingCanvas,
        script: VecDeque<FrameInput>,
    }

    impl ScriptedFrontend {
        fn new(script: Vec<FrameInput>) -> Self {
            Self {
                canvas: RecordingCanvas::default(),
                script: script.into(),
            }
        }
    }

    impl Canvas for ScriptedFrontend {
        fn clear(&mut self, color: u32) {
            self.canvas.clear(color);
        }
        fn draw_rect(&mut self, rect: Rect, color: u32) {
            self.canvas.draw_rect(rect, color);
        }
        fn draw_ellipse(&mut self, rect: Rect, color: u32) {
            self.canvas.draw_ellipse(rect, color);
        }
        fn draw_line(&mut self, from: Vec2, to: Vec2, color: u32) {
            self.canvas.draw_line(from, to, color);
        }
        fn draw_text(&mut self, text: &str, size: FontSize, color: u32, pos: Vec2, align: Align) {
            self.canvas.draw_text(text, size, color, pos, align);
        }
        fn blit_image(&mut self, image: &PreviewFrame, dest: Rect) {
            self.canvas.blit_image(image, dest);
        }
        fn present(&mut self) -> Result<(), String> {
            self.canvas.present()
        }
    }

    impl Frontend for ScriptedFrontend {
        fn poll_input(&mut self) -> FrameInput {
            // close the window once the script runs out
            self.script.pop_front().unwrap_or(FrameInput {
                close_requested: true,
                ..Default::default()
            })
        }
    }

    fn key(key: Key) -> FrameInput {
        FrameInput {
            keys: vec![key],
            ..Default::default()
        }
    }

    #[test]
    fn test_loop_runs_start_to_quit() {
        let config = Config::new();
        let layout = Layout::new(&config);
        let mut session = Session::new(config, GameRng::new(3), ScriptedSensor::default());

        // start, sit through both calibration stages, play a little, pause, quit
        let mut script = vec![FrameInput::default(), key(Key::Enter)];
        script.extend((0..660).map(|_| FrameInput::default()));
        script.push(key(Key::P));
        script.push(FrameInput::default());
        script.push(key(Key::Q));
        let frames = script.len() - 1;
        let mut frontend = ScriptedFrontend::new(script);

        let mut tick = 0;
        run_loop(&mut session, &mut frontend, &layout, || {
            tick += 1;
            tick as f32 / 60.0
        })
        .unwrap();

        assert_eq!(session.state(), FsmState::Terminated);
        let ops = &frontend.canvas.ops;
        assert_eq!(ops.iter().filter(|op| **op == Op::Present).count(), frames);

        let texts = frontend.canvas.texts();
        assert!(texts.contains(&"START"));
        assert!(texts.contains(&CalibrationStage::RaiseFinger.instruction()));
        assert!(texts.contains(&CalibrationStage::LowerFinger.instruction()));
        assert_eq!(texts.last(), Some(&"PAUSED"));
    }

    #[test]
    fn test_window_close_ends_loop() {
        let config = Config::new();
        let layout = Layout::new(&config);
        let mut session = Session::new(config, GameRng::new(3), ScriptedSensor::default());
        let mut frontend = ScriptedFrontend::new(vec![]);

        run_loop(&mut session, &mut frontend, &layout, || 0.0).unwrap();
        assert!(frontend.canvas.ops.is_empty());
    }

    #[test]
    fn test_load_config_overrides() {
        let path = std::env::temp_dir().join(format!("hand_pong_cfg_{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{ "winning_score": 7 }}"#).unwrap();
        drop(file);

        let config = load_config(Some(&path)).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.winning_score, 7);
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let path =
            std::env::temp_dir().join(format!("hand_pong_bad_{}.json", std::process::id()));
        fs::write(&path, r#"{ "smoothing_factor": 0.0 }"#).unwrap();
        let result = load_config(Some(&path));
        fs::remove_file(&path).ok();
        assert!(result.is_err());

        assert!(load_config(Some(Path::new("/nonexistent/hand_pong.json"))).is_err());
        assert_eq!(load_config(None).unwrap(), Config::new());
    }
}
