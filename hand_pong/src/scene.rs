//! What each session state looks like, in terms of [`Canvas`] primitives.

use game_core::{
    CalibrationStatus, FsmState, GameSnapshot, PreviewFrame, Rect, SessionView, Side,
};
use glam::Vec2;

use crate::layout::{Button, Layout};

pub const BLACK: u32 = 0x0000_0000;
pub const WHITE: u32 = 0x00FF_FFFF;
pub const GREEN: u32 = 0x0000_FF00;
pub const RED: u32 = 0x00FF_0000;
pub const BLUE: u32 = 0x0000_00FF;

pub const TITLE: &str = "Hand Tracking PONG";
pub const ELBOW_INSTRUCTION: &str = "Please rest your elbow on the table. Keep your arm straight.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Title,
    Comment,
    Ui,
    Calibration,
    GameOver,
    Pause,
}

impl FontSize {
    /// Nominal text height in points
    pub fn points(self) -> u32 {
        match self {
            FontSize::Title => 74,
            FontSize::Comment => 44,
            FontSize::Ui => 50,
            FontSize::Calibration => 40,
            FontSize::GameOver => 100,
            FontSize::Pause => 84,
        }
    }

    /// Whole-pixel multiplier for the bitmap font
    pub fn scale(self) -> usize {
        (self.points() / 12).max(1) as usize
    }
}

/// How `draw_text`'s position relates to the text box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    TopLeft,
    TopCenter,
    Center,
}

/// Drawing surface. Colours are `0RGB`.
pub trait Canvas {
    fn clear(&mut self, color: u32);
    fn draw_rect(&mut self, rect: Rect, color: u32);
    fn draw_ellipse(&mut self, rect: Rect, color: u32);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: u32);
    fn draw_text(&mut self, text: &str, size: FontSize, color: u32, pos: Vec2, align: Align);
    fn blit_image(&mut self, image: &PreviewFrame, dest: Rect);
    fn present(&mut self) -> Result<(), String>;
}

/// Compose one frame for the current session state. Does not present.
pub fn draw_view<C: Canvas>(canvas: &mut C, layout: &Layout, view: &SessionView<'_>) {
    match view.state {
        FsmState::Start => draw_start(canvas, layout),
        FsmState::Calibrating => draw_calibration(canvas, layout, view.calibration, view.preview),
        FsmState::Playing => draw_play(canvas, layout, &view.game, view.preview),
        FsmState::Paused => {
            draw_play(canvas, layout, &view.game, None);
            draw_paused(canvas, layout);
        }
        FsmState::GameOver(winner) => draw_game_over(canvas, layout, winner),
        FsmState::Terminated => canvas.clear(BLACK),
    }
}

pub fn draw_start<C: Canvas>(canvas: &mut C, layout: &Layout) {
    canvas.clear(BLACK);
    canvas.draw_text(
        TITLE,
        FontSize::Title,
        WHITE,
        Vec2::new(layout.width / 2.0, layout.height / 4.0),
        Align::TopCenter,
    );
    canvas.draw_text(
        ELBOW_INSTRUCTION,
        FontSize::Comment,
        WHITE,
        Vec2::new(layout.width / 2.0, layout.height / 3.0),
        Align::TopCenter,
    );
    draw_button(canvas, layout, Button::Start, "START", GREEN, BLACK);
}

pub fn draw_calibration<C: Canvas>(
    canvas: &mut C,
    layout: &Layout,
    status: Option<CalibrationStatus>,
    preview: Option<&PreviewFrame>,
) {
    canvas.clear(BLACK);
    if let Some(frame) = preview {
        canvas.blit_image(frame, layout.screen());
    }

    let Some(CalibrationStatus::Running {
        stage,
        seconds_left,
    }) = status
    else {
        return;
    };

    // dark band so the text reads over the camera image
    canvas.draw_rect(Rect::new(0.0, 40.0, layout.width, 40.0), BLACK);
    canvas.draw_text(
        stage.instruction(),
        FontSize::Calibration,
        WHITE,
        Vec2::new(50.0, 50.0),
        Align::TopLeft,
    );
    canvas.draw_text(
        &seconds_left.to_string(),
        FontSize::Title,
        WHITE,
        Vec2::new(layout.width / 2.0 - 20.0, 100.0),
        Align::TopLeft,
    );
}

pub fn draw_play<C: Canvas>(
    canvas: &mut C,
    layout: &Layout,
    game: &GameSnapshot,
    preview: Option<&PreviewFrame>,
) {
    canvas.clear(BLACK);
    canvas.draw_rect(game.player_paddle, WHITE);
    canvas.draw_rect(game.opponent_paddle, WHITE);
    canvas.draw_ellipse(game.ball, WHITE);

    let trail_size = Vec2::splat(layout.ball_size);
    for (point, color) in game.trail.iter().zip(&layout.trail_colors) {
        canvas.draw_ellipse(Rect::from_center_size(*point, trail_size), *color);
    }

    canvas.draw_line(
        Vec2::new(layout.width / 2.0, 0.0),
        Vec2::new(layout.width / 2.0, layout.height),
        WHITE,
    );

    canvas.draw_text(
        &game.score.player.to_string(),
        FontSize::Title,
        WHITE,
        Vec2::new(layout.width / 4.0, 20.0),
        Align::TopLeft,
    );
    canvas.draw_text(
        &game.score.opponent.to_string(),
        FontSize::Title,
        WHITE,
        Vec2::new(layout.width * 3.0 / 4.0, 20.0),
        Align::TopLeft,
    );

    if let Some(frame) = preview {
        canvas.blit_image(frame, layout.preview);
    }
}

pub fn draw_paused<C: Canvas>(canvas: &mut C, layout: &Layout) {
    canvas.draw_text("PAUSED", FontSize::Pause, WHITE, layout.center(), Align::Center);
}

pub fn draw_game_over<C: Canvas>(canvas: &mut C, layout: &Layout, winner: Side) {
    canvas.clear(BLACK);
    canvas.draw_text(
        "GAME OVER",
        FontSize::GameOver,
        RED,
        Vec2::new(layout.width / 2.0, layout.height / 4.0),
        Align::TopCenter,
    );
    canvas.draw_text(
        winner_text(winner),
        FontSize::Title,
        WHITE,
        Vec2::new(layout.width / 2.0, layout.height / 2.0 - 50.0),
        Align::TopCenter,
    );
    draw_button(canvas, layout, Button::PlayAgain, "Play Again", GREEN, BLACK);
    draw_button(canvas, layout, Button::Quit, "Quit", BLUE, WHITE);
}

pub fn winner_text(winner: Side) -> &'static str {
    match winner {
        Side::Player => "USER WINS!",
        Side::Opponent => "COMPUTER WINS!",
    }
}

fn draw_button<C: Canvas>(
    canvas: &mut C,
    layout: &Layout,
    button: Button,
    label: &str,
    fill: u32,
    text: u32,
) {
    let rect = layout.button(button);
    canvas.draw_rect(rect, fill);
    canvas.draw_text(label, FontSize::Ui, text, rect.center(), Align::Center);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use game_core::{CalibrationStage, Config, Game, GameRng};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Clear(u32),
        Rect(Rect, u32),
        Ellipse(Rect, u32),
        Line(Vec2, Vec2),
        Text(String, FontSize, u32),
        Blit(Rect),
        Present,
    }

    /// Canvas that records draw calls
    #[derive(Default)]
    pub struct RecordingCanvas {
        pub ops: Vec<Op>,
    }

    impl RecordingCanvas {
        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(text, ..) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn blits(&self) -> Vec<Rect> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Blit(rect) => Some(*rect),
                    _ => None,
                })
                .collect()
        }
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, color: u32) {
            self.ops.push(Op::Clear(color));
        }
        fn draw_rect(&mut self, rect: Rect, color: u32) {
            self.ops.push(Op::Rect(rect, color));
        }
        fn draw_ellipse(&mut self, rect: Rect, color: u32) {
            self.ops.push(Op::Ellipse(rect, color));
        }
        fn draw_line(&mut self, from: Vec2, to: Vec2, _color: u32) {
            self.ops.push(Op::Line(from, to));
        }
        fn draw_text(&mut self, text: &str, size: FontSize, color: u32, _pos: Vec2, _align: Align) {
            self.ops.push(Op::Text(text.to_string(), size, color));
        }
        fn blit_image(&mut self, _image: &PreviewFrame, dest: Rect) {
            self.ops.push(Op::Blit(dest));
        }
        fn present(&mut self) -> Result<(), String> {
            self.ops.push(Op::Present);
            Ok(())
        }
    }

    fn preview() -> PreviewFrame {
        PreviewFrame {
            width: 4,
            height: 3,
            pixels: vec![0x0012_3456; 12],
        }
    }

    fn view(state: FsmState, preview: Option<&PreviewFrame>) -> SessionView<'_> {
        SessionView {
            state,
            game: Game::new(Config::new(), GameRng::new(1)).snapshot(),
            calibration: None,
            preview,
        }
    }

    #[test]
    fn test_start_screen() {
        let layout = Layout::new(&Config::new());
        let mut canvas = RecordingCanvas::default();
        draw_view(&mut canvas, &layout, &view(FsmState::Start, None));

        assert_eq!(canvas.texts(), vec![TITLE, ELBOW_INSTRUCTION, "START"]);
        assert!(canvas.ops.contains(&Op::Rect(layout.start_button, GREEN)));
    }

    #[test]
    fn test_play_frame() {
        let config = Config::new();
        let layout = Layout::new(&config);
        let frame = preview();
        let mut canvas = RecordingCanvas::default();
        draw_view(&mut canvas, &layout, &view(FsmState::Playing, Some(&frame)));

        assert_eq!(canvas.ops[0], Op::Clear(BLACK));
        assert_eq!(canvas.texts(), vec!["0", "0"]);
        assert_eq!(canvas.blits(), vec![layout.preview]);

        // ball plus one ellipse per trail point, brightest first
        let ellipses: Vec<u32> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Ellipse(_, color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(ellipses.len(), 1 + config.trail_count);
        assert_eq!(ellipses[1], 0x00F0_F0F0);
        assert!(canvas.ops.contains(&Op::Line(
            Vec2::new(640.0, 0.0),
            Vec2::new(640.0, 720.0)
        )));
    }

    #[test]
    fn test_paused_overlay_without_preview() {
        let layout = Layout::new(&Config::new());
        let frame = preview();
        let mut canvas = RecordingCanvas::default();
        draw_view(&mut canvas, &layout, &view(FsmState::Paused, Some(&frame)));

        assert_eq!(canvas.texts().last(), Some(&"PAUSED"));
        assert!(canvas.blits().is_empty());
    }

    #[test]
    fn test_calibration_countdown() {
        let layout = Layout::new(&Config::new());
        let frame = preview();
        let mut canvas = RecordingCanvas::default();
        let mut v = view(FsmState::Calibrating, Some(&frame));
        v.calibration = Some(CalibrationStatus::Running {
            stage: CalibrationStage::LowerFinger,
            seconds_left: 3,
        });
        draw_view(&mut canvas, &layout, &v);

        assert_eq!(canvas.blits(), vec![layout.screen()]);
        assert_eq!(
            canvas.texts(),
            vec![CalibrationStage::LowerFinger.instruction(), "3"]
        );
    }

    #[test]
    fn test_game_over_screen() {
        let layout = Layout::new(&Config::new());
        let mut canvas = RecordingCanvas::default();
        draw_view(&mut canvas, &layout, &view(FsmState::GameOver(Side::Opponent), None));

        assert_eq!(
            canvas.texts(),
            vec!["GAME OVER", "COMPUTER WINS!", "Play Again", "Quit"]
        );
        assert!(canvas.ops.contains(&Op::Rect(layout.play_again_button, GREEN)));
        assert!(canvas.ops.contains(&Op::Rect(layout.quit_button, BLUE)));
    }

    #[test]
    fn test_font_scales() {
        assert_eq!(FontSize::Title.scale(), 6);
        assert_eq!(FontSize::Comment.scale(), 3);
        assert_eq!(FontSize::GameOver.scale(), 8);
    }
}
