/// Game tuning parameters for hand-tracked Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena (pixels)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    // Loop
    pub const FPS: u32 = 60;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_HEIGHT: f32 = 140.0;
    pub const PADDLE_MARGIN: f32 = 50.0;
    pub const OPPONENT_SPEED: f32 = 21.0; // px per tick
    pub const SMOOTHING_FACTOR: f32 = 0.2; // Dampens hand-tracking jitter

    // Ball
    pub const BALL_SIZE: f32 = 30.0;
    pub const BALL_INITIAL_SPEED_MIN: i32 = 12;
    pub const BALL_INITIAL_SPEED_MAX: i32 = 19;
    pub const BALL_COLLISION_SPEED_MIN: i32 = 12;
    pub const BALL_COLLISION_SPEED_MAX: i32 = 25;
    pub const BALL_MIN_VERTICAL_SPEED: f32 = 8.0;
    pub const BALL_VERTICAL_JITTER: f32 = 3.0;

    // Trail
    pub const TRAIL_COUNT: usize = 5;
    pub const TRAIL_START_COLOR: u8 = 240;

    // Camera preview
    pub const CAMERA_PREVIEW_WIDTH: f32 = 160.0;
    pub const CAMERA_PREVIEW_HEIGHT: f32 = 120.0;
    pub const CAMERA_PREVIEW_MARGIN: f32 = 10.0;

    // Score
    pub const WINNING_SCORE: u8 = 5;

    // Calibration
    pub const CALIBRATION_COUNTDOWN: f32 = 5.0; // seconds per stage
    pub const FALLBACK_MIN_DIFF: f32 = 0.0;
    pub const FALLBACK_MAX_DIFF: f32 = 0.2;
}
