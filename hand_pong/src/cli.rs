//! Command line arguments

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_DETECTOR: &str = "hand-landmark-detector";

#[derive(Debug, Clone, Parser)]
#[command(name = "hand_pong", version)]
#[command(about = "Hand-tracked Pong: raise your index finger to move the paddle.")]
#[command(after_help = "Keys: P pauses, Q or Esc quits. Set RUST_LOG=debug for physics events.")]
pub struct Args {
    /// JSON file overriding game settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for the ball's random serves
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Hand detector program
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_DETECTOR)]
    pub detector: PathBuf,

    /// Argument passed to the detector, repeat for several
    #[arg(long = "detector-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub detector_args: Vec<String>,

    /// Seconds to wait for the camera to open
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub startup_timeout: u64,
}

impl Args {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout)
    }
}
