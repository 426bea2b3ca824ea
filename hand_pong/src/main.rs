use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use clap::Parser;
use hand_pong::app;
use hand_pong::cli::Args;
use hand_pong::sensor::SensorError;
use tracing::error;
use tracing_subscriber::filter::EnvFilter;

const CAMERA_HELP: &str = "Error: Could not open webcam.
Please ensure:
  1. A webcam is connected
  2. No other application is using the webcam
  3. You have granted camera permissions
  4. The hand detector is installed, or point --detector at it
     (try `--detector synthetic_detector` to play without a camera)";

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // clap prints help or usage errors itself, exiting 0 or 2
    let args = Args::parse();

    match panic::catch_unwind(AssertUnwindSafe(|| app::run(&args))) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(err)) => match err.downcast_ref::<SensorError>() {
            Some(SensorError::DeviceUnavailable(reason)) => {
                error!(%reason, detector = %args.detector.display(), "Camera unavailable");
                eprintln!("{CAMERA_HELP}");
                ExitCode::from(2)
            }
            None => {
                error!("Unexpected fault: {err:#}");
                ExitCode::FAILURE
            }
        },
        Err(_) => {
            error!("Unexpected fault: the game loop panicked");
            ExitCode::FAILURE
        }
    }
}
