//! Stand-in hand detector. Speaks the detector protocol on stdout with a
//! virtual index finger that sweeps up and down, so the game can run
//! without a camera:
//!
//!     hand_pong --detector synthetic_detector
//!
//! `--device-error` reports a missing camera instead.

use std::f32::consts::TAU;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use game_core::{HAND_LANDMARK_COUNT, INDEX_FINGER_TIP, WRIST};
use proto::{write_msg, DetectorMsg, Preview, ProtoError};
use tracing::{info, warn};
use tracing_subscriber::filter::EnvFilter;

const CAMERA_WIDTH: u16 = 640;
const CAMERA_HEIGHT: u16 = 480;
const PREVIEW_WIDTH: u16 = 64;
const PREVIEW_HEIGHT: u16 = 48;
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const SWEEP_PERIOD_SECS: f32 = 4.0;
/// Finger offset swings across this range
const OFFSET_LOW: f32 = 0.02;
const OFFSET_HIGH: f32 = 0.22;

fn main() -> ExitCode {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let device_error = std::env::args().skip(1).any(|arg| arg == "--device-error");
    let mut out = BufWriter::new(io::stdout().lock());

    let result = if device_error {
        write_msg(
            &mut out,
            &DetectorMsg::DeviceError {
                reason: "synthetic camera disabled".into(),
            },
        )
    } else {
        stream_frames(&mut out)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // the game closed our stdout, normal shutdown
        Err(ProtoError::Io(err)) if err.kind() == io::ErrorKind::BrokenPipe => {
            info!("Game disconnected");
            ExitCode::SUCCESS
        }
        Err(err) => {
            warn!(%err, "Synthetic detector failed");
            ExitCode::FAILURE
        }
    }
}

fn stream_frames<W: io::Write>(out: &mut W) -> Result<(), ProtoError> {
    write_msg(
        out,
        &DetectorMsg::Ready {
            camera_width: CAMERA_WIDTH,
            camera_height: CAMERA_HEIGHT,
        },
    )?;
    info!("Synthetic camera ready");

    let started = Instant::now();
    for seq in 0u32.. {
        let t = started.elapsed().as_secs_f32();
        let phase = (t / SWEEP_PERIOD_SECS * TAU).sin() * 0.5 + 0.5;
        let offset = OFFSET_LOW + (OFFSET_HIGH - OFFSET_LOW) * phase;
        let hand = landmarks(offset);
        let preview = preview(&hand);

        write_msg(
            out,
            &DetectorMsg::Frame {
                seq,
                hand: Some(hand),
                preview: Some(preview),
            },
        )?;
        thread::sleep(FRAME_INTERVAL);
    }
    Ok(())
}

/// A flat hand with the index tip `offset` above the wrist
fn landmarks(offset: f32) -> Vec<[f32; 2]> {
    let wrist = [0.5, 0.85];
    let mut points: Vec<[f32; 2]> = (0..HAND_LANDMARK_COUNT)
        .map(|i| [0.42 + i as f32 * 0.008, 0.8 - (i % 4) as f32 * 0.01])
        .collect();
    points[WRIST] = wrist;
    points[INDEX_FINGER_TIP] = [0.48, wrist[1] - offset];
    points
}

/// Dark gradient with a bright dot on each landmark
fn preview(hand: &[[f32; 2]]) -> Preview {
    let (w, h) = (PREVIEW_WIDTH as usize, PREVIEW_HEIGHT as usize);
    let mut rgb = Vec::with_capacity(w * h * 3);
    for y in 0..h {
        for x in 0..w {
            rgb.extend([(x * 64 / w) as u8, (y * 64 / h) as u8, 40]);
        }
    }
    for point in hand {
        let x = ((point[0] * w as f32) as usize).min(w - 1);
        let y = ((point[1] * h as f32) as usize).min(h - 1);
        let i = (y * w + x) * 3;
        rgb[i..i + 3].copy_from_slice(&[0, 255, 0]);
    }
    Preview {
        width: PREVIEW_WIDTH,
        height: PREVIEW_HEIGHT,
        rgb,
    }
}
