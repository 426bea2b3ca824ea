//! Hand sensor backed by an external detector process
//!
//! The detector owns the camera and the landmark model. It streams
//! [`DetectorMsg`] frames on stdout; a reader thread decodes them onto a
//! bounded channel that [`DetectorSidecar::poll`] drains once per tick.
//! While nothing polls (menus, pause) the reader blocks and the detector
//! stalls on its full pipe.

use std::ffi::OsStr;
use std::io::{BufReader, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use game_core::{HandLandmarks, HandSensor, PreviewFrame};
use glam::Vec2;
use proto::{read_msg, DetectorMsg, Preview, ProtoError};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Decoded messages the reader may hold ahead of the game
const FRAME_BACKLOG: usize = 2;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),
}

type Incoming = Result<DetectorMsg, ProtoError>;

pub struct DetectorSidecar {
    child: Option<Child>,
    rx: Receiver<Incoming>,
    reader: Option<JoinHandle<()>>,
    preview: Option<PreviewFrame>,
    closed: bool,
}

impl DetectorSidecar {
    /// Start the detector and wait until it reports the camera open
    pub fn spawn<P, I, A>(
        program: P,
        args: I,
        startup_timeout: Duration,
    ) -> Result<Self, SensorError>
    where
        P: AsRef<OsStr>,
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let program = program.as_ref();
        if program.is_empty() {
            return Err(SensorError::DeviceUnavailable("empty detector command".into()));
        }
        let shown = program.to_string_lossy();

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| {
                SensorError::DeviceUnavailable(format!("could not start `{shown}`: {err}"))
            })?;
        info!(pid = child.id(), program = %shown, "Detector started");

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SensorError::DeviceUnavailable(
                "detector stdout not captured".into(),
            ));
        };
        Self::attach(Some(child), stdout, startup_timeout)
    }

    /// Read detector frames from any byte stream
    pub fn from_stream<R: Read + Send + 'static>(
        stream: R,
        startup_timeout: Duration,
    ) -> Result<Self, SensorError> {
        Self::attach(None, stream, startup_timeout)
    }

    fn attach<R: Read + Send + 'static>(
        child: Option<Child>,
        stream: R,
        startup_timeout: Duration,
    ) -> Result<Self, SensorError> {
        let (tx, rx) = mpsc::sync_channel(FRAME_BACKLOG);
        let reader = thread::Builder::new()
            .name("detector-reader".into())
            .spawn(move || read_loop(stream, tx))
            .map_err(|err| SensorError::DeviceUnavailable(err.to_string()))?;

        // From here on Drop reaps the child on every error path
        let mut sidecar = Self {
            child,
            rx,
            reader: Some(reader),
            preview: None,
            closed: false,
        };
        sidecar.wait_ready(startup_timeout)?;
        Ok(sidecar)
    }

    fn wait_ready(&mut self, timeout: Duration) -> Result<(), SensorError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(Ok(DetectorMsg::Ready {
                    camera_width,
                    camera_height,
                })) => {
                    info!(camera_width, camera_height, "Camera ready");
                    return Ok(());
                }
                Ok(Ok(DetectorMsg::DeviceError { reason })) => {
                    return Err(SensorError::DeviceUnavailable(reason));
                }
                Ok(Ok(msg)) => debug!(?msg, "Ignoring detector message before ready"),
                Ok(Err(err)) => return Err(SensorError::DeviceUnavailable(err.to_string())),
                Err(RecvTimeoutError::Timeout) => {
                    return Err(SensorError::DeviceUnavailable(format!(
                        "detector did not open the camera within {:.0}s",
                        timeout.as_secs_f32()
                    )));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(SensorError::DeviceUnavailable(
                        "detector exited before opening the camera".into(),
                    ));
                }
            }
        }
    }

    fn mark_closed(&mut self, reason: &str) {
        if !self.closed {
            warn!(reason, "Detector stream closed, no more hand readings");
            self.closed = true;
        }
    }

    #[cfg(test)]
    fn join_reader(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.join().expect("reader thread panicked");
        }
    }
}

impl HandSensor for DetectorSidecar {
    fn poll(&mut self) -> Option<f32> {
        // Only the newest frame matters; older ones are stale
        let mut newest: Option<Option<f32>> = None;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(DetectorMsg::Frame { hand, preview, .. })) => {
                    if let Some(frame) = preview.as_ref().and_then(preview_frame) {
                        self.preview = Some(frame);
                    }
                    newest = Some(hand.as_deref().and_then(finger_offset));
                }
                Ok(Ok(DetectorMsg::ReadFailure)) => {
                    trace!("Camera returned no image, treating frame as no hand");
                    newest = Some(None);
                }
                Ok(Ok(DetectorMsg::Ready { .. })) => {}
                Ok(Ok(DetectorMsg::DeviceError { reason })) => self.mark_closed(&reason),
                Ok(Err(err)) => self.mark_closed(&err.to_string()),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.mark_closed("detector exited");
                    break;
                }
            }
        }

        let offset = newest.flatten();
        if offset.is_none() {
            trace!("No hand this tick");
        }
        offset
    }

    fn preview(&self) -> Option<&PreviewFrame> {
        self.preview.as_ref()
    }
}

impl Drop for DetectorSidecar {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.kill() {
                debug!(%err, "Detector already exited");
            }
            match child.wait() {
                Ok(status) => info!(%status, "Detector stopped"),
                Err(err) => warn!(%err, "Failed to reap detector"),
            }
        }
        // The reader ends on its own once the pipe closes
        self.reader.take();
    }
}

/// Blocks on a full channel until the game polls again or hangs up
fn read_loop<R: Read>(stream: R, tx: SyncSender<Incoming>) {
    let mut reader = BufReader::new(stream);
    loop {
        match read_msg(&mut reader) {
            Ok(Some(msg)) => {
                if tx.send(Ok(msg)).is_err() {
                    return;
                }
            }
            Ok(None) => return,
            Err(err) => {
                let _ = tx.send(Err(err));
                return;
            }
        }
    }
}

fn finger_offset(points: &[[f32; 2]]) -> Option<f32> {
    HandLandmarks::new(points.iter().map(|p| Vec2::new(p[0], p[1])).collect()).offset()
}

fn preview_frame(preview: &Preview) -> Option<PreviewFrame> {
    let frame = PreviewFrame::from_rgb(
        preview.width as usize,
        preview.height as usize,
        &preview.rgb,
    );
    if frame.is_none() {
        debug!(
            width = preview.width,
            height = preview.height,
            bytes = preview.rgb.len(),
            "Dropping malformed preview"
        );
    }
    frame
}
