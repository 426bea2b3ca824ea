//! Wire protocol for the hand-landmark detector process
//!
//! The detector writes a stream of [`DetectorMsg`] frames to its stdout.
//! Each frame is a little-endian `u32` body length followed by a postcard
//! encoded body.

use std::io::{self, Read, Write};

use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest body accepted on the wire
pub const MAX_FRAME_LEN: usize = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("detector stream i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("malformed detector frame: {0}")]
    Decode(#[from] postcard::Error),

    #[error("detector frame of {0} bytes exceeds the {MAX_FRAME_LEN} byte limit")]
    FrameTooLarge(usize),
}

/// Small camera image, row-major RGB24
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub width: u16,
    pub height: u16,
    pub rgb: Vec<u8>,
}

// ============================================================================
// Detector -> game messages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DetectorMsg {
    /// Camera opened, frames will follow
    Ready { camera_width: u16, camera_height: u16 },

    /// Camera could not be opened; the detector exits after sending this
    DeviceError { reason: String },

    /// One processed camera frame. `hand` holds the normalised landmark
    /// points of the first detected hand, already mirrored horizontally.
    Frame {
        seq: u32,
        hand: Option<Vec<[f32; 2]>>,
        preview: Option<Preview>,
    },

    /// The camera returned no image this frame
    ReadFailure,
}

impl DetectorMsg {
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

// ============================================================================
// Framing
// ============================================================================

/// Write one length-prefixed frame and flush
pub fn write_msg<W: Write>(writer: &mut W, msg: &DetectorMsg) -> Result<(), ProtoError> {
    let body = msg.to_bytes()?;
    if body.len() > MAX_FRAME_LEN {
        return Err(ProtoError::FrameTooLarge(body.len()));
    }
    writer.write_all(&(body.len() as u32).to_le_bytes())?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

/// Read one frame. `Ok(None)` on a clean end of stream between frames; a
/// stream cut mid-frame is an error.
pub fn read_msg<R: Read>(reader: &mut R) -> Result<Option<DetectorMsg>, ProtoError> {
    let mut header = [0u8; 4];
    let mut filled = 0;
    while filled < header.len() {
        match reader.read(&mut header[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }

    let len = u32::from_le_bytes(header) as usize;
    if len > MAX_FRAME_LEN {
        return Err(ProtoError::FrameTooLarge(len));
    }
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(Some(DetectorMsg::from_bytes(&body)?))
}
