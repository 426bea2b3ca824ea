//! Desktop client for hand-tracked Pong
//!
//! Wires a camera-backed [`sensor::DetectorSidecar`] and a `minifb` window
//! to the session controller in `game_core`.

pub mod app;
pub mod cli;
pub mod input;
pub mod layout;
pub mod renderer;
pub mod scene;
pub mod sensor;
