//! qrforge: parametric QR code designer with a live terminal preview.
//!
//! The crate splits into a frontend-agnostic core (design state, symbol
//! construction, rendering) and a tuirealm-based editor under [`tui`].

pub mod cli;
pub mod color;
pub mod config;
pub mod design;
pub mod logging;
pub mod media;
pub mod params;
pub mod prompts;
pub mod qr;
pub mod render;
pub mod telemetry;
pub mod tui;
