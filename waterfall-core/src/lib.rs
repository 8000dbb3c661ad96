//! Core of the waterfall (time-frequency) viewer.
//!
//! Everything here is independent of the browser: slice decoding, color
//! scale calibration, palettes, windowing, pixel/index mapping, the raster
//! and overlay renderers (drawn through [`surface::DrawingSurface`]), the
//! playback state machine and the [`engine::WaterfallEngine`] that owns it all.

pub mod api;
pub mod color;
pub mod config;
pub mod coords;
pub mod decode;
pub mod engine;
pub mod error;
pub mod input;
pub mod overlay;
pub mod periodogram;
pub mod playback;
pub mod raster;
pub mod scale;
pub mod selection;
pub mod surface;
pub mod types;
pub mod viewport;

pub use engine::{Action, Redraw, WaterfallEngine};
pub use error::{DecodeError, LoadError, ParseError};
pub use types::{Slice, SliceStore};
