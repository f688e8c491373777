//! Structural analysis of kolam photographs.
//!
//! Detects the pulli grid and the stroke loops of a dot-and-line floor
//! pattern, summarises them as [`DesignPrinciples`], and redraws a simplified
//! version of the loops.

pub mod annotate;
pub mod config;
pub mod contours;
pub mod dots;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod grey;
pub mod grid;
pub mod pipeline;
pub mod plot_grid;
pub mod principles;
pub mod recreate;
pub mod synthetic;
pub mod types;

pub use config::KolamConfig;
pub use error::KolamError;
pub use types::{Contour, DesignPrinciples, GridSize, Keypoint};
