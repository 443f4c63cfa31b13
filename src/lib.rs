//! Sketch a math expression, send the canvas for analysis, and pin the answers
//! next to the drawing.

pub mod analysis;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod drawing;
pub mod error;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod session;
pub mod toolbar;
pub mod types;
pub mod typeset;
pub mod vars;
pub mod worker;
