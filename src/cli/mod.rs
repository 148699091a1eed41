//! Command-line host for the notebook library.

mod app;
mod args;

pub use app::*;
pub use args::*;
