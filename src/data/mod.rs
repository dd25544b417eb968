//! Tick data I/O module
//!
//! CSV loading of raw price ticks and export of per-day estimates

mod loader;
mod types;
mod writer;

pub use loader::TickLoader;
pub use types::PriceObservation;
pub use writer::ResultWriter;
