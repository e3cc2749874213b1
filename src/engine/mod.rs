// ============================================================================
// Engine Module
// Contains the matching core: sequencing, per-instrument books, routing
// ============================================================================

mod instrument_book;
mod registry;
mod sequencer;

pub use instrument_book::{InstrumentBook, Trades};
pub use registry::BookRegistry;
pub use sequencer::SequenceAllocator;
