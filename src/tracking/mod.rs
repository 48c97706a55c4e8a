//! Event tracking: sink seam, fire-and-forget emitters, source attribution

pub mod sink;
pub mod source;
pub mod tracker;

pub use sink::{FailingSink, MemorySink, TrackSink};
pub use source::{DIRECT_SOURCE, resolve_source};
pub use tracker::{PageTracker, SentEvents, Tracker};
