//! Per-station min/mean/max over `station;reading` files.
//!
//! Readings go through an exact decimal fast path ([`decimal`]) into a per-station
//! accumulator ([`aggregator`]). [`process()`] wires the two together over a byte
//! buffer, usually a memory-mapped [`source::Source`].

pub mod aggregator;
pub mod byte_buffer;
pub mod decimal;
pub mod error;
pub mod observer;
pub mod options;
pub mod process;
pub mod source;

pub use aggregator::{Aggregator, StationResult, StationState};
pub use decimal::parse_decimal;
pub use error::{BrcError, Result};
pub use observer::{NoopObserver, Observer, TracingObserver};
pub use options::{ProcessOptions, UnparsablePolicy};
pub use process::{Report, ScanSummary, process, process_partitioned};
pub use source::Source;
