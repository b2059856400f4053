use std::time::Duration;

use tracing::{debug, info, warn};

use crate::process::ScanSummary;

pub trait Observer {
    fn scan_started(&self, _bytes: usize, _regions: usize) {}

    fn region_scanned(&self, _index: usize, _summary: &ScanSummary) {}

    /// `recovered` is true when the fallback parser accepted the value.
    fn unparsable_reading(&self, _line: u64, _value: &[u8], _recovered: bool) {}

    fn scan_finished(&self, _summary: &ScanSummary, _elapsed: Duration) {}

    fn finalized(&self, _stations: usize, _elapsed: Duration) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn scan_started(&self, bytes: usize, regions: usize) {
        info!(bytes, regions, "starting to scan readings");
    }

    fn region_scanned(&self, index: usize, summary: &ScanSummary) {
        debug!(
            region = index,
            lines = summary.lines,
            records = summary.records,
            "region scanned"
        );
    }

    fn unparsable_reading(&self, line: u64, value: &[u8], recovered: bool) {
        let value = String::from_utf8_lossy(value);
        if recovered {
            debug!(line, %value, "reading outside the exact fast path, used fallback parser");
        } else {
            warn!(line, %value, "skipping unparsable reading");
        }
    }

    fn scan_finished(&self, summary: &ScanSummary, elapsed: Duration) {
        info!(
            lines = summary.lines,
            records = summary.records,
            malformed = summary.malformed,
            skipped = summary.skipped,
            fallbacks = summary.fallbacks,
            ?elapsed,
            "all readings read"
        );
    }

    fn finalized(&self, stations: usize, elapsed: Duration) {
        info!(stations, ?elapsed, "calculated and sorted min/max/mean");
    }
}
