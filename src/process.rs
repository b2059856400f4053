use std::time::Instant;

use crate::aggregator::{Aggregator, StationResult};
use crate::byte_buffer::{ByteBuffer, Lines, split_regions};
use crate::decimal::parse_exact;
use crate::error::{BrcError, Result};
use crate::observer::Observer;
use crate::options::{ProcessOptions, UnparsablePolicy};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Every line seen, including empty and malformed ones.
    pub lines: u64,
    /// Lines whose reading reached the aggregator.
    pub records: u64,
    /// Lines without a delimiter or with an empty station name.
    pub malformed: u64,
    /// Unparsable readings dropped under [`UnparsablePolicy::Skip`].
    pub skipped: u64,
    /// Readings recovered by the fallback parser.
    pub fallbacks: u64,
}

impl ScanSummary {
    fn absorb(&mut self, other: &ScanSummary) {
        self.lines += other.lines;
        self.records += other.records;
        self.malformed += other.malformed;
        self.skipped += other.skipped;
        self.fallbacks += other.fallbacks;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub stations: Vec<StationResult>,
    pub summary: ScanSummary,
}

/// Standard library parse, minus `NaN` and the infinities.
fn fallback_parse(value: &[u8]) -> Option<f64> {
    let reading: f64 = str::from_utf8(value).ok()?.parse().ok()?;
    reading.is_finite().then_some(reading)
}

/// Feeds every line of `buf` into `agg`.
///
/// `first_line` is the 1-based number of the first line in `buf`, used when
/// reporting unparsable readings.
pub fn scan(
    buf: &[u8],
    first_line: u64,
    options: &ProcessOptions,
    observer: &dyn Observer,
    agg: &mut Aggregator,
) -> Result<ScanSummary> {
    let mut summary = ScanSummary::default();

    for (i, line) in Lines::new(buf).enumerate() {
        summary.lines += 1;
        let line_no = first_line + i as u64;

        let line = line.trim_cr();
        if line.is_empty() {
            continue;
        }

        let Some((station, value)) = line.split_record(options.delimiter) else {
            summary.malformed += 1;
            continue;
        };

        if station.is_empty() {
            summary.malformed += 1;
            continue;
        }

        let reading = match parse_exact(value) {
            Some(reading) => reading,
            None => match options.on_unparsable {
                UnparsablePolicy::Abort => return Err(BrcError::unparsable(line_no, value)),
                UnparsablePolicy::Skip => {
                    observer.unparsable_reading(line_no, value, false);
                    summary.skipped += 1;
                    continue;
                }
                UnparsablePolicy::Fallback => match fallback_parse(value) {
                    Some(reading) => {
                        observer.unparsable_reading(line_no, value, true);
                        summary.fallbacks += 1;
                        reading
                    }
                    None => return Err(BrcError::unparsable(line_no, value)),
                },
            },
        };

        agg.record(station, reading);
        summary.records += 1;
    }

    Ok(summary)
}

/// Aggregates `buf` in one pass and returns the stations sorted by name.
pub fn process(buf: &[u8], options: &ProcessOptions, observer: &dyn Observer) -> Result<Report> {
    process_partitioned(buf, 1, options, observer)
}

/// Like [`process`], but scans `partitions` line-aligned regions into separate
/// aggregators and merges them before finalizing.
///
/// Regions are scanned one after the other on the calling thread.
pub fn process_partitioned(
    buf: &[u8],
    partitions: usize,
    options: &ProcessOptions,
    observer: &dyn Observer,
) -> Result<Report> {
    let start = Instant::now();
    let regions = split_regions(buf, partitions);
    observer.scan_started(buf.len(), regions.len());

    let per_region = (options.expected_stations / regions.len().max(1)).max(1);
    let mut merged = Aggregator::with_capacity(options.expected_stations);
    let mut summary = ScanSummary::default();

    for (index, region) in regions.into_iter().enumerate() {
        let mut agg = Aggregator::with_capacity(per_region);
        let region_summary = scan(region, summary.lines + 1, options, observer, &mut agg)?;
        observer.region_scanned(index, &region_summary);

        summary.absorb(&region_summary);
        merged.merge(agg);
    }

    observer.scan_finished(&summary, start.elapsed());

    let stations = merged.finalize();
    observer.finalized(stations.len(), start.elapsed());

    Ok(Report { stations, summary })
}
