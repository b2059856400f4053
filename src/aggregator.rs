use hashbrown::HashMap;

/// Running statistics for a single station.
///
/// Only ever created from a first reading, so `count` is at least one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StationState {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: u64,
}

impl StationState {
    #[inline]
    pub fn new(reading: f64) -> Self {
        Self {
            min: reading,
            max: reading,
            sum: reading,
            count: 1,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, reading: f64) {
        if reading < self.min {
            self.min = reading;
        }
        if reading > self.max {
            self.max = reading;
        }
        self.sum += reading;
        self.count += 1;
    }

    #[inline]
    pub fn merge(&mut self, other: &StationState) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Finalized statistics for one station.
#[derive(Clone, Debug, PartialEq)]
pub struct StationResult {
    pub station: Vec<u8>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: u64,
}

impl StationResult {
    /// Station name as text, replacing invalid UTF-8.
    pub fn name(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.station)
    }
}

/// Per-station accumulator keyed by the raw station bytes.
#[derive(Clone, Debug, Default)]
pub struct Aggregator {
    stations: HashMap<Vec<u8>, StationState>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stations: HashMap::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn record(&mut self, station: &[u8], reading: f64) {
        match self.stations.get_mut(station) {
            Some(state) => state.update(reading),
            None => {
                self.stations
                    .insert(station.to_vec(), StationState::new(reading));
            }
        }
    }

    /// Folds `other` into `self`, station by station.
    pub fn merge(&mut self, other: Aggregator) {
        for (station, state) in other.stations {
            match self.stations.get_mut(&station) {
                Some(existing) => existing.merge(&state),
                None => {
                    self.stations.insert(station, state);
                }
            }
        }
    }

    pub fn get(&self, station: &[u8]) -> Option<StationState> {
        self.stations.get(station).copied()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Snapshot of every station, sorted by the station bytes.
    ///
    /// Does not touch the accumulated state, so calling it again yields the same
    /// sequence.
    pub fn finalize(&self) -> Vec<StationResult> {
        let mut results: Vec<StationResult> = self
            .stations
            .iter()
            .map(|(station, state)| StationResult {
                station: station.clone(),
                min: state.min,
                max: state.max,
                mean: state.mean(),
                count: state.count,
            })
            .collect();

        results.sort_unstable_by(|a, b| a.station.cmp(&b.station));
        results
    }
}
