use std::fmt;
use std::str::FromStr;

/// What to do with a reading the exact decimal fast path rejects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnparsablePolicy {
    /// Fail the whole pass.
    #[default]
    Abort,
    /// Retry with the standard library parser, failing only if that rejects it too.
    Fallback,
    /// Drop the line and keep going.
    Skip,
}

impl FromStr for UnparsablePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(UnparsablePolicy::Abort),
            "fallback" => Ok(UnparsablePolicy::Fallback),
            "skip" => Ok(UnparsablePolicy::Skip),
            other => Err(format!(
                "unknown policy {other:?}, expected one of abort, fallback, skip"
            )),
        }
    }
}

impl fmt::Display for UnparsablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnparsablePolicy::Abort => "abort",
            UnparsablePolicy::Fallback => "fallback",
            UnparsablePolicy::Skip => "skip",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProcessOptions {
    pub delimiter: u8,
    pub on_unparsable: UnparsablePolicy,
    /// Pre-sizes the station map.
    pub expected_stations: usize,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            on_unparsable: UnparsablePolicy::Abort,
            expected_stations: 10_000,
        }
    }
}

impl ProcessOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_policy(mut self, policy: UnparsablePolicy) -> Self {
        self.on_unparsable = policy;
        self
    }

    pub fn with_expected_stations(mut self, expected: usize) -> Self {
        self.expected_stations = expected;
        self
    }
}
