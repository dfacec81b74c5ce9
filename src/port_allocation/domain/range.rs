//! Inclusive TCP port range value object.

use super::PortConfigError;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

const MIN_PORT: u32 = 1;
const MAX_PORT: u32 = 65_535;

/// Inclusive range of TCP ports, both bounds in `1..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Range scanned when no range is configured.
    pub const DEFAULT: Self = Self {
        start: 41_000,
        end: 41_999,
    };

    /// Creates a validated port range.
    ///
    /// Bounds are accepted as `u32` so that out-of-range requests such as
    /// `65536` surface as errors rather than wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`PortConfigError::PortOutOfRange`] when either bound is outside
    /// `1..=65535`, or [`PortConfigError::InvertedRange`] when
    /// `start > end`.
    pub fn new(start: u32, end: u32) -> Result<Self, PortConfigError> {
        let first = parse_bound(start)?;
        let last = parse_bound(end)?;
        if first > last {
            return Err(PortConfigError::InvertedRange { start, end });
        }

        Ok(Self {
            start: first,
            end: last,
        })
    }

    /// Creates a range holding exactly one port.
    ///
    /// # Errors
    ///
    /// Returns [`PortConfigError::PortOutOfRange`] when `port` is zero.
    pub fn single(port: u16) -> Result<Self, PortConfigError> {
        Self::new(u32::from(port), u32::from(port))
    }

    /// Returns the first port.
    #[must_use]
    pub const fn start(self) -> u16 {
        self.start
    }

    /// Returns the last port.
    #[must_use]
    pub const fn end(self) -> u16 {
        self.end
    }

    /// Returns how many ports the range holds.
    #[must_use]
    pub fn port_count(self) -> u32 {
        u32::from(self.end) - u32::from(self.start) + 1
    }

    /// Returns whether `port` lies within the range.
    #[must_use]
    pub const fn contains(self, port: u16) -> bool {
        port >= self.start && port <= self.end
    }

    /// Returns the candidate ports in ascending order.
    #[must_use]
    pub const fn iter(self) -> RangeInclusive<u16> {
        self.start..=self.end
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl IntoIterator for PortRange {
    type Item = u16;
    type IntoIter = RangeInclusive<u16>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PortRange {
    type Err = PortConfigError;

    /// Parses `"start-end"` or a single port `"N"` (meaning `N-N`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || PortConfigError::InvalidSpec(trimmed.to_owned());

        match trimmed.split_once('-') {
            Some((start, end)) => {
                let first = start.trim().parse::<u32>().map_err(|_| invalid())?;
                let last = end.trim().parse::<u32>().map_err(|_| invalid())?;
                Self::new(first, last)
            }
            None => {
                let port = trimmed.parse::<u32>().map_err(|_| invalid())?;
                Self::new(port, port)
            }
        }
    }
}

/// Parses a single port number such as the value of a fixed-port variable.
///
/// # Errors
///
/// Returns [`PortConfigError::InvalidSpec`] for non-numeric input and
/// [`PortConfigError::PortOutOfRange`] for numbers outside `1..=65535`.
pub fn parse_port(value: &str) -> Result<u16, PortConfigError> {
    let trimmed = value.trim();
    let port = trimmed
        .parse::<u32>()
        .map_err(|_| PortConfigError::InvalidSpec(trimmed.to_owned()))?;
    parse_bound(port)
}

fn parse_bound(port: u32) -> Result<u16, PortConfigError> {
    if !(MIN_PORT..=MAX_PORT).contains(&port) {
        return Err(PortConfigError::PortOutOfRange(port));
    }
    u16::try_from(port).map_err(|_| PortConfigError::PortOutOfRange(port))
}
