// Data models for hardware attributes and sensor readings

use crate::error::AccessError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Shown next to a control whose write was refused
pub const PERMISSION_HINT: &str = "Permission denied. Run the program with sudo.";

/// Range of values an attribute accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueDomain {
    /// Literal "1" or "0"
    Boolean,
    /// Inclusive integer range
    IntRange { min: i64, max: i64 },
    /// One of the whitespace-separated tokens listed in a companion file
    Choices { path: PathBuf },
    /// Sensor value; headless writes are rejected
    ReadOnly,
}

/// Static description of a hardware attribute.
/// Candidate paths are tried strictly in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeSpec {
    /// Logical name (e.g. usb_charge, platform_profile)
    pub name: &'static str,
    /// Ordered candidate locations; the first that works wins
    pub candidates: Vec<PathBuf>,
    /// Accepted values
    pub domain: ValueDomain,
}

impl AttributeSpec {
    /// Creates a spec with an explicit candidate list.
    pub fn new(name: &'static str, candidates: Vec<PathBuf>, domain: ValueDomain) -> Self {
        Self {
            name,
            candidates,
            domain,
        }
    }

    /// Creates a spec backed by a single path.
    pub fn single(name: &'static str, path: impl Into<PathBuf>, domain: ValueDomain) -> Self {
        Self::new(name, vec![path.into()], domain)
    }

    /// Narrows this spec to one of its candidates, keeping name and domain.
    pub fn pinned_to(&self, path: &Path) -> Self {
        Self::single(self.name, path, self.domain.clone())
    }
}

/// Outcome of reading an attribute. Never carries an error; per-path
/// failures are logged by the store.
#[derive(Clone, Debug, PartialEq)]
pub enum ReadResult {
    /// Trimmed content of the first readable candidate
    Value(String),
    /// Every candidate was missing or unreadable
    Unavailable,
}

impl ReadResult {
    pub fn value(&self) -> Option<&str> {
        match self {
            ReadResult::Value(v) => Some(v),
            ReadResult::Unavailable => None,
        }
    }

    /// Parses the value as a number.
    /// Returns `Ok(None)` when unavailable and `Parse` for non-numeric content.
    pub fn parsed<T: FromStr>(&self, attribute: &str) -> Result<Option<T>, AccessError> {
        match self {
            ReadResult::Unavailable => Ok(None),
            ReadResult::Value(v) => v.parse().map(Some).map_err(|_| AccessError::Parse {
                attribute: attribute.to_string(),
                value: v.clone(),
            }),
        }
    }
}

/// Outcome of writing an attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteResult {
    Ok,
    /// At least one candidate refused the write for lack of privileges
    PermissionDenied,
    /// No candidate accepted the write; carries the last error
    Failed(String),
}

impl WriteResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, WriteResult::Ok)
    }
}

/// Battery charge level and charging state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatteryInfo {
    /// Charge level in percent (0-100)
    pub percentage: u8,
    /// True when the status file reports "Charging"
    pub charging: bool,
}

/// Result of one CPU usage sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CpuUsage {
    /// First sample taken; no baseline to compare against yet
    Sampling,
    /// Busy percentage since the previous sample
    Percent(f64),
    /// /proc/stat could not be read or parsed
    Unavailable,
}

impl std::fmt::Display for CpuUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CpuUsage::Sampling => write!(f, "..."),
            CpuUsage::Percent(p) => write!(f, "{:.1}%", p),
            CpuUsage::Unavailable => write!(f, "N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_distinguishes_missing_from_garbage() {
        let ok = ReadResult::Value("2400".into());
        assert_eq!(ok.parsed::<u32>("fan1_input").unwrap(), Some(2400));

        let missing = ReadResult::Unavailable;
        assert_eq!(missing.parsed::<u32>("fan1_input").unwrap(), None);

        let garbage = ReadResult::Value("n/a".into());
        let err = garbage.parsed::<u32>("fan1_input").unwrap_err();
        assert!(matches!(err, AccessError::Parse { .. }));
    }

    #[test]
    fn cpu_usage_display() {
        assert_eq!(CpuUsage::Sampling.to_string(), "...");
        assert_eq!(CpuUsage::Percent(12.345).to_string(), "12.3%");
        assert_eq!(CpuUsage::Unavailable.to_string(), "N/A");
    }

    #[test]
    fn pinned_spec_keeps_domain() {
        let spec = AttributeSpec::new(
            "kbd_backlight_brightness",
            vec![PathBuf::from("/a"), PathBuf::from("/b")],
            ValueDomain::IntRange { min: 0, max: 3 },
        );
        let pinned = spec.pinned_to(Path::new("/b"));
        assert_eq!(pinned.candidates, vec![PathBuf::from("/b")]);
        assert_eq!(pinned.domain, spec.domain);
    }
}
