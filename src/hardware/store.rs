// Multi-path fallback access to sysfs-style attribute files

use crate::error::AccessError;
use crate::models::{AttributeSpec, ReadResult, ValueDomain, WriteResult};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Raw file access used by the store.
/// The default implementation talks to the real filesystem; tests swap in
/// backends that fail in specific ways.
pub trait AttributeBackend {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn write_str(&self, path: &Path, value: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Backend over the real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct SysFs;

impl AttributeBackend for SysFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    /// Opens an existing file for writing; pseudo-files are never created.
    fn write_str(&self, path: &Path, value: &str) -> io::Result<()> {
        let mut file = fs::OpenOptions::new().write(true).truncate(true).open(path)?;
        file.write_all(value.as_bytes())
    }
}

/// Uniform read/write facade over hardware attribute files.
///
/// Every operation is a single synchronous attempt. Failures are classified
/// per candidate and logged, then folded into `ReadResult`/`WriteResult`;
/// nothing here panics or propagates an error to the caller.
#[derive(Clone, Debug, Default)]
pub struct HardwareAttributeStore<B = SysFs> {
    backend: B,
}

impl HardwareAttributeStore<SysFs> {
    pub fn new() -> Self {
        Self { backend: SysFs }
    }
}

impl<B: AttributeBackend> HardwareAttributeStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Reads the first candidate that can be read, trimmed.
    pub fn read(&self, spec: &AttributeSpec) -> ReadResult {
        for path in &spec.candidates {
            match self.read_path(path) {
                Ok(value) => {
                    debug!(attribute = spec.name, path = %path.display(), %value, "read attribute");
                    return ReadResult::Value(value);
                }
                Err(err) => {
                    warn!(attribute = spec.name, path = %path.display(), error = %err, "could not read candidate");
                }
            }
        }
        debug!(attribute = spec.name, "no readable candidate");
        ReadResult::Unavailable
    }

    /// Same as `read`; range checking is left to the caller and out-of-range
    /// values are passed through untouched.
    pub fn read_bounded(&self, spec: &AttributeSpec, min: i64, max: i64) -> ReadResult {
        let result = self.read(spec);
        if let Ok(Some(n)) = result.parsed::<i64>(spec.name) {
            if n < min || n > max {
                debug!(attribute = spec.name, value = n, min, max, "value outside expected range");
            }
        }
        result
    }

    /// Writes `value` verbatim to the first candidate that accepts it.
    ///
    /// Permission failures do not stop the search, a later candidate may
    /// still succeed. When nothing succeeds, `PermissionDenied` wins over any
    /// other recorded failure.
    pub fn write(&self, spec: &AttributeSpec, value: &str) -> WriteResult {
        let mut permission_denied = false;
        let mut last_error: Option<String> = None;

        for path in &spec.candidates {
            match self.backend.write_str(path, value) {
                Ok(()) => {
                    info!(attribute = spec.name, path = %path.display(), value, "wrote attribute");
                    return WriteResult::Ok;
                }
                Err(err) => {
                    let err = AccessError::from_io(path, err);
                    warn!(attribute = spec.name, error = %err, "could not write candidate");
                    if err.is_permission_denied() {
                        permission_denied = true;
                    } else {
                        last_error = Some(err.to_string());
                    }
                }
            }
        }

        if permission_denied {
            warn!(
                attribute = spec.name,
                "permission denied, try running the program with sudo"
            );
            WriteResult::PermissionDenied
        } else {
            let reason = last_error.unwrap_or_else(|| "no candidate paths".to_string());
            WriteResult::Failed(reason)
        }
    }

    /// Reads a whitespace-separated token list from one fixed path.
    /// Returns an empty list on any failure.
    pub fn list_choices(&self, path: &Path) -> Vec<String> {
        match self.read_path(path) {
            Ok(content) => {
                let choices: Vec<String> = content.split_whitespace().map(str::to_string).collect();
                debug!(path = %path.display(), ?choices, "available choices");
                choices
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not read choices");
                Vec::new()
            }
        }
    }

    /// Whether any candidate path of `spec` exists.
    pub fn exists(&self, spec: &AttributeSpec) -> bool {
        spec.candidates.iter().any(|p| self.backend.exists(p))
    }

    /// First candidate of `spec` that exists, without reading it.
    pub fn first_existing<'a>(&self, spec: &'a AttributeSpec) -> Option<&'a Path> {
        spec.candidates
            .iter()
            .map(|p| p.as_path())
            .find(|p| self.backend.exists(p))
    }

    /// Checks `value` against the attribute's domain.
    pub fn validate(&self, spec: &AttributeSpec, value: &str) -> Result<(), AccessError> {
        let invalid = |reason: String| AccessError::InvalidValue {
            attribute: spec.name.to_string(),
            value: value.to_string(),
            reason,
        };

        match &spec.domain {
            ValueDomain::Boolean => match value {
                "0" | "1" => Ok(()),
                _ => Err(invalid("expected 0 or 1".to_string())),
            },
            ValueDomain::IntRange { min, max } => {
                let n: i64 = value
                    .parse()
                    .map_err(|_| invalid("expected an integer".to_string()))?;
                if (*min..=*max).contains(&n) {
                    Ok(())
                } else {
                    Err(invalid(format!("expected {}..={}", min, max)))
                }
            }
            ValueDomain::Choices { path } => {
                let choices = self.list_choices(path);
                if choices.iter().any(|c| c == value) {
                    Ok(())
                } else if choices.is_empty() {
                    Err(invalid("no choices available".to_string()))
                } else {
                    Err(invalid(format!("expected one of: {}", choices.join(", "))))
                }
            }
            ValueDomain::ReadOnly => Err(invalid("attribute is read-only".to_string())),
        }
    }

    fn read_path(&self, path: &Path) -> Result<String, AccessError> {
        self.backend
            .read_to_string(path)
            .map(|s| s.trim().to_string())
            .map_err(|e| AccessError::from_io(path, e))
    }
}
