// Error types for hardware attribute access and configuration

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Classified failure of a single attempt against one candidate path.
/// These never escape the attribute store as fatal errors; they are logged and
/// folded into a `ReadResult` or `WriteResult`.
#[derive(Error, Debug)]
pub enum AccessError {
    /// The candidate path does not exist
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    /// The process lacks permission to open the path
    #[error("permission denied on {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// Any other read/write failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Content was not the number the caller expected
    #[error("{attribute}: expected a number, found {value:?}")]
    Parse { attribute: String, value: String },

    /// Value rejected by the attribute's domain before writing
    #[error("{attribute}: invalid value {value:?} ({reason})")]
    InvalidValue {
        attribute: String,
        value: String,
        reason: String,
    },
}

impl AccessError {
    /// Classifies an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => AccessError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => AccessError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => AccessError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, AccessError::PermissionDenied { .. })
    }
}

/// Errors raised while loading the optional configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_io_error_kinds() {
        let path = Path::new("/sys/firmware/acpi/platform_profile");

        let err = AccessError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, AccessError::NotFound { .. }));

        let err = AccessError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(err.is_permission_denied());

        let err = AccessError::from_io(path, io::Error::other("device busy"));
        assert!(matches!(err, AccessError::Io { .. }));
        assert!(err.to_string().contains("device busy"));
    }

    #[test]
    fn messages_name_the_path() {
        let err = AccessError::PermissionDenied {
            path: PathBuf::from("/dev/samsung-galaxybook/usb_charge"),
        };
        assert_eq!(
            err.to_string(),
            "permission denied on /dev/samsung-galaxybook/usb_charge"
        );
    }
}
