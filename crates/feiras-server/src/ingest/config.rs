//! Import pipeline configuration

use serde::{Deserialize, Serialize};

use super::error::ImportError;

/// Default number of persistence workers.
pub const DEFAULT_IMPORT_WORKERS: usize = 8;

/// Default capacity of the record and error channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Persistence workers draining the record channel
    pub workers: usize,
    /// Bound of each channel between the reader and its consumers
    pub channel_capacity: usize,
    pub delimiter: u8,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_IMPORT_WORKERS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl ImportConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn validate(&self) -> Result<(), ImportError> {
        if self.workers == 0 {
            return Err(ImportError::Config("workers must be at least 1".to_string()));
        }
        if self.channel_capacity == 0 {
            return Err(ImportError::Config(
                "channel capacity must be at least 1".to_string(),
            ));
        }
        if matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(ImportError::Config(format!(
                "delimiter {:?} is not allowed",
                self.delimiter as char
            )));
        }
        Ok(())
    }
}
