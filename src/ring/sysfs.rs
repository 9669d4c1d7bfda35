//! # Linux sysfs GPIO host.
//!
//! Drives lines through the legacy `/sys/class/gpio` interface:
//! ```text
//! claim(n)     : gpioN/ must not exist → write "n" to export → "out" to gpioN/direction → "0" to gpioN/value
//! set_level(n) : "1" / "0" to gpioN/value
//! release(n)   : "0" to gpioN/value → "in" to gpioN/direction → "n" to unexport
//! ```
//! A line whose `gpioN/` directory already exists is reported as claimed by
//! another owner. The root directory is configurable so the layout can be
//! pointed at a scratch directory.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::LineError;
use crate::ring::OutputBank;

/// Default sysfs GPIO root.
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// Output host backed by sysfs GPIO files.
#[derive(Debug)]
pub struct SysfsBank {
    root: PathBuf,
    owned: Mutex<HashSet<u32>>,
}

impl Default for SysfsBank {
    fn default() -> Self {
        Self::new(SYSFS_GPIO_ROOT)
    }
}

impl SysfsBank {
    /// Creates a bank rooted at `root` (normally [`SYSFS_GPIO_ROOT`]).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            owned: Mutex::new(HashSet::new()),
        }
    }

    /// Root directory of the GPIO interface.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn line_dir(&self, line: u32) -> PathBuf {
        self.root.join(format!("gpio{line}"))
    }

    fn write(&self, line: u32, path: PathBuf, value: &str) -> Result<(), LineError> {
        fs::write(path, value).map_err(|source| LineError::Io { line, source })
    }

    fn is_owned(&self, line: u32) -> bool {
        self.owned
            .lock()
            .map(|owned| owned.contains(&line))
            .unwrap_or(false)
    }

    fn set_owned(&self, line: u32, owned: bool) {
        if let Ok(mut set) = self.owned.lock() {
            if owned {
                set.insert(line);
            } else {
                set.remove(&line);
            }
        }
    }
}

impl OutputBank for SysfsBank {
    fn claim(&self, line: u32, _consumer: &str) -> Result<(), LineError> {
        if !self.root.is_dir() {
            return Err(LineError::Io {
                line,
                source: io::Error::new(io::ErrorKind::NotFound, "gpio sysfs root missing"),
            });
        }
        let dir = self.line_dir(line);
        if dir.exists() {
            return Err(LineError::Claimed {
                line,
                owner: "sysfs export".to_string(),
            });
        }

        self.write(line, self.root.join("export"), &line.to_string())?;
        let configured = self
            .write(line, dir.join("direction"), "out")
            .and_then(|()| self.write(line, dir.join("value"), "0"));
        if let Err(e) = configured {
            let _ = fs::write(self.root.join("unexport"), line.to_string());
            return Err(e);
        }

        self.set_owned(line, true);
        Ok(())
    }

    fn release(&self, line: u32) {
        if !self.is_owned(line) {
            return;
        }
        let dir = self.line_dir(line);
        let _ = fs::write(dir.join("value"), "0");
        let _ = fs::write(dir.join("direction"), "in");
        let _ = fs::write(self.root.join("unexport"), line.to_string());
        self.set_owned(line, false);
    }

    fn set_level(&self, line: u32, on: bool) -> Result<(), LineError> {
        if !self.is_owned(line) {
            return Err(LineError::NotClaimed { line });
        }
        self.write(line, self.line_dir(line).join("value"), if on { "1" } else { "0" })
    }

    fn name(&self) -> &'static str {
        "sysfs"
    }
}
