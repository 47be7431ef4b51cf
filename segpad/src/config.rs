use std::env::var_os;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use segpad_gpio::GpioActiveLevel;

/// Timing and polarity settings, stored as JSON next to the binary
/// (or wherever `CONFIG_FILE` points).
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// How long a keypad contact must stay closed to count as a press.
    pub settle_ms: u64,
    /// Pause between two keypad scans.
    pub poll_interval_ms: u64,
    /// Whether the segments light up when driven low (common-anode display).
    pub segment_active_low: bool,
}

impl Config {
    pub fn path() -> PathBuf {
        var_os("CONFIG_FILE")
            .unwrap_or_else(|| OsString::from("config.json"))
            .into()
    }

    /// Reads the config at `path`. `Ok(None)` if there's no such file.
    ///
    /// A file that isn't valid config is left alone and the defaults are used.
    pub fn try_load(path: &Path) -> io::Result<Option<Self>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        match Self::from_reader(BufReader::new(file)) {
            Ok(config) => Ok(Some(config)),
            Err(e) => {
                warn!("Ignoring malformed {}, using defaults: {}", path.display(), e);
                Ok(Some(Self::default()))
            }
        }
    }

    /// Loads the config at `path`, writing out the defaults first if there's none yet.
    pub fn load_or_init(path: &Path) -> io::Result<Self> {
        if let Some(config) = Self::try_load(path)? {
            info!("Config loaded.");
            return Ok(config);
        }

        info!("Config not found. Using default");
        let config = Self::default();
        config.save(path)?;
        info!("Default config saved to {}.", path.display());
        Ok(config)
    }

    pub fn from_reader(reader: impl Read) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn settle_time(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn segment_polarity(&self) -> GpioActiveLevel {
        if self.segment_active_low {
            GpioActiveLevel::Low
        } else {
            GpioActiveLevel::High
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            settle_ms: 50,
            poll_interval_ms: 100,
            segment_active_low: true,
        }
    }
}
