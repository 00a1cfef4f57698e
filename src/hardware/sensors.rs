//! Fan, battery and CPU readings built on the attribute store.

use super::catalog::{Catalog, DEFAULT_KBD_MAX_BRIGHTNESS};
use super::store::{AttributeBackend, HardwareAttributeStore};
use crate::error::AccessError;
use crate::models::{BatteryInfo, CpuUsage, ReadResult};
use tracing::{error, warn};

/// Reads the fan speed in RPM from the first hwmon slot that has a fan.
///
/// `Ok(None)` means no fan input exists or it could not be read;
/// non-numeric content is a `Parse` error.
pub fn read_fan_speed<B: AttributeBackend>(
    store: &HardwareAttributeStore<B>,
    catalog: &Catalog,
) -> Result<Option<u32>, AccessError> {
    // Only the first existing slot counts; absent slots are normal, not warnings.
    let Some(path) = store.first_existing(&catalog.fan_speed) else {
        return Ok(None);
    };
    let spec = catalog.fan_speed.pinned_to(path);
    store.read(&spec).parsed(spec.name)
}

/// Reads battery capacity and charging state. Any failure yields `None`.
pub fn read_battery<B: AttributeBackend>(
    store: &HardwareAttributeStore<B>,
    catalog: &Catalog,
) -> Option<BatteryInfo> {
    let capacity = store.read(&catalog.battery_capacity);
    let percentage = match capacity.parsed::<u8>(catalog.battery_capacity.name) {
        Ok(Some(p)) => p,
        Ok(None) => {
            error!("error reading battery info: capacity unavailable");
            return None;
        }
        Err(err) => {
            error!(error = %err, "error reading battery info");
            return None;
        }
    };

    let ReadResult::Value(status) = store.read(&catalog.battery_status) else {
        error!("error reading battery info: status unavailable");
        return None;
    };

    Some(BatteryInfo {
        percentage,
        charging: status == "Charging",
    })
}

/// Highest keyboard backlight level the driver reports, or
/// `DEFAULT_KBD_MAX_BRIGHTNESS` when max_brightness is missing or garbage.
pub fn read_kbd_max_brightness<B: AttributeBackend>(
    store: &HardwareAttributeStore<B>,
    catalog: &Catalog,
) -> i64 {
    let spec = &catalog.kbd_backlight_max_brightness;
    match store.read(spec).parsed::<i64>(spec.name) {
        Ok(Some(max)) => max,
        Ok(None) => DEFAULT_KBD_MAX_BRIGHTNESS,
        Err(err) => {
            warn!(error = %err, "could not read max brightness");
            DEFAULT_KBD_MAX_BRIGHTNESS
        }
    }
}

/// Aggregate jiffy counters from the first line of /proc/stat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CpuTimes {
    pub total: f64,
    pub idle: f64,
}

impl CpuTimes {
    /// Parses a line like `cpu  4705 356 584 3699 23 23 0 0 0 0`.
    pub fn parse(line: &str) -> Result<Self, AccessError> {
        let parse_error = || AccessError::Parse {
            attribute: "cpu_stat".to_string(),
            value: line.to_string(),
        };

        let fields = line
            .split_whitespace()
            .skip(1)
            .map(|f| f.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| parse_error())?;

        let idle = *fields.get(3).ok_or_else(parse_error)?;
        Ok(Self {
            total: fields.iter().sum(),
            idle,
        })
    }

    /// Busy percentage between `previous` and `self`, rounded half up to a
    /// tenth of a percent.
    pub fn usage_since(&self, previous: &CpuTimes) -> f64 {
        let diff_idle = self.idle - previous.idle;
        let diff_total = self.total - previous.total;
        if diff_total <= 0.0 {
            return 0.0;
        }
        (1000.0 * (diff_total - diff_idle) / diff_total + 5.0) / 10.0
    }
}

/// Keeps the previous /proc/stat sample so each poll reports usage over the
/// last interval.
#[derive(Debug, Default)]
pub struct CpuSampler {
    previous: Option<CpuTimes>,
}

impl CpuSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample<B: AttributeBackend>(
        &mut self,
        store: &HardwareAttributeStore<B>,
        catalog: &Catalog,
    ) -> CpuUsage {
        let ReadResult::Value(content) = store.read(&catalog.cpu_stat) else {
            return CpuUsage::Unavailable;
        };
        let first_line = content.lines().next().unwrap_or_default();

        match CpuTimes::parse(first_line) {
            Ok(current) => self.record(current),
            Err(err) => {
                warn!(error = %err, "error reading CPU usage");
                CpuUsage::Unavailable
            }
        }
    }

    /// Feeds one sample; the sample becomes the baseline for the next call.
    pub fn record(&mut self, current: CpuTimes) -> CpuUsage {
        let usage = match self.previous {
            Some(previous) => CpuUsage::Percent(current.usage_since(&previous)),
            None => CpuUsage::Sampling,
        };
        self.previous = Some(current);
        usage
    }
}
