// Headless commands: print or change attributes without opening the panel

use crate::hardware::{
    AttributeBackend, Catalog, CpuSampler, HardwareAttributeStore, read_battery, read_fan_speed,
    read_kbd_max_brightness,
};
use crate::models::{AttributeSpec, CpuUsage, PERMISSION_HINT, ReadResult, ValueDomain, WriteResult};
use anyhow::{Context, Result, anyhow, bail};
use std::io::Write;
use std::thread;
use std::time::Duration;

/// Gap between the two /proc/stat samples taken by `status`
const CPU_SAMPLE_GAP: Duration = Duration::from_millis(250);

/// Prints every attribute followed by fan, battery and CPU readings.
pub fn status<B: AttributeBackend>(
    store: &HardwareAttributeStore<B>,
    catalog: &Catalog,
    out: &mut impl Write,
) -> Result<()> {
    for spec in catalog.attributes() {
        if spec.name == catalog.fan_speed.name {
            continue;
        }
        let value = store.read(spec);
        writeln!(out, "{:<30} {}", spec.name, value.value().unwrap_or("Not available"))?;
    }

    let fan = match read_fan_speed(store, catalog) {
        Ok(Some(rpm)) => format!("{} RPM", rpm),
        Ok(None) => "Not available".to_string(),
        Err(_) => "Error reading fan speed".to_string(),
    };
    writeln!(out, "{:<30} {}", "fan_speed", fan)?;

    let battery = match read_battery(store, catalog) {
        Some(b) if b.charging => format!("Charging: {}%", b.percentage),
        Some(b) => format!("Battery: {}%", b.percentage),
        None => "N/A".to_string(),
    };
    writeln!(out, "{:<30} {}", "battery", battery)?;

    let mut sampler = CpuSampler::new();
    let mut usage = sampler.sample(store, catalog);
    if usage == CpuUsage::Sampling {
        thread::sleep(CPU_SAMPLE_GAP);
        usage = sampler.sample(store, catalog);
    }
    writeln!(out, "{:<30} {}", "cpu_usage", usage)?;

    Ok(())
}

/// Prints one attribute; unavailable is an error.
pub fn get<B: AttributeBackend>(
    store: &HardwareAttributeStore<B>,
    catalog: &Catalog,
    attribute: &str,
    out: &mut impl Write,
) -> Result<()> {
    let spec = lookup(catalog, attribute)?;
    match store.read(spec) {
        ReadResult::Value(v) => writeln!(out, "{}", v).context("writing output"),
        ReadResult::Unavailable => bail!("{} is not available", attribute),
    }
}

/// Validates and writes one attribute.
pub fn set<B: AttributeBackend>(
    store: &HardwareAttributeStore<B>,
    catalog: &Catalog,
    attribute: &str,
    value: &str,
) -> Result<()> {
    let mut spec = lookup(catalog, attribute)?.clone();
    // The backlight ceiling comes from the driver, not the static table
    if spec.name == catalog.kbd_backlight_brightness.name {
        spec.domain = ValueDomain::IntRange {
            min: 0,
            max: read_kbd_max_brightness(store, catalog),
        };
    }
    store.validate(&spec, value)?;

    match store.write(&spec, value) {
        WriteResult::Ok => Ok(()),
        WriteResult::PermissionDenied => bail!("{}: {}", attribute, PERMISSION_HINT),
        WriteResult::Failed(reason) => bail!("failed to write {}: {}", attribute, reason),
    }
}

/// Prints platform profile choices, one per line.
pub fn choices<B: AttributeBackend>(
    store: &HardwareAttributeStore<B>,
    catalog: &Catalog,
    out: &mut impl Write,
) -> Result<()> {
    let choices = store.list_choices(&catalog.platform_profile_choices);
    if choices.is_empty() {
        bail!("no platform profiles available");
    }
    for choice in choices {
        writeln!(out, "{}", choice)?;
    }
    Ok(())
}

fn lookup<'a>(catalog: &'a Catalog, attribute: &str) -> Result<&'a AttributeSpec> {
    catalog.find(attribute).ok_or_else(|| {
        let known: Vec<&str> = catalog.attributes().iter().map(|s| s.name).collect();
        anyhow!("unknown attribute {:?} (known: {})", attribute, known.join(", "))
    })
}
