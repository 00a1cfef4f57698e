// Hardware access: attribute store, path catalogue and sensor readers

// Fixed attribute locations
mod catalog;
// Fan, battery and CPU readings
mod sensors;
// Multi-path read/write facade
mod store;
// Scripted backend shared by tests
#[cfg(test)]
pub mod testing;

pub use catalog::Catalog;
pub use sensors::{CpuSampler, read_battery, read_fan_speed, read_kbd_max_brightness};
pub use store::{AttributeBackend, HardwareAttributeStore};
