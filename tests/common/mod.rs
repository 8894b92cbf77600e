//! Common test utilities and helpers.
//!
//! Integration tests share one settings-style image laid out the way
//! firmware resources typically are.

pub mod test_utils;

use flash_objects::{FlashAddr, ImageBuilder, MemoryFlash, DEFAULT_FLASH_BASE};

/// Addresses of the records in [`sample_image`].
#[derive(Debug, Clone, Copy)]
pub struct SampleAddrs {
    pub doubles: FlashAddr,
    pub names: FlashAddr,
    pub settings: FlashAddr,
    pub greeting: FlashAddr,
    pub greeting_alias: FlashAddr,
    pub ports: FlashAddr,
}

/// Common test data and constants
pub mod test_data {
    pub const DOUBLES: [f64; 5] = [3.14, 53.0, 100.0, 1e8, 47.0];
    pub const NAMES: [&str; 3] = ["Alpha", "Beta", "Gamma"];
    pub const SETTINGS: [(&str, &str); 3] = [
        ("ssid", "esp-net"),
        ("password", "hunter2"),
        ("hostname", "sensor-07"),
    ];
    pub const GREETING: &str = "Hello from flash";
}

/// Lays out the sample records and returns the builder with their addresses.
pub fn sample_builder() -> (ImageBuilder, SampleAddrs) {
    let mut builder = ImageBuilder::new(DEFAULT_FLASH_BASE);

    let doubles = builder.add_array(&test_data::DOUBLES);

    let names: Vec<FlashAddr> = test_data::NAMES
        .iter()
        .map(|name| builder.add_str(name))
        .collect();
    let names = builder.add_vector(&names);

    let settings: Vec<(FlashAddr, FlashAddr)> = test_data::SETTINGS
        .iter()
        .map(|(key, value)| (builder.add_str(key), builder.add_str(value)))
        .collect();
    let settings = builder.add_map(&settings);

    let greeting = builder.add_str(test_data::GREETING);
    let greeting_alias = builder.add_indirection(greeting);

    let http = builder.add_str("http");
    let ports = builder.add_keyed_map(&[(80u32, http)]);

    let addrs = SampleAddrs {
        doubles,
        names,
        settings,
        greeting,
        greeting_alias,
        ports,
    };
    (builder, addrs)
}

/// The sample image as an in-memory region.
pub fn sample_image() -> (MemoryFlash, SampleAddrs) {
    let (builder, addrs) = sample_builder();
    (builder.finish("sample"), addrs)
}
