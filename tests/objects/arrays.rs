use crate::common::{sample_image, test_data};
use flash_objects::{Array, FlashObject, ObjectView};

#[test]
fn test_doubles_array() {
    let (flash, addrs) = sample_image();
    let doubles: Array<f64> = Array::at(&flash, addrs.doubles);

    assert_eq!(doubles.length(), 5);
    assert_eq!(doubles.size(), 40);
    assert_eq!(doubles.value_at(0), 3.14);
    assert_eq!(doubles.value_at(3), 1e8);
    assert_eq!(doubles.index_of(&47.0), Some(4));
    assert_eq!(doubles.index_of(&48.0), None);
    // Out of range reads the empty value rather than faulting
    assert_eq!(doubles.value_at(5), 0.0);
    assert_eq!(doubles.value_at(usize::MAX), 0.0);

    let collected: Vec<f64> = doubles.iter().collect();
    assert_eq!(collected, test_data::DOUBLES);
    assert_eq!(doubles.to_string(), "3.14, 53, 100, 100000000, 47");
}

#[test]
fn test_element_granular_reads() {
    let (flash, addrs) = sample_image();
    let doubles: Array<f64> = Array::at(&flash, addrs.doubles);

    let mut buf = [0u8; 20];
    assert_eq!(doubles.read(3, &mut buf), 2);
    assert_eq!(f64::from_le_bytes(buf[..8].try_into().unwrap()), 1e8);
    assert_eq!(f64::from_le_bytes(buf[8..16].try_into().unwrap()), 47.0);
    assert_eq!(doubles.read(5, &mut buf), 0);

    let mut values = [0f64; 8];
    assert_eq!(doubles.read_values(1, &mut values), 4);
    assert_eq!(&values[..4], &test_data::DOUBLES[1..]);
}

#[test]
fn test_device_path_matches_cached_path() {
    let (flash, addrs) = sample_image();
    let doubles: Array<f64> = Array::at(&flash, addrs.doubles);

    let mut cached = [0u8; 40];
    let mut device = [0u8; 40];
    assert_eq!(doubles.read(0, &mut cached), 5);
    assert_eq!(flash.device_reads(), 0);
    assert_eq!(doubles.read_flash(0, &mut device), 5);
    assert_eq!(flash.device_reads(), 1);
    assert_eq!(cached, device);
}
