use crate::common::{sample_image, test_data};
use flash_objects::{FlashObject, FlashString, ObjectView, Vector};

#[test]
fn test_case_insensitive_lookup() {
    let (flash, addrs) = sample_image();
    let names: Vector<FlashString> = Vector::at(&flash, addrs.names);

    assert_eq!(names.length(), test_data::NAMES.len());
    assert_eq!(names.index_of_str("alpha", true), Some(0));
    assert_eq!(names.index_of_str("alpha", false), None);
    assert_eq!(names.index_of_str("GAMMA", true), Some(2));
    assert_eq!(names.index_of_str("Delta", true), None);
    assert_eq!(names.index_of("Beta"), Some(1));
}

#[test]
fn test_elements_and_bounds() {
    let (flash, addrs) = sample_image();
    let names: Vector<FlashString> = Vector::at(&flash, addrs.names);

    let collected: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    assert_eq!(collected, test_data::NAMES);
    assert_eq!(names.to_string(), "Alpha, Beta, Gamma");
    assert_eq!(names.printer("/").to_string(), "Alpha/Beta/Gamma");

    let past_end = names.value_at(names.length());
    assert!(past_end.is_empty());
    assert_eq!(past_end, "");
}

#[test]
fn test_iterator_positions() {
    let (flash, addrs) = sample_image();
    let names: Vector<FlashString> = Vector::at(&flash, addrs.names);

    let mut it = names.begin();
    assert_ne!(it, names.end());
    for _ in 0..names.length() {
        it.next();
    }
    assert_eq!(it, names.end());
    assert!(it.next().is_none());
}
