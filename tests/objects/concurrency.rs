use crate::common::{sample_image, test_data};
use flash_objects::{Array, FlashObject, FlashString, Map, ObjectView, Vector};
use rayon::prelude::*;

#[test]
fn test_parallel_readers() {
    let (flash, addrs) = sample_image();

    let hits: usize = (0..10_000usize)
        .into_par_iter()
        .map(|i| {
            let doubles: Array<f64> = Array::at(&flash, addrs.doubles);
            let names: Vector<FlashString> = Vector::at(&flash, addrs.names);
            let settings: Map<FlashString, FlashString> = Map::at(&flash, addrs.settings);

            let index = i % 6;
            let expected = test_data::DOUBLES.get(index).copied().unwrap_or(0.0);
            assert_eq!(doubles.value_at(index), expected);
            assert_eq!(names.index_of_str("beta", true), Some(1));
            usize::from(settings.get("hostname").content() == "sensor-07")
        })
        .sum();
    assert_eq!(hits, 10_000);
}

#[test]
fn test_shared_views_across_threads() {
    let (flash, addrs) = sample_image();
    let names: Vector<FlashString> = Vector::at(&flash, addrs.names);

    let lengths: Vec<usize> = (0..names.length())
        .into_par_iter()
        .map(|i| names.value_at(i).length())
        .collect();
    assert_eq!(lengths, vec![5, 4, 5]);
}
