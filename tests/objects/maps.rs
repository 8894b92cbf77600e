use crate::common::{sample_image, test_data};
use flash_objects::{Array, FlashObject, FlashString, Map, ObjectView};

type Settings<'f> = Map<'f, FlashString<'f>, FlashString<'f>>;

#[test]
fn test_settings_lookup() {
    let (flash, addrs) = sample_image();
    let settings: Settings = Map::at(&flash, addrs.settings);

    assert_eq!(settings.length(), test_data::SETTINGS.len());
    for (index, (key, value)) in test_data::SETTINGS.iter().enumerate() {
        assert_eq!(settings.index_of(*key), Some(index));
        let pair = settings.get(*key);
        assert!(pair.is_present());
        assert_eq!(*pair.content(), *value);
    }
}

#[test]
fn test_missing_key_yields_empty_pair() {
    let (flash, addrs) = sample_image();
    let settings: Settings = Map::at(&flash, addrs.settings);

    assert_eq!(settings.index_of("gateway"), None);
    let pair = settings.get("gateway");
    assert!(!pair.is_present());
    assert_eq!(pair.key().length(), 0);
    assert_eq!(pair.content().length(), 0);

    // Keys are matched exactly
    assert_eq!(settings.index_of("SSID"), None);
    assert!(!settings.value_at(3).is_present());
}

#[test]
fn test_iterate_pairs() {
    let (flash, addrs) = sample_image();
    let settings: Settings = Map::at(&flash, addrs.settings);

    let entries: Vec<(String, String)> = settings
        .iter()
        .map(|pair| {
            let (key, value) = pair.into_parts();
            (key.to_string(), value.to_string())
        })
        .collect();
    let expected: Vec<(String, String)> = test_data::SETTINGS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(entries, expected);
}

#[test]
fn test_scalar_keyed_map() {
    let (flash, addrs) = sample_image();
    let ports: Map<u32, FlashString> = Map::at(&flash, addrs.ports);

    assert_eq!(ports.length(), 1);
    assert_eq!(*ports.get(&80).content(), "http");
    assert!(!ports.get(&443).is_present());

    // Same record seen with a different content type
    let raw: Map<u32, Array<u8>> = Map::at(&flash, addrs.ports);
    assert_eq!(raw.get(&80).content().to_vec(), b"http");
}
