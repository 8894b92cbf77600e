use crate::common::{sample_builder, test_data, test_utils::create_temp_file};
use flash_objects::memory::error::MemoryError;
use flash_objects::{
    Array, FlashConfig, FlashError, FlashImage, FlashMemory, FlashString, ImageLimits, Map,
    ObjectView, Vector,
};

#[test]
fn test_open_file_image() {
    let (builder, addrs) = sample_builder();
    let file = create_temp_file(&builder.into_bytes());
    let image = FlashImage::open(file.path(), FlashConfig::default()).unwrap();

    let doubles: Array<f64> = image.get(addrs.doubles).unwrap();
    assert_eq!(doubles.to_vec(), test_data::DOUBLES);

    let names: Vector<FlashString> = image.get(addrs.names).unwrap();
    assert_eq!(names.index_of_str("gamma", true), Some(2));

    let settings: Map<FlashString, FlashString> = image.get(addrs.settings).unwrap();
    assert_eq!(*settings.get("ssid").content(), "esp-net");

    let greeting: FlashString = image.get(addrs.greeting_alias).unwrap();
    assert_eq!(greeting, test_data::GREETING);
    let mut buf = [0u8; 5];
    assert_eq!(greeting.read_flash(0, &mut buf), 5);
    assert_eq!(&buf, b"Hello");
}

#[test]
fn test_file_image_matches_memory_image() {
    let (builder, addrs) = sample_builder();
    let bytes = builder.clone().into_bytes();
    let file = create_temp_file(&bytes);
    let from_file = FlashImage::open(file.path(), FlashConfig::default()).unwrap();
    let memory = builder.finish("memory");

    assert_eq!(from_file.flash().as_bytes(), memory.as_bytes());
    let all = [
        addrs.doubles,
        addrs.names,
        addrs.settings,
        addrs.greeting,
        addrs.greeting_alias,
        addrs.ports,
    ];
    assert!(from_file.validate_records(&all).iter().all(|r| r.is_ok()));
}

#[test]
fn test_file_image_limits() {
    let (builder, _) = sample_builder();
    let file = create_temp_file(&builder.into_bytes());
    let config = FlashConfig {
        limits: ImageLimits { max_image_size: 16 },
        ..FlashConfig::default()
    };

    let err = FlashImage::open(file.path(), config).unwrap_err();
    assert!(matches!(
        err,
        FlashError::Memory(MemoryError::FileTooLarge { limit: 16, .. })
    ));
}

#[test]
fn test_config_from_file() {
    let file = create_temp_file(br#"{"base_address": 1073741824, "validate_on_access": false}"#);
    let config = FlashConfig::from_file(file.path()).unwrap();
    assert_eq!(config.base_address, 0x4000_0000);
    assert!(!config.validate_on_access);
    assert_eq!(config.device_read_chunk, 4096);

    let missing = FlashConfig::from_file("/nonexistent/flash.json").unwrap_err();
    assert!(matches!(missing, FlashError::Io(_)));
}
