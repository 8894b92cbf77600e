use crate::common::{sample_image, test_data};
use flash_objects::{FlashObject, FlashString, ObjectView};
use std::io::{Read, Seek, SeekFrom};

#[test]
fn test_stream_whole_payload() {
    let (flash, addrs) = sample_image();
    let greeting = FlashString::at(&flash, addrs.greeting_alias);

    let mut text = String::new();
    greeting.stream().read_to_string(&mut text).unwrap();
    assert_eq!(text, test_data::GREETING);
}

#[test]
fn test_stream_seek_and_device_reads() {
    let (flash, addrs) = sample_image();
    let greeting = FlashString::at(&flash, addrs.greeting);

    let mut stream = greeting.stream().with_device_reads(true);
    stream.seek(SeekFrom::Start(6)).unwrap();
    let mut word = [0u8; 4];
    stream.read_exact(&mut word).unwrap();
    assert_eq!(&word, b"from");
    assert_eq!(stream.position(), 10);
    assert_eq!(stream.remaining(), test_data::GREETING.len() - 10);
    assert!(flash.device_reads() >= 1);

    let err = stream.seek(SeekFrom::End(1)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}
