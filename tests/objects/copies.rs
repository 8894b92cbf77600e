use crate::common::{sample_image, test_data};
use flash_objects::object::ObjectRef;
use flash_objects::{FlashObject, FlashString, ObjectView, Vector};

#[test]
fn test_copy_of_copy_refers_to_original() {
    let (flash, addrs) = sample_image();
    let original = FlashString::at(&flash, addrs.greeting);
    let copy = original.clone();
    let copy_of_copy = copy.clone();

    assert!(!original.is_copy());
    assert!(copy.is_copy());
    assert!(copy_of_copy.is_copy());
    assert_eq!(
        copy_of_copy.base().repr(),
        ObjectRef::Indirect {
            target: addrs.greeting
        }
    );
    assert_eq!(copy_of_copy.address(), original.address());
    assert_eq!(copy_of_copy, test_data::GREETING);
    assert_eq!(copy_of_copy.length(), original.length());
}

#[test]
fn test_indirection_record_in_image() {
    let (flash, addrs) = sample_image();
    let alias = FlashString::at(&flash, addrs.greeting_alias);

    assert!(alias.is_copy());
    assert_eq!(alias.address(), addrs.greeting);
    assert_eq!(alias, test_data::GREETING);
    assert_eq!(alias.clone().address(), addrs.greeting);
}

#[test]
fn test_copied_container_behaves_like_original() {
    let (flash, addrs) = sample_image();
    let names: Vector<FlashString> = Vector::at(&flash, addrs.names);
    let copy = names.clone();

    assert!(copy.is_copy());
    assert_eq!(copy.length(), names.length());
    assert_eq!(copy.index_of_str("beta", true), Some(1));
}

#[test]
fn test_read_clipping() {
    let (flash, addrs) = sample_image();
    let greeting = FlashString::at(&flash, addrs.greeting);
    let len = test_data::GREETING.len();

    let mut buf = [0u8; 64];
    assert_eq!(greeting.read(0, &mut buf), len);
    assert_eq!(&buf[..len], test_data::GREETING.as_bytes());
    assert_eq!(greeting.read(len - 5, &mut buf), 5);
    assert_eq!(&buf[..5], b"flash");
    assert_eq!(greeting.read(len, &mut buf), 0);
    assert_eq!(greeting.read_flash(len + 10, &mut buf), 0);
}
