//! Policy Handle Tests
//!
//! Construction from text, the two renderings, and the 20-byte layout.

mod common;

use common::*;
use librpc_misc::{Guid, MiscError, PolicyHandle, POLICY_HANDLE_SIZE};
use proptest::prelude::*;

proptest! {
    #[test]
    fn renderings_follow_parts(handle_type in any::<i32>(), guid in arb_guid()) {
        let text = guid.to_string();
        let handle = PolicyHandle::new(handle_type, Some(text.as_str())).unwrap();
        prop_assert_eq!(handle.to_string(), format!("{}, {}", handle_type, text));
        prop_assert_eq!(format!("{:?}", handle), format!("policy_handle({}, '{}')", handle_type, text));
        prop_assert_eq!(handle.uuid(), guid);
        prop_assert_eq!(handle.handle_type(), handle_type);
    }

    #[test]
    fn bytes_roundtrip(bytes in any::<[u8; 20]>()) {
        let handle = PolicyHandle::parse_bytes(&bytes).unwrap();
        prop_assert_eq!(handle.to_bytes(), bytes);
    }

    #[test]
    fn layout_is_type_then_guid(handle_type in any::<i32>(), guid in arb_guid()) {
        let bytes = PolicyHandle::from_parts(handle_type, guid).to_bytes();
        prop_assert_eq!(bytes.len(), POLICY_HANDLE_SIZE);
        prop_assert_eq!(&bytes[..4], &handle_type.to_be_bytes()[..]);
        prop_assert_eq!(&bytes[4..], &guid.to_bytes()[..]);
    }
}

#[test]
fn test_composition() {
    let handle = PolicyHandle::new(5, Some("abcdefab-0000-0000-0000-000000000001")).unwrap();
    assert_eq!(handle.to_string(), "5, abcdefab-0000-0000-0000-000000000001");
    assert_eq!(
        format!("{:?}", handle),
        "policy_handle(5, 'abcdefab-0000-0000-0000-000000000001')"
    );
}

#[test]
fn test_negative_type_tag() {
    let handle = PolicyHandle::new(-1, Some("abcdefab-0000-0000-0000-000000000001")).unwrap();
    assert_eq!(handle.to_string(), "-1, abcdefab-0000-0000-0000-000000000001");
    assert_eq!(
        format!("{:?}", handle),
        "policy_handle(-1, 'abcdefab-0000-0000-0000-000000000001')"
    );

    let all_ones = PolicyHandle::parse_bytes(&[0xff; POLICY_HANDLE_SIZE]).unwrap();
    assert_eq!(all_ones.handle_type(), -1);
    assert!(all_ones.to_string().starts_with("-1, "));
}

#[test]
fn test_empty_construction() {
    let handle = PolicyHandle::new(0, None).unwrap();
    assert!(handle.is_empty());
    assert_eq!(handle.uuid(), Guid::NIL);
    assert_eq!(handle.to_bytes(), [0u8; POLICY_HANDLE_SIZE]);
}

#[test]
fn test_malformed_uuid() {
    assert!(matches!(PolicyHandle::new(0, Some("bad")), Err(MiscError::InvalidFormat(_))));
    assert!(matches!(
        PolicyHandle::new(1, Some("{abcdefab-0000-0000-0000-000000000001}")),
        Err(MiscError::InvalidFormat(_))
    ));
}

#[test]
fn test_replayed_handle_correlates() {
    // A client holds the handle it was given and presents it back verbatim
    let issued = PolicyHandle::from_parts(1, Guid::random());
    let wire = issued.to_bytes();
    let presented = PolicyHandle::parse_bytes(&wire).unwrap();

    assert_eq!(presented.handle_type(), issued.handle_type());
    assert_eq!(presented.uuid(), issued.uuid());
    assert_eq!(presented.to_string(), issued.to_string());
}
