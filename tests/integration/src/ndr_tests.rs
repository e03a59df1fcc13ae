//! NDR Tests - identifiers embedded in stub data
//!
//! A typical request body carries a policy handle followed by other
//! arguments; these tests build such bodies and decode them back in both
//! byte orders.

mod common;

use bytes::{Buf, BufMut, BytesMut};
use common::*;
use librpc_misc::{Guid, MiscError, NdrContext, NdrDecode, NdrEncode, PolicyHandle};
use proptest::prelude::*;

/// `LsarClose(policy_handle)`-style body: one byte of flags, then a handle,
/// then an access mask
fn encode_request(handle: &PolicyHandle, access_mask: u32, ctx: &NdrContext) -> BytesMut {
    let mut buf = BytesMut::new();
    let mut pos = 0;
    buf.put_u8(1);
    pos += 1;
    handle.ndr_encode(&mut buf, ctx, &mut pos).unwrap();
    ctx.put_u32(&mut buf, access_mask);
    buf
}

proptest! {
    #[test]
    fn request_roundtrip(
        handle_type in any::<i32>(),
        guid in arb_guid(),
        access_mask in any::<u32>(),
        little_endian in any::<bool>(),
    ) {
        let ctx = NdrContext::with_byte_order(little_endian);
        let handle = PolicyHandle::from_parts(handle_type, guid);
        let body = encode_request(&handle, access_mask, &ctx);
        prop_assert_eq!(body.len(), 1 + 3 + 20 + 4);

        let mut reader = body.freeze();
        let mut pos = 0;
        reader.advance(1);
        pos += 1;
        let decoded = PolicyHandle::ndr_decode(&mut reader, &ctx, &mut pos).unwrap();
        prop_assert_eq!(pos, 24);
        prop_assert_eq!(decoded.handle_type(), handle_type);
        prop_assert_eq!(decoded.uuid(), guid);
        prop_assert_eq!(ctx.get_u32(&mut reader), access_mask);
    }

    #[test]
    fn truncated_body_consumes_nothing(guid in arb_guid(), cut in 0usize..20) {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;
        PolicyHandle::from_parts(2, guid).ndr_encode(&mut buf, &ctx, &mut pos).unwrap();

        let mut reader = &buf[..cut];
        let mut pos = 0;
        let underflow = matches!(
            PolicyHandle::ndr_decode(&mut reader, &ctx, &mut pos),
            Err(MiscError::BufferUnderflow { needed: 20, .. })
        );
        prop_assert!(underflow);
        prop_assert_eq!(reader.len(), cut);
        prop_assert_eq!(pos, 0);
    }
}

#[test]
fn test_guid_array_layout() {
    let ctx = NdrContext::new();
    let guids = [Guid::random(), Guid::NIL, Guid::random()];
    let mut buf = BytesMut::new();
    let mut pos = 0;
    for guid in &guids {
        guid.ndr_encode(&mut buf, &ctx, &mut pos).unwrap();
    }
    assert_eq!(buf.len(), 48);
    assert_eq!(guids[0].ndr_size(), 16);
    assert_eq!(<Guid as NdrEncode>::ndr_align(), 4);
    assert_eq!(<PolicyHandle as NdrDecode>::ndr_align(), 4);

    let mut reader = buf.freeze();
    let mut pos = 0;
    for guid in &guids {
        assert_eq!(Guid::ndr_decode(&mut reader, &ctx, &mut pos).unwrap(), *guid);
    }
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_wire_matches_samba_capture() {
    // policy_handle as it appears in a little-endian lsa_Close request
    let wire: [u8; 20] = [
        0x00, 0x00, 0x00, 0x00, 0x2d, 0x9b, 0x3a, 0x61, 0x73, 0x54, 0x49, 0x47, 0x87, 0x1b, 0x5f,
        0x14, 0x11, 0x0e, 0xa6, 0x9c,
    ];
    let ctx = NdrContext::new();
    let mut reader = &wire[..];
    let mut pos = 0;
    let handle = PolicyHandle::ndr_decode(&mut reader, &ctx, &mut pos).unwrap();
    assert_eq!(handle.handle_type(), 0);
    assert_eq!(handle.uuid().to_string(), "613a9b2d-5473-4749-871b-5f14110ea69c");
    assert!(!handle.is_empty());

    let mut buf = BytesMut::new();
    let mut pos = 0;
    handle.ndr_encode(&mut buf, &ctx, &mut pos).unwrap();
    assert_eq!(&buf[..], &wire[..]);
}
