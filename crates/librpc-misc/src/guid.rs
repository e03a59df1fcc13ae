//! 128-bit globally unique identifiers
//!
//! A GUID is stored as the standard UUID field decomposition:
//!
//! ```text
//! +--------+--------+--------+--------+
//! |             time_low              |
//! +--------+--------+--------+--------+
//! |    time_mid     | time_hi_and_ver |
//! +--------+--------+--------+--------+
//! |   clock_seq     |                 |
//! +--------+--------+      node       +
//! |                                   |
//! +--------+--------+--------+--------+
//! ```
//!
//! The canonical binary encoding stores the first three fields big-endian
//! followed by the remaining eight bytes verbatim, so it reads in the same
//! order as the canonical text `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
//! Ordering is the unsigned lexicographic order of that encoding.
//!
//! Inside NDR stub data the first three fields instead follow the byte order
//! of the data representation; see the [`NdrEncode`] impl.

use crate::error::{MiscError, Result};
use crate::{NdrContext, NdrDecode, NdrEncode};
use bytes::{Buf, BufMut};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Length of the canonical binary encoding
pub const GUID_SIZE: usize = 16;
/// Length of the canonical hyphenated string
pub const GUID_STRING_LEN: usize = 36;

const BRACED_STRING_LEN: usize = GUID_STRING_LEN + 2;
const HEX_STRING_LEN: usize = GUID_SIZE * 2;
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// A 128-bit GUID/UUID
///
/// `Default` is the nil GUID. Equality, hashing and ordering all follow the
/// canonical 16-byte encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Guid {
    time_low: u32,
    time_mid: u16,
    time_hi_and_version: u16,
    clock_seq: [u8; 2],
    node: [u8; 6],
}

impl Guid {
    /// The all-zero GUID `00000000-0000-0000-0000-000000000000`
    pub const NIL: Self = Self {
        time_low: 0,
        time_mid: 0,
        time_hi_and_version: 0,
        clock_seq: [0; 2],
        node: [0; 6],
    };

    /// Build a GUID from its fields
    pub const fn from_fields(
        time_low: u32,
        time_mid: u16,
        time_hi_and_version: u16,
        clock_seq: [u8; 2],
        node: [u8; 6],
    ) -> Self {
        Self {
            time_low,
            time_mid,
            time_hi_and_version,
            clock_seq,
            node,
        }
    }

    /// Generate a random (version 4) GUID
    pub fn random() -> Self {
        Self::from_bytes(uuid::Uuid::new_v4().into_bytes())
    }

    /// Decode the canonical 16-byte encoding
    pub const fn from_bytes(bytes: [u8; GUID_SIZE]) -> Self {
        Self {
            time_low: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            time_mid: u16::from_be_bytes([bytes[4], bytes[5]]),
            time_hi_and_version: u16::from_be_bytes([bytes[6], bytes[7]]),
            clock_seq: [bytes[8], bytes[9]],
            node: [
                bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
            ],
        }
    }

    /// Parse the canonical 16-byte encoding from a slice.
    ///
    /// Any length other than 16 is rejected with `InvalidLength`.
    pub fn parse_bytes(blob: &[u8]) -> Result<Self> {
        let bytes: [u8; GUID_SIZE] = blob.try_into().map_err(|_| {
            tracing::trace!(len = blob.len(), "rejecting GUID blob");
            MiscError::InvalidLength {
                expected: GUID_SIZE,
                got: blob.len(),
            }
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Parse the canonical hyphenated form, case-insensitively.
    ///
    /// Only `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` is accepted: no braces, no
    /// surrounding whitespace, no sign characters.
    pub fn parse_string(text: &str) -> Result<Self> {
        let raw = text.as_bytes();
        if raw.len() != GUID_STRING_LEN {
            return Err(invalid_format(text, "expected 36 characters"));
        }

        let mut digits = [0u8; HEX_STRING_LEN];
        let mut count = 0;
        for (i, &c) in raw.iter().enumerate() {
            if HYPHEN_POSITIONS.contains(&i) {
                if c != b'-' {
                    return Err(invalid_format(text, "misplaced group separator"));
                }
            } else {
                digits[count] = c;
                count += 1;
            }
        }

        decode_hex(&digits)
            .map(Self::from_bytes)
            .ok_or_else(|| invalid_format(text, "non-hexadecimal digit"))
    }

    /// Parse any of the representations a GUID can arrive in.
    ///
    /// Dispatches on length: 16 bytes is the binary encoding, 36 the
    /// canonical string, 38 the braced string `{...}` and 32 bare hex
    /// digits. Anything else fails with `InvalidLength`.
    pub fn from_data_blob(blob: &[u8]) -> Result<Self> {
        match blob.len() {
            GUID_SIZE => Self::parse_bytes(blob),
            GUID_STRING_LEN => Self::parse_string(blob_text(blob)?),
            BRACED_STRING_LEN => {
                let text = blob_text(blob)?;
                text.strip_prefix('{')
                    .and_then(|t| t.strip_suffix('}'))
                    .ok_or_else(|| invalid_format(text, "expected braces"))
                    .and_then(Self::parse_string)
            }
            HEX_STRING_LEN => <&[u8; HEX_STRING_LEN]>::try_from(blob)
                .ok()
                .and_then(decode_hex)
                .map(Self::from_bytes)
                .ok_or_else(|| invalid_format(&String::from_utf8_lossy(blob), "non-hexadecimal digit")),
            len => {
                tracing::trace!(len, "rejecting GUID data blob");
                Err(MiscError::InvalidLength {
                    expected: GUID_SIZE,
                    got: len,
                })
            }
        }
    }

    /// Canonical 16-byte encoding
    pub fn to_bytes(&self) -> [u8; GUID_SIZE] {
        let mut bytes = [0u8; GUID_SIZE];
        bytes[0..4].copy_from_slice(&self.time_low.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.time_mid.to_be_bytes());
        bytes[6..8].copy_from_slice(&self.time_hi_and_version.to_be_bytes());
        bytes[8..10].copy_from_slice(&self.clock_seq);
        bytes[10..16].copy_from_slice(&self.node);
        bytes
    }

    /// Canonical lower-case hyphenated form
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Canonical form wrapped in braces, `{xxxxxxxx-...}`
    pub fn braced(&self) -> String {
        format!("{{{}}}", self)
    }

    /// Whether every byte is zero
    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// Three-way comparison over the canonical encoding
    pub fn compare(&self, other: &Guid) -> Ordering {
        self.to_bytes().cmp(&other.to_bytes())
    }

    /// Compare against a dynamically-typed operand.
    ///
    /// GUIDs are only orderable against GUIDs: any other operand is rejected
    /// with `InvalidOperand` rather than being placed arbitrarily in the order.
    pub fn compare_any(&self, other: &dyn Any) -> Result<Ordering> {
        other
            .downcast_ref::<Guid>()
            .map(|other| self.compare(other))
            .ok_or_else(|| MiscError::InvalidOperand("GUID can only be compared with a GUID".to_string()))
    }

    pub fn time_low(&self) -> u32 {
        self.time_low
    }

    pub fn time_mid(&self) -> u16 {
        self.time_mid
    }

    pub fn time_hi_and_version(&self) -> u16 {
        self.time_hi_and_version
    }

    pub fn clock_seq(&self) -> [u8; 2] {
        self.clock_seq
    }

    pub fn node(&self) -> [u8; 6] {
        self.node
    }
}

fn invalid_format(text: &str, reason: &str) -> MiscError {
    tracing::trace!(text, reason, "rejecting GUID string");
    MiscError::InvalidFormat(format!("{reason}: {text:?}"))
}

fn blob_text(blob: &[u8]) -> Result<&str> {
    std::str::from_utf8(blob).map_err(|_| {
        tracing::trace!(len = blob.len(), "GUID text is not UTF-8");
        MiscError::InvalidFormat("GUID text is not valid UTF-8".to_string())
    })
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decode 32 hex digits into 16 bytes
fn decode_hex(digits: &[u8; HEX_STRING_LEN]) -> Option<[u8; GUID_SIZE]> {
    let mut bytes = [0u8; GUID_SIZE];
    for (byte, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
        *byte = (hex_value(pair[0])? << 4) | hex_value(pair[1])?;
    }
    Some(bytes)
}

impl PartialOrd for Guid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Guid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl FromStr for Guid {
    type Err = MiscError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_string(s)
    }
}

impl TryFrom<&[u8]> for Guid {
    type Error = MiscError;

    fn try_from(blob: &[u8]) -> Result<Self> {
        Self::parse_bytes(blob)
    }
}

impl From<[u8; GUID_SIZE]> for Guid {
    fn from(bytes: [u8; GUID_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Guid> for [u8; GUID_SIZE] {
    fn from(guid: Guid) -> Self {
        guid.to_bytes()
    }
}

impl From<uuid::Uuid> for Guid {
    fn from(uuid: uuid::Uuid) -> Self {
        Self::from_bytes(uuid.into_bytes())
    }
}

impl From<Guid> for uuid::Uuid {
    fn from(guid: Guid) -> Self {
        uuid::Uuid::from_bytes(guid.to_bytes())
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.time_low,
            self.time_mid,
            self.time_hi_and_version,
            self.clock_seq[0],
            self.clock_seq[1],
            self.node[0],
            self.node[1],
            self.node[2],
            self.node[3],
            self.node[4],
            self.node[5]
        )
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GUID('{}')", self)
    }
}

impl NdrEncode for Guid {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        // Aligned on time_low
        ctx.write_align(buf, position, 4);
        ctx.put_u32(buf, self.time_low);
        ctx.put_u16(buf, self.time_mid);
        ctx.put_u16(buf, self.time_hi_and_version);
        buf.put_slice(&self.clock_seq);
        buf.put_slice(&self.node);
        *position += GUID_SIZE;
        Ok(())
    }

    fn ndr_align() -> usize {
        4
    }

    fn ndr_size(&self) -> usize {
        GUID_SIZE
    }
}

impl NdrDecode for Guid {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        ctx.read_align(buf, position, 4, GUID_SIZE)?;

        let time_low = ctx.get_u32(buf);
        let time_mid = ctx.get_u16(buf);
        let time_hi_and_version = ctx.get_u16(buf);
        let mut clock_seq = [0u8; 2];
        buf.copy_to_slice(&mut clock_seq);
        let mut node = [0u8; 6];
        buf.copy_to_slice(&mut node);
        *position += GUID_SIZE;

        Ok(Self {
            time_low,
            time_mid,
            time_hi_and_version,
            clock_seq,
            node,
        })
    }

    fn ndr_align() -> usize {
        4
    }
}
