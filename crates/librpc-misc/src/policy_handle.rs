//! RPC policy handles
//!
//! A policy handle is the 20-byte context handle an RPC server hands out for
//! an open resource (an LSA policy, a SAMR domain, a registry key). Clients
//! treat it as an opaque token and present it back verbatim on later calls.
//!
//! ```text
//! +--------+--------+--------+--------+
//! |            handle_type            |
//! +--------+--------+--------+--------+
//! |                                   |
//! +              uuid (16)            +
//! |                                   |
//! +--------+--------+--------+--------+
//! ```
//!
//! `PolicyHandle` deliberately implements neither `PartialEq`, `Ord` nor
//! `Hash`. Callers correlating handles compare [`PolicyHandle::handle_type`]
//! and [`PolicyHandle::uuid`] themselves.
//!
//! ```compile_fail
//! use librpc_misc::PolicyHandle;
//! let a = PolicyHandle::default();
//! let b = PolicyHandle::default();
//! let _ = a == b;
//! ```
//!
//! ```compile_fail
//! use librpc_misc::PolicyHandle;
//! let a = PolicyHandle::default();
//! let b = PolicyHandle::default();
//! let _ = a < b;
//! ```
//!
//! ```compile_fail
//! use librpc_misc::PolicyHandle;
//! let mut set = std::collections::HashSet::new();
//! set.insert(PolicyHandle::default());
//! ```

use crate::error::{MiscError, Result};
use crate::guid::{Guid, GUID_SIZE};
use crate::{NdrContext, NdrDecode, NdrEncode};
use bytes::{Buf, BufMut};
use std::fmt;

/// Size of an encoded policy handle
pub const POLICY_HANDLE_SIZE: usize = 4 + GUID_SIZE;

/// Server-issued context handle: a caller-assigned type tag plus a GUID
#[derive(Clone, Copy, Default)]
pub struct PolicyHandle {
    handle_type: i32,
    uuid: Guid,
}

impl PolicyHandle {
    /// Build a handle from a type tag and an optional canonical GUID string.
    ///
    /// Without a string the GUID is nil. A malformed string fails with the
    /// same `InvalidFormat` error [`Guid::parse_string`] raises.
    pub fn new(handle_type: i32, uuid: Option<&str>) -> Result<Self> {
        let uuid = match uuid {
            Some(text) => Guid::parse_string(text)?,
            None => Guid::NIL,
        };
        Ok(Self { handle_type, uuid })
    }

    pub const fn from_parts(handle_type: i32, uuid: Guid) -> Self {
        Self { handle_type, uuid }
    }

    pub fn handle_type(&self) -> i32 {
        self.handle_type
    }

    pub fn uuid(&self) -> Guid {
        self.uuid
    }

    /// Whether this is the null handle (type 0, nil GUID) a server returns
    /// once the resource has been closed
    pub fn is_empty(&self) -> bool {
        self.handle_type == 0 && self.uuid.is_nil()
    }

    /// Canonical 20-byte encoding: big-endian type tag, then the GUID
    pub fn to_bytes(&self) -> [u8; POLICY_HANDLE_SIZE] {
        let mut bytes = [0u8; POLICY_HANDLE_SIZE];
        bytes[..4].copy_from_slice(&self.handle_type.to_be_bytes());
        bytes[4..].copy_from_slice(&self.uuid.to_bytes());
        bytes
    }

    /// Parse the canonical 20-byte encoding
    pub fn parse_bytes(blob: &[u8]) -> Result<Self> {
        if blob.len() != POLICY_HANDLE_SIZE {
            tracing::trace!(len = blob.len(), "rejecting policy handle blob");
            return Err(MiscError::InvalidLength {
                expected: POLICY_HANDLE_SIZE,
                got: blob.len(),
            });
        }
        let (tag, uuid) = blob.split_at(4);
        Ok(Self {
            handle_type: i32::from_be_bytes([tag[0], tag[1], tag[2], tag[3]]),
            uuid: Guid::parse_bytes(uuid)?,
        })
    }

    /// Human-facing rendering, `"<type>, <guid>"`
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PolicyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.handle_type, self.uuid)
    }
}

impl fmt::Debug for PolicyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "policy_handle({}, '{}')", self.handle_type, self.uuid)
    }
}

impl NdrEncode for PolicyHandle {
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()> {
        ctx.write_align(buf, position, 4);
        ctx.put_i32(buf, self.handle_type);
        *position += 4;
        self.uuid.ndr_encode(buf, ctx, position)
    }

    fn ndr_align() -> usize {
        4
    }

    fn ndr_size(&self) -> usize {
        POLICY_HANDLE_SIZE
    }
}

impl NdrDecode for PolicyHandle {
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self> {
        // Check the whole handle up front so a short buffer leaves nothing consumed
        ctx.read_align(buf, position, 4, POLICY_HANDLE_SIZE)?;
        let handle_type = ctx.get_i32(buf);
        *position += 4;
        let uuid = Guid::ndr_decode(buf, ctx, position)?;
        Ok(Self { handle_type, uuid })
    }

    fn ndr_align() -> usize {
        4
    }
}
