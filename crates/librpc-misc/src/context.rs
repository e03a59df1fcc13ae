//! NDR marshalling context
//!
//! Identifiers embedded in RPC stub data follow the byte order announced by
//! the sender's data representation, and are aligned on their first field.
//! The context carries that byte order and the alignment arithmetic.

use crate::error::{MiscError, Result};
use bytes::{Buf, BufMut};

/// NDR marshalling context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NdrContext {
    /// Whether multi-byte integers are little-endian
    pub little_endian: bool,
}

impl NdrContext {
    /// Little-endian NDR, the representation every Windows and Samba peer sends
    pub fn new() -> Self {
        Self { little_endian: true }
    }

    /// Big-endian NDR
    pub fn big_endian() -> Self {
        Self { little_endian: false }
    }

    /// Context for the integer representation flag of a DCE RPC `drep`
    pub fn with_byte_order(little_endian: bool) -> Self {
        Self { little_endian }
    }

    /// Padding needed to bring `position` to a multiple of `alignment`
    #[inline]
    pub fn align_padding(position: usize, alignment: usize) -> usize {
        if alignment <= 1 {
            return 0;
        }
        (alignment - position % alignment) % alignment
    }

    /// Write zero padding up to `alignment`, advancing `position`
    pub fn write_align<B: BufMut>(&self, buf: &mut B, position: &mut usize, alignment: usize) {
        let padding = Self::align_padding(*position, alignment);
        buf.put_bytes(0, padding);
        *position += padding;
    }

    /// Skip padding up to `alignment` and check that `size` bytes follow it.
    ///
    /// Nothing is consumed when the buffer is too short.
    pub fn read_align<B: Buf>(
        &self,
        buf: &mut B,
        position: &mut usize,
        alignment: usize,
        size: usize,
    ) -> Result<()> {
        let padding = Self::align_padding(*position, alignment);
        let needed = padding + size;
        if buf.remaining() < needed {
            tracing::trace!(needed, have = buf.remaining(), "short NDR buffer");
            return Err(MiscError::BufferUnderflow {
                needed,
                have: buf.remaining(),
            });
        }
        buf.advance(padding);
        *position += padding;
        Ok(())
    }

    #[inline]
    pub fn put_u16<B: BufMut>(&self, buf: &mut B, value: u16) {
        if self.little_endian {
            buf.put_u16_le(value);
        } else {
            buf.put_u16(value);
        }
    }

    #[inline]
    pub fn put_u32<B: BufMut>(&self, buf: &mut B, value: u32) {
        if self.little_endian {
            buf.put_u32_le(value);
        } else {
            buf.put_u32(value);
        }
    }

    #[inline]
    pub fn put_i32<B: BufMut>(&self, buf: &mut B, value: i32) {
        if self.little_endian {
            buf.put_i32_le(value);
        } else {
            buf.put_i32(value);
        }
    }

    #[inline]
    pub fn get_u16<B: Buf>(&self, buf: &mut B) -> u16 {
        if self.little_endian {
            buf.get_u16_le()
        } else {
            buf.get_u16()
        }
    }

    #[inline]
    pub fn get_u32<B: Buf>(&self, buf: &mut B) -> u32 {
        if self.little_endian {
            buf.get_u32_le()
        } else {
            buf.get_u32()
        }
    }

    #[inline]
    pub fn get_i32<B: Buf>(&self, buf: &mut B) -> i32 {
        if self.little_endian {
            buf.get_i32_le()
        } else {
            buf.get_i32()
        }
    }
}

impl Default for NdrContext {
    fn default() -> Self {
        Self::new()
    }
}
