//! NDR encoding trait

use crate::{NdrContext, Result};
use bytes::BufMut;

/// Types that can be marshalled into NDR stub data
pub trait NdrEncode {
    /// Encode this value at `position`, writing any alignment padding first.
    ///
    /// `position` is the byte offset from the start of the stub data and is
    /// advanced past the padding and the value.
    fn ndr_encode<B: BufMut>(&self, buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<()>;

    /// Alignment of the encoded value
    fn ndr_align() -> usize
    where
        Self: Sized;

    /// Encoded size, excluding leading alignment padding
    fn ndr_size(&self) -> usize;
}
