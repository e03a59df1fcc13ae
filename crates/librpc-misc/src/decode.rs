//! NDR decoding trait

use crate::{NdrContext, Result};
use bytes::Buf;

/// Types that can be unmarshalled from NDR stub data
pub trait NdrDecode: Sized {
    /// Decode a value at `position`, skipping any alignment padding first.
    ///
    /// On error nothing has been consumed from `buf`.
    fn ndr_decode<B: Buf>(buf: &mut B, ctx: &NdrContext, position: &mut usize) -> Result<Self>;

    /// Alignment of the encoded value
    fn ndr_align() -> usize;
}
