//! GUID and policy handle value types for DCE RPC (MS-RPCE)
//!
//! These are the two fixed-format identifiers that appear throughout RPC
//! payloads:
//!
//! - [`Guid`]: a 128-bit identifier with a canonical 16-byte encoding, the
//!   canonical `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` text form, and a total
//!   order over the encoding.
//! - [`PolicyHandle`]: a server-issued context handle, a 32-bit type tag plus
//!   a GUID, 20 bytes on the wire.
//!
//! Both are plain `Copy` values. Marshalling into NDR stub data goes through
//! [`NdrEncode`] and [`NdrDecode`].
//!
//! # Example
//!
//! ```
//! use librpc_misc::{Guid, PolicyHandle};
//!
//! let guid: Guid = "abcdefab-0000-0000-0000-000000000001".parse().unwrap();
//! assert_eq!(format!("{:?}", guid), "GUID('abcdefab-0000-0000-0000-000000000001')");
//! assert!(Guid::NIL < guid);
//!
//! let handle = PolicyHandle::new(5, Some("abcdefab-0000-0000-0000-000000000001")).unwrap();
//! assert_eq!(handle.to_string(), "5, abcdefab-0000-0000-0000-000000000001");
//! ```

mod context;
mod decode;
mod encode;
mod error;
mod guid;
mod param;
mod policy_handle;

pub use context::NdrContext;
pub use decode::NdrDecode;
pub use encode::NdrEncode;
pub use error::{MiscError, Result};
pub use guid::{Guid, GUID_SIZE, GUID_STRING_LEN};
pub use param::{LoadParmContext, LoadParmProvider, StaticProvider};
pub use policy_handle::{PolicyHandle, POLICY_HANDLE_SIZE};
