//! Helpers shared by the server's tests.
//!
//! Nothing in here knows about the server crate: requests are built as raw bytes and
//! responses are parsed back from raw bytes, so the tests exercise the real wire format.

mod channel;
mod raw;

pub use channel::{ChannelReader, drip};
pub use raw::{RawRequest, RawResponse};
