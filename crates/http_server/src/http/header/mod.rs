//! Request headers.
//!
//! Names are stored exactly as received. There is no case folding, so `user-agent` and
//! `User-Agent` are different headers, and a repeated name replaces the earlier value.

mod impls;
mod map;

pub use impls::*;
pub use map::*;
