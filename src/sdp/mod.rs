//! Lossless SDP codec.
//!
//! Only the lines simulcast munging needs are parsed into structure. Everything
//! else is kept verbatim so that serializing an [`Sdp`] reproduces the input
//! for every line we did not touch.

use thiserror::Error;

mod data;
pub use data::{GroupSemantics, MediaLine, Sdp, SourceAttribute, SourceGroup, SourceKind};

#[cfg(test)]
pub use data::{MediaAttribute, MediaType, Msid};

mod parser;

/// Errors from parsing SDP.
#[derive(Debug, Error)]
pub enum SdpError {
    /// The text could not be parsed as SDP.
    #[error("SDP parse: {0}")]
    ParseError(String),
}
