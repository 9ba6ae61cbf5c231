//! Simulcast for browsers that won't do it on their own.
//!
//! Some WebRTC stacks only send simulcast when the local SDP announces it
//! through an `a=ssrc-group:SIM` line. This crate rewrites a local session
//! description before it is applied with `setLocalDescription`, so that every
//! sending video m-line gets one SSRC per simulcast layer.
//!
//! # Usage
//!
//! ```
//! use std::collections::HashMap;
//! use simulcast_sdp::{Mid, SessionDescription, SimulcastMunger};
//!
//! let offer = SessionDescription::offer(
//!     "v=0\r\n\
//!     o=- 1 2 IN IP4 127.0.0.1\r\n\
//!     s=-\r\n\
//!     t=0 0\r\n\
//!     m=video 9 UDP/TLS/RTP/SAVPF 96\r\n\
//!     a=mid:0\r\n\
//!     a=sendrecv\r\n\
//!     a=msid:stream track\r\n\
//!     a=rtpmap:96 VP8/90000\r\n\
//!     a=ssrc:1111 cname:abc\r\n",
//! );
//!
//! // One munger per peer connection.
//! let mut munger = SimulcastMunger::new();
//!
//! // The captured height of the video per mid. 720 gives three layers.
//! let heights = HashMap::from([(Mid::from("0"), 720)]);
//!
//! let offer = munger.munge_local_description(offer, Some(&heights));
//! let sdp = offer.sdp.unwrap();
//!
//! assert!(sdp.contains("a=ssrc-group:SIM 1111 "));
//!
//! // The same SSRC are used in every later negotiation of mid 0.
//! let entry = munger.cached(&"0".into()).unwrap();
//! assert_eq!(entry.layer_count(), 3);
//! ```
//!
//! # What is munged
//!
//! An m-line is munged when it is video, has a sending direction, has an
//! `a=mid` and either a single SSRC or a primary SSRC with its `FID`
//! retransmission pair. Anything else is left exactly as it was.
//! [`SimulcastMunger::inspect`] tells how each m-line would be treated.
//!
//! New SSRC get the same `cname` and `msid` as the primary SSRC. The first
//! negotiation of a mid decides its layers. Later negotiations of the same mid
//! reuse them, regardless of the capture height.
//!
//! # Layers
//!
//! The number of layers comes from a [`LayerPolicy`] given the capture height.
//! The default [`StepLayerPolicy`] gives three layers at 540 and above, two at
//! 360 and above, and one below that. Use [`SimulcastConfig`] to change it.
//!
//! # Logging
//!
//! All logging is done with [tracing](https://docs.rs/tracing). Enable the
//! `pii` feature to redact `cname` and `msid` values in the logs.

#![forbid(unsafe_code)]
#![allow(clippy::new_without_default)]
#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod cache;
pub use cache::CacheEntry;

mod classify;
pub use classify::{Classification, SkipReason};

mod config;
pub use config::SimulcastConfig;

mod desc;
pub use desc::{SdpType, SessionDescription};

mod dir;

mod generator;
pub use generator::{RandomSsrc, SsrcGenerator};

mod id;
pub use id::{Mid, Ssrc};

mod layers;
pub use layers::{Layer, LayerPolicy, StepLayerPolicy, DEFAULT_CAPTURE_HEIGHT};

mod munge;
pub use munge::{SectionReport, SimulcastMunger};

mod sdp;

mod synth;

mod util;

/// Various error types.
pub mod error {
    pub use crate::sdp::SdpError;
}
