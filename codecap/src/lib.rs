//! # codecap - Video Codec Capability & Factory Registry
//!
//! A pure boundary layer between a signaling/negotiation stack and the
//! codec backends of a media engine. It answers three questions:
//!
//! - **What can this build handle?** Capability queries return the
//!   supported [`SdpVideoFormat`]s per codec kind, in a stable order fit
//!   for advertising to a remote peer.
//! - **Give me a codec.** Factories construct exclusively owned encoder and
//!   decoder handles, or report "unavailable" as a normal outcome when a
//!   codec is not compiled in.
//! - **How do I layer a scalable stream?** The SVC planner turns
//!   resolution, framerate and a bitrate budget into an ordered spatial
//!   layer plan.
//!
//! Everything is synchronous and, outside of handle allocation,
//! side-effect-free; all of it can be called concurrently without
//! coordination. Frame I/O is out of scope: handles are identity objects
//! the media pipeline wires to the actual codec backends.
//!
//! Codec availability is a build-time property controlled by the `h264`,
//! `vp8` and `vp9` cargo features, all enabled by default.
//!
//! ## Capability query and handle construction
//!
//! ```
//! use codecap::codec::VideoCodecKind;
//! use codecap::factory;
//!
//! // Advertise what this build decodes, then construct an encoder for the
//! // format the remote peer picked.
//! let formats = factory::supported_decoder_formats(VideoCodecKind::H264);
//! assert!(!formats.is_empty());
//!
//! let encoder = factory::create_encoder(VideoCodecKind::H264, formats.first());
//! assert!(encoder.is_some());
//! ```
//!
//! ## Planning scalable video layers
//!
//! ```
//! use codecap::svc::get_svc_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // 720p in three spatial layers under a 1.5 Mbps budget.
//! let layers = get_svc_config(1280, 720, 30.0, 0, 3, 1_500_000, false, None)?;
//! assert_eq!(layers.len(), 3);
//! assert_eq!((layers[0].width, layers[0].height), (320, 180));
//! # Ok(())
//! # }
//! ```

#![warn(rust_2018_idioms)]

pub mod codec;
pub mod factory;
pub mod format;
pub mod scalability;
pub mod svc;

#[cfg(feature = "h264")]
pub mod h264;
#[cfg(feature = "vp8")]
pub mod vp8;
#[cfg(feature = "vp9")]
pub mod vp9;

pub use codec::{VideoCodecKind, VideoDecoder, VideoEncoder, VideoEncoderConfig};
pub use format::SdpVideoFormat;
pub use scalability::ScalabilityMode;
pub use svc::{SpatialLayer, StreamLayersConfig};
