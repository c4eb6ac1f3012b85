//! Codec capability registry and handle construction.
//!
//! The capability tables are process-wide immutable configuration: built
//! once from the codec features compiled into this build, read-only
//! afterwards, so every query here is safe to call concurrently without
//! coordination.
//!
//! "Unavailable" is a normal outcome, not an error: querying a kind whose
//! feature is disabled returns an empty list, and the factories return
//! `None`. Callers fall back to another codec or report the capability
//! mismatch upstream.


use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;
use unicase::UniCase;

use crate::codec::{VideoCodecKind, VideoDecoder, VideoEncoder};
use crate::format::SdpVideoFormat;

#[cfg(feature = "h264")]
use crate::h264;
#[cfg(feature = "vp8")]
use crate::vp8;
#[cfg(feature = "vp9")]
use crate::vp9;

struct CapabilityTable {
    decoder_formats: HashMap<VideoCodecKind, Vec<SdpVideoFormat>>,
    encoder_formats: HashMap<VideoCodecKind, Vec<SdpVideoFormat>>,
}

impl CapabilityTable {
    fn new() -> CapabilityTable {
        #[allow(unused_mut)]
        let mut decoder_formats = HashMap::new();
        #[allow(unused_mut)]
        let mut encoder_formats = HashMap::new();

        #[cfg(feature = "h264")]
        {
            decoder_formats.insert(
                VideoCodecKind::H264,
                h264::supported_h264_decoder_formats(),
            );
            encoder_formats.insert(
                VideoCodecKind::H264,
                h264::supported_h264_encoder_formats(),
            );
        }
        #[cfg(feature = "vp8")]
        {
            decoder_formats.insert(VideoCodecKind::Vp8, vp8::supported_vp8_formats());
            encoder_formats.insert(VideoCodecKind::Vp8, vp8::supported_vp8_formats());
        }
        #[cfg(feature = "vp9")]
        {
            decoder_formats.insert(VideoCodecKind::Vp9, vp9::supported_vp9_decoder_formats());
            encoder_formats.insert(VideoCodecKind::Vp9, vp9::supported_vp9_encoder_formats());
        }

        CapabilityTable {
            decoder_formats,
            encoder_formats,
        }
    }
}

lazy_static! {
    static ref CAPABILITIES: CapabilityTable = CapabilityTable::new();
}

/// Every format this build can decode for the given kind, in a stable
/// order. Empty means the codec is not part of this build.
pub fn supported_decoder_formats(kind: VideoCodecKind) -> Vec<SdpVideoFormat> {
    CAPABILITIES
        .decoder_formats
        .get(&kind)
        .cloned()
        .unwrap_or_default()
}

/// Every format this build can encode for the given kind, in a stable
/// order. Empty means the codec is not part of this build.
pub fn supported_encoder_formats(kind: VideoCodecKind) -> Vec<SdpVideoFormat> {
    CAPABILITIES
        .encoder_formats
        .get(&kind)
        .cloned()
        .unwrap_or_default()
}

/// Constructs a decoder for the given kind.
///
/// Returns `None` when the kind is not compiled into this build; the
/// handle is otherwise fully constructed and exclusively owned by the
/// caller.
pub fn create_decoder(kind: VideoCodecKind) -> Option<Box<dyn VideoDecoder>> {
    let decoder: Option<Box<dyn VideoDecoder>> = match kind {
        #[cfg(feature = "h264")]
        VideoCodecKind::H264 => Some(Box::new(h264::H264Decoder::new())),
        #[cfg(feature = "vp8")]
        VideoCodecKind::Vp8 => Some(Box::new(vp8::Vp8Decoder::new())),
        #[cfg(feature = "vp9")]
        VideoCodecKind::Vp9 => Some(Box::new(vp9::Vp9Decoder::new())),
        #[allow(unreachable_patterns)]
        _ => None,
    };

    match decoder {
        Some(decoder) => {
            debug!("created {kind} decoder");
            Some(decoder)
        }
        None => {
            debug!("{kind} decoder is not part of this build");
            None
        }
    }
}

/// Constructs an encoder for the given kind.
///
/// `negotiated` selects among profile variants when more than one is
/// compiled in; absent, the codec's default profile is used. Returns `None`
/// when the kind is not compiled into this build, when the negotiated
/// format names a different codec, or when it requires a profile this
/// build cannot encode.
pub fn create_encoder(
    kind: VideoCodecKind,
    negotiated: Option<&SdpVideoFormat>,
) -> Option<Box<dyn VideoEncoder>> {
    if let Some(format) = negotiated {
        if UniCase::new(format.name.as_str()) != UniCase::new(kind.name()) {
            debug!("negotiated format {} does not name {kind}", format.name);
            return None;
        }
    }

    let encoder: Option<Box<dyn VideoEncoder>> = match kind {
        #[cfg(feature = "h264")]
        VideoCodecKind::H264 => h264::H264Encoder::new(negotiated)
            .map(|encoder| Box::new(encoder) as Box<dyn VideoEncoder>),
        #[cfg(feature = "vp8")]
        VideoCodecKind::Vp8 => Some(Box::new(vp8::Vp8Encoder::new())),
        #[cfg(feature = "vp9")]
        VideoCodecKind::Vp9 => vp9::Vp9Encoder::new(negotiated)
            .map(|encoder| Box::new(encoder) as Box<dyn VideoEncoder>),
        #[allow(unreachable_patterns)]
        _ => None,
    };

    match encoder {
        Some(encoder) => {
            debug!("created {kind} encoder for {}", encoder.format());
            Some(encoder)
        }
        None => {
            debug!("no {kind} encoder for the negotiated format in this build");
            None
        }
    }
}
