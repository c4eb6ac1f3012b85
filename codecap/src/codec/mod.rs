#[cfg(test)]
mod codec_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::SdpVideoFormat;
use crate::scalability::ScalabilityMode;
use crate::svc::StreamLayersConfig;

/// SDP rtpmap name of the H.264 codec.
pub const CODEC_NAME_H264: &str = "H264";
/// SDP rtpmap name of the VP8 codec.
pub const CODEC_NAME_VP8: &str = "VP8";
/// SDP rtpmap name of the VP9 codec.
pub const CODEC_NAME_VP9: &str = "VP9";

/// Video codec kind supported by this build.
///
/// The set of kinds is fixed per build; availability of a given kind is
/// controlled by the matching cargo feature (`h264`, `vp8`, `vp9`). Queries
/// for a kind whose feature is disabled report empty capabilities rather
/// than failing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoCodecKind {
    /// H.264 / AVC.
    H264,
    /// VP8.
    Vp8,
    /// VP9.
    Vp9,
}

impl VideoCodecKind {
    /// Returns the SDP rtpmap name of this codec.
    pub fn name(&self) -> &'static str {
        match *self {
            VideoCodecKind::H264 => CODEC_NAME_H264,
            VideoCodecKind::Vp8 => CODEC_NAME_VP8,
            VideoCodecKind::Vp9 => CODEC_NAME_VP9,
        }
    }

    /// Resolves a codec kind from an SDP rtpmap name.
    ///
    /// Codec names are case-insensitive in SDP; unknown names resolve to
    /// `None`.
    pub fn from_name(raw: &str) -> Option<VideoCodecKind> {
        if raw.eq_ignore_ascii_case(CODEC_NAME_H264) {
            Some(VideoCodecKind::H264)
        } else if raw.eq_ignore_ascii_case(CODEC_NAME_VP8) {
            Some(VideoCodecKind::Vp8)
        } else if raw.eq_ignore_ascii_case(CODEC_NAME_VP9) {
            Some(VideoCodecKind::Vp9)
        } else {
            None
        }
    }
}

impl fmt::Display for VideoCodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decoder handle produced by [`create_decoder`](crate::factory::create_decoder).
///
/// A handle is exclusively owned by its caller; dropping it releases the
/// decoder. The media pipeline that feeds encoded frames is out of scope
/// here, so the trait only exposes identity.
pub trait VideoDecoder: Send {
    /// The codec kind this decoder was constructed for.
    fn kind(&self) -> VideoCodecKind;

    /// The format this decoder was constructed for.
    fn format(&self) -> &SdpVideoFormat;
}

/// Encoder handle produced by [`create_encoder`](crate::factory::create_encoder).
pub trait VideoEncoder: Send {
    /// The codec kind this encoder was constructed for.
    fn kind(&self) -> VideoCodecKind;

    /// The negotiated format this encoder was constructed for.
    fn format(&self) -> &SdpVideoFormat;

    /// Reports whether this encoder can produce the given scalability
    /// structure. Pure capability check; does not mutate the encoder.
    fn supports_scalability_mode(&self, mode: ScalabilityMode) -> bool;
}

/// Negotiated encoder settings, as handed over by the signaling layer once
/// a codec has been agreed on.
///
/// This is the input of
/// [`svc_config_from_encoder_config`](crate::svc::svc_config_from_encoder_config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEncoderConfig {
    pub kind: VideoCodecKind,
    /// Top layer width in pixels.
    pub width: u32,
    /// Top layer height in pixels.
    pub height: u32,
    /// Maximum framerate in frames per second.
    pub max_framerate: f64,
    /// Total bitrate budget across all active layers, in bits per second.
    pub max_bitrate_bps: u32,
    /// Number of spatial layers, 1 for single-layer encoding.
    pub num_spatial_layers: usize,
    /// Index of the lowest active spatial layer.
    pub first_active_layer: usize,
    /// Flexible prediction mode; leaves the temporal pattern to the caller.
    pub flexible_mode: bool,
    /// Explicit layer geometry. Takes precedence over computed defaults.
    pub stream_layers: Option<StreamLayersConfig>,
}

impl VideoEncoderConfig {
    /// Creates a single-layer configuration. SVC fields can be adjusted
    /// afterwards via struct update.
    pub fn new(kind: VideoCodecKind, width: u32, height: u32, max_framerate: f64) -> Self {
        VideoEncoderConfig {
            kind,
            width,
            height,
            max_framerate,
            max_bitrate_bps: 0,
            num_spatial_layers: 1,
            first_active_layer: 0,
            flexible_mode: false,
            stream_layers: None,
        }
    }
}
