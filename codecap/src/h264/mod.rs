pub mod profile_level_id;
#[cfg(test)]
mod profile_level_id_test;

use std::collections::BTreeMap;

use crate::codec::{CODEC_NAME_H264, VideoCodecKind, VideoDecoder, VideoEncoder};
use crate::format::SdpVideoFormat;
use crate::scalability::ScalabilityMode;

pub use profile_level_id::{H264Level, H264Profile, H264ProfileLevelId};

/// fmtp key carrying the hex profile-level-id sextet.
pub const FMTP_PROFILE_LEVEL_ID: &str = "profile-level-id";
/// fmtp key selecting the RTP packetization mode.
pub const FMTP_PACKETIZATION_MODE: &str = "packetization-mode";
/// fmtp key allowing asymmetric levels between the two directions.
pub const FMTP_LEVEL_ASYMMETRY_ALLOWED: &str = "level-asymmetry-allowed";

/// Extracts and parses the `profile-level-id` parameter from an fmtp
/// parameter map. An absent or malformed parameter yields `None`; there is
/// no implicit default profile.
pub fn parse_sdp_profile_level_id(
    params: &BTreeMap<String, String>,
) -> Option<H264ProfileLevelId> {
    params
        .get(FMTP_PROFILE_LEVEL_ID)
        .and_then(|raw| H264ProfileLevelId::parse(raw))
}

/// Reports whether two fmtp parameter maps negotiate the same H.264
/// profile. Levels are allowed to differ. Either side failing to declare a
/// parsable profile counts as a mismatch.
pub fn is_same_profile(
    params1: &BTreeMap<String, String>,
    params2: &BTreeMap<String, String>,
) -> bool {
    match (
        parse_sdp_profile_level_id(params1),
        parse_sdp_profile_level_id(params2),
    ) {
        (Some(a), Some(b)) => a.profile() == b.profile(),
        _ => false,
    }
}

/// Builds the SDP format advertising one H.264 profile variant.
pub fn create_h264_format(
    profile: H264Profile,
    level: H264Level,
    packetization_mode: &str,
) -> Option<SdpVideoFormat> {
    let profile_level_id = H264ProfileLevelId::new(profile, level)?;
    let mut parameters = BTreeMap::new();
    parameters.insert(
        FMTP_LEVEL_ASYMMETRY_ALLOWED.to_owned(),
        "1".to_owned(),
    );
    parameters.insert(
        FMTP_PACKETIZATION_MODE.to_owned(),
        packetization_mode.to_owned(),
    );
    parameters.insert(
        FMTP_PROFILE_LEVEL_ID.to_owned(),
        profile_level_id.to_string(),
    );
    Some(SdpVideoFormat::with_parameters(CODEC_NAME_H264, parameters))
}

fn supported_h264_formats() -> Vec<SdpVideoFormat> {
    // Constrained Baseline and Baseline at level 3.1, packetization mode 1
    // preferred over 0. Every entry here is a valid construction.
    [
        (H264Profile::ConstrainedBaseline, "1"),
        (H264Profile::ConstrainedBaseline, "0"),
        (H264Profile::Baseline, "1"),
        (H264Profile::Baseline, "0"),
    ]
    .into_iter()
    .filter_map(|(profile, mode)| create_h264_format(profile, H264Level::Level3_1, mode))
    .collect()
}

/// Formats this build can decode, in preference order.
pub fn supported_h264_decoder_formats() -> Vec<SdpVideoFormat> {
    supported_h264_formats()
}

/// Formats this build can encode, in preference order.
pub fn supported_h264_encoder_formats() -> Vec<SdpVideoFormat> {
    supported_h264_formats()
}

fn is_supported_encode_profile(profile: H264Profile) -> bool {
    matches!(
        profile,
        H264Profile::ConstrainedBaseline | H264Profile::Baseline
    )
}

/// H.264 encoder handle.
///
/// Carries the negotiated format and the profile variant selected from it;
/// the media pipeline wires it to the actual encode backend.
pub struct H264Encoder {
    format: SdpVideoFormat,
    profile_level_id: H264ProfileLevelId,
}

impl H264Encoder {
    /// Creates an encoder for the negotiated format, or for Constrained
    /// Baseline 3.1 when no format was negotiated.
    ///
    /// An absent profile-level-id selects the SDP default profile; a
    /// malformed one, or a profile this build does not encode, yields
    /// `None`.
    pub fn new(negotiated: Option<&SdpVideoFormat>) -> Option<H264Encoder> {
        let format = match negotiated {
            Some(format) => format.clone(),
            None => create_h264_format(
                H264Profile::ConstrainedBaseline,
                H264Level::Level3_1,
                "1",
            )?,
        };
        let profile_level_id = match format.parameters.get(FMTP_PROFILE_LEVEL_ID) {
            Some(raw) => H264ProfileLevelId::parse(raw)?,
            None => H264ProfileLevelId::CONSTRAINED_BASELINE_3_1,
        };
        if !is_supported_encode_profile(profile_level_id.profile()) {
            return None;
        }
        Some(H264Encoder {
            format,
            profile_level_id,
        })
    }

    /// The profile variant this encoder produces.
    pub fn profile_level_id(&self) -> H264ProfileLevelId {
        self.profile_level_id
    }
}

impl VideoEncoder for H264Encoder {
    fn kind(&self) -> VideoCodecKind {
        VideoCodecKind::H264
    }

    fn format(&self) -> &SdpVideoFormat {
        &self.format
    }

    fn supports_scalability_mode(&self, mode: ScalabilityMode) -> bool {
        // Temporal scalability only; spatial layering needs VP9.
        mode.num_spatial_layers() == 1
    }
}

/// H.264 decoder handle.
pub struct H264Decoder {
    format: SdpVideoFormat,
}

impl H264Decoder {
    pub fn new() -> H264Decoder {
        H264Decoder {
            // First entry of the supported table; the decoder itself
            // accepts every profile the table advertises.
            format: supported_h264_formats()
                .into_iter()
                .next()
                .unwrap_or_else(|| SdpVideoFormat::new(CODEC_NAME_H264)),
        }
    }
}

impl Default for H264Decoder {
    fn default() -> Self {
        H264Decoder::new()
    }
}

impl VideoDecoder for H264Decoder {
    fn kind(&self) -> VideoCodecKind {
        VideoCodecKind::H264
    }

    fn format(&self) -> &SdpVideoFormat {
        &self.format
    }
}
