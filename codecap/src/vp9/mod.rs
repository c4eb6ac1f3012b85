
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{CODEC_NAME_VP9, VideoCodecKind, VideoDecoder, VideoEncoder};
use crate::format::SdpVideoFormat;
use crate::scalability::ScalabilityMode;

/// fmtp key carrying the VP9 profile number.
pub const FMTP_PROFILE_ID: &str = "profile-id";

/// VP9 bitstream profile.
///
/// Profiles 0 and 2 cover 4:2:0 content at 8 and 10/12 bit depth and are
/// the ones produced by the encoder; 1 and 3 add the 4:2:2/4:4:4 samplings
/// the decoder accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vp9Profile {
    Profile0,
    Profile1,
    Profile2,
    Profile3,
}

impl Vp9Profile {
    fn profile_id(&self) -> &'static str {
        match *self {
            Vp9Profile::Profile0 => "0",
            Vp9Profile::Profile1 => "1",
            Vp9Profile::Profile2 => "2",
            Vp9Profile::Profile3 => "3",
        }
    }

    fn from_profile_id(raw: &str) -> Option<Vp9Profile> {
        match raw {
            "0" => Some(Vp9Profile::Profile0),
            "1" => Some(Vp9Profile::Profile1),
            "2" => Some(Vp9Profile::Profile2),
            "3" => Some(Vp9Profile::Profile3),
            _ => None,
        }
    }
}

impl fmt::Display for Vp9Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profile_id())
    }
}

/// Extracts and parses the `profile-id` parameter from an fmtp parameter
/// map. An absent or malformed parameter yields `None`.
pub fn parse_sdp_profile(params: &BTreeMap<String, String>) -> Option<Vp9Profile> {
    params
        .get(FMTP_PROFILE_ID)
        .and_then(|raw| Vp9Profile::from_profile_id(raw))
}

/// Reports whether two fmtp parameter maps negotiate the same VP9 profile.
/// Either side failing to declare a parsable profile counts as a mismatch.
pub fn is_same_profile(
    params1: &BTreeMap<String, String>,
    params2: &BTreeMap<String, String>,
) -> bool {
    match (parse_sdp_profile(params1), parse_sdp_profile(params2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn create_vp9_format(profile: Vp9Profile) -> SdpVideoFormat {
    let mut parameters = BTreeMap::new();
    parameters.insert(FMTP_PROFILE_ID.to_owned(), profile.profile_id().to_owned());
    SdpVideoFormat::with_parameters(CODEC_NAME_VP9, parameters)
}

/// Formats this build can encode, in preference order.
pub fn supported_vp9_encoder_formats() -> Vec<SdpVideoFormat> {
    vec![
        create_vp9_format(Vp9Profile::Profile0),
        create_vp9_format(Vp9Profile::Profile2),
    ]
}

/// Formats this build can decode. The encode profiles lead, the
/// decode-only samplings follow.
pub fn supported_vp9_decoder_formats() -> Vec<SdpVideoFormat> {
    vec![
        create_vp9_format(Vp9Profile::Profile0),
        create_vp9_format(Vp9Profile::Profile2),
        create_vp9_format(Vp9Profile::Profile1),
        create_vp9_format(Vp9Profile::Profile3),
    ]
}

fn is_supported_encode_profile(profile: Vp9Profile) -> bool {
    matches!(profile, Vp9Profile::Profile0 | Vp9Profile::Profile2)
}

/// VP9 encoder handle.
pub struct Vp9Encoder {
    format: SdpVideoFormat,
    profile: Vp9Profile,
}

impl Vp9Encoder {
    /// Creates an encoder for the negotiated format, or for profile 0 when
    /// no format was negotiated.
    ///
    /// An absent profile-id selects profile 0, the SDP default; a malformed
    /// one, or a profile this build does not encode, yields `None`.
    pub fn new(negotiated: Option<&SdpVideoFormat>) -> Option<Vp9Encoder> {
        let format = match negotiated {
            Some(format) => format.clone(),
            None => create_vp9_format(Vp9Profile::Profile0),
        };
        let profile = match format.parameters.get(FMTP_PROFILE_ID) {
            Some(raw) => Vp9Profile::from_profile_id(raw)?,
            None => Vp9Profile::Profile0,
        };
        if !is_supported_encode_profile(profile) {
            return None;
        }
        Some(Vp9Encoder { format, profile })
    }

    /// The bitstream profile this encoder produces.
    pub fn profile(&self) -> Vp9Profile {
        self.profile
    }
}

impl VideoEncoder for Vp9Encoder {
    fn kind(&self) -> VideoCodecKind {
        VideoCodecKind::Vp9
    }

    fn format(&self) -> &SdpVideoFormat {
        &self.format
    }

    fn supports_scalability_mode(&self, _mode: ScalabilityMode) -> bool {
        // VP9 carries the full spatial and temporal layering set.
        true
    }
}

/// VP9 decoder handle.
pub struct Vp9Decoder {
    format: SdpVideoFormat,
}

impl Vp9Decoder {
    pub fn new() -> Vp9Decoder {
        Vp9Decoder {
            format: create_vp9_format(Vp9Profile::Profile0),
        }
    }
}

impl Default for Vp9Decoder {
    fn default() -> Self {
        Vp9Decoder::new()
    }
}

impl VideoDecoder for Vp9Decoder {
    fn kind(&self) -> VideoCodecKind {
        VideoCodecKind::Vp9
    }

    fn format(&self) -> &SdpVideoFormat {
        &self.format
    }
}
