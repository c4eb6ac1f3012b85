
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use unicase::UniCase;

use crate::codec::VideoCodecKind;

/// One video format as advertised or requested over SDP.
///
/// A format is a codec name in rtpmap style ("H264", "VP8", "VP9") plus the
/// negotiation parameters carried on the matching fmtp line. Keys are unique
/// and iteration order is stable, so capability lists built from formats are
/// deterministic across calls.
///
/// Derived equality compares name and parameters verbatim. Negotiation-level
/// equivalence, where names are case-insensitive and only the profile
/// parameters matter, is [`SdpVideoFormat::is_same_codec`].
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdpVideoFormat {
    /// Codec name as it appears in an rtpmap attribute.
    pub name: String,
    /// Format parameters, keyed as on the fmtp line.
    pub parameters: BTreeMap<String, String>,
}

impl SdpVideoFormat {
    /// Creates a format with no parameters.
    pub fn new(name: &str) -> Self {
        SdpVideoFormat {
            name: name.to_owned(),
            parameters: BTreeMap::new(),
        }
    }

    /// Creates a format with the given parameters.
    pub fn with_parameters(name: &str, parameters: BTreeMap<String, String>) -> Self {
        SdpVideoFormat {
            name: name.to_owned(),
            parameters,
        }
    }

    /// Builds a format from a raw fmtp line of `key=value` pairs separated
    /// by semicolons. Flag parameters without a value are kept with an
    /// empty value; surrounding whitespace is trimmed.
    pub fn parse_fmtp_line(name: &str, line: &str) -> Self {
        let mut parameters = BTreeMap::new();
        for part in line.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match part.split_once('=') {
                Some((key, value)) => {
                    parameters.insert(key.trim().to_owned(), value.trim().to_owned());
                }
                None => {
                    parameters.insert(part.to_owned(), String::new());
                }
            }
        }
        SdpVideoFormat {
            name: name.to_owned(),
            parameters,
        }
    }

    /// Renders the parameters back into an fmtp line.
    pub fn fmtp_line(&self) -> String {
        let mut line = String::new();
        for (key, value) in &self.parameters {
            if !line.is_empty() {
                line.push(';');
            }
            line.push_str(key);
            if !value.is_empty() {
                line.push('=');
                line.push_str(value);
            }
        }
        line
    }

    /// Reports whether two formats denote the same negotiated codec.
    ///
    /// Names compare case-insensitively. For codecs with profile variants
    /// the codec-specific profile parameters must denote the same profile;
    /// a missing or malformed profile parameter on either side compares as
    /// mismatched. Codecs without profile variants match on name alone.
    pub fn is_same_codec(&self, other: &SdpVideoFormat) -> bool {
        if UniCase::new(self.name.as_str()) != UniCase::new(other.name.as_str()) {
            return false;
        }
        match VideoCodecKind::from_name(&self.name) {
            #[cfg(feature = "h264")]
            Some(VideoCodecKind::H264) => {
                crate::h264::is_same_profile(&self.parameters, &other.parameters)
            }
            #[cfg(feature = "vp9")]
            Some(VideoCodecKind::Vp9) => {
                crate::vp9::is_same_profile(&self.parameters, &other.parameters)
            }
            _ => true,
        }
    }
}

impl fmt::Display for SdpVideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parameters.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.fmtp_line())
        }
    }
}
