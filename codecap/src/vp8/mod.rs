use crate::codec::{CODEC_NAME_VP8, VideoCodecKind, VideoDecoder, VideoEncoder};
use crate::format::SdpVideoFormat;
use crate::scalability::ScalabilityMode;

/// Formats this build can handle. VP8 has no profile variants, so there is
/// exactly one.
pub fn supported_vp8_formats() -> Vec<SdpVideoFormat> {
    vec![SdpVideoFormat::new(CODEC_NAME_VP8)]
}

/// VP8 encoder handle.
pub struct Vp8Encoder {
    format: SdpVideoFormat,
}

impl Vp8Encoder {
    pub fn new() -> Vp8Encoder {
        Vp8Encoder {
            format: SdpVideoFormat::new(CODEC_NAME_VP8),
        }
    }
}

impl Default for Vp8Encoder {
    fn default() -> Self {
        Vp8Encoder::new()
    }
}

impl VideoEncoder for Vp8Encoder {
    fn kind(&self) -> VideoCodecKind {
        VideoCodecKind::Vp8
    }

    fn format(&self) -> &SdpVideoFormat {
        &self.format
    }

    fn supports_scalability_mode(&self, mode: ScalabilityMode) -> bool {
        // Temporal scalability only.
        mode.num_spatial_layers() == 1
    }
}

/// VP8 decoder handle.
pub struct Vp8Decoder {
    format: SdpVideoFormat,
}

impl Vp8Decoder {
    pub fn new() -> Vp8Decoder {
        Vp8Decoder {
            format: SdpVideoFormat::new(CODEC_NAME_VP8),
        }
    }
}

impl Default for Vp8Decoder {
    fn default() -> Self {
        Vp8Decoder::new()
    }
}

impl VideoDecoder for Vp8Decoder {
    fn kind(&self) -> VideoCodecKind {
        VideoCodecKind::Vp8
    }

    fn format(&self) -> &SdpVideoFormat {
        &self.format
    }
}
