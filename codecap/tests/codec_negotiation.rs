//! End-to-end pass over the registry: advertise capabilities, match the
//! remote side's pick, construct handles and plan scalable layers, the way
//! a signaling layer and media pipeline would drive it.

#![cfg(all(feature = "h264", feature = "vp8", feature = "vp9"))]

use codecap::codec::{VideoCodecKind, VideoEncoderConfig};
use codecap::factory;
use codecap::format::SdpVideoFormat;
use codecap::scalability::ScalabilityMode;
use codecap::svc;

fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

#[test]
fn test_negotiate_h264_and_construct() {
    init_logging();

    // Advertise the decode capabilities over the signaling channel.
    let advertised = factory::supported_decoder_formats(VideoCodecKind::H264);
    let payload = serde_json::to_string(&advertised).expect("serialize capability list");

    // The remote peer answers with the format it picked, serialized the
    // same way.
    let remote: Vec<SdpVideoFormat> = serde_json::from_str(&payload).expect("well-formed answer");
    let remote_pick = SdpVideoFormat::parse_fmtp_line(
        "H264",
        "level-asymmetry-allowed=1;packetization-mode=1;profile-level-id=42e01f",
    );

    // The pick must match one of our advertised formats at negotiation
    // level before we commit an encoder to it.
    let matched = remote
        .iter()
        .find(|format| format.is_same_codec(&remote_pick))
        .expect("constrained baseline is advertised");

    let encoder =
        factory::create_encoder(VideoCodecKind::H264, Some(matched)).expect("matched format");
    assert_eq!(encoder.kind(), VideoCodecKind::H264);
    assert!(encoder.supports_scalability_mode(ScalabilityMode::L1T3));
    assert!(!encoder.supports_scalability_mode(ScalabilityMode::L3T3));

    let decoder = factory::create_decoder(VideoCodecKind::H264).expect("h264 decoder");
    assert_eq!(decoder.kind(), VideoCodecKind::H264);
}

#[test]
fn test_unsupported_pick_falls_back_to_vp8() {
    init_logging();

    // The remote insists on a profile this build does not encode; the
    // expected outcome is "unavailable", not a failure.
    let high = SdpVideoFormat::parse_fmtp_line("H264", "profile-level-id=640028");
    assert!(factory::create_encoder(VideoCodecKind::H264, Some(&high)).is_none());

    // Fall back to the next codec in the offer.
    let fallback = factory::create_encoder(VideoCodecKind::Vp8, None).expect("vp8 encoder");
    assert_eq!(fallback.kind(), VideoCodecKind::Vp8);
}

#[test]
fn test_vp9_svc_session() {
    init_logging();

    let negotiated = factory::supported_encoder_formats(VideoCodecKind::Vp9)
        .into_iter()
        .next()
        .expect("vp9 is compiled in");
    let encoder =
        factory::create_encoder(VideoCodecKind::Vp9, Some(&negotiated)).expect("vp9 encoder");

    let mode = ScalabilityMode::L3T3;
    assert!(encoder.supports_scalability_mode(mode));

    // Plan the layers for the negotiated mode and hand them to the encoder
    // configuration.
    let config = VideoEncoderConfig {
        max_bitrate_bps: 1_500_000,
        num_spatial_layers: mode.num_spatial_layers(),
        stream_layers: Some(mode.stream_layers_config()),
        ..VideoEncoderConfig::new(VideoCodecKind::Vp9, 1280, 720, 30.0)
    };
    let layers = svc::svc_config_from_encoder_config(&config).expect("valid configuration");

    assert_eq!(layers.len(), 3);
    assert_eq!((layers[0].width, layers[0].height), (320, 180));
    assert_eq!((layers[2].width, layers[2].height), (1280, 720));

    let total: u64 = layers
        .iter()
        .filter(|layer| layer.active)
        .map(|layer| u64::from(layer.target_bitrate_bps))
        .sum();
    assert!(total <= u64::from(config.max_bitrate_bps));
}
