use super::*;

#[test]
fn test_video_codec_kind_from_name() {
    let tests = vec![
        ("H264", Some(VideoCodecKind::H264)),
        ("h264", Some(VideoCodecKind::H264)),
        ("VP8", Some(VideoCodecKind::Vp8)),
        ("vp8", Some(VideoCodecKind::Vp8)),
        ("VP9", Some(VideoCodecKind::Vp9)),
        ("Vp9", Some(VideoCodecKind::Vp9)),
        ("AV1", None),
        ("opus", None),
        ("", None),
    ];

    for (raw, expected_kind) in tests {
        assert_eq!(VideoCodecKind::from_name(raw), expected_kind, "{raw}");
    }
}

#[test]
fn test_video_codec_kind_name_round_trip() {
    let kinds = vec![
        VideoCodecKind::H264,
        VideoCodecKind::Vp8,
        VideoCodecKind::Vp9,
    ];

    for kind in kinds {
        assert_eq!(VideoCodecKind::from_name(kind.name()), Some(kind));
        assert_eq!(kind.to_string(), kind.name());
    }
}

#[test]
fn test_video_encoder_config_new_is_single_layer() {
    let config = VideoEncoderConfig::new(VideoCodecKind::Vp9, 1280, 720, 30.0);

    assert_eq!(config.num_spatial_layers, 1);
    assert_eq!(config.first_active_layer, 0);
    assert!(!config.flexible_mode);
    assert!(config.stream_layers.is_none());
}
