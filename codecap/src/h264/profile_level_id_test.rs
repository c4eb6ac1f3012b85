use std::collections::BTreeMap;

use super::*;

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn test_parse_well_known_ids() {
    let tests = vec![
        ("42e01f", H264Profile::ConstrainedBaseline, H264Level::Level3_1),
        ("42e00b", H264Profile::ConstrainedBaseline, H264Level::Level1_1),
        ("42f00b", H264Profile::ConstrainedBaseline, H264Level::Level1B),
        ("42C02A", H264Profile::ConstrainedBaseline, H264Level::Level4_2),
        ("4de01f", H264Profile::ConstrainedBaseline, H264Level::Level3_1),
        ("58f01f", H264Profile::ConstrainedBaseline, H264Level::Level3_1),
        ("42a01e", H264Profile::Baseline, H264Level::Level3),
        ("58A01E", H264Profile::Baseline, H264Level::Level3),
        ("4d0015", H264Profile::Main, H264Level::Level2_1),
        ("4d100b", H264Profile::Main, H264Level::Level1B),
        ("640028", H264Profile::High, H264Level::Level4),
        ("640c34", H264Profile::ConstrainedHigh, H264Level::Level5_2),
        ("f4001f", H264Profile::PredictiveHigh444, H264Level::Level3_1),
    ];

    for (raw, expected_profile, expected_level) in tests {
        let id = H264ProfileLevelId::parse(raw).unwrap_or_else(|| panic!("{raw} must parse"));
        assert_eq!(id.profile(), expected_profile, "{raw}");
        assert_eq!(id.level(), expected_level, "{raw}");
    }
}

#[test]
fn test_parse_rejects_malformed_ids() {
    let tests = vec![
        "",
        "42e01",   // too short
        "42e01f0", // too long
        "42e0lf",  // not hex
        "+2e01f",  // sign is not a digit
        "000000",  // all-zero means unset
        "42e099",  // unrecognized level_idc
        "42ff1f",  // unrecognized constraint pattern
        "aa001f",  // unrecognized profile_idc
    ];

    for raw in tests {
        assert_eq!(H264ProfileLevelId::parse(raw), None, "{raw}");
    }
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!(
        H264ProfileLevelId::parse("42E01F"),
        H264ProfileLevelId::parse("42e01f")
    );
}

#[test]
fn test_to_string_canonical() {
    let tests = vec![
        (H264Profile::ConstrainedBaseline, H264Level::Level3_1, "42e01f"),
        (H264Profile::Baseline, H264Level::Level1, "42000a"),
        (H264Profile::Main, H264Level::Level3_1, "4d001f"),
        (H264Profile::ConstrainedHigh, H264Level::Level4_2, "640c2a"),
        (H264Profile::High, H264Level::Level4_2, "64002a"),
        (H264Profile::PredictiveHigh444, H264Level::Level2_1, "f40015"),
        (H264Profile::ConstrainedBaseline, H264Level::Level1B, "42f00b"),
        (H264Profile::Baseline, H264Level::Level1B, "42100b"),
        (H264Profile::Main, H264Level::Level1B, "4d100b"),
    ];

    for (profile, level, expected) in tests {
        let id = H264ProfileLevelId::new(profile, level)
            .unwrap_or_else(|| panic!("{expected} must construct"));
        assert_eq!(id.to_string(), expected);
    }
}

#[test]
fn test_parse_to_string_round_trip() {
    let tests = vec!["42e01f", "42000a", "4d001f", "640c2a", "64002a", "42f00b"];

    for raw in tests {
        let id = H264ProfileLevelId::parse(raw).unwrap_or_else(|| panic!("{raw} must parse"));
        assert_eq!(id.to_string(), raw);
    }
}

#[test]
fn test_new_rejects_level_1b_outside_legacy_profiles() {
    assert!(H264ProfileLevelId::new(H264Profile::High, H264Level::Level1B).is_none());
    assert!(
        H264ProfileLevelId::new(H264Profile::ConstrainedHigh, H264Level::Level1B).is_none()
    );
    assert!(
        H264ProfileLevelId::new(H264Profile::PredictiveHigh444, H264Level::Level1B).is_none()
    );
    assert!(H264ProfileLevelId::new(H264Profile::Main, H264Level::Level1B).is_some());
}

#[test]
fn test_parse_sdp_profile_level_id() {
    let well_formed = params(&[("profile-level-id", "640c34")]);
    let id = parse_sdp_profile_level_id(&well_formed).expect("must parse");
    assert_eq!(id.profile(), H264Profile::ConstrainedHigh);

    // No implicit default when the key is absent.
    assert_eq!(parse_sdp_profile_level_id(&params(&[])), None);
    assert_eq!(
        parse_sdp_profile_level_id(&params(&[("packetization-mode", "1")])),
        None
    );
    assert_eq!(
        parse_sdp_profile_level_id(&params(&[("profile-level-id", "gggggg")])),
        None
    );
}

#[test]
fn test_is_same_profile_reflexive() {
    let maps = vec![
        params(&[("profile-level-id", "42e01f")]),
        params(&[("profile-level-id", "42f00b"), ("packetization-mode", "1")]),
        params(&[("profile-level-id", "640c34")]),
    ];

    for map in maps {
        assert!(is_same_profile(&map, &map));
    }
}

#[test]
fn test_is_same_profile_ignores_level() {
    let level_3_1 = params(&[("profile-level-id", "42e01f")]);
    let level_5_2 = params(&[("profile-level-id", "42e034")]);

    assert!(is_same_profile(&level_3_1, &level_5_2));
}

#[test]
fn test_is_same_profile_mismatches() {
    let constrained_baseline = params(&[("profile-level-id", "42e01f")]);
    let high = params(&[("profile-level-id", "640028")]);
    let empty = params(&[]);
    let malformed = params(&[("profile-level-id", "zz")]);

    assert!(!is_same_profile(&constrained_baseline, &high));
    // Missing and malformed keys compare as mismatched, even on both sides.
    assert!(!is_same_profile(&constrained_baseline, &empty));
    assert!(!is_same_profile(&empty, &empty));
    assert!(!is_same_profile(&malformed, &malformed));
}

#[test]
fn test_create_h264_format() {
    let format = create_h264_format(
        H264Profile::ConstrainedBaseline,
        H264Level::Level3_1,
        "1",
    )
    .expect("valid combination");

    assert_eq!(format.name, "H264");
    assert_eq!(
        format.parameters.get(FMTP_PROFILE_LEVEL_ID).map(String::as_str),
        Some("42e01f")
    );
    assert_eq!(
        format.parameters.get(FMTP_PACKETIZATION_MODE).map(String::as_str),
        Some("1")
    );
    assert_eq!(
        format
            .parameters
            .get(FMTP_LEVEL_ASYMMETRY_ALLOWED)
            .map(String::as_str),
        Some("1")
    );

    assert!(create_h264_format(H264Profile::High, H264Level::Level1B, "1").is_none());
}

#[test]
fn test_supported_h264_formats_are_parsable_and_stable() {
    let formats = supported_h264_decoder_formats();
    assert_eq!(formats.len(), 4);

    for format in &formats {
        let id = parse_sdp_profile_level_id(&format.parameters)
            .unwrap_or_else(|| panic!("{format} must carry a parsable profile"));
        assert!(matches!(
            id.profile(),
            H264Profile::ConstrainedBaseline | H264Profile::Baseline
        ));
    }

    assert_eq!(formats, supported_h264_decoder_formats());
    assert_eq!(supported_h264_encoder_formats(), formats);
}

#[test]
fn test_h264_encoder_profile_selection() {
    use crate::codec::VideoEncoder;
    use crate::format::SdpVideoFormat;

    // Default when nothing was negotiated.
    let encoder = H264Encoder::new(None).expect("default profile");
    assert_eq!(
        encoder.profile_level_id(),
        H264ProfileLevelId::CONSTRAINED_BASELINE_3_1
    );

    // Negotiated baseline is selectable.
    let baseline = SdpVideoFormat::parse_fmtp_line("H264", "profile-level-id=42000a");
    let encoder = H264Encoder::new(Some(&baseline)).expect("baseline profile");
    assert_eq!(encoder.profile_level_id().profile(), H264Profile::Baseline);
    assert_eq!(encoder.format(), &baseline);

    // Absent profile-level-id falls back to the SDP default profile.
    let bare = SdpVideoFormat::new("H264");
    let encoder = H264Encoder::new(Some(&bare)).expect("sdp default profile");
    assert_eq!(
        encoder.profile_level_id(),
        H264ProfileLevelId::CONSTRAINED_BASELINE_3_1
    );

    // High is not encodable in this build; malformed ids never construct.
    let high = SdpVideoFormat::parse_fmtp_line("H264", "profile-level-id=640028");
    assert!(H264Encoder::new(Some(&high)).is_none());
    let malformed = SdpVideoFormat::parse_fmtp_line("H264", "profile-level-id=xyz");
    assert!(H264Encoder::new(Some(&malformed)).is_none());
}

#[test]
fn test_h264_scalability_is_temporal_only() {
    use crate::codec::VideoEncoder;
    use crate::scalability::ScalabilityMode;

    let encoder = H264Encoder::new(None).expect("default profile");

    assert!(encoder.supports_scalability_mode(ScalabilityMode::L1T1));
    assert!(encoder.supports_scalability_mode(ScalabilityMode::L1T3));
    assert!(!encoder.supports_scalability_mode(ScalabilityMode::L2T2));
    assert!(!encoder.supports_scalability_mode(ScalabilityMode::S3T3));
}
