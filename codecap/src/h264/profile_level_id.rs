use std::fmt;

use serde::{Deserialize, Serialize};

/// H.264 profile as negotiated through the `profile-level-id` parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum H264Profile {
    ConstrainedBaseline,
    Baseline,
    Main,
    ConstrainedHigh,
    High,
    PredictiveHigh444,
}

/// H.264 level. Level 1b is the constrained variant of level 1.1 signaled
/// through constraint set 3.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum H264Level {
    Level1B,
    Level1,
    Level1_1,
    Level1_2,
    Level1_3,
    Level2,
    Level2_1,
    Level2_2,
    Level3,
    Level3_1,
    Level3_2,
    Level4,
    Level4_1,
    Level4_2,
    Level5,
    Level5_1,
    Level5_2,
}

impl H264Level {
    /// level_idc value carried in the third octet of profile-level-id.
    /// Level 1b shares idc 11 with level 1.1 and is told apart by
    /// constraint set 3.
    pub fn level_idc(&self) -> u8 {
        match *self {
            H264Level::Level1B => 11,
            H264Level::Level1 => 10,
            H264Level::Level1_1 => 11,
            H264Level::Level1_2 => 12,
            H264Level::Level1_3 => 13,
            H264Level::Level2 => 20,
            H264Level::Level2_1 => 21,
            H264Level::Level2_2 => 22,
            H264Level::Level3 => 30,
            H264Level::Level3_1 => 31,
            H264Level::Level3_2 => 32,
            H264Level::Level4 => 40,
            H264Level::Level4_1 => 41,
            H264Level::Level4_2 => 42,
            H264Level::Level5 => 50,
            H264Level::Level5_1 => 51,
            H264Level::Level5_2 => 52,
        }
    }
}

/// Constraint set 3 flag in the profile_iop octet; turns level_idc 11
/// into level 1b.
const CONSTRAINT_SET3_FLAG: u8 = 0x10;

/// Recognized combinations of profile_idc and profile_iop constraint bits.
/// An `x` position in the pattern is ignored when matching.
struct ProfilePattern {
    profile_idc: u8,
    iop_mask: u8,
    iop_value: u8,
    profile: H264Profile,
}

const PROFILE_PATTERNS: &[ProfilePattern] = &[
    // 0x42 x1xx0000
    ProfilePattern {
        profile_idc: 0x42,
        iop_mask: 0x4F,
        iop_value: 0x40,
        profile: H264Profile::ConstrainedBaseline,
    },
    // 0x4D 1xxx0000
    ProfilePattern {
        profile_idc: 0x4D,
        iop_mask: 0x8F,
        iop_value: 0x80,
        profile: H264Profile::ConstrainedBaseline,
    },
    // 0x58 11xx0000
    ProfilePattern {
        profile_idc: 0x58,
        iop_mask: 0xCF,
        iop_value: 0xC0,
        profile: H264Profile::ConstrainedBaseline,
    },
    // 0x42 x0xx0000
    ProfilePattern {
        profile_idc: 0x42,
        iop_mask: 0x4F,
        iop_value: 0x00,
        profile: H264Profile::Baseline,
    },
    // 0x58 10xx0000
    ProfilePattern {
        profile_idc: 0x58,
        iop_mask: 0xCF,
        iop_value: 0x80,
        profile: H264Profile::Baseline,
    },
    // 0x4D 0x0x0000
    ProfilePattern {
        profile_idc: 0x4D,
        iop_mask: 0xAF,
        iop_value: 0x00,
        profile: H264Profile::Main,
    },
    // 0x64 00000000
    ProfilePattern {
        profile_idc: 0x64,
        iop_mask: 0xFF,
        iop_value: 0x00,
        profile: H264Profile::High,
    },
    // 0x64 00001100
    ProfilePattern {
        profile_idc: 0x64,
        iop_mask: 0xFF,
        iop_value: 0x0C,
        profile: H264Profile::ConstrainedHigh,
    },
    // 0xF4 00000000
    ProfilePattern {
        profile_idc: 0xF4,
        iop_mask: 0xFF,
        iop_value: 0x00,
        profile: H264Profile::PredictiveHigh444,
    },
];

/// Profile and level of an H.264 stream, the value type behind the
/// `profile-level-id` fmtp parameter.
///
/// Combinations that cannot be expressed on the wire, level 1b outside the
/// Constrained Baseline, Baseline and Main profiles, are rejected at
/// construction, so every value formats to a canonical six-digit hex
/// string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct H264ProfileLevelId {
    profile: H264Profile,
    level: H264Level,
}

impl H264ProfileLevelId {
    /// Constrained Baseline level 3.1, the interoperability point every
    /// H.264 endpoint is expected to handle.
    pub const CONSTRAINED_BASELINE_3_1: H264ProfileLevelId = H264ProfileLevelId {
        profile: H264Profile::ConstrainedBaseline,
        level: H264Level::Level3_1,
    };

    /// Creates a profile/level pair, rejecting combinations that have no
    /// wire encoding.
    pub fn new(profile: H264Profile, level: H264Level) -> Option<H264ProfileLevelId> {
        if level == H264Level::Level1B
            && !matches!(
                profile,
                H264Profile::ConstrainedBaseline | H264Profile::Baseline | H264Profile::Main
            )
        {
            return None;
        }
        Some(H264ProfileLevelId { profile, level })
    }

    /// Parses the six-digit hex form of the `profile-level-id` parameter.
    ///
    /// Returns `None` on anything that is not exactly six hex digits or
    /// that does not map onto a recognized profile and level.
    pub fn parse(profile_level_id: &str) -> Option<H264ProfileLevelId> {
        if profile_level_id.len() != 6
            || !profile_level_id.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return None;
        }
        let value = u32::from_str_radix(profile_level_id, 16).ok()?;
        // All-zero is used by some endpoints as "unset".
        if value == 0 {
            return None;
        }

        let level_idc = (value & 0xFF) as u8;
        let profile_iop = ((value >> 8) & 0xFF) as u8;
        let profile_idc = ((value >> 16) & 0xFF) as u8;

        let level = match level_idc {
            11 if profile_iop & CONSTRAINT_SET3_FLAG != 0 => H264Level::Level1B,
            10 => H264Level::Level1,
            11 => H264Level::Level1_1,
            12 => H264Level::Level1_2,
            13 => H264Level::Level1_3,
            20 => H264Level::Level2,
            21 => H264Level::Level2_1,
            22 => H264Level::Level2_2,
            30 => H264Level::Level3,
            31 => H264Level::Level3_1,
            32 => H264Level::Level3_2,
            40 => H264Level::Level4,
            41 => H264Level::Level4_1,
            42 => H264Level::Level4_2,
            50 => H264Level::Level5,
            51 => H264Level::Level5_1,
            52 => H264Level::Level5_2,
            _ => return None,
        };

        for pattern in PROFILE_PATTERNS {
            if profile_idc == pattern.profile_idc
                && profile_iop & pattern.iop_mask == pattern.iop_value
            {
                return H264ProfileLevelId::new(pattern.profile, level);
            }
        }

        None
    }

    pub fn profile(&self) -> H264Profile {
        self.profile
    }

    pub fn level(&self) -> H264Level {
        self.level
    }
}

impl fmt::Display for H264ProfileLevelId {
    /// Formats the canonical hex sextet. Total over every constructible
    /// value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.level == H264Level::Level1B {
            return match self.profile {
                H264Profile::ConstrainedBaseline => write!(f, "42f00b"),
                H264Profile::Baseline => write!(f, "42100b"),
                // `new` admits no profile beyond Main at level 1b.
                _ => write!(f, "4d100b"),
            };
        }
        let profile_idc_iop = match self.profile {
            H264Profile::ConstrainedBaseline => "42e0",
            H264Profile::Baseline => "4200",
            H264Profile::Main => "4d00",
            H264Profile::ConstrainedHigh => "640c",
            H264Profile::High => "6400",
            H264Profile::PredictiveHigh444 => "f400",
        };
        write!(f, "{}{:02x}", profile_idc_iop, self.level.level_idc())
    }
}
