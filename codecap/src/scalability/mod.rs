
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::svc::StreamLayersConfig;

/// Scalability structure of an encoded stream, named after the standard
/// `LxTy` convention: `x` spatial and `y` temporal layers.
///
/// `L` modes predict upper spatial layers from lower ones; the `_KEY`
/// variants restrict that inter-layer prediction to key frames. `S` modes
/// are simulcast: the spatial layers are encoded independently.
///
/// The set is closed; encoders report support per mode through
/// [`VideoEncoder::supports_scalability_mode`](crate::codec::VideoEncoder::supports_scalability_mode).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalabilityMode {
    L1T1,
    L1T2,
    L1T3,
    L2T1,
    L2T1Key,
    L2T2,
    L2T2Key,
    L2T3,
    L2T3Key,
    L3T1,
    L3T1Key,
    L3T2,
    L3T2Key,
    L3T3,
    L3T3Key,
    S2T1,
    S2T2,
    S2T3,
    S3T1,
    S3T2,
    S3T3,
}

impl ScalabilityMode {
    /// Resolves a mode from its standard name, e.g. "L3T3" or "L2T1_KEY".
    pub fn from_name(raw: &str) -> Option<ScalabilityMode> {
        let mode = match raw {
            "L1T1" => ScalabilityMode::L1T1,
            "L1T2" => ScalabilityMode::L1T2,
            "L1T3" => ScalabilityMode::L1T3,
            "L2T1" => ScalabilityMode::L2T1,
            "L2T1_KEY" => ScalabilityMode::L2T1Key,
            "L2T2" => ScalabilityMode::L2T2,
            "L2T2_KEY" => ScalabilityMode::L2T2Key,
            "L2T3" => ScalabilityMode::L2T3,
            "L2T3_KEY" => ScalabilityMode::L2T3Key,
            "L3T1" => ScalabilityMode::L3T1,
            "L3T1_KEY" => ScalabilityMode::L3T1Key,
            "L3T2" => ScalabilityMode::L3T2,
            "L3T2_KEY" => ScalabilityMode::L3T2Key,
            "L3T3" => ScalabilityMode::L3T3,
            "L3T3_KEY" => ScalabilityMode::L3T3Key,
            "S2T1" => ScalabilityMode::S2T1,
            "S2T2" => ScalabilityMode::S2T2,
            "S2T3" => ScalabilityMode::S2T3,
            "S3T1" => ScalabilityMode::S3T1,
            "S3T2" => ScalabilityMode::S3T2,
            "S3T3" => ScalabilityMode::S3T3,
            _ => return None,
        };
        Some(mode)
    }

    /// The standard name of this mode.
    pub fn name(&self) -> &'static str {
        match *self {
            ScalabilityMode::L1T1 => "L1T1",
            ScalabilityMode::L1T2 => "L1T2",
            ScalabilityMode::L1T3 => "L1T3",
            ScalabilityMode::L2T1 => "L2T1",
            ScalabilityMode::L2T1Key => "L2T1_KEY",
            ScalabilityMode::L2T2 => "L2T2",
            ScalabilityMode::L2T2Key => "L2T2_KEY",
            ScalabilityMode::L2T3 => "L2T3",
            ScalabilityMode::L2T3Key => "L2T3_KEY",
            ScalabilityMode::L3T1 => "L3T1",
            ScalabilityMode::L3T1Key => "L3T1_KEY",
            ScalabilityMode::L3T2 => "L3T2",
            ScalabilityMode::L3T2Key => "L3T2_KEY",
            ScalabilityMode::L3T3 => "L3T3",
            ScalabilityMode::L3T3Key => "L3T3_KEY",
            ScalabilityMode::S2T1 => "S2T1",
            ScalabilityMode::S2T2 => "S2T2",
            ScalabilityMode::S2T3 => "S2T3",
            ScalabilityMode::S3T1 => "S3T1",
            ScalabilityMode::S3T2 => "S3T2",
            ScalabilityMode::S3T3 => "S3T3",
        }
    }

    /// Number of spatial layers, 1 to 3.
    pub fn num_spatial_layers(&self) -> usize {
        match *self {
            ScalabilityMode::L1T1 | ScalabilityMode::L1T2 | ScalabilityMode::L1T3 => 1,
            ScalabilityMode::L2T1
            | ScalabilityMode::L2T1Key
            | ScalabilityMode::L2T2
            | ScalabilityMode::L2T2Key
            | ScalabilityMode::L2T3
            | ScalabilityMode::L2T3Key
            | ScalabilityMode::S2T1
            | ScalabilityMode::S2T2
            | ScalabilityMode::S2T3 => 2,
            ScalabilityMode::L3T1
            | ScalabilityMode::L3T1Key
            | ScalabilityMode::L3T2
            | ScalabilityMode::L3T2Key
            | ScalabilityMode::L3T3
            | ScalabilityMode::L3T3Key
            | ScalabilityMode::S3T1
            | ScalabilityMode::S3T2
            | ScalabilityMode::S3T3 => 3,
        }
    }

    /// Number of temporal layers, 1 to 3.
    pub fn num_temporal_layers(&self) -> u8 {
        match *self {
            ScalabilityMode::L1T1
            | ScalabilityMode::L2T1
            | ScalabilityMode::L2T1Key
            | ScalabilityMode::L3T1
            | ScalabilityMode::L3T1Key
            | ScalabilityMode::S2T1
            | ScalabilityMode::S3T1 => 1,
            ScalabilityMode::L1T2
            | ScalabilityMode::L2T2
            | ScalabilityMode::L2T2Key
            | ScalabilityMode::L3T2
            | ScalabilityMode::L3T2Key
            | ScalabilityMode::S2T2
            | ScalabilityMode::S3T2 => 2,
            ScalabilityMode::L1T3
            | ScalabilityMode::L2T3
            | ScalabilityMode::L2T3Key
            | ScalabilityMode::L3T3
            | ScalabilityMode::L3T3Key
            | ScalabilityMode::S2T3
            | ScalabilityMode::S3T3 => 3,
        }
    }

    /// True for the `_KEY` variants, which allow inter-layer prediction on
    /// key frames only.
    pub fn is_key_mode(&self) -> bool {
        matches!(
            *self,
            ScalabilityMode::L2T1Key
                | ScalabilityMode::L2T2Key
                | ScalabilityMode::L2T3Key
                | ScalabilityMode::L3T1Key
                | ScalabilityMode::L3T2Key
                | ScalabilityMode::L3T3Key
        )
    }

    /// True when upper spatial layers are predicted from scaled lower
    /// layers, i.e. the multi-layer `L` modes. Simulcast encodes each layer
    /// independently.
    pub fn uses_reference_scaling(&self) -> bool {
        self.num_spatial_layers() > 1
            && !matches!(
                *self,
                ScalabilityMode::S2T1
                    | ScalabilityMode::S2T2
                    | ScalabilityMode::S2T3
                    | ScalabilityMode::S3T1
                    | ScalabilityMode::S3T2
                    | ScalabilityMode::S3T3
            )
    }

    /// Expresses this mode as explicit layer geometry for the SVC planner:
    /// each spatial layer at half the linear resolution of the next.
    pub fn stream_layers_config(&self) -> StreamLayersConfig {
        let num_spatial_layers = self.num_spatial_layers();
        let mut scaling_factor_num = Vec::with_capacity(num_spatial_layers);
        let mut scaling_factor_den = Vec::with_capacity(num_spatial_layers);
        for sid in 0..num_spatial_layers {
            scaling_factor_num.push(1);
            scaling_factor_den.push(1 << (num_spatial_layers - 1 - sid));
        }
        StreamLayersConfig {
            num_spatial_layers,
            num_temporal_layers: self.num_temporal_layers(),
            scaling_factor_num,
            scaling_factor_den,
        }
    }
}

impl fmt::Display for ScalabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
