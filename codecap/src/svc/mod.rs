//! Spatial layer planning for scalable video.
//!
//! Every function here is a pure function of its inputs: the planner turns a
//! target resolution, framerate and bitrate budget into an ordered set of
//! spatial layers, either by power-of-two downscaling or from explicit
//! scaling fractions supplied by the caller. Inconsistent requests are
//! rejected with an explicit error, never silently adjusted.


use serde::{Deserialize, Serialize};
use shared::error::{Error, Result};

use crate::codec::VideoEncoderConfig;

/// Upper bound on spatial layers per stream.
pub const MAX_SPATIAL_LAYERS: usize = 3;
/// Upper bound on temporal layers per spatial layer.
pub const MAX_TEMPORAL_LAYERS: u8 = 3;

/// The smallest active spatial layer must keep its longest side at or
/// above this.
pub const MIN_SPATIAL_LAYER_LONGEST_SIDE: u32 = 240;
/// The smallest active spatial layer must keep its shortest side at or
/// above this.
pub const MIN_SPATIAL_LAYER_SHORTEST_SIDE: u32 = 135;

/// Floor for the per-layer minimum bitrate.
const MIN_LAYER_BITRATE_BPS: u32 = 30_000;

/// One resolution tier of a scalable stream, ordered smallest to largest
/// within a plan. Bitrates are in bits per second.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialLayer {
    pub width: u32,
    pub height: u32,
    pub max_framerate: f64,
    pub num_temporal_layers: u8,
    pub min_bitrate_bps: u32,
    pub target_bitrate_bps: u32,
    pub max_bitrate_bps: u32,
    /// Layers below the first active layer are emitted with geometry only,
    /// so spatial ids stay aligned for the consumer.
    pub active: bool,
}

/// Explicit layer geometry supplied by the caller instead of the planner's
/// computed defaults.
///
/// `scaling_factor_num[sid] / scaling_factor_den[sid]` scales the top-layer
/// resolution down to spatial layer `sid`, lowest layer first. Both vectors
/// must carry exactly `num_spatial_layers` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamLayersConfig {
    pub num_spatial_layers: usize,
    pub num_temporal_layers: u8,
    pub scaling_factor_num: Vec<u32>,
    pub scaling_factor_den: Vec<u32>,
}

/// Computes the spatial layer plan for a scalable stream.
///
/// Layers come back ordered smallest to largest. `stream_layers` takes
/// precedence over the computed power-of-two geometry when present. Layers
/// below `first_active_layer` are inactive with zeroed bitrates; the summed
/// target bitrate of the active layers never exceeds
/// `max_total_bitrate_bps`.
///
/// # Errors
///
/// Any geometrically or numerically inconsistent request is rejected:
/// zero or too many layers, a first active layer at or past the layer
/// count, a zero bitrate budget or framerate, scaling factors that do not
/// cover every layer or do not grow strictly, and resolutions that would
/// push the smallest active layer below 240x135.
#[allow(clippy::too_many_arguments)]
pub fn get_svc_config(
    width: u32,
    height: u32,
    max_framerate: f64,
    first_active_layer: usize,
    num_spatial_layers: usize,
    max_total_bitrate_bps: u32,
    flexible_mode: bool,
    stream_layers: Option<&StreamLayersConfig>,
) -> Result<Vec<SpatialLayer>> {
    if num_spatial_layers == 0 {
        return Err(Error::ErrSvcNoSpatialLayers);
    }
    if num_spatial_layers > MAX_SPATIAL_LAYERS {
        return Err(Error::ErrSvcTooManySpatialLayers);
    }
    if first_active_layer >= num_spatial_layers {
        return Err(Error::ErrSvcFirstActiveLayer);
    }
    if max_total_bitrate_bps == 0 {
        return Err(Error::ErrSvcNoBitrateBudget);
    }
    if !(max_framerate > 0.0) {
        return Err(Error::ErrSvcFramerate);
    }

    let num_temporal_layers = match stream_layers {
        Some(config) => {
            if config.num_spatial_layers != num_spatial_layers
                || config.scaling_factor_num.len() != num_spatial_layers
                || config.scaling_factor_den.len() != num_spatial_layers
                || config.scaling_factor_den.contains(&0)
            {
                return Err(Error::ErrSvcScalingFactor);
            }
            if config.num_temporal_layers == 0
                || config.num_temporal_layers > MAX_TEMPORAL_LAYERS
            {
                return Err(Error::ErrSvcTemporalLayerCount);
            }
            config.num_temporal_layers
        }
        // Flexible mode leaves the temporal pattern to the caller at
        // runtime; the plan carries a single temporal layer.
        None if flexible_mode => 1,
        None => MAX_TEMPORAL_LAYERS,
    };

    let mut layers = Vec::with_capacity(num_spatial_layers);
    for sid in 0..num_spatial_layers {
        let (layer_width, layer_height) = match stream_layers {
            Some(config) => (
                scale_dimension(width, config.scaling_factor_num[sid], config.scaling_factor_den[sid]),
                scale_dimension(height, config.scaling_factor_num[sid], config.scaling_factor_den[sid]),
            ),
            None => {
                let shift = num_spatial_layers - 1 - sid;
                (width >> shift, height >> shift)
            }
        };
        layers.push(SpatialLayer {
            width: layer_width,
            height: layer_height,
            max_framerate,
            num_temporal_layers,
            ..Default::default()
        });
    }

    for sid in 1..num_spatial_layers {
        if pixels(&layers[sid]) <= pixels(&layers[sid - 1]) {
            return Err(Error::ErrSvcLayerOrdering);
        }
    }

    let lowest_active = &layers[first_active_layer];
    let longest_side = lowest_active.width.max(lowest_active.height);
    let shortest_side = lowest_active.width.min(lowest_active.height);
    if longest_side < MIN_SPATIAL_LAYER_LONGEST_SIDE
        || shortest_side < MIN_SPATIAL_LAYER_SHORTEST_SIDE
    {
        return Err(Error::ErrSvcResolutionTooSmall);
    }

    for layer in layers.iter_mut().skip(first_active_layer) {
        layer.active = true;
        let (min_bitrate_bps, target_bitrate_bps, max_bitrate_bps) =
            layer_bitrates(pixels(layer));
        layer.min_bitrate_bps = min_bitrate_bps;
        layer.target_bitrate_bps = target_bitrate_bps;
        layer.max_bitrate_bps = max_bitrate_bps;
    }

    cap_total_bitrate(&mut layers, max_total_bitrate_bps);

    Ok(layers)
}

/// Extracts the layering inputs from a negotiated encoder configuration and
/// delegates to [`get_svc_config`].
pub fn svc_config_from_encoder_config(
    config: &VideoEncoderConfig,
) -> Result<Vec<SpatialLayer>> {
    get_svc_config(
        config.width,
        config.height,
        config.max_framerate,
        config.first_active_layer,
        config.num_spatial_layers,
        config.max_bitrate_bps,
        config.flexible_mode,
        config.stream_layers.as_ref(),
    )
}

fn scale_dimension(dimension: u32, num: u32, den: u32) -> u32 {
    (u64::from(dimension) * u64::from(num) / u64::from(den)) as u32
}

fn pixels(layer: &SpatialLayer) -> u64 {
    u64::from(layer.width) * u64::from(layer.height)
}

/// Rate points for one layer as a function of its pixel count. The min and
/// max curves come from subjective-quality fits: below min the layer is not
/// worth sending, above max extra bits stop paying off.
fn layer_bitrates(num_pixels: u64) -> (u32, u32, u32) {
    let num_pixels = num_pixels as f64;
    let max_bitrate_bps = (1.6 * num_pixels + 50_000.0).round() as u32;
    let min_bitrate_bps = (600.0 * num_pixels.sqrt() - 95_000.0)
        .max(f64::from(MIN_LAYER_BITRATE_BPS))
        .round() as u32;
    let target_bitrate_bps = (min_bitrate_bps + max_bitrate_bps) / 2;
    (min_bitrate_bps, target_bitrate_bps, max_bitrate_bps)
}

/// Scales the active layers down proportionally when their summed target
/// exceeds the budget.
fn cap_total_bitrate(layers: &mut [SpatialLayer], max_total_bitrate_bps: u32) {
    let total: u64 = layers
        .iter()
        .filter(|layer| layer.active)
        .map(|layer| u64::from(layer.target_bitrate_bps))
        .sum();
    if total == 0 || total <= u64::from(max_total_bitrate_bps) {
        return;
    }

    // Truncation keeps the scaled sum at or below the budget.
    let scale = f64::from(max_total_bitrate_bps) / total as f64;
    for layer in layers.iter_mut().filter(|layer| layer.active) {
        layer.target_bitrate_bps = (f64::from(layer.target_bitrate_bps) * scale) as u32;
        layer.max_bitrate_bps =
            ((f64::from(layer.max_bitrate_bps) * scale) as u32).max(layer.target_bitrate_bps);
        layer.min_bitrate_bps = layer.min_bitrate_bps.min(layer.target_bitrate_bps);
    }
}
