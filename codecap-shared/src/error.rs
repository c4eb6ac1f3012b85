use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("svc: number of spatial layers must be positive")]
    ErrSvcNoSpatialLayers,
    #[error("svc: requested more spatial layers than supported")]
    ErrSvcTooManySpatialLayers,
    #[error("svc: first active layer must be below the layer count")]
    ErrSvcFirstActiveLayer,
    #[error("svc: smallest active layer is below the minimum resolution")]
    ErrSvcResolutionTooSmall,
    #[error("svc: total bitrate budget must be positive")]
    ErrSvcNoBitrateBudget,
    #[error("svc: framerate must be positive")]
    ErrSvcFramerate,
    #[error("svc: scaling factors must cover every layer with nonzero denominators")]
    ErrSvcScalingFactor,
    #[error("svc: layer resolutions must be strictly increasing")]
    ErrSvcLayerOrdering,
    #[error("svc: temporal layer count out of range")]
    ErrSvcTemporalLayerCount,

    #[error("{0}")]
    Other(String),
}
