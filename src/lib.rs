//! # coverage-map
//!
//! Projects cell-coverage payloads (antennas, dead zones, itineraries, ad hoc
//! polylines and UBR relays) onto Leaflet-style map layers.
//!
//! A payload arrives from the search endpoint or from a local file, gets
//! normalized into typed records, and is rebuilt into a fresh [`Map`] on every
//! render cycle according to the current [`FilterState`].

pub mod app;
pub mod core;
pub mod data;
pub mod export;
pub mod layers;
pub mod prelude;
pub mod render;
pub mod source;
pub use crate::core::constants;

// Re-export public API
pub use app::App;

pub use core::{
    config::{CoercionPolicy, MapConfig},
    geo::{LatLng, LatLngBounds},
    map::{Map, RenderSnapshot},
};

pub use data::{payload::Payload, records::Antenna, records::RoutePoint, records::UbrPoint};

pub use export::{ExportSink, FileExportSink, MemoryExportSink};

pub use layers::{
    base::LayerTrait, cluster::MarkerClusterGroup, marker::Marker, tile::TileLayer,
    vector::{Circle, Polyline},
};

pub use render::{
    filter::{FilterKind, FilterState},
    orchestrator::{Orchestrator, RenderState, RenderTrigger},
    primitive::{Category, GroupKind, Primitive, Target},
};

pub use source::{file::FileSource, network::NetworkSource, network::SearchParams, PayloadSource};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Transport { status: u16, url: String },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Export error: {0}")]
    Export(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` as the `log` backend, honouring `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
}
