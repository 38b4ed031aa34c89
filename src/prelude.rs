//! Prelude module for common coverage-map types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use coverage_map::prelude::*;`

pub use crate::core::{
    config::{CoercionPolicy, MapConfig, TileConfig},
    geo::{LatLng, LatLngBounds},
    map::{Map, RenderSnapshot},
};

pub use crate::layers::{
    base::{LayerTrait, LayerType},
    cluster::MarkerClusterGroup,
    manager::LayerManager,
    marker::{IconSpec, Marker},
    tile::TileLayer,
    vector::{Circle, Polyline, SerializableColor, ShapeStyle},
};

pub use crate::data::{
    payload::Payload,
    records::{Antenna, AntennaFileRecord, RoutePoint, UbrPoint},
};

pub use crate::render::{
    builder::LayerBuilder,
    filter::{FilterKind, FilterState},
    orchestrator::{Orchestrator, RenderState, RenderTrigger},
    primitive::{Category, GroupKind, Primitive, Shape, Target},
};

pub use crate::source::{
    file::FileSource,
    network::{NetworkSource, SearchParams},
    PayloadSource,
};

pub use crate::export::{serialize_payload, Download, ExportSink, FileExportSink, MemoryExportSink};

pub use crate::app::App;

pub use crate::{Error as MapError, Result};

pub use std::time::{Duration, Instant};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
