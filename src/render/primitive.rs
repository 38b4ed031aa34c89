//! Visual primitives produced by the layer builder
//!
//! A [`Primitive`] pairs one shape with the place it gets attached to: one of
//! the clustered marker groups, or the map itself (circles and polylines are
//! never clustered).

use crate::{
    core::geo::LatLng,
    layers::{
        marker::Marker,
        vector::{Circle, Polyline},
    },
};

/// Semantic category a primitive was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Antennas from `couverture`
    Coverage,
    /// Wi-Fi relays from `ubr`
    Ubr,
    /// Points from `dead_zone`
    DeadZone,
    /// Points of every `itineraire` segment
    Itinerary,
    /// Lines through each `itineraire` segment
    Route,
    /// Lines from `polyline`
    Polyline,
    /// Flat antenna file overlay
    AntennaFile,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Coverage => "coverage",
            Category::Ubr => "ubr",
            Category::DeadZone => "dead_zone",
            Category::Itinerary => "itinerary",
            Category::Route => "route",
            Category::Polyline => "polyline",
            Category::AntennaFile => "antenna_file",
        };
        f.write_str(name)
    }
}

/// Clustered marker groups of a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKind {
    Coverage,
    DeadZone,
    Itinerary,
    AntennaFile,
}

impl GroupKind {
    /// Groups every fresh map starts with
    pub const RENDERED: [GroupKind; 3] = [GroupKind::Coverage, GroupKind::DeadZone, GroupKind::Itinerary];

    pub fn layer_id(&self) -> &'static str {
        match self {
            GroupKind::Coverage => "coverage",
            GroupKind::DeadZone => "dead_zone",
            GroupKind::Itinerary => "itinerary",
            GroupKind::AntennaFile => "antenna_file",
        }
    }
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.layer_id())
    }
}

/// Where a primitive is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Cluster(GroupKind),
    Map,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Marker(Marker),
    Circle(Circle),
    Polyline(Polyline),
}

impl Shape {
    pub fn category(&self) -> Category {
        match self {
            Shape::Marker(m) => m.category(),
            Shape::Circle(c) => c.category(),
            Shape::Polyline(p) => p.category(),
        }
    }

    /// Anchor position: marker position, circle center, first polyline point
    pub fn position(&self) -> Option<LatLng> {
        match self {
            Shape::Marker(m) => Some(m.position()),
            Shape::Circle(c) => Some(c.center()),
            Shape::Polyline(p) => p.points().first().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub target: Target,
    pub shape: Shape,
}

impl Primitive {
    pub fn new(target: Target, shape: Shape) -> Self {
        Self { target, shape }
    }

    pub fn category(&self) -> Category {
        self.shape.category()
    }

    pub fn as_marker(&self) -> Option<&Marker> {
        match &self.shape {
            Shape::Marker(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match &self.shape {
            Shape::Circle(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_polyline(&self) -> Option<&Polyline> {
        match &self.shape {
            Shape::Polyline(p) => Some(p),
            _ => None,
        }
    }
}
