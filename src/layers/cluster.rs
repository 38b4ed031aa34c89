//! Clustered marker groups
//!
//! A [`MarkerClusterGroup`] collects markers that are added to or removed from
//! the map as a unit. Merging nearby markers into clusters on screen is left
//! to whatever draws the map.

use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        marker::Marker,
    },
    render::primitive::{GroupKind, Primitive, Shape, Target},
};

pub struct MarkerClusterGroup {
    properties: LayerProperties,
    kind: GroupKind,
    markers: Vec<Marker>,
}

impl MarkerClusterGroup {
    pub fn new(kind: GroupKind) -> Self {
        let properties = LayerProperties::new(
            kind.layer_id().to_string(),
            kind.to_string(),
            LayerType::Cluster,
        );
        Self {
            properties,
            kind,
            markers: Vec::new(),
        }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn add_layer(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn clear_layers(&mut self) {
        self.markers.clear();
    }

    /// Members in insertion order
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl LayerTrait for MarkerClusterGroup {
    crate::impl_layer_trait!(MarkerClusterGroup, properties);

    fn bounds(&self) -> Option<LatLngBounds> {
        let positions: Vec<LatLng> = self.markers.iter().map(|m| m.position()).collect();
        LatLngBounds::from_points(&positions)
    }

    fn primitives(&self) -> Vec<Primitive> {
        self.markers
            .iter()
            .map(|m| Primitive::new(Target::Cluster(self.kind), Shape::Marker(m.clone())))
            .collect()
    }

    fn feature_count(&self) -> usize {
        self.markers.len()
    }
}
