use crate::{
    core::{
        config::MapConfig,
        geo::{LatLng, LatLngBounds},
    },
    layers::{
        base::LayerTrait,
        cluster::MarkerClusterGroup,
        manager::LayerManager,
        marker::Marker,
        tile::TileLayer,
        vector::{Circle, Polyline},
    },
    render::primitive::{Category, GroupKind, Primitive, Shape, Target},
    MapError, Result,
};

const BASE_TILE_LAYER_ID: &str = "base";

/// A map instance owning its base tiles, clustered groups and shapes
///
/// A fresh map is created for every render cycle and dropped with everything
/// attached to it, so nothing leaks from one render into the next.
pub struct Map {
    center: LatLng,
    zoom: f64,
    layers: LayerManager,
}

impl Map {
    /// Creates a map at the configured view with the base tile layer and the
    /// coverage, dead-zone and itinerary cluster groups attached.
    pub fn new(config: &MapConfig) -> Result<Self> {
        let mut map = Self {
            center: config.view.center,
            zoom: config.view.zoom,
            layers: LayerManager::new(),
        };

        map.add_layer(Box::new(TileLayer::new(
            BASE_TILE_LAYER_ID.to_string(),
            config.tiles.clone(),
        )))?;
        for kind in GroupKind::RENDERED {
            map.add_cluster_group(kind)?;
        }

        Ok(map)
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() || !zoom.is_finite() {
            return Err(MapError::InvalidCoordinates(format!(
                "cannot center map on {center:?} at zoom {zoom}"
            )));
        }
        self.center = center;
        self.zoom = zoom;
        Ok(())
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.layers.add_layer(layer)
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        self.layers
            .remove_layer(layer_id)
            .map(|_| ())
            .ok_or_else(|| MapError::Layer(format!("no layer '{layer_id}'")))
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get_layer(layer_id)
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layers
            .layers()
            .into_iter()
            .map(|layer| layer.id().to_string())
            .collect()
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn tile_layer(&self) -> Option<&TileLayer> {
        self.layers.get_layer_as::<TileLayer>(BASE_TILE_LAYER_ID)
    }

    /// Attaches an empty cluster group of the given kind.
    pub fn add_cluster_group(&mut self, kind: GroupKind) -> Result<()> {
        self.add_layer(Box::new(MarkerClusterGroup::new(kind)))
    }

    pub fn cluster_group(&self, kind: GroupKind) -> Option<&MarkerClusterGroup> {
        self.layers.get_layer_as::<MarkerClusterGroup>(kind.layer_id())
    }

    /// Attaches one primitive where it is tagged to go.
    ///
    /// A cluster group missing from the map is created on first use.
    pub fn attach(&mut self, primitive: Primitive) -> Result<()> {
        match primitive.target {
            Target::Cluster(kind) => {
                let Shape::Marker(marker) = primitive.shape else {
                    return Err(MapError::Layer(format!(
                        "only markers can join the {kind} cluster group"
                    )));
                };
                if self.cluster_group(kind).is_none() {
                    self.add_cluster_group(kind)?;
                }
                self.layers
                    .with_layer_mut(kind.layer_id(), |layer| {
                        layer
                            .as_any_mut()
                            .downcast_mut::<MarkerClusterGroup>()
                            .map(|group| group.add_layer(marker))
                    })
                    .flatten()
                    .ok_or_else(|| {
                        MapError::Layer(format!("layer '{}' is not a cluster group", kind.layer_id()))
                    })
            }
            Target::Map => match primitive.shape {
                Shape::Marker(marker) => self.add_layer(Box::new(marker)),
                Shape::Circle(circle) => self.add_layer(Box::new(circle)),
                Shape::Polyline(line) => self.add_layer(Box::new(line)),
            },
        }
    }

    pub fn attach_all(&mut self, primitives: impl IntoIterator<Item = Primitive>) -> Result<()> {
        primitives.into_iter().try_for_each(|p| self.attach(p))
    }

    /// Bounds of every attached feature with finite coordinates
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.layers.bounds()
    }

    /// Everything currently drawn, in render order.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            primitives: self.layers.primitives(),
        }
    }
}

/// Immutable view of what a map draws
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSnapshot {
    primitives: Vec<Primitive>,
}

impl RenderSnapshot {
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn of_category(&self, category: Category) -> impl Iterator<Item = &Primitive> + '_ {
        self.primitives
            .iter()
            .filter(move |p| p.category() == category)
    }

    pub fn count(&self, category: Category) -> usize {
        self.of_category(category).count()
    }

    pub fn markers(&self, category: Category) -> Vec<&Marker> {
        self.of_category(category)
            .filter_map(Primitive::as_marker)
            .collect()
    }

    pub fn circles(&self, category: Category) -> Vec<&Circle> {
        self.of_category(category)
            .filter_map(Primitive::as_circle)
            .collect()
    }

    pub fn polylines(&self, category: Category) -> Vec<&Polyline> {
        self.of_category(category)
            .filter_map(Primitive::as_polyline)
            .collect()
    }

    pub fn on_target(&self, target: Target) -> impl Iterator<Item = &Primitive> + '_ {
        self.primitives.iter().filter(move |p| p.target == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::vector::ShapeStyle;

    fn marker(id: &str, category: Category) -> Marker {
        Marker::new(id.to_string(), LatLng::new(49.0, 4.0), category)
    }

    #[test]
    fn test_fresh_map_layout() {
        let map = Map::new(&MapConfig::default()).unwrap();
        assert_eq!(map.center(), LatLng::new(49.2577886, 4.031926));
        assert_eq!(map.zoom(), 6.0);
        assert_eq!(
            map.list_layers(),
            vec!["base", "coverage", "dead_zone", "itinerary"]
        );
        assert!(map.tile_layer().is_some());
        assert!(map.cluster_group(GroupKind::AntennaFile).is_none());
        assert!(map.snapshot().is_empty());
    }

    #[test]
    fn test_attach_routes_by_target() {
        let mut map = Map::new(&MapConfig::default()).unwrap();
        map.attach(Primitive::new(
            Target::Cluster(GroupKind::DeadZone),
            Shape::Marker(marker("dz-0", Category::DeadZone)),
        ))
        .unwrap();
        map.attach(Primitive::new(
            Target::Map,
            Shape::Circle(Circle::new(
                "c-0".to_string(),
                LatLng::new(49.0, 4.0),
                500.0,
                ShapeStyle::default(),
                Category::Coverage,
            )),
        ))
        .unwrap();

        assert_eq!(map.cluster_group(GroupKind::DeadZone).unwrap().len(), 1);
        let snapshot = map.snapshot();
        assert_eq!(snapshot.count(Category::DeadZone), 1);
        assert_eq!(snapshot.circles(Category::Coverage).len(), 1);
        assert_eq!(snapshot.on_target(Target::Map).count(), 1);
    }

    #[test]
    fn test_missing_group_is_created() {
        let mut map = Map::new(&MapConfig::default()).unwrap();
        map.attach(Primitive::new(
            Target::Cluster(GroupKind::AntennaFile),
            Shape::Marker(marker("af-0", Category::AntennaFile)),
        ))
        .unwrap();
        assert_eq!(map.cluster_group(GroupKind::AntennaFile).unwrap().len(), 1);
    }

    #[test]
    fn test_shapes_cannot_be_clustered() {
        let mut map = Map::new(&MapConfig::default()).unwrap();
        let line = Polyline::new(
            "l".to_string(),
            vec![LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0)],
            ShapeStyle::default(),
            Category::Route,
        );
        let result = map.attach(Primitive::new(
            Target::Cluster(GroupKind::Itinerary),
            Shape::Polyline(line),
        ));
        assert!(matches!(result, Err(MapError::Layer(_))));
    }

    #[test]
    fn test_set_view_rejects_invalid_center() {
        let mut map = Map::new(&MapConfig::default()).unwrap();
        assert!(map.set_view(LatLng::new(f64::NAN, 0.0), 5.0).is_err());
        assert!(map.set_view(LatLng::new(91.0, 0.0), 5.0).is_err());
        map.set_view(LatLng::new(48.0, 2.0), 9.0).unwrap();
        assert_eq!(map.zoom(), 9.0);
    }
}
