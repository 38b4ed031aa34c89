use crate::{
    core::geo::LatLngBounds, layers::base::LayerTrait, prelude::HashMap,
    render::primitive::Primitive, MapError, Result,
};

/// Owns every layer attached to a map and the order they are drawn in
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Layer IDs sorted by z-index, insertion order within a z-index
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer; IDs must be unique within the manager
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("duplicate layer id '{layer_id}'")));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), layer);

        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Borrows a layer as its concrete type
    pub fn get_layer_as<T: 'static>(&self, layer_id: &str) -> Option<&T> {
        self.layers
            .get(layer_id)
            .and_then(|l| l.as_any().downcast_ref::<T>())
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Primitives of every visible layer, in render order
    pub fn primitives(&self) -> Vec<Primitive> {
        self.layers()
            .into_iter()
            .filter(|layer| layer.is_visible())
            .flat_map(|layer| layer.primitives())
            .collect()
    }

    /// Union of the bounds of every layer that has one
    pub fn bounds(&self) -> Option<LatLngBounds> {
        self.layers()
            .into_iter()
            .filter_map(|layer| layer.bounds())
            .reduce(|acc, b| acc.union(&b))
    }

    /// Drops every layer
    pub fn clear(&mut self) {
        self.layers.clear();
        self.render_order.clear();
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::LatLng,
        layers::marker::Marker,
        render::primitive::Category,
    };

    fn marker(id: &str, z: i32) -> Box<dyn LayerTrait> {
        let mut m = Marker::new(id.to_string(), LatLng::new(48.0, 2.0), Category::Ubr);
        m.set_z_index(z);
        Box::new(m)
    }

    #[test]
    fn test_render_order_follows_z_index_then_insertion() {
        let mut manager = LayerManager::new();
        manager.add_layer(marker("a", 1)).unwrap();
        manager.add_layer(marker("b", 0)).unwrap();
        manager.add_layer(marker("c", 1)).unwrap();

        let ids: Vec<&str> = manager.layers().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut manager = LayerManager::new();
        manager.add_layer(marker("a", 0)).unwrap();
        assert!(matches!(
            manager.add_layer(marker("a", 0)),
            Err(MapError::Layer(_))
        ));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_hidden_layers_have_no_primitives() {
        let mut manager = LayerManager::new();
        manager.add_layer(marker("a", 0)).unwrap();
        manager.add_layer(marker("b", 0)).unwrap();
        manager.with_layer_mut("a", |l| l.set_visible(false));

        assert_eq!(manager.primitives().len(), 1);
        assert!(manager.get_layer_as::<Marker>("b").is_some());

        assert!(manager.remove_layer("b").is_some());
        manager.clear();
        assert!(manager.is_empty());
    }
}
