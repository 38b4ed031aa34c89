use crate::{
    core::config::TileConfig,
    layers::base::{LayerProperties, LayerTrait, LayerType},
};

/// Base raster layer drawn under every other layer
pub struct TileLayer {
    properties: LayerProperties,
    config: TileConfig,
}

impl TileLayer {
    pub fn new(id: String, config: TileConfig) -> Self {
        let mut properties = LayerProperties::new(id, "Base tiles".to_string(), LayerType::Tile);
        properties.z_index = i32::MIN;
        Self { properties, config }
    }

    pub fn url_template(&self) -> &str {
        &self.config.url_template
    }

    pub fn attribution(&self) -> &str {
        &self.config.attribution
    }

    pub fn min_zoom(&self) -> f64 {
        self.config.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.config.max_zoom
    }

}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_layer_defaults() {
        let layer = TileLayer::new("tiles".to_string(), TileConfig::default());
        assert_eq!(
            layer.url_template(),
            "http://194.57.103.203/map/hot/{z}/{x}/{y}.png"
        );
        assert_eq!(layer.layer_type(), LayerType::Tile);
        assert_eq!(layer.feature_count(), 0);
        assert!(layer.bounds().is_none());
    }

    #[test]
    fn test_drawn_under_everything() {
        let layer = TileLayer::new("tiles".to_string(), TileConfig::default());
        assert_eq!(layer.z_index(), i32::MIN);
        assert!(layer.min_zoom() < layer.max_zoom());
    }
}
