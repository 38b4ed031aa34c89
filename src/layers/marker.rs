use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    render::primitive::{Category, Primitive, Shape, Target},
};
use serde::{Deserialize, Serialize};

/// Image used in place of the default marker pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSpec {
    pub url: String,
    pub size: (u32, u32),
    /// Pixel inside the image that sits on the marker position
    pub anchor: (i32, i32),
    /// Offset of the popup tip relative to the anchor
    pub popup_anchor: (i32, i32),
}

impl IconSpec {
    pub fn new(url: String, size: (u32, u32), anchor: (i32, i32), popup_anchor: (i32, i32)) -> Self {
        Self {
            url,
            size,
            anchor,
            popup_anchor,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    properties: LayerProperties,
    position: LatLng,
    icon: Option<IconSpec>,
    popup_text: Option<String>,
    category: Category,
}

impl Marker {
    pub fn new(id: String, position: LatLng, category: Category) -> Self {
        let properties = LayerProperties::new(id, "Marker".to_string(), LayerType::Marker);
        Self {
            properties,
            position,
            icon: None,
            popup_text: None,
            category,
        }
    }

    pub fn with_icon(mut self, icon: IconSpec) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_popup(mut self, text: String) -> Self {
        self.popup_text = Some(text);
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn icon(&self) -> Option<&IconSpec> {
        self.icon.as_ref()
    }

    pub fn popup(&self) -> Option<&str> {
        self.popup_text.as_deref()
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl LayerTrait for Marker {
    crate::impl_layer_trait!(Marker, properties);

    fn bounds(&self) -> Option<LatLngBounds> {
        self.position
            .is_finite()
            .then(|| LatLngBounds::new(self.position, self.position))
    }

    fn primitives(&self) -> Vec<Primitive> {
        vec![Primitive::new(Target::Map, Shape::Marker(self.clone()))]
    }
}
