use crate::{
    core::{
        constants,
        geo::{same_bits, LatLng, LatLngBounds},
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    render::primitive::{Category, Primitive, Shape, Target},
};
use serde::{Deserialize, Serialize};

/// Serializable RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    // CSS named colors used by the page
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb` form, alpha is carried by the style opacities instead.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Stroke and fill of a path (circle or polyline)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color
    pub color: SerializableColor,
    /// Stroke width in pixels
    pub weight: f32,
    /// Stroke opacity (0.0 to 1.0)
    pub opacity: f32,
    /// Fill color, `None` for an unfilled path
    pub fill_color: Option<SerializableColor>,
    /// Fill opacity (0.0 to 1.0)
    pub fill_opacity: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::BLUE,
            weight: 3.0,
            opacity: 1.0,
            fill_color: None,
            fill_opacity: 0.2,
        }
    }
}

impl ShapeStyle {
    /// Solid outline only
    pub fn stroke(color: SerializableColor) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Outline and fill of the same color at the page's low fill opacity
    pub fn filled(color: SerializableColor) -> Self {
        Self {
            color,
            fill_color: Some(color),
            fill_opacity: constants::CIRCLE_FILL_OPACITY,
            ..Self::default()
        }
    }
}

/// A circle with a radius expressed in meters on the ground
#[derive(Debug, Clone)]
pub struct Circle {
    properties: LayerProperties,
    center: LatLng,
    radius: f64,
    style: ShapeStyle,
    category: Category,
}

impl Circle {
    pub fn new(id: String, center: LatLng, radius: f64, style: ShapeStyle, category: Category) -> Self {
        let properties = LayerProperties::new(id, "Circle".to_string(), LayerType::Vector);
        Self {
            properties,
            center,
            radius,
            style,
            category,
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Radius in meters
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl PartialEq for Circle {
    fn eq(&self, other: &Self) -> bool {
        self.properties == other.properties
            && self.center == other.center
            && same_bits(self.radius, other.radius)
            && self.style == other.style
            && self.category == other.category
    }
}

impl LayerTrait for Circle {
    crate::impl_layer_trait!(Circle, properties);

    fn bounds(&self) -> Option<LatLngBounds> {
        if !self.center.is_finite() || !self.radius.is_finite() {
            return None;
        }
        // Equirectangular approximation, good enough for coverage radii
        let lat_delta = (self.radius / 111_320.0).abs();
        let lng_delta = lat_delta / self.center.lat.to_radians().cos().abs().max(1e-6);
        Some(LatLngBounds::from_coords(
            self.center.lat - lat_delta,
            self.center.lng - lng_delta,
            self.center.lat + lat_delta,
            self.center.lng + lng_delta,
        ))
    }

    fn primitives(&self) -> Vec<Primitive> {
        vec![Primitive::new(Target::Map, Shape::Circle(self.clone()))]
    }
}

/// A connected line through its points in order
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    properties: LayerProperties,
    points: Vec<LatLng>,
    style: ShapeStyle,
    category: Category,
}

impl Polyline {
    pub fn new(id: String, points: Vec<LatLng>, style: ShapeStyle, category: Category) -> Self {
        let properties = LayerProperties::new(id, "Polyline".to_string(), LayerType::Vector);
        Self {
            properties,
            points,
            style,
            category,
        }
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl LayerTrait for Polyline {
    crate::impl_layer_trait!(Polyline, properties);

    fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(&self.points)
    }

    fn primitives(&self) -> Vec<Primitive> {
        vec![Primitive::new(Target::Map, Shape::Polyline(self.clone()))]
    }
}
