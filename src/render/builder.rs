//! Builds map primitives from normalized payload records
//!
//! One method per category. Markers of the coverage, dead-zone and itinerary
//! categories go to their clustered group; circles, polylines and UBR markers
//! are attached to the map directly.

use crate::{
    core::{config::MapConfig, constants, geo::LatLng},
    data::{
        coerce::number_text,
        payload::{Payload, COVERAGE_KEY, DEAD_ZONE_KEY, ITINERARY_KEY, POLYLINE_KEY, UBR_KEY},
        records::{
            enforce, normalize_all, normalize_nested, Antenna, AntennaFileRecord, RoutePoint,
            UbrPoint,
        },
    },
    layers::{
        marker::{IconSpec, Marker},
        vector::{Circle, Polyline, SerializableColor, ShapeStyle},
    },
    render::{
        filter::FilterState,
        primitive::{Category, GroupKind, Primitive, Shape, Target},
    },
    Result,
};

pub struct LayerBuilder<'a> {
    config: &'a MapConfig,
}

impl<'a> LayerBuilder<'a> {
    pub fn new(config: &'a MapConfig) -> Self {
        Self { config }
    }

    /// Every primitive the enabled filters select, in attachment order.
    ///
    /// Non-renderable payloads produce nothing.
    pub fn build(&self, payload: &Payload, filters: &FilterState) -> Result<Vec<Primitive>> {
        let mut primitives = Vec::new();
        if !payload.is_renderable() {
            return Ok(primitives);
        }

        if filters.itinerary {
            primitives.extend(self.itinerary(payload)?);
        }
        if filters.dead_zone {
            primitives.extend(self.dead_zone(payload)?);
        }
        if filters.route {
            primitives.extend(self.route(payload)?);
        }
        if filters.polyline {
            primitives.extend(self.polyline(payload)?);
        }
        // UBR relays only show alongside the antennas they complement
        if filters.antenna && payload.couverture().is_some() {
            primitives.extend(self.coverage(payload)?);
            primitives.extend(self.ubr(payload)?);
        }

        Ok(primitives)
    }

    /// Antenna markers (clustered) and their blue coverage circles.
    pub fn coverage(&self, payload: &Payload) -> Result<Vec<Primitive>> {
        let Some(section) = payload.couverture() else {
            return Ok(Vec::new());
        };
        let antennas: Vec<Antenna> = normalize_all(Some(section));
        enforce(&antennas, self.config.coercion, COVERAGE_KEY)?;

        let icon = self.icon(
            constants::ANTENNA_ICON,
            constants::COVERAGE_ICON_SIZE,
            constants::COVERAGE_ICON_ANCHOR,
            constants::COVERAGE_POPUP_ANCHOR,
        );

        let mut primitives = Vec::with_capacity(antennas.len() * 2);
        for (i, antenna) in antennas.iter().enumerate() {
            let position = LatLng::new(antenna.lat, antenna.lon);
            let marker = Marker::new(format!("coverage-marker-{i}"), position, Category::Coverage)
                .with_icon(icon.clone())
                .with_popup(antenna_popup(antenna));
            primitives.push(Primitive::new(
                Target::Cluster(GroupKind::Coverage),
                Shape::Marker(marker),
            ));

            let circle = Circle::new(
                format!("coverage-circle-{i}"),
                position,
                antenna.r_utilise,
                ShapeStyle::filled(SerializableColor::BLUE),
                Category::Coverage,
            );
            primitives.push(Primitive::new(Target::Map, Shape::Circle(circle)));
        }

        Ok(primitives)
    }

    /// UBR markers and their green circles, both attached to the map.
    pub fn ubr(&self, payload: &Payload) -> Result<Vec<Primitive>> {
        let Some(section) = payload.ubr() else {
            return Ok(Vec::new());
        };
        let points: Vec<UbrPoint> = normalize_all(Some(section));
        enforce(&points, self.config.coercion, UBR_KEY)?;

        let icon = self.icon(
            constants::UBR_ICON,
            constants::COVERAGE_ICON_SIZE,
            constants::COVERAGE_ICON_ANCHOR,
            constants::COVERAGE_POPUP_ANCHOR,
        );

        let mut primitives = Vec::with_capacity(points.len() * 2);
        for (i, point) in points.iter().enumerate() {
            let position = LatLng::new(point.lat, point.lon);
            let marker = Marker::new(format!("ubr-marker-{i}"), position, Category::Ubr)
                .with_icon(icon.clone())
                .with_popup(ubr_popup(point));
            primitives.push(Primitive::new(Target::Map, Shape::Marker(marker)));

            let circle = Circle::new(
                format!("ubr-circle-{i}"),
                position,
                point.r_utilise,
                ShapeStyle::filled(SerializableColor::GREEN),
                Category::Ubr,
            );
            primitives.push(Primitive::new(Target::Map, Shape::Circle(circle)));
        }

        Ok(primitives)
    }

    /// Dead-zone markers, clustered, without popup.
    pub fn dead_zone(&self, payload: &Payload) -> Result<Vec<Primitive>> {
        let Some(section) = payload.dead_zone() else {
            return Ok(Vec::new());
        };
        let points: Vec<RoutePoint> = normalize_all(Some(section));
        enforce(&points, self.config.coercion, DEAD_ZONE_KEY)?;

        let icon = self.icon(
            constants::DEAD_ZONE_ICON,
            constants::DEAD_ZONE_ICON_SIZE,
            constants::DEAD_ZONE_ICON_ANCHOR,
            constants::DEAD_ZONE_POPUP_ANCHOR,
        );

        Ok(points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let marker = Marker::new(
                    format!("dead_zone-marker-{i}"),
                    LatLng::new(point.lat, point.lon),
                    Category::DeadZone,
                )
                .with_icon(icon.clone());
                Primitive::new(Target::Cluster(GroupKind::DeadZone), Shape::Marker(marker))
            })
            .collect())
    }

    /// One clustered marker per point of every itinerary segment.
    pub fn itinerary(&self, payload: &Payload) -> Result<Vec<Primitive>> {
        let Some(section) = payload.itineraire() else {
            return Ok(Vec::new());
        };
        let segments: Vec<Vec<RoutePoint>> = normalize_nested(Some(section));

        let icon = self.icon(
            constants::ITINERARY_ICON,
            constants::ITINERARY_ICON_SIZE,
            constants::ITINERARY_ICON_ANCHOR,
            constants::ITINERARY_POPUP_ANCHOR,
        );

        let mut primitives = Vec::new();
        for (s, segment) in segments.iter().enumerate() {
            enforce(segment, self.config.coercion, &format!("{ITINERARY_KEY}[{s}]"))?;
            for (j, point) in segment.iter().enumerate() {
                let marker = Marker::new(
                    format!("itinerary-marker-{s}-{j}"),
                    LatLng::new(point.lat, point.lon),
                    Category::Itinerary,
                )
                .with_icon(icon.clone())
                .with_popup(route_point_popup(point));
                primitives.push(Primitive::new(
                    Target::Cluster(GroupKind::Itinerary),
                    Shape::Marker(marker),
                ));
            }
        }

        Ok(primitives)
    }

    /// Yellow line through each itinerary segment.
    pub fn route(&self, payload: &Payload) -> Result<Vec<Primitive>> {
        self.lines(
            payload.itineraire(),
            ITINERARY_KEY,
            Category::Route,
            SerializableColor::YELLOW,
        )
    }

    /// Red line through each dead-zone polyline.
    pub fn polyline(&self, payload: &Payload) -> Result<Vec<Primitive>> {
        self.lines(
            payload.polyline(),
            POLYLINE_KEY,
            Category::Polyline,
            SerializableColor::RED,
        )
    }

    /// Clustered default-icon markers for a flat antenna file.
    pub fn antenna_file(&self, records: &[AntennaFileRecord]) -> Result<Vec<Primitive>> {
        enforce(records, self.config.coercion, "antenna_file")?;

        Ok(records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let marker = Marker::new(
                    format!("antenna_file-marker-{i}"),
                    LatLng::new(record.lat, record.lon),
                    Category::AntennaFile,
                )
                .with_popup(antenna_file_popup(record));
                Primitive::new(Target::Cluster(GroupKind::AntennaFile), Shape::Marker(marker))
            })
            .collect())
    }

    /// Arrays shorter than two points cannot form a line and are skipped.
    fn lines(
        &self,
        section: Option<&serde_json::Value>,
        key: &str,
        category: Category,
        color: SerializableColor,
    ) -> Result<Vec<Primitive>> {
        let Some(section) = section else {
            return Ok(Vec::new());
        };
        let segments: Vec<Vec<RoutePoint>> = normalize_nested(Some(section));

        let mut primitives = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            if segment.len() < constants::MIN_POLYLINE_POINTS {
                continue;
            }
            enforce(segment, self.config.coercion, &format!("{key}[{i}]"))?;

            let points = segment.iter().map(|p| LatLng::new(p.lat, p.lon)).collect();
            let line = Polyline::new(
                format!("{category}-line-{i}"),
                points,
                ShapeStyle::stroke(color),
                category,
            );
            primitives.push(Primitive::new(Target::Map, Shape::Polyline(line)));
        }

        Ok(primitives)
    }

    fn icon(
        &self,
        file: &str,
        size: (u32, u32),
        anchor: (i32, i32),
        popup_anchor: (i32, i32),
    ) -> IconSpec {
        IconSpec::new(self.config.icon_url(file), size, anchor, popup_anchor)
    }
}

fn int_text(value: Option<i64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}

pub fn antenna_popup(antenna: &Antenna) -> String {
    format!(
        "<strong>Antenne</strong><br>sup_id: {}<br>lat: {}<br>lon: {}<br>rayon: {}<br>opérateur: {}",
        int_text(antenna.id),
        number_text(antenna.lat),
        number_text(antenna.lon),
        number_text(antenna.r_utilise),
        antenna.operateur
    )
}

pub fn ubr_popup(point: &UbrPoint) -> String {
    format!(
        "<strong>UBR</strong><br>lat: {}<br>lon: {}<br>rayon: {}<br>etat: {}",
        number_text(point.lat),
        number_text(point.lon),
        number_text(point.r_utilise),
        point.etat
    )
}

pub fn route_point_popup(point: &RoutePoint) -> String {
    format!(
        "<strong>Route</strong><br>id: {}<br>lat: {}<br>lon: {}",
        int_text(point.id),
        number_text(point.lat),
        number_text(point.lon)
    )
}

pub fn antenna_file_popup(record: &AntennaFileRecord) -> String {
    format!(
        "<strong>Antenne</strong><br>sup_id: {}<br>lat: {}<br>lon: {}<br>operateur: {}",
        int_text(record.sup_id),
        number_text(record.lat),
        number_text(record.lon),
        record.operateur
    )
}
