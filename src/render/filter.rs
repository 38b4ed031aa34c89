use serde::{Deserialize, Serialize};

/// One display filter checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Antennas, their coverage circles and the UBR relays
    Antenna,
    /// Dead-zone polylines (`polyline` section)
    Polyline,
    /// Dead-zone points
    DeadZone,
    /// Lines through each itinerary segment
    Route,
    /// Itinerary points
    Itinerary,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Antenna,
        FilterKind::Polyline,
        FilterKind::DeadZone,
        FilterKind::Route,
        FilterKind::Itinerary,
    ];
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FilterKind::Antenna => "antenna",
            FilterKind::Polyline => "polyline",
            FilterKind::DeadZone => "dead_zone",
            FilterKind::Route => "route",
            FilterKind::Itinerary => "itinerary",
        };
        f.write_str(name)
    }
}

/// Checkbox state; every combination is valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub antenna: bool,
    pub polyline: bool,
    pub dead_zone: bool,
    pub route: bool,
    pub itinerary: bool,
}

impl Default for FilterState {
    /// Only the dead-zone polylines start checked.
    fn default() -> Self {
        Self {
            antenna: false,
            polyline: true,
            dead_zone: false,
            route: false,
            itinerary: false,
        }
    }
}

impl FilterState {
    pub fn none() -> Self {
        Self {
            antenna: false,
            polyline: false,
            dead_zone: false,
            route: false,
            itinerary: false,
        }
    }

    pub fn all() -> Self {
        Self {
            antenna: true,
            polyline: true,
            dead_zone: true,
            route: true,
            itinerary: true,
        }
    }

    pub fn is_enabled(&self, kind: FilterKind) -> bool {
        match kind {
            FilterKind::Antenna => self.antenna,
            FilterKind::Polyline => self.polyline,
            FilterKind::DeadZone => self.dead_zone,
            FilterKind::Route => self.route,
            FilterKind::Itinerary => self.itinerary,
        }
    }

    pub fn set(&mut self, kind: FilterKind, enabled: bool) {
        let flag = match kind {
            FilterKind::Antenna => &mut self.antenna,
            FilterKind::Polyline => &mut self.polyline,
            FilterKind::DeadZone => &mut self.dead_zone,
            FilterKind::Route => &mut self.route,
            FilterKind::Itinerary => &mut self.itinerary,
        };
        *flag = enabled;
    }

    pub fn with(mut self, kind: FilterKind, enabled: bool) -> Self {
        self.set(kind, enabled);
        self
    }

    /// Flips one flag and returns its new value
    pub fn toggle(&mut self, kind: FilterKind) -> bool {
        let enabled = !self.is_enabled(kind);
        self.set(kind, enabled);
        enabled
    }

    pub fn enabled(&self) -> impl Iterator<Item = FilterKind> + '_ {
        FilterKind::ALL.into_iter().filter(|kind| self.is_enabled(*kind))
    }
}
