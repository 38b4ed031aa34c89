//! Page-level constants for the coverage map.
//! Keeping them in a single place makes it easier to tweak the look of every layer.

/// Initial map center (Reims area) shown before any payload arrives.
pub const INITIAL_CENTER: (f64, f64) = (49.2577886, 4.031926);

/// Initial zoom level of every freshly created map.
pub const INITIAL_ZOOM: f64 = 6.0;

/// Base tile server template.
pub const DEFAULT_TILE_URL: &str = "http://194.57.103.203/map/hot/{z}/{x}/{y}.png";

pub const DEFAULT_MIN_ZOOM: f64 = 3.0;
pub const DEFAULT_MAX_ZOOM: f64 = 20.0;

pub const DEFAULT_ATTRIBUTION: &str = "&copy; <a href=\"https://github.com/ElCald\">Eliot CALD</a>";

/// Search endpoint queried in network mode.
pub const DEFAULT_ENDPOINT: &str = "http://localhost/avance/deadzone.php";

/// File name offered when the current payload is exported.
pub const EXPORT_FILE_NAME: &str = "donnees.json";

pub const EXPORT_MIME_TYPE: &str = "application/json";

/// Fill opacity shared by coverage and UBR circles.
pub const CIRCLE_FILL_OPACITY: f32 = 0.1;

/// Polylines with fewer points than this cannot form a line.
pub const MIN_POLYLINE_POINTS: usize = 2;

// Icon files, relative to the configured icon root.
pub const ANTENNA_ICON: &str = "icons/antenne.png";
pub const UBR_ICON: &str = "icons/wifi.png";
pub const DEAD_ZONE_ICON: &str = "icons/arrow_up.png";
pub const ITINERARY_ICON: &str = "icons/Festung.png";

/// Antenna and UBR icon size in pixels.
pub const COVERAGE_ICON_SIZE: (u32, u32) = (25, 25);
pub const COVERAGE_ICON_ANCHOR: (i32, i32) = (10, 5);
pub const COVERAGE_POPUP_ANCHOR: (i32, i32) = (3, 0);

pub const DEAD_ZONE_ICON_SIZE: (u32, u32) = (20, 20);
pub const DEAD_ZONE_ICON_ANCHOR: (i32, i32) = (10, 5);
pub const DEAD_ZONE_POPUP_ANCHOR: (i32, i32) = (-3, -76);

pub const ITINERARY_ICON_SIZE: (u32, u32) = (40, 40);
pub const ITINERARY_ICON_ANCHOR: (i32, i32) = (10, 40);
pub const ITINERARY_POPUP_ANCHOR: (i32, i32) = (0, -35);
