use approx::assert_relative_eq;
use coverage_map::prelude::*;
use serde_json::{json, Value};

/// Properties every render cycle must hold, exercised through the public API
#[cfg(test)]
mod render_properties {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn render(payload: Value, filters: FilterState) -> RenderSnapshot {
        init();
        let payload = Payload::from_value(payload);
        Orchestrator::new()
            .render(
                &MapConfig::default(),
                Some(&payload),
                &filters,
                RenderTrigger::PayloadArrived,
            )
            .unwrap()
            .snapshot()
    }

    fn only(kind: FilterKind) -> FilterState {
        FilterState::none().with(kind, true)
    }

    fn points(n: usize) -> Value {
        Value::Array(
            (0..n)
                .map(|i| json!({"lat": 49.0 + i as f64 * 0.01, "lon": 4.0, "id": i}))
                .collect(),
        )
    }

    /// A dead-zone array of length N gives N markers and no circle
    #[test]
    fn test_dead_zone_counts() {
        for n in [0, 1, 7, 40] {
            let snapshot = render(json!({ "dead_zone": points(n) }), only(FilterKind::DeadZone));
            assert_eq!(snapshot.markers(Category::DeadZone).len(), n);
            assert!(snapshot.circles(Category::DeadZone).is_empty());
            assert!(snapshot
                .of_category(Category::DeadZone)
                .all(|p| p.target == Target::Cluster(GroupKind::DeadZone)));
        }
    }

    /// Arrays shorter than two points never become a line
    #[test]
    fn test_polyline_lengths() {
        let payload = json!({
            "polyline": [points(0), points(1), points(2), points(5)],
            "itineraire": [points(1), points(3)],
        });

        let lines = render(payload.clone(), only(FilterKind::Polyline));
        let lengths: Vec<usize> = lines.polylines(Category::Polyline).iter().map(|l| l.len()).collect();
        assert_eq!(lengths, vec![2, 5]);

        let routes = render(payload, only(FilterKind::Route));
        let lengths: Vec<usize> = routes.polylines(Category::Route).iter().map(|l| l.len()).collect();
        assert_eq!(lengths, vec![3]);
        assert_eq!(routes.count(Category::Polyline), 0);
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let payload = json!({
            "itineraire": [points(3)],
            "dead_zone": points(4),
            "polyline": [points(2)],
            "couverture": [{"lat": 49.1, "lon": 4.1, "rayon_utilise": 800, "operateur": "Orange"}],
            "ubr": [{"lat": 49.2, "lon": 4.2, "rayon": 100, "etat": "ok"}],
        });

        let first = render(payload.clone(), FilterState::all());
        let second = render(payload, FilterState::all());
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    /// Records coerced to NaN render the same way every time
    #[test]
    fn test_rerender_with_malformed_numbers_is_idempotent() {
        let payload = json!({
            "dead_zone": [{"lat": "north", "lon": 4.1}],
            "couverture": [{"lat": 49.1, "lon": "?", "rayon_utilise": "wide"}],
        });

        let first = render(payload.clone(), FilterState::all());
        let second = render(payload, FilterState::all());
        assert_eq!(first.count(Category::DeadZone), 1);
        assert_eq!(first.circles(Category::Coverage).len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ubr_hidden_without_coverage() {
        let snapshot = render(
            json!({"couverture": null, "ubr": [{"lat": 49, "lon": 4, "rayon": 100, "etat": "ok"}]}),
            only(FilterKind::Antenna),
        );
        assert_eq!(snapshot.count(Category::Ubr), 0);
        assert!(snapshot.is_empty());
    }

    /// Enabling one flag adds that category and leaves every other one alone
    #[test]
    fn test_toggle_adds_only_its_category() {
        let payload = json!({
            "itineraire": [points(3), points(2)],
            "dead_zone": points(4),
            "polyline": [points(2)],
            "couverture": [{"lat": 49.1, "lon": 4.1, "rayon_utilise": 800}],
            "ubr": [{"lat": 49.2, "lon": 4.2, "rayon": 100}],
        });

        for kind in FilterKind::ALL {
            let base = FilterState::default().with(kind, false);
            let before = render(payload.clone(), base);
            let after = render(payload.clone(), base.with(kind, true));

            let unchanged: Vec<&Primitive> = after
                .primitives()
                .iter()
                .filter(|p| before.primitives().contains(p))
                .collect();
            assert_eq!(unchanged.len(), before.len(), "{kind} removed primitives");

            let added: Vec<Category> = after
                .primitives()
                .iter()
                .filter(|p| !before.primitives().contains(p))
                .map(Primitive::category)
                .collect();
            assert!(!added.is_empty(), "{kind} added nothing");
            let expected: &[Category] = match kind {
                FilterKind::Antenna => &[Category::Coverage, Category::Ubr],
                FilterKind::Polyline => &[Category::Polyline],
                FilterKind::DeadZone => &[Category::DeadZone],
                FilterKind::Route => &[Category::Route],
                FilterKind::Itinerary => &[Category::Itinerary],
            };
            assert!(added.iter().all(|c| expected.contains(c)), "{kind} added {added:?}");
        }
    }

    #[test]
    fn test_string_coverage_record() {
        let snapshot = render(
            json!({"couverture": [{"lat": "48.1", "lon": "2.3", "id": "7", "rayon_utilise": "500", "operateur": "X"}]}),
            only(FilterKind::Antenna),
        );

        let markers = snapshot.markers(Category::Coverage);
        let circles = snapshot.circles(Category::Coverage);
        assert_eq!(markers.len(), 1);
        assert_eq!(circles.len(), 1);

        assert_relative_eq!(markers[0].position().lat, 48.1);
        assert_relative_eq!(markers[0].position().lng, 2.3);
        assert_relative_eq!(circles[0].radius(), 500.0);
        assert_eq!(circles[0].center(), markers[0].position());
    }

    #[test]
    fn test_null_itinerary() {
        let snapshot = render(
            json!({"itineraire": null}),
            only(FilterKind::Itinerary).with(FilterKind::Route, true),
        );
        assert_eq!(snapshot.count(Category::Itinerary), 0);
        assert_eq!(snapshot.count(Category::Route), 0);
    }

    #[test]
    fn test_falsy_payload_renders_nothing() {
        for payload in [json!(false), json!(null), json!(0)] {
            assert!(render(payload, FilterState::all()).is_empty());
        }
    }

    /// Malformed numbers still render, at a NaN position
    #[test]
    fn test_lenient_coercion_keeps_record() {
        let snapshot = render(
            json!({"dead_zone": [{"lat": "north", "lon": "4.1km"}]}),
            only(FilterKind::DeadZone),
        );
        let markers = snapshot.markers(Category::DeadZone);
        assert_eq!(markers.len(), 1);
        assert!(markers[0].position().lat.is_nan());
        assert_relative_eq!(markers[0].position().lng, 4.1);
    }

    #[test]
    fn test_export_pretty_json() {
        init();
        let mut app = App::new(MapConfig::default()).unwrap();
        app.commit_payload(Payload::from_value(json!({"a": 1}))).unwrap();

        let mut sink = MemoryExportSink::new();
        app.export(&mut sink).unwrap();

        let download = sink.last().unwrap();
        assert_eq!(download.filename, "donnees.json");
        assert_eq!(
            String::from_utf8(download.bytes.clone()).unwrap(),
            serde_json::to_string_pretty(&json!({"a": 1})).unwrap()
        );
    }

    #[test]
    fn test_file_export_sink() {
        let dir = std::env::temp_dir().join(format!("coverage-map-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut app = App::new(MapConfig::default()).unwrap();
        app.commit_payload(Payload::from_value(json!({"dead_zone": []}))).unwrap();
        app.export(&mut FileExportSink::new(&dir)).unwrap();

        let written = std::fs::read_to_string(dir.join("donnees.json")).unwrap();
        assert_eq!(written, "{\n  \"dead_zone\": []\n}");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
