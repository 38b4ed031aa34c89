//! Application state
//!
//! [`App`] owns everything one map page keeps between events: the payload,
//! the filter flags and the live map. Each event handler mutates it through
//! `&mut self`; nothing is shared.

use crate::{
    core::{config::MapConfig, map::{Map, RenderSnapshot}},
    data::payload::Payload,
    export::{serialize_payload, ExportSink},
    render::{
        builder::LayerBuilder,
        filter::{FilterKind, FilterState},
        orchestrator::{Orchestrator, RenderState, RenderTrigger},
    },
    source::{
        file::FileSource,
        network::{NetworkSource, SearchParams},
        PayloadSource,
    },
    Result,
};

pub struct App {
    config: MapConfig,
    payload: Option<Payload>,
    filters: FilterState,
    map: Option<Map>,
    orchestrator: Orchestrator,
}

impl App {
    /// Creates the page state and runs the initial render (base tiles only).
    pub fn new(config: MapConfig) -> Result<Self> {
        let mut app = Self {
            config,
            payload: None,
            filters: FilterState::default(),
            map: None,
            orchestrator: Orchestrator::new(),
        };
        app.render(RenderTrigger::InitialLoad)?;
        Ok(app)
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn map(&self) -> Option<&Map> {
        self.map.as_ref()
    }

    /// What the live map draws; empty before the first render.
    pub fn snapshot(&self) -> RenderSnapshot {
        self.map.as_ref().map(Map::snapshot).unwrap_or_default()
    }

    /// True between the start of an acquisition and the end of its render.
    pub fn is_loading(&self) -> bool {
        self.orchestrator.state() == RenderState::Rendering
    }

    /// Rebuilds the map from the current payload and filters.
    ///
    /// On failure the previous map stays live.
    pub fn render(&mut self, trigger: RenderTrigger) -> Result<()> {
        let map = self
            .orchestrator
            .render(&self.config, self.payload.as_ref(), &self.filters, trigger)
            .map_err(|err| {
                log::warn!("render after {trigger} failed, keeping previous map: {err}");
                err
            })?;
        self.map = Some(map);
        Ok(())
    }

    /// Flips one filter checkbox and re-renders; returns the new flag value.
    ///
    /// When the render fails the flag keeps its old value, matching the map
    /// still on display.
    pub fn toggle_filter(&mut self, kind: FilterKind) -> Result<bool> {
        let mut candidate = self.filters;
        let enabled = candidate.toggle(kind);
        self.apply_filters(candidate, kind)?;
        Ok(enabled)
    }

    pub fn set_filter(&mut self, kind: FilterKind, enabled: bool) -> Result<()> {
        if self.filters.is_enabled(kind) == enabled {
            return Ok(());
        }
        self.apply_filters(self.filters.with(kind, enabled), kind)
    }

    fn apply_filters(&mut self, filters: FilterState, kind: FilterKind) -> Result<()> {
        let trigger = RenderTrigger::FilterToggled(kind);
        let map = self
            .orchestrator
            .render(&self.config, self.payload.as_ref(), &filters, trigger)
            .map_err(|err| {
                log::warn!("render after {trigger} failed, keeping previous filters: {err}");
                err
            })?;
        self.filters = filters;
        self.map = Some(map);
        Ok(())
    }

    /// Source for a search against the configured endpoint
    pub fn search_source(&self, params: SearchParams) -> NetworkSource {
        NetworkSource::new(self.config.endpoint.clone(), params)
    }

    /// Runs a search without touching the page state.
    ///
    /// Several fetches may be in flight; whichever result is committed last
    /// is the one displayed.
    pub async fn fetch(&self, params: SearchParams) -> Result<Payload> {
        self.search_source(params).fetch().await
    }

    /// Replaces the payload and renders it.
    ///
    /// The payload is only committed once its render succeeded.
    pub fn commit_payload(&mut self, payload: Payload) -> Result<()> {
        let map = self
            .orchestrator
            .render(&self.config, Some(&payload), &self.filters, RenderTrigger::PayloadArrived)
            .map_err(|err| {
                log::warn!("new payload not rendered, keeping previous one: {err}");
                err
            })?;
        self.payload = Some(payload);
        self.map = Some(map);
        Ok(())
    }

    /// Acquires a payload from `source` and renders it.
    ///
    /// Failures leave payload and map as they were.
    pub async fn load_from(&mut self, source: &dyn PayloadSource) -> Result<()> {
        self.orchestrator.begin();
        match source.fetch().await {
            Ok(payload) => self.commit_payload(payload),
            Err(err) => {
                self.orchestrator.abort();
                log::error!("loading from {} failed: {err}", source.describe());
                Err(err)
            }
        }
    }

    /// The "generate map" action: search, then render the answer.
    pub async fn generate_map(&mut self, params: SearchParams) -> Result<()> {
        let source = self.search_source(params);
        self.load_from(&source).await
    }

    pub async fn load_file(&mut self, source: &FileSource) -> Result<()> {
        self.load_from(source).await
    }

    /// Overlays a flat antenna file on the live map without re-rendering.
    ///
    /// The overlay is dropped by the next render. Returns the number of
    /// markers added.
    pub async fn load_antenna_file(&mut self, source: &FileSource) -> Result<usize> {
        let records = source.fetch_antenna_records().await?;
        let primitives = LayerBuilder::new(&self.config).antenna_file(&records)?;
        let count = primitives.len();

        if self.map.is_none() {
            self.render(RenderTrigger::InitialLoad)?;
        }
        if let Some(map) = self.map.as_mut() {
            map.attach_all(primitives)?;
        }
        log::info!("overlaid {count} antennas from {}", source.describe());
        Ok(count)
    }

    /// Offers the current payload as an indented JSON download.
    pub fn export(&self, sink: &mut dyn ExportSink) -> Result<()> {
        let bytes = serialize_payload(self.payload.as_ref())?;
        sink.offer_download(&bytes, &self.config.export_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::config::CoercionPolicy, export::MemoryExportSink, render::primitive::Category,
    };
    use serde_json::json;

    fn dead_zones() -> Payload {
        Payload::from_value(json!({"dead_zone": [{"lat": 49.1, "lon": 4.1}, {"lat": 49.2, "lon": 4.2}]}))
    }

    #[test]
    fn test_initial_render() {
        let app = App::new(MapConfig::default()).unwrap();
        assert!(app.map().is_some());
        assert!(app.snapshot().is_empty());
        assert!(!app.is_loading());
        assert_eq!(*app.filters(), FilterState::default());
    }

    #[test]
    fn test_toggle_renders_category() {
        let mut app = App::new(MapConfig::default()).unwrap();
        app.commit_payload(dead_zones()).unwrap();
        assert_eq!(app.snapshot().count(Category::DeadZone), 0);

        assert!(app.toggle_filter(FilterKind::DeadZone).unwrap());
        assert_eq!(app.snapshot().count(Category::DeadZone), 2);

        app.set_filter(FilterKind::DeadZone, false).unwrap();
        assert_eq!(app.snapshot().count(Category::DeadZone), 0);
    }

    #[test]
    fn test_strict_failure_keeps_previous_state() {
        let config = MapConfig::default().with_coercion(CoercionPolicy::Strict);
        let mut app = App::new(config).unwrap();
        app.set_filter(FilterKind::DeadZone, true).unwrap();
        app.commit_payload(dead_zones()).unwrap();

        let bad = Payload::from_value(json!({"dead_zone": [{"lat": "?", "lon": 1}]}));
        assert!(app.commit_payload(bad).is_err());
        assert_eq!(app.payload(), Some(&dead_zones()));
        assert_eq!(app.snapshot().count(Category::DeadZone), 2);
    }

    #[test]
    fn test_failed_toggle_keeps_filters() {
        let config = MapConfig::default().with_coercion(CoercionPolicy::Strict);
        let mut app = App::new(config).unwrap();
        let bad = Payload::from_value(json!({"dead_zone": [{"lat": "?", "lon": 1}]}));
        app.commit_payload(bad).unwrap();

        assert!(app.toggle_filter(FilterKind::DeadZone).is_err());
        assert!(!app.filters().is_enabled(FilterKind::DeadZone));
        assert_eq!(app.snapshot().count(Category::DeadZone), 0);

        assert!(app.set_filter(FilterKind::DeadZone, true).is_err());
        assert_eq!(*app.filters(), FilterState::default());
    }

    #[test]
    fn test_export_without_payload() {
        let app = App::new(MapConfig::default()).unwrap();
        let mut sink = MemoryExportSink::new();
        app.export(&mut sink).unwrap();
        assert_eq!(sink.last().unwrap().bytes, b"null");
        assert_eq!(sink.last().unwrap().filename, "donnees.json");
    }

    #[tokio::test]
    async fn test_failed_file_load_keeps_payload() {
        let mut app = App::new(MapConfig::default()).unwrap();
        app.commit_payload(dead_zones()).unwrap();

        let result = app.load_file(&FileSource::from_text("bad.json", "{")).await;
        assert!(result.is_err());
        assert!(!app.is_loading());
        assert_eq!(app.payload(), Some(&dead_zones()));
    }

    #[tokio::test]
    async fn test_antenna_overlay_is_dropped_by_next_render() {
        let mut app = App::new(MapConfig::default()).unwrap();
        let source = FileSource::from_text(
            "antennes.json",
            r#"[{"lat": 49, "lon": 4, "sup_id": 1, "operateur": "A"},
                {"lat": 48, "lon": 3, "sup_id": 2, "operateur": "B"}]"#,
        );

        assert_eq!(app.load_antenna_file(&source).await.unwrap(), 2);
        assert_eq!(app.snapshot().count(Category::AntennaFile), 2);

        app.toggle_filter(FilterKind::Route).unwrap();
        assert_eq!(app.snapshot().count(Category::AntennaFile), 0);
    }
}
