//! Full-rebuild render cycle
//!
//! Every trigger discards the previous map and builds a new one from the
//! payload and filter flags. There is no incremental update path, so two
//! renders of the same inputs always produce the same snapshot.

use crate::{
    core::{config::MapConfig, map::Map},
    data::payload::Payload,
    render::{
        builder::LayerBuilder,
        filter::{FilterKind, FilterState},
    },
    Result,
};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Rendering,
}

/// What started a render cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTrigger {
    InitialLoad,
    FilterToggled(FilterKind),
    PayloadArrived,
}

impl std::fmt::Display for RenderTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderTrigger::InitialLoad => write!(f, "initial load"),
            RenderTrigger::FilterToggled(kind) => write!(f, "filter '{kind}' toggled"),
            RenderTrigger::PayloadArrived => write!(f, "payload arrived"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Orchestrator {
    state: RenderState,
    render_count: u64,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Completed render cycles
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Marks the start of a cycle whose input is still being acquired.
    pub fn begin(&mut self) {
        self.state = RenderState::Rendering;
    }

    /// Returns to idle without rendering, after a failed acquisition.
    pub fn abort(&mut self) {
        self.state = RenderState::Idle;
    }

    /// Builds a fresh map for `payload` under `filters`.
    ///
    /// A missing or falsy payload yields a map holding only the base tiles.
    /// The orchestrator is idle again when this returns, whatever the outcome.
    pub fn render(
        &mut self,
        config: &MapConfig,
        payload: Option<&Payload>,
        filters: &FilterState,
        trigger: RenderTrigger,
    ) -> Result<Map> {
        self.state = RenderState::Rendering;
        log::debug!("render cycle started: {trigger}");
        let started = Instant::now();

        let result = Self::rebuild(config, payload, filters);
        self.state = RenderState::Idle;

        let map = result?;
        self.render_count += 1;
        log::debug!(
            "render cycle finished in {:.3} ms ({} primitives)",
            started.elapsed().as_secs_f64() * 1000.0,
            map.snapshot().len()
        );
        Ok(map)
    }

    fn rebuild(config: &MapConfig, payload: Option<&Payload>, filters: &FilterState) -> Result<Map> {
        let mut map = Map::new(config)?;
        if let Some(payload) = payload {
            let primitives = LayerBuilder::new(config).build(payload, filters)?;
            map.attach_all(primitives)?;
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::config::CoercionPolicy, render::primitive::Category};
    use serde_json::json;

    #[test]
    fn test_absent_payload_renders_base_only() {
        let mut orchestrator = Orchestrator::new();
        let map = orchestrator
            .render(
                &MapConfig::default(),
                None,
                &FilterState::all(),
                RenderTrigger::InitialLoad,
            )
            .unwrap();

        assert!(map.snapshot().is_empty());
        assert!(map.tile_layer().is_some());
        assert_eq!(orchestrator.state(), RenderState::Idle);
        assert_eq!(orchestrator.render_count(), 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let payload = Payload::from_value(json!({
            "dead_zone": [{"lat": 49.1, "lon": 4.1}],
            "polyline": [[{"lat": 1, "lon": 1}, {"lat": 2, "lon": 2}]],
        }));
        let config = MapConfig::default();
        let mut orchestrator = Orchestrator::new();
        let render = |o: &mut Orchestrator| {
            o.render(&config, Some(&payload), &FilterState::all(), RenderTrigger::PayloadArrived)
                .unwrap()
                .snapshot()
        };

        let first = render(&mut orchestrator);
        let second = render(&mut orchestrator);
        assert_eq!(first, second);
        assert_eq!(first.count(Category::DeadZone), 1);
        assert_eq!(first.count(Category::Polyline), 1);
    }

    #[test]
    fn test_failed_render_returns_to_idle() {
        let payload = Payload::from_value(json!({"dead_zone": [{"lat": "?", "lon": 1}]}));
        let config = MapConfig::default().with_coercion(CoercionPolicy::Strict);
        let mut orchestrator = Orchestrator::new();

        let result = orchestrator.render(
            &config,
            Some(&payload),
            &FilterState::all(),
            RenderTrigger::FilterToggled(FilterKind::DeadZone),
        );
        assert!(result.is_err());
        assert_eq!(orchestrator.state(), RenderState::Idle);
        assert_eq!(orchestrator.render_count(), 0);
    }

    #[test]
    fn test_trigger_display() {
        assert_eq!(
            RenderTrigger::FilterToggled(FilterKind::Route).to_string(),
            "filter 'route' toggled"
        );
    }
}
