//! Render adapter that narrates drawing to the log.

use geomark_core::{DrawableId, LocationInfo, Region, RenderAdapter};

/// Stand-in renderer for running without a map: every draw call becomes
/// a log line.
#[derive(Debug, Default)]
pub struct ConsoleAdapter;

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl RenderAdapter for ConsoleAdapter {
    fn on_attach(&mut self, location: &LocationInfo) {
        log::info!(
            "map open at {} (center {}, zoom {})",
            location.name,
            location.center,
            location.zoom
        );
    }

    fn on_detach(&mut self) {
        log::info!("map closed");
    }

    fn create_drawable(&mut self, region: &Region) -> DrawableId {
        let focus = if region.focused { ", focused" } else { "" };
        log::info!("draw {} at {}{}", region.color, region.center(), focus);
        DrawableId::mint()
    }

    fn remove_drawable(&mut self, id: DrawableId) {
        log::info!("erase {}", id);
    }
}
