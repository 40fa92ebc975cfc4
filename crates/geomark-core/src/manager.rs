//! Owns the venue directory, the layout cache, and the open view.

use crate::cache::LayoutCache;
use crate::input::{InputEvent, InputSource};
use crate::locations::LocationDirectory;
use crate::render::RenderAdapter;
use crate::session::{Session, SessionResult};

struct AttachedView {
    location_id: String,
    session: Session,
}

/// The single owner of editing state across view changes.
///
/// At most one view is open at a time. Opening a view while another is
/// open closes the old one first, so its layout lands in the cache before
/// the new view seeds itself.
pub struct ViewManager {
    directory: LocationDirectory,
    cache: LayoutCache,
    attached: Option<AttachedView>,
}

impl ViewManager {
    pub fn new(directory: LocationDirectory) -> Self {
        Self {
            directory,
            cache: LayoutCache::new(),
            attached: None,
        }
    }

    /// Open a view for `location_id`, closing any open view first.
    ///
    /// The layout comes from the cache when the venue was visited this
    /// run, otherwise from the directory's seed regions.
    pub fn attach(
        &mut self,
        location_id: &str,
        target: Box<dyn RenderAdapter>,
        input: &mut dyn InputSource,
    ) -> SessionResult<()> {
        self.detach(input);
        let info = self.directory.resolve(location_id).clone();
        let seed = match self.cache.get(location_id) {
            Some(regions) => regions.to_vec(),
            None => info.regions.clone(),
        };
        let mut session = Session::new(info);
        session.attach(target, input, seed)?;
        self.attached = Some(AttachedView {
            location_id: location_id.to_string(),
            session,
        });
        Ok(())
    }

    /// Close the open view, if any, and cache its final layout.
    pub fn detach(&mut self, input: &mut dyn InputSource) {
        if let Some(mut view) = self.attached.take() {
            let snapshot = view.session.detach(input);
            self.cache.store(view.location_id, snapshot);
        }
    }

    /// Forward an input event to the open view.
    pub fn dispatch(&mut self, event: InputEvent) -> SessionResult<()> {
        match self.attached.as_mut() {
            Some(view) => view.session.dispatch(event),
            None => {
                log::debug!("input event with no view open");
                Ok(())
            }
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.attached.as_ref().map(|view| &view.session)
    }

    pub fn attached_location(&self) -> Option<&str> {
        self.attached.as_ref().map(|view| view.location_id.as_str())
    }

    pub fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    pub fn directory(&self) -> &LocationDirectory {
        &self.directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::input::TokenLedger;
    use crate::render::{RecordingAdapter, RenderOp};

    fn manager() -> ViewManager {
        ViewManager::new(LocationDirectory::builtin())
    }

    #[test]
    fn test_attach_seeds_from_the_directory() {
        let mut manager = manager();
        let mut input = TokenLedger::new();
        let adapter = RecordingAdapter::new();

        manager
            .attach("SRC 1", Box::new(adapter.clone()), &mut input)
            .unwrap();
        assert_eq!(manager.attached_location(), Some("SRC 1"));
        assert_eq!(adapter.live_regions().len(), 4);
        assert_eq!(input.active(), 2);
    }

    #[test]
    fn test_unknown_id_opens_the_default_venue() {
        let mut manager = manager();
        let mut input = TokenLedger::new();
        let adapter = RecordingAdapter::new();

        manager
            .attach("Nowhere", Box::new(adapter.clone()), &mut input)
            .unwrap();
        let session = manager.session().unwrap();
        assert_eq!(session.location().name, "Default");
        assert!(adapter.live_regions().is_empty());
    }

    #[test]
    fn test_switching_views_closes_the_old_one_first() {
        let mut manager = manager();
        let mut input = TokenLedger::new();
        let src_adapter = RecordingAdapter::new();
        let field_adapter = RecordingAdapter::new();

        manager
            .attach("SRC 1", Box::new(src_adapter.clone()), &mut input)
            .unwrap();
        manager
            .attach("MacInnes 1", Box::new(field_adapter.clone()), &mut input)
            .unwrap();

        assert_eq!(src_adapter.ops().last(), Some(&RenderOp::Detached));
        assert!(src_adapter.live_drawables().is_empty());
        assert_eq!(field_adapter.live_regions().len(), 2);
        // The old view's subscriptions were released before the new
        // view's were taken.
        assert_eq!(input.active(), 2);
        assert!(manager.cache().contains("SRC 1"));
    }

    #[test]
    fn test_edits_survive_reopening_a_venue() {
        let mut manager = manager();
        let mut input = TokenLedger::new();

        manager
            .attach("SRC 1", Box::new(RecordingAdapter::new()), &mut input)
            .unwrap();
        manager
            .dispatch(InputEvent::Key(".".to_string()))
            .unwrap();
        // Spawn a fifth region on open ground.
        manager
            .dispatch(InputEvent::Click(GeoPoint::new(49.5, -123.0)))
            .unwrap();
        assert_eq!(manager.session().unwrap().registry().len(), 5);

        manager
            .attach("MacInnes 1", Box::new(RecordingAdapter::new()), &mut input)
            .unwrap();
        assert_eq!(manager.session().unwrap().registry().len(), 2);

        let adapter = RecordingAdapter::new();
        manager
            .attach("SRC 1", Box::new(adapter.clone()), &mut input)
            .unwrap();
        assert_eq!(adapter.live_regions().len(), 5);
    }

    #[test]
    fn test_detach_with_no_view_is_harmless() {
        let mut manager = manager();
        let mut input = TokenLedger::new();
        manager.detach(&mut input);
        manager
            .dispatch(InputEvent::Click(GeoPoint::new(49.0, -123.0)))
            .unwrap();
        assert!(manager.session().is_none());
    }

    #[test]
    fn test_detach_caches_and_releases() {
        let mut manager = manager();
        let mut input = TokenLedger::new();
        manager
            .attach("MacInnes 2", Box::new(RecordingAdapter::new()), &mut input)
            .unwrap();
        manager.detach(&mut input);

        assert_eq!(input.active(), 0);
        assert!(manager.session().is_none());
        let cached = manager.cache().get("MacInnes 2").unwrap();
        assert_eq!(cached.len(), 2);
    }
}
