//! The per-venue editing session and its interaction state machine.

use std::fmt;

use thiserror::Error;

use crate::color::ColorWheel;
use crate::geo::{self, GeoPoint};
use crate::input::{
    Compass, EditCommand, GrowAxis, HANDLER_SET, InputEvent, InputSource, SubscriptionToken,
};
use crate::locations::LocationInfo;
use crate::region::Region;
use crate::registry::{RegionRegistry, RegistryError};
use crate::render::RenderAdapter;

/// Degrees per rotate keypress.
pub const ROTATE_STEP_DEGREES: f64 = 1.0;

/// Meters per nudge keypress.
pub const NUDGE_STEP_METERS: f64 = 1.0;

/// Meters per resize keypress.
pub const GROW_STEP_METERS: f64 = 1.0;

/// Session errors.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("No render target; attach the session to a view first")]
    UninitializedRenderTarget,
    #[error("Session is already attached to a view")]
    AlreadyAttached,
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// What clicks and keys mean right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browse the map; clicks are only logged.
    #[default]
    View,
    /// Edit regions; clicks focus, unfocus, and spawn.
    Draw,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Self::View => Self::Draw,
            Self::Draw => Self::View,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View => write!(f, "view"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// One editing session bound to a venue.
///
/// Owns the interaction state: the mode, the focused region, and the
/// registry of drawn regions. The renderer and the input stream are only
/// reached through the seams handed to [`Session::attach`]. Commands with
/// unmet preconditions (wrong mode, nothing focused) are silent no-ops;
/// commands that need a render target while detached are errors.
pub struct Session {
    location: LocationInfo,
    registry: RegionRegistry,
    mode: Mode,
    focused: Option<usize>,
    target: Option<Box<dyn RenderAdapter>>,
    subscriptions: Vec<SubscriptionToken>,
    colors: ColorWheel,
}

impl Session {
    /// A detached session for `location`, in view mode with nothing focused.
    pub fn new(location: LocationInfo) -> Self {
        Self {
            location,
            registry: RegionRegistry::new(),
            mode: Mode::View,
            focused: None,
            target: None,
            subscriptions: Vec::new(),
            colors: ColorWheel::new(),
        }
    }

    /// Bind the session to a render target, draw the seed layout, and
    /// register for input.
    ///
    /// All-or-nothing: a duplicate color anywhere in `seed` fails the
    /// attach before anything is drawn.
    pub fn attach(
        &mut self,
        mut target: Box<dyn RenderAdapter>,
        input: &mut dyn InputSource,
        seed: Vec<Region>,
    ) -> SessionResult<()> {
        if self.target.is_some() {
            return Err(SessionError::AlreadyAttached);
        }
        for (i, region) in seed.iter().enumerate() {
            if seed[..i].iter().any(|other| other.color == region.color) {
                return Err(RegistryError::DuplicateColor(region.color.clone()).into());
            }
        }
        target.on_attach(&self.location);
        for region in seed {
            self.registry.add(region, target.as_mut())?;
        }
        self.target = Some(target);
        for interest in HANDLER_SET {
            self.subscriptions.push(input.subscribe(interest));
        }
        log::info!(
            "attached to {} with {} regions",
            self.location.name,
            self.registry.len()
        );
        Ok(())
    }

    /// Release input subscriptions, drop the render target, and return
    /// the final layout with focus flags cleared.
    ///
    /// Detaching a detached session returns an empty layout.
    pub fn detach(&mut self, input: &mut dyn InputSource) -> Vec<Region> {
        for token in self.subscriptions.drain(..) {
            input.unsubscribe(token);
        }
        let snapshot = self.registry.snapshot();
        self.registry.clear();
        self.focused = None;
        if let Some(mut target) = self.target.take() {
            target.on_detach();
            log::info!("detached from {}", self.location.name);
        }
        snapshot
    }

    /// Feed one input event through the state machine.
    pub fn dispatch(&mut self, event: InputEvent) -> SessionResult<()> {
        match event {
            InputEvent::Click(point) => self.handle_click(point),
            InputEvent::Key(key) => match EditCommand::from_key(&key) {
                Some(command) => self.apply(command),
                None => Ok(()),
            },
        }
    }

    /// Apply one decoded command.
    pub fn apply(&mut self, command: EditCommand) -> SessionResult<()> {
        match command {
            EditCommand::ToggleMode => self.toggle_mode(),
            EditCommand::RotateClockwise => {
                self.transform_focused(|points| geo::rotate(points, ROTATE_STEP_DEGREES))
            }
            EditCommand::RotateCounterClockwise => {
                self.transform_focused(|points| geo::rotate(points, -ROTATE_STEP_DEGREES))
            }
            EditCommand::Nudge(direction) => {
                let (north, east) = match direction {
                    Compass::North => (1.0, 0.0),
                    Compass::South => (-1.0, 0.0),
                    Compass::East => (0.0, 1.0),
                    Compass::West => (0.0, -1.0),
                };
                self.transform_focused(|points| {
                    geo::translate(points, north, east, NUDGE_STEP_METERS)
                })
            }
            EditCommand::Expand(axis) => self.grow_focused(axis, GROW_STEP_METERS),
            EditCommand::Shrink(axis) => self.grow_focused(axis, -GROW_STEP_METERS),
            EditCommand::DeleteFocused => self.delete_focused(),
            EditCommand::DumpLayout => self.dump_layout(),
        }
    }

    /// Put a region on the map directly, outside the click flow.
    pub fn add_region(&mut self, region: Region) -> SessionResult<usize> {
        let target = self
            .target
            .as_deref_mut()
            .ok_or(SessionError::UninitializedRenderTarget)?;
        let index = self.registry.add(region, target)?;
        Ok(index)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    pub fn location(&self) -> &LocationInfo {
        &self.location
    }

    fn toggle_mode(&mut self) -> SessionResult<()> {
        self.mode = self.mode.toggled();
        log::info!("{} mode", self.mode);
        if self.mode == Mode::View {
            if let Some(index) = self.focused {
                self.set_focus_flag(index, false)?;
                self.focused = None;
            }
        }
        Ok(())
    }

    fn handle_click(&mut self, point: GeoPoint) -> SessionResult<()> {
        if self.mode != Mode::Draw {
            log::info!("click at {}", point);
            return Ok(());
        }
        match self.registry.find_containing(point) {
            Some(index) if Some(index) == self.focused => {
                self.set_focus_flag(index, false)?;
                self.focused = None;
            }
            Some(index) => {
                if let Some(previous) = self.focused {
                    self.set_focus_flag(previous, false)?;
                }
                self.set_focus_flag(index, true)?;
                self.focused = Some(index);
            }
            None => {
                if let Some(previous) = self.focused {
                    self.set_focus_flag(previous, false)?;
                    self.focused = None;
                } else {
                    self.spawn_at(point)?;
                }
            }
        }
        Ok(())
    }

    /// Spawn an unfocused default square centered on `point`, colored with
    /// the next free wheel color.
    fn spawn_at(&mut self, point: GeoPoint) -> SessionResult<()> {
        let target = self
            .target
            .as_deref_mut()
            .ok_or(SessionError::UninitializedRenderTarget)?;
        let color = loop {
            let candidate = self.colors.next_color();
            if !self.registry.contains_color(&candidate) {
                break candidate;
            }
        };
        let region = Region::new(geo::square_at_point(point, geo::DEFAULT_SIDE_METERS), color);
        let index = self.registry.add(region, target)?;
        log::info!("spawned region {} at {}", index, point);
        Ok(())
    }

    fn delete_focused(&mut self) -> SessionResult<()> {
        if self.mode != Mode::Draw {
            return Ok(());
        }
        let Some(index) = self.focused else {
            return Ok(());
        };
        let target = self
            .target
            .as_deref_mut()
            .ok_or(SessionError::UninitializedRenderTarget)?;
        let removed = self.registry.remove(index, target)?;
        self.focused = None;
        log::info!("deleted region {}", removed.color);
        Ok(())
    }

    /// Log every region's corners, for copying back into seed data.
    fn dump_layout(&self) -> SessionResult<()> {
        if self.mode != Mode::Draw {
            return Ok(());
        }
        for region in self.registry.iter() {
            let [a, b, c, d] = &region.points;
            log::info!("layout {}: ({}) ({}) ({}) ({})", region.color, a, b, c, d);
        }
        Ok(())
    }

    /// Redraw the region at `index` with its focus flag set or cleared.
    fn set_focus_flag(&mut self, index: usize, focused: bool) -> SessionResult<()> {
        let target = self
            .target
            .as_deref_mut()
            .ok_or(SessionError::UninitializedRenderTarget)?;
        let Some(region) = self.registry.region(index) else {
            return Err(RegistryError::IndexOutOfRange {
                index,
                len: self.registry.len(),
            }
            .into());
        };
        let mut updated = region.clone();
        updated.focused = focused;
        self.registry.update(index, updated, target)?;
        Ok(())
    }

    /// Run `transform` over the focused region's corners and redraw it.
    ///
    /// No-op outside draw mode or with nothing focused; a transform that
    /// does not come back with four corners leaves the region alone.
    fn transform_focused<F>(&mut self, transform: F) -> SessionResult<()>
    where
        F: FnOnce(&[GeoPoint; 4]) -> Vec<GeoPoint>,
    {
        if self.mode != Mode::Draw {
            return Ok(());
        }
        let Some(index) = self.focused else {
            return Ok(());
        };
        let target = self
            .target
            .as_deref_mut()
            .ok_or(SessionError::UninitializedRenderTarget)?;
        let Some(region) = self.registry.region(index) else {
            return Ok(());
        };
        let mut updated = region.clone();
        let Ok(points) = <[GeoPoint; 4]>::try_from(transform(&updated.points)) else {
            return Ok(());
        };
        updated.points = points;
        self.registry.update(index, updated, target)?;
        Ok(())
    }

    fn grow_focused(&mut self, axis: GrowAxis, delta_meters: f64) -> SessionResult<()> {
        let (delta_a, delta_b) = match axis {
            GrowAxis::First => (delta_meters, 0.0),
            GrowAxis::Second => (0.0, delta_meters),
        };
        self.transform_focused(|points| geo::grow(points, delta_a, delta_b).to_vec())
    }
}
