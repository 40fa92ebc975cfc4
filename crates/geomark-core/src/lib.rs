//! Geomark Core Library
//!
//! Platform-agnostic geometry and interaction logic for the Geomark map
//! overlay editor.

pub mod cache;
pub mod color;
pub mod geo;
pub mod input;
pub mod locations;
pub mod manager;
pub mod region;
pub mod registry;
pub mod render;
pub mod session;

pub use cache::LayoutCache;
pub use color::ColorWheel;
pub use geo::{DEFAULT_SIDE_METERS, GeoPoint, METERS_PER_DEGREE_LAT};
pub use input::{
    Compass, EditCommand, GrowAxis, HANDLER_SET, InputEvent, InputSource, Interest,
    SubscriptionToken, TokenLedger,
};
pub use locations::{DEFAULT_ZOOM, LocationDirectory, LocationInfo};
pub use manager::ViewManager;
pub use region::Region;
pub use registry::{RegionRegistry, RegistryError};
pub use render::{DrawableId, RecordingAdapter, RenderAdapter, RenderOp};
pub use session::{Mode, Session, SessionError};
