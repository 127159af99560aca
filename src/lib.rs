//! Lifecycle core for a floating overlay panel: a host surface that detaches
//! into a movable, resizable, minimizable panel when the user scrolls past
//! its anchor, and reattaches when the user scrolls back.
//!
//! The crate is host-agnostic. A host implements [`host::HostView`] (what the
//! controller samples each frame) and [`host::PanelSurface`] (the visual
//! mutations it drives), forwards scroll/frame/pointer/navigation signals to
//! a [`controller::PanelController`], and the controller does the rest:
//! hysteresis-based enter/exit, drag and corner-resize gestures, geometry
//! persistence, and settle-time serialization of transitions.

pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod positioner;
pub mod scroll;
pub mod store;

pub use config::{load_panel_config, PanelConfig};
pub use controller::{PanelController, PanelHandle};
pub use error::{PanelError, PanelResult};
pub use geometry::{PanelBox, PanelGeometry, ResizeCorner, Viewport};
pub use host::{AnchorRect, HostView, PanelSurface};
pub use lifecycle::{LifecycleMachine, LifecycleState, PanelEvent, PanelPhase};
pub use store::{FileBackend, GeometryStore, MemoryBackend, StorageBackend};
