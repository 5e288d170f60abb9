//! Screen-transition orchestration for a view-stack navigator.
//!
//! When the focused route changes, every registered item on the outgoing and
//! incoming routes gets a style interpolated between its two appearances. One
//! progress scalar in [0, 1] drives all interpolations; it advances with time after
//! a route change, or follows the finger during a back-swipe.
//!
//! # Pieces
//!
//! - [`registry`]: items mounted by each route, with their measured metrics
//! - [`matcher`]: items present on both routes, by id
//! - [`filter`], [`transition`]: which items a definition touches and how
//! - [`gesture`]: drag-to-go-back state machine
//! - [`coordinator`]: ties navigation changes, rules and progress together
//!
//! Rendering, layout, routing and the platform animation driver live outside this
//! crate. Layout results come in through [`RegistryHandle::set_metrics`]; styles go
//! out as [`StyleMaps`] every tick.

pub mod coordinator;
pub mod easing;
pub mod error;
pub mod filter;
pub mod gesture;
pub mod interpolate;
pub mod item;
pub mod matcher;
pub mod navigation;
pub mod progress;
pub mod registry;
pub mod rules;
pub mod style;
pub mod transition;

pub use coordinator::{TransitionCoordinator, resolve_header_mode};
pub use easing::EasingFunction;
pub use error::{Result, TransitionError};
pub use filter::ItemFilter;
pub use gesture::{
    GestureAxis, GestureConfig, GesturePhase, GestureProgressController, GestureState,
    PointerSample, ReleaseDecision,
};
pub use interpolate::{Angle, Interpolation, OutputRange, OutputValue, Progress};
pub use item::{Metrics, TransitionItem};
pub use matcher::{SharedPair, items_to_clone, items_to_measure, matched_ids, shared_pairs};
pub use navigation::{NavigationCommand, NavigationState, Route, TransitionEvent};
pub use progress::{ProgressAnimation, TransitionSpec};
pub use registry::{RegistryHandle, TransitionItemRegistry};
pub use rules::{TransitionRule, TransitionRules};
pub use style::{Style, StyleMap, StyleMapBuilder, StyleMaps, StyleProperty, TransformOp};
pub use transition::{
    Layout, PreparedTransition, StyleInterpolator, Transition, TransitionDefinition,
    TransitionState, together,
};
