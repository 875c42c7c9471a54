//! Browser environment glue for the panoview tile viewer.
//!
//! Three pieces: environment classification over an injected snapshot
//! ([`env::Environment`]), capability-probed absolute positioning
//! ([`position::Positioner`]), and a bound-callback factory for JS event
//! handlers ([`callback::callback`]). Capability probes run once; the
//! selected behavior is carried as a plain value after that.

pub mod callback;
pub mod env;
pub mod position;

pub use callback::{callback, BoundCallback, CallbackError, Target};
pub use env::Environment;
pub use position::{PlacementMode, Positioner};
