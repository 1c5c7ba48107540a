//! The tick resolution pipeline (§4.3-4.5, C6/C7/C9).
//!
//! [`tick::resolve_tick`] is the top-level entry point: group actions into
//! waves, resolve each wave's conflict clusters, settle binding between
//! waves, translate and bind roots once at the end, reclassify zoom
//! state, and advance the tick counter. [`draft::project_draft`] runs the
//! identical pipeline for a client preview, without committing a tick.

pub mod cluster;
pub mod config;
pub mod draft;
pub mod tick;
pub mod wave;
pub mod zoom;

pub use config::ResolverConfig;
pub use draft::{project_draft, DraftConflict, DraftMetrics};
pub use tick::{resolve_tick, TickMetrics};
