// Library exports for testing and embedding in a debugger UI.
//
// # Mutex Usage Policy
//
//   - `parking_lot::Mutex`: sync-only state such as the listener list and
//     the debug logger.
//   - `arc_swap::ArcSwap`: read-mostly snapshots read from several threads
//     (the renderer list, the active theme).
//
// Never hold a lock while calling into a listener or renderer.

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod config {
    //! Configuration re-exports from the `valuelens-config` crate.
    pub use valuelens_config::*;
}
pub mod rendering;
