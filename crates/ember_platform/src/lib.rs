//! Ember Platform Abstraction Layer
//!
//! Shared contract between the Ember runtime and its platform adapters:
//! environment queries (audio properties, display refresh rate, safe area),
//! launch-option parsing, capability resolution, and the marshaling
//! primitive used to mutate the window from off-thread callers.
//!
//! Pure logic lives here so it can be exercised on any host; the per-OS
//! adapters (e.g. `ember_platform_android`) implement [`Environment`] on top
//! of it.

pub mod caps;
pub mod cli;
pub mod dispatch;
pub mod display;
pub mod env;
pub mod error;
pub mod geometry;

pub use caps::{ApiLevel, Capabilities, CutoutLayout, CutoutQuery, DisplayLookup, SystemBars};
pub use cli::CommandLineOptions;
pub use dispatch::UiTaskQueue;
pub use env::Environment;
pub use error::{PlatformError, Result};
pub use geometry::{CutoutInsets, Rect};
