//! The environment contract platform adapters implement.

use std::path::PathBuf;

use crate::cli::CommandLineOptions;
use crate::error::Result;
use crate::geometry::Rect;

/// Host-environment queries the runtime needs answered, implemented by each
/// platform adapter.
///
/// Queries are synchronous and independent of one another. The only
/// operation with cross-thread behavior is
/// [`set_immersive_mode`](Environment::set_immersive_mode), which blocks
/// until the window mutation has been applied on the owning thread.
pub trait Environment {
    /// Preferred output sample rate of the device, in Hz.
    ///
    /// Fails when the platform does not report the property or reports a
    /// non-numeric value.
    fn audio_sample_rate(&self) -> Result<u32>;

    /// Preferred output buffer size, in frames.
    fn audio_frames_per_buffer(&self) -> Result<u32>;

    /// Refresh rate of the active display, normalized to two decimals.
    fn target_frame_rate(&self) -> Result<f32>;

    /// Asks the platform to open `url` with its default handler.
    ///
    /// Fire-and-forget: failures are logged, never surfaced.
    fn open_url(&self, url: &str);

    /// Puts the window into immersive mode: fullscreen, edge-to-edge,
    /// system bars hidden and reclaimable by swipe.
    ///
    /// Returns only after the mutation is visible, so geometry reads that
    /// follow observe the updated window. Failures are logged, never
    /// surfaced.
    fn set_immersive_mode(&self);

    /// Drawable rectangle of the window, excluding display-cutout intrusion.
    fn safe_area(&self) -> Result<Rect>;

    /// Options passed by the launcher, or an empty set when none were given.
    fn cli_options(&self) -> Result<CommandLineOptions>;

    /// Directory for internal application data, where the platform has one.
    fn internal_data_path(&self) -> Option<PathBuf> {
        None
    }

    /// Display density in dpi, where the platform reports one.
    fn display_density(&self) -> Option<u32> {
        None
    }

    /// Short platform name for logs and diagnostics.
    fn name(&self) -> &'static str;
}
