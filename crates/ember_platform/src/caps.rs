//! Platform capability detection.
//!
//! OS-version branching is resolved once at startup into a set of strategy
//! tags; query paths consume the resolved strategies and never re-check a
//! version code.

/// OS API level, as reported by the platform at startup
/// (`Build.VERSION.SDK_INT` on Android).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    /// Cutout layout modes on window attributes (Android 9).
    pub const CUTOUT_LAYOUT: ApiLevel = ApiLevel(28);
    /// Per-edge cutout insets via `Display.getCutout` (Android 10).
    pub const CUTOUT_QUERY: ApiLevel = ApiLevel(29);
    /// `Context.getDisplay` and the window insets controller (Android 11).
    pub const CONTEXT_DISPLAY: ApiLevel = ApiLevel(30);
}

/// How the active display object is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLookup {
    /// Ask the activity context for its display.
    ContextDisplay,
    /// Fall back to the window manager's default display.
    DefaultDisplay,
}

/// Whether per-edge cutout insets can be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoutQuery {
    PerEdgeInsets,
    Unavailable,
}

/// Whether window content may extend into short-edge cutouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoutLayout {
    ShortEdges,
    Unavailable,
}

/// How system bars are hidden for immersive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemBars {
    /// Window insets controller (Android 11+).
    InsetsController,
    /// Legacy system-UI visibility flags on the decor view.
    UiVisibilityFlags,
}

/// Strategy set resolved from the device API level at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub api_level: ApiLevel,
    pub display_lookup: DisplayLookup,
    pub cutout_query: CutoutQuery,
    pub cutout_layout: CutoutLayout,
    pub system_bars: SystemBars,
}

impl Capabilities {
    pub fn resolve(api_level: ApiLevel) -> Self {
        Self {
            api_level,
            display_lookup: if api_level >= ApiLevel::CONTEXT_DISPLAY {
                DisplayLookup::ContextDisplay
            } else {
                DisplayLookup::DefaultDisplay
            },
            cutout_query: if api_level >= ApiLevel::CUTOUT_QUERY {
                CutoutQuery::PerEdgeInsets
            } else {
                CutoutQuery::Unavailable
            },
            cutout_layout: if api_level >= ApiLevel::CUTOUT_LAYOUT {
                CutoutLayout::ShortEdges
            } else {
                CutoutLayout::Unavailable
            },
            system_bars: if api_level >= ApiLevel::CONTEXT_DISPLAY {
                SystemBars::InsetsController
            } else {
                SystemBars::UiVisibilityFlags
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_cutout_device() {
        let caps = Capabilities::resolve(ApiLevel(27));
        assert_eq!(caps.display_lookup, DisplayLookup::DefaultDisplay);
        assert_eq!(caps.cutout_query, CutoutQuery::Unavailable);
        assert_eq!(caps.cutout_layout, CutoutLayout::Unavailable);
        assert_eq!(caps.system_bars, SystemBars::UiVisibilityFlags);
    }

    #[test]
    fn cutout_layout_arrives_at_28() {
        let caps = Capabilities::resolve(ApiLevel(28));
        assert_eq!(caps.cutout_layout, CutoutLayout::ShortEdges);
        assert_eq!(caps.cutout_query, CutoutQuery::Unavailable);
    }

    #[test]
    fn cutout_query_arrives_at_29() {
        let caps = Capabilities::resolve(ApiLevel(29));
        assert_eq!(caps.cutout_query, CutoutQuery::PerEdgeInsets);
        assert_eq!(caps.display_lookup, DisplayLookup::DefaultDisplay);
    }

    #[test]
    fn modern_device() {
        let caps = Capabilities::resolve(ApiLevel(34));
        assert_eq!(caps.display_lookup, DisplayLookup::ContextDisplay);
        assert_eq!(caps.system_bars, SystemBars::InsetsController);
        assert_eq!(caps.cutout_query, CutoutQuery::PerEdgeInsets);
    }
}
