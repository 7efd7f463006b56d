//! Android environment: device and window queries over the JNI bridge.
//!
//! Implements the Ember [`Environment`] contract against the hosting
//! activity. Capability strategies are resolved once at construction from
//! the device API level; every query consumes the resolved strategy instead
//! of re-checking a version code.

use std::sync::Arc;

use ember_platform::caps::{ApiLevel, Capabilities};
use ember_platform::cli::CommandLineOptions;
use ember_platform::dispatch::UiTaskQueue;
use ember_platform::env::Environment;
use ember_platform::error::{PlatformError, Result};
use ember_platform::geometry::Rect;

#[cfg(target_os = "android")]
use std::path::PathBuf;

#[cfg(target_os = "android")]
use android_activity::AndroidApp;
#[cfg(target_os = "android")]
use jni::objects::JString;
#[cfg(target_os = "android")]
use ndk::looper::ForeignLooper;

#[cfg(target_os = "android")]
use ember_platform::display::normalize_refresh_rate;

#[cfg(target_os = "android")]
use crate::jni_util::{check_exception, get_display, jerr, with_activity};
#[cfg(target_os = "android")]
use crate::window;

/// Intent extra carrying the launch option string.
pub const CLI_OPTIONS_EXTRA: &str = "clioptions";

#[cfg(target_os = "android")]
const AUDIO_SERVICE: &str = "audio";
#[cfg(target_os = "android")]
const PROPERTY_OUTPUT_SAMPLE_RATE: &str = "android.media.property.OUTPUT_SAMPLE_RATE";
#[cfg(target_os = "android")]
const PROPERTY_OUTPUT_FRAMES_PER_BUFFER: &str = "android.media.property.OUTPUT_FRAMES_PER_BUFFER";
#[cfg(target_os = "android")]
const ACTION_VIEW: &str = "android.intent.action.VIEW";

/// Wakes the activity thread's looper so queued window tasks are drained
/// promptly even while the event loop is parked waiting for events.
#[cfg(target_os = "android")]
pub struct WakeProxy {
    looper: ForeignLooper,
}

#[cfg(target_os = "android")]
impl WakeProxy {
    /// Binds to the calling thread's looper; `None` when the thread has none.
    pub fn for_current_thread() -> Option<Self> {
        ForeignLooper::for_thread().map(|looper| Self { looper })
    }

    pub fn wake(&self) {
        self.looper.wake();
    }
}

/// Android implementation of [`Environment`].
pub struct AndroidEnvironment {
    #[cfg(target_os = "android")]
    app: AndroidApp,
    caps: Capabilities,
    ui_tasks: Arc<UiTaskQueue>,
}

#[cfg(target_os = "android")]
impl AndroidEnvironment {
    /// Creates the environment for the hosting activity.
    ///
    /// Call from the activity thread: the window task queue binds to the
    /// constructing thread, and that thread's looper (when present) is used
    /// to rouse it for queued window tasks.
    pub fn new(app: AndroidApp) -> Result<Self> {
        let api_level = query_api_level(&app)?;
        let caps = Capabilities::resolve(api_level);
        tracing::info!(api_level = api_level.0, "resolved Android capabilities");

        let ui_tasks = Arc::new(UiTaskQueue::new());
        ui_tasks.bind_to_current_thread();
        match WakeProxy::for_current_thread() {
            Some(proxy) => ui_tasks.set_wake_callback(move || proxy.wake()),
            None => {
                tracing::warn!("no looper on activity thread; window tasks drain on poll only")
            }
        }

        Ok(Self {
            app,
            caps,
            ui_tasks,
        })
    }

    /// Strategy set resolved from the device API level at construction.
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Executes window tasks queued by other threads. The activity thread
    /// calls this once per event-loop iteration.
    pub fn process_ui_tasks(&self) {
        self.ui_tasks.drain();
    }

    fn audio_property(&self, property: &'static str, name: &'static str) -> Result<u32> {
        with_activity(&self.app, |env, activity| {
            let service = env.new_string(AUDIO_SERVICE).map_err(jerr("new_string"))?;
            let manager = env
                .call_method(
                    activity,
                    "getSystemService",
                    "(Ljava/lang/String;)Ljava/lang/Object;",
                    &[(&service).into()],
                )
                .map_err(jerr("Context.getSystemService"))?
                .l()
                .map_err(jerr("Context.getSystemService"))?;
            check_exception(env, "Context.getSystemService")?;
            if manager.is_null() {
                return Err(PlatformError::Bridge("audio service unavailable".into()));
            }

            let key = env.new_string(property).map_err(jerr("new_string"))?;
            let value = env
                .call_method(
                    &manager,
                    "getProperty",
                    "(Ljava/lang/String;)Ljava/lang/String;",
                    &[(&key).into()],
                )
                .map_err(jerr("AudioManager.getProperty"))?
                .l()
                .map_err(jerr("AudioManager.getProperty"))?;
            check_exception(env, "AudioManager.getProperty")?;
            if value.is_null() {
                return Err(PlatformError::MissingProperty(name));
            }

            let value: String = env
                .get_string(&JString::from(value))
                .map_err(jerr("get_string"))?
                .into();
            value
                .parse::<u32>()
                .map_err(|_| PlatformError::MalformedProperty { name, value })
        })
    }
}

#[cfg(target_os = "android")]
fn query_api_level(app: &AndroidApp) -> Result<ApiLevel> {
    with_activity(app, |env, _| {
        let level = env
            .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
            .map_err(jerr("Build.VERSION.SDK_INT"))?
            .i()
            .map_err(jerr("Build.VERSION.SDK_INT"))?;
        check_exception(env, "Build.VERSION.SDK_INT")?;
        Ok(ApiLevel(level as u32))
    })
}

#[cfg(target_os = "android")]
impl Environment for AndroidEnvironment {
    fn audio_sample_rate(&self) -> Result<u32> {
        self.audio_property(PROPERTY_OUTPUT_SAMPLE_RATE, "output sample rate")
    }

    fn audio_frames_per_buffer(&self) -> Result<u32> {
        self.audio_property(PROPERTY_OUTPUT_FRAMES_PER_BUFFER, "output frames per buffer")
    }

    fn target_frame_rate(&self) -> Result<f32> {
        with_activity(&self.app, |env, activity| {
            let display = get_display(env, activity, &self.caps)?;
            let raw = env
                .call_method(&display, "getRefreshRate", "()F", &[])
                .map_err(jerr("Display.getRefreshRate"))?
                .f()
                .map_err(jerr("Display.getRefreshRate"))?;
            check_exception(env, "Display.getRefreshRate")?;
            Ok(normalize_refresh_rate(raw))
        })
    }

    fn open_url(&self, url: &str) {
        let result = with_activity(&self.app, |env, activity| {
            let jurl = env.new_string(url).map_err(jerr("new_string"))?;
            let uri = env
                .call_static_method(
                    "android/net/Uri",
                    "parse",
                    "(Ljava/lang/String;)Landroid/net/Uri;",
                    &[(&jurl).into()],
                )
                .map_err(jerr("Uri.parse"))?
                .l()
                .map_err(jerr("Uri.parse"))?;
            check_exception(env, "Uri.parse")?;

            let action = env.new_string(ACTION_VIEW).map_err(jerr("new_string"))?;
            let intent = env
                .new_object(
                    "android/content/Intent",
                    "(Ljava/lang/String;Landroid/net/Uri;)V",
                    &[(&action).into(), (&uri).into()],
                )
                .map_err(jerr("Intent::<init>"))?;
            check_exception(env, "Intent::<init>")?;

            env.call_method(
                activity,
                "startActivity",
                "(Landroid/content/Intent;)V",
                &[(&intent).into()],
            )
            .map_err(jerr("Activity.startActivity"))?;
            check_exception(env, "Activity.startActivity")
        });
        if let Err(err) = result {
            tracing::warn!("failed to open URL `{url}`: {err}");
        }
    }

    fn set_immersive_mode(&self) {
        let app = self.app.clone();
        let caps = self.caps;
        self.ui_tasks.run_blocking(move || {
            if let Err(err) = window::apply_immersive_mode(&app, &caps) {
                tracing::warn!("failed to enter immersive mode: {err}");
            }
        });
    }

    fn safe_area(&self) -> Result<Rect> {
        with_activity(&self.app, |env, activity| {
            window::query_safe_area(env, activity, &self.caps)
        })
    }

    fn cli_options(&self) -> Result<CommandLineOptions> {
        with_activity(&self.app, |env, activity| {
            let intent = env
                .call_method(activity, "getIntent", "()Landroid/content/Intent;", &[])
                .map_err(jerr("Activity.getIntent"))?
                .l()
                .map_err(jerr("Activity.getIntent"))?;
            check_exception(env, "Activity.getIntent")?;
            if intent.is_null() {
                return Ok(CommandLineOptions::default());
            }

            let key = env
                .new_string(CLI_OPTIONS_EXTRA)
                .map_err(jerr("new_string"))?;
            let extra = env
                .call_method(
                    &intent,
                    "getStringExtra",
                    "(Ljava/lang/String;)Ljava/lang/String;",
                    &[(&key).into()],
                )
                .map_err(jerr("Intent.getStringExtra"))?
                .l()
                .map_err(jerr("Intent.getStringExtra"))?;
            check_exception(env, "Intent.getStringExtra")?;
            // Launches without the extra are the common case, not an error.
            if extra.is_null() {
                return Ok(CommandLineOptions::default());
            }

            let line: String = env
                .get_string(&JString::from(extra))
                .map_err(jerr("get_string"))?
                .into();
            Ok(CommandLineOptions::from_line(&line))
        })
    }

    fn internal_data_path(&self) -> Option<PathBuf> {
        self.app.internal_data_path()
    }

    fn display_density(&self) -> Option<u32> {
        self.app.config().density()
    }

    fn name(&self) -> &'static str {
        "android"
    }
}

// Stub implementation for non-Android builds (for cross-compilation checks)
#[cfg(not(target_os = "android"))]
impl AndroidEnvironment {
    /// Placeholder environment (fails on non-Android).
    pub fn new() -> Self {
        Self {
            caps: Capabilities::resolve(ApiLevel(0)),
            ui_tasks: Arc::new(UiTaskQueue::new()),
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    pub fn process_ui_tasks(&self) {
        self.ui_tasks.drain();
    }

    fn unsupported(&self) -> PlatformError {
        PlatformError::Unsupported("Android environment only available on Android".to_string())
    }
}

#[cfg(not(target_os = "android"))]
impl Default for AndroidEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "android"))]
impl Environment for AndroidEnvironment {
    fn audio_sample_rate(&self) -> Result<u32> {
        Err(self.unsupported())
    }

    fn audio_frames_per_buffer(&self) -> Result<u32> {
        Err(self.unsupported())
    }

    fn target_frame_rate(&self) -> Result<f32> {
        Err(self.unsupported())
    }

    fn open_url(&self, url: &str) {
        tracing::warn!("open_url(`{url}`) ignored off-device");
    }

    fn set_immersive_mode(&self) {
        tracing::warn!("set_immersive_mode ignored off-device");
    }

    fn safe_area(&self) -> Result<Rect> {
        Err(self.unsupported())
    }

    fn cli_options(&self) -> Result<CommandLineOptions> {
        Err(self.unsupported())
    }

    fn name(&self) -> &'static str {
        "android-stub"
    }
}

#[cfg(all(test, not(target_os = "android")))]
mod tests {
    use super::*;

    #[test]
    fn stub_reports_unsupported() {
        let env = AndroidEnvironment::new();
        assert!(matches!(
            env.audio_sample_rate(),
            Err(PlatformError::Unsupported(_))
        ));
        assert!(matches!(
            env.cli_options(),
            Err(PlatformError::Unsupported(_))
        ));
        assert_eq!(env.name(), "android-stub");
    }

    #[test]
    fn stub_capability_set_is_floor() {
        let env = AndroidEnvironment::new();
        assert_eq!(env.capabilities().api_level, ApiLevel(0));
    }
}
