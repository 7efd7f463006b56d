//! JNI plumbing shared by the Android environment queries.

use android_activity::AndroidApp;
use jni::objects::JObject;
use jni::{JNIEnv, JavaVM};

use ember_platform::caps::{Capabilities, DisplayLookup};
use ember_platform::{PlatformError, Result};

/// Maps a `jni` error into a bridge error carrying the failing call site.
pub(crate) fn jerr(context: &'static str) -> impl FnOnce(jni::errors::Error) -> PlatformError {
    move |err| PlatformError::Bridge(format!("{context}: {err}"))
}

/// Converts a pending Java exception into an error.
///
/// The exception is described to logcat and cleared so the JNI environment
/// stays usable for subsequent calls.
pub(crate) fn check_exception(env: &mut JNIEnv, context: &'static str) -> Result<()> {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
        return Err(PlatformError::Bridge(format!(
            "Java exception during {context}"
        )));
    }
    Ok(())
}

/// Attaches the current thread to the activity's VM and runs `f` with the
/// JNI environment and the activity object.
pub(crate) fn with_activity<F, R>(app: &AndroidApp, f: F) -> Result<R>
where
    for<'j> F: FnOnce(&mut JNIEnv<'j>, &JObject<'j>) -> Result<R>,
{
    let vm =
        unsafe { JavaVM::from_raw(app.vm_as_ptr().cast()) }.map_err(jerr("JavaVM::from_raw"))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(jerr("JavaVM::attach_current_thread"))?;
    let activity = unsafe { JObject::from_raw(app.activity_as_ptr().cast()) };
    f(&mut env, &activity)
}

/// Looks up the activity's window.
pub(crate) fn get_window<'j>(
    env: &mut JNIEnv<'j>,
    activity: &JObject<'j>,
) -> Result<JObject<'j>> {
    let window = env
        .call_method(activity, "getWindow", "()Landroid/view/Window;", &[])
        .map_err(jerr("Activity.getWindow"))?
        .l()
        .map_err(jerr("Activity.getWindow"))?;
    check_exception(env, "Activity.getWindow")?;
    if window.is_null() {
        return Err(PlatformError::Bridge("activity has no window".into()));
    }
    Ok(window)
}

/// Looks up the window's decor view.
pub(crate) fn get_decor_view<'j>(
    env: &mut JNIEnv<'j>,
    window: &JObject<'j>,
) -> Result<JObject<'j>> {
    let decor = env
        .call_method(window, "getDecorView", "()Landroid/view/View;", &[])
        .map_err(jerr("Window.getDecorView"))?
        .l()
        .map_err(jerr("Window.getDecorView"))?;
    check_exception(env, "Window.getDecorView")?;
    if decor.is_null() {
        return Err(PlatformError::Bridge("window has no decor view".into()));
    }
    Ok(decor)
}

/// Looks up the active display through the strategy resolved at startup.
pub(crate) fn get_display<'j>(
    env: &mut JNIEnv<'j>,
    activity: &JObject<'j>,
    caps: &Capabilities,
) -> Result<JObject<'j>> {
    let display = match caps.display_lookup {
        DisplayLookup::ContextDisplay => env
            .call_method(activity, "getDisplay", "()Landroid/view/Display;", &[])
            .map_err(jerr("Context.getDisplay"))?
            .l()
            .map_err(jerr("Context.getDisplay"))?,
        DisplayLookup::DefaultDisplay => {
            let manager = env
                .call_method(
                    activity,
                    "getWindowManager",
                    "()Landroid/view/WindowManager;",
                    &[],
                )
                .map_err(jerr("Activity.getWindowManager"))?
                .l()
                .map_err(jerr("Activity.getWindowManager"))?;
            check_exception(env, "Activity.getWindowManager")?;
            env.call_method(
                &manager,
                "getDefaultDisplay",
                "()Landroid/view/Display;",
                &[],
            )
            .map_err(jerr("WindowManager.getDefaultDisplay"))?
            .l()
            .map_err(jerr("WindowManager.getDefaultDisplay"))?
        }
    };
    check_exception(env, "display lookup")?;
    if display.is_null() {
        return Err(PlatformError::Bridge("no active display".into()));
    }
    Ok(display)
}
