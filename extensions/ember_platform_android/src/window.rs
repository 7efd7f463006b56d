//! Window-flag mutation and safe-area queries.
//!
//! `apply_immersive_mode` runs inside a window task on the owning thread;
//! `query_safe_area` reads geometry from whichever thread asks.

use android_activity::AndroidApp;
use jni::objects::{JObject, JValue};
use jni::JNIEnv;

use ember_platform::caps::{Capabilities, CutoutLayout, CutoutQuery, SystemBars};
use ember_platform::geometry::{compute_safe_area, CutoutInsets, Rect};
use ember_platform::{PlatformError, Result};

use crate::jni_util::{
    check_exception, get_decor_view, get_display, get_window, jerr, with_activity,
};

// android.view.WindowManager.LayoutParams
const FLAG_FULLSCREEN: i32 = 0x0000_0400;
const LAYOUT_IN_DISPLAY_CUTOUT_MODE_SHORT_EDGES: i32 = 1;

// android.view.WindowInsetsController
const BEHAVIOR_SHOW_TRANSIENT_BARS_BY_SWIPE: i32 = 2;
// android.view.WindowInsets.Type.systemBars()
const INSETS_TYPE_SYSTEM_BARS: i32 = 7;

// android.view.View system-UI visibility flags (legacy immersive path)
const SYSTEM_UI_FLAG_HIDE_NAVIGATION: i32 = 0x0000_0002;
const SYSTEM_UI_FLAG_FULLSCREEN: i32 = 0x0000_0004;
const SYSTEM_UI_FLAG_LAYOUT_STABLE: i32 = 0x0000_0100;
const SYSTEM_UI_FLAG_LAYOUT_HIDE_NAVIGATION: i32 = 0x0000_0200;
const SYSTEM_UI_FLAG_LAYOUT_FULLSCREEN: i32 = 0x0000_0400;
const SYSTEM_UI_FLAG_IMMERSIVE_STICKY: i32 = 0x0000_1000;

/// Fullscreen, edge-to-edge, system bars hidden and reclaimable by swipe;
/// content extends into short-edge cutouts where the device supports it.
pub(crate) fn apply_immersive_mode(app: &AndroidApp, caps: &Capabilities) -> Result<()> {
    with_activity(app, |env, activity| {
        let window = get_window(env, activity)?;

        env.call_method(
            &window,
            "addFlags",
            "(I)V",
            &[JValue::Int(FLAG_FULLSCREEN)],
        )
        .map_err(jerr("Window.addFlags"))?;
        check_exception(env, "Window.addFlags")?;

        if caps.cutout_layout == CutoutLayout::ShortEdges {
            let attrs = env
                .call_method(
                    &window,
                    "getAttributes",
                    "()Landroid/view/WindowManager$LayoutParams;",
                    &[],
                )
                .map_err(jerr("Window.getAttributes"))?
                .l()
                .map_err(jerr("Window.getAttributes"))?;
            env.set_field(
                &attrs,
                "layoutInDisplayCutoutMode",
                "I",
                JValue::Int(LAYOUT_IN_DISPLAY_CUTOUT_MODE_SHORT_EDGES),
            )
            .map_err(jerr("LayoutParams.layoutInDisplayCutoutMode"))?;
            env.call_method(
                &window,
                "setAttributes",
                "(Landroid/view/WindowManager$LayoutParams;)V",
                &[(&attrs).into()],
            )
            .map_err(jerr("Window.setAttributes"))?;
            check_exception(env, "Window.setAttributes")?;
        }

        match caps.system_bars {
            SystemBars::InsetsController => {
                let controller = env
                    .call_method(
                        &window,
                        "getInsetsController",
                        "()Landroid/view/WindowInsetsController;",
                        &[],
                    )
                    .map_err(jerr("Window.getInsetsController"))?
                    .l()
                    .map_err(jerr("Window.getInsetsController"))?;
                check_exception(env, "Window.getInsetsController")?;
                if controller.is_null() {
                    return Err(PlatformError::Bridge(
                        "window has no insets controller".into(),
                    ));
                }
                env.call_method(
                    &controller,
                    "setSystemBarsBehavior",
                    "(I)V",
                    &[JValue::Int(BEHAVIOR_SHOW_TRANSIENT_BARS_BY_SWIPE)],
                )
                .map_err(jerr("WindowInsetsController.setSystemBarsBehavior"))?;
                env.call_method(
                    &controller,
                    "hide",
                    "(I)V",
                    &[JValue::Int(INSETS_TYPE_SYSTEM_BARS)],
                )
                .map_err(jerr("WindowInsetsController.hide"))?;
                check_exception(env, "WindowInsetsController.hide")?;
            }
            SystemBars::UiVisibilityFlags => {
                let decor = get_decor_view(env, &window)?;
                let flags = SYSTEM_UI_FLAG_LAYOUT_STABLE
                    | SYSTEM_UI_FLAG_LAYOUT_HIDE_NAVIGATION
                    | SYSTEM_UI_FLAG_LAYOUT_FULLSCREEN
                    | SYSTEM_UI_FLAG_HIDE_NAVIGATION
                    | SYSTEM_UI_FLAG_FULLSCREEN
                    | SYSTEM_UI_FLAG_IMMERSIVE_STICKY;
                env.call_method(&decor, "setSystemUiVisibility", "(I)V", &[JValue::Int(flags)])
                    .map_err(jerr("View.setSystemUiVisibility"))?;
                check_exception(env, "View.setSystemUiVisibility")?;
            }
        }
        Ok(())
    })
}

/// Drawable rectangle of the window, shrunk only on edges the display
/// cutout actually encroaches.
pub(crate) fn query_safe_area<'j>(
    env: &mut JNIEnv<'j>,
    activity: &JObject<'j>,
    caps: &Capabilities,
) -> Result<Rect> {
    let window = get_window(env, activity)?;
    let decor = get_decor_view(env, &window)?;
    let width = env
        .call_method(&decor, "getWidth", "()I", &[])
        .map_err(jerr("View.getWidth"))?
        .i()
        .map_err(jerr("View.getWidth"))?;
    let height = env
        .call_method(&decor, "getHeight", "()I", &[])
        .map_err(jerr("View.getHeight"))?
        .i()
        .map_err(jerr("View.getHeight"))?;
    check_exception(env, "View.getWidth/getHeight")?;

    if caps.cutout_query != CutoutQuery::PerEdgeInsets {
        return Ok(Rect::from_size(width, height));
    }

    // A missing display means no cutout information, not a failed query.
    let display = match get_display(env, activity, caps) {
        Ok(display) => display,
        Err(err) => {
            tracing::debug!("no display for cutout query: {err}");
            return Ok(Rect::from_size(width, height));
        }
    };
    let cutout = env
        .call_method(
            &display,
            "getCutout",
            "()Landroid/view/DisplayCutout;",
            &[],
        )
        .map_err(jerr("Display.getCutout"))?
        .l()
        .map_err(jerr("Display.getCutout"))?;
    check_exception(env, "Display.getCutout")?;
    if cutout.is_null() {
        return Ok(Rect::from_size(width, height));
    }

    let insets = CutoutInsets {
        left: cutout_inset(env, &cutout, "getSafeInsetLeft")?,
        top: cutout_inset(env, &cutout, "getSafeInsetTop")?,
        right: cutout_inset(env, &cutout, "getSafeInsetRight")?,
        bottom: cutout_inset(env, &cutout, "getSafeInsetBottom")?,
    };

    let frame = env
        .new_object("android/graphics/Rect", "()V", &[])
        .map_err(jerr("Rect::<init>"))?;
    env.call_method(
        &decor,
        "getWindowVisibleDisplayFrame",
        "(Landroid/graphics/Rect;)V",
        &[(&frame).into()],
    )
    .map_err(jerr("View.getWindowVisibleDisplayFrame"))?;
    check_exception(env, "View.getWindowVisibleDisplayFrame")?;

    let visible_frame = Rect {
        left: rect_field(env, &frame, "left")?,
        top: rect_field(env, &frame, "top")?,
        right: rect_field(env, &frame, "right")?,
        bottom: rect_field(env, &frame, "bottom")?,
    };

    Ok(compute_safe_area(width, height, visible_frame, Some(insets)))
}

fn cutout_inset<'j>(env: &mut JNIEnv<'j>, cutout: &JObject<'j>, getter: &'static str) -> Result<i32> {
    env.call_method(cutout, getter, "()I", &[])
        .map_err(jerr("DisplayCutout safe inset"))?
        .i()
        .map_err(jerr("DisplayCutout safe inset"))
}

fn rect_field<'j>(env: &mut JNIEnv<'j>, rect: &JObject<'j>, field: &'static str) -> Result<i32> {
    env.get_field(rect, field, "I")
        .map_err(jerr("Rect field"))?
        .i()
        .map_err(jerr("Rect field"))
}
