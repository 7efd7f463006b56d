//! Logging initialization.
//!
//! On Android, log output lands in logcat: `android_logger` backs the `log`
//! crate and a `tracing-android` layer backs `tracing`. Off-device builds
//! fall back to a plain formatting subscriber so host tests still get
//! output.

/// Initializes logging under the given logcat tag. Idempotent.
#[cfg(target_os = "android")]
pub fn init(tag: &'static str) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag(tag),
    );

    use tracing_subscriber::layer::SubscriberExt;
    match tracing_android::layer(tag) {
        Ok(layer) => {
            let subscriber = tracing_subscriber::registry().with(layer);
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
        Err(err) => log::warn!("tracing-android layer unavailable: {err}"),
    }
}

/// Host fallback: formatting subscriber honoring `RUST_LOG`. Idempotent.
#[cfg(not(target_os = "android"))]
pub fn init(_tag: &'static str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
