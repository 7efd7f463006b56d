//! Ember Android Platform
//!
//! Native-activity integration and JNI bridge: implements the Ember
//! [`Environment`](ember_platform::Environment) contract against the hosting
//! Android activity.

pub mod activity;
pub mod logging;

#[cfg(target_os = "android")]
mod jni_util;
#[cfg(target_os = "android")]
mod window;

pub use activity::AndroidEnvironment;
#[cfg(target_os = "android")]
pub use activity::WakeProxy;
