//! C entry points called by the host.
//!
//! The host owns the GL context and calls in from its render thread for
//! device and render events, and possibly from another thread for the
//! setters. All entry points share one [`Plugin`] behind a mutex, return
//! nothing, and never let a panic unwind into the host.

#![allow(non_snake_case)]

use std::ffi::{c_char, c_int, c_void, CString};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::PluginConfig;
use crate::error::GlError;
use crate::logging;
use crate::plugin::Plugin;
use crate::types::{DeviceEvent, DeviceKind};

/// Resolves a GL entry point by name, like `eglGetProcAddress`.
pub type GlLoader = unsafe extern "C" fn(name: *const c_char) -> *const c_void;

struct Host {
    plugin: Plugin<glow::Context>,
    loader: Option<GlLoader>,
}

// SAFETY: `Host` is only reachable through `HOST`'s mutex. The GL objects it
// holds are only used from device and render events, which the host issues
// on the thread that owns the context.
unsafe impl Send for Host {}

impl Host {
    fn new() -> Self {
        let config = PluginConfig::default();
        if logging::init_logging(&config) {
            log::info!("plugin loaded");
        }
        Self {
            plugin: Plugin::new(config),
            loader: None,
        }
    }
}

static HOST: Mutex<Option<Host>> = parking_lot::const_mutex(None);

/// Run `f` against the shared plugin, swallowing any panic.
fn with_host(entry: &str, f: impl FnOnce(&mut Host)) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut guard = HOST.lock();
        f(guard.get_or_insert_with(Host::new));
    }));
    if result.is_err() {
        log::error!("panic in {entry}; call ignored");
    }
}

/// Build a glow context over the host's current GL context.
///
/// # Safety
///
/// The host's context must be current.
unsafe fn load_context(loader: Option<GlLoader>) -> Result<glow::Context, GlError> {
    match loader {
        Some(loader) => Ok(unsafe {
            glow::Context::from_loader_function(|name| {
                CString::new(name).map_or(ptr::null(), |name| loader(name.as_ptr()))
            })
        }),
        None => unsafe { load_context_from_process() },
    }
}

/// Resolve GL symbols from libraries already loaded into the process.
#[cfg(unix)]
unsafe fn load_context_from_process() -> Result<glow::Context, GlError> {
    Ok(unsafe {
        glow::Context::from_loader_function(|name| {
            CString::new(name).map_or(ptr::null(), |name| {
                libc::dlsym(libc::RTLD_DEFAULT, name.as_ptr()).cast_const()
            })
        })
    })
}

#[cfg(not(unix))]
unsafe fn load_context_from_process() -> Result<glow::Context, GlError> {
    Err(GlError::MissingLoader)
}

/// Set the time, in seconds, that drives the animation.
#[no_mangle]
pub extern "C" fn SetTimeFromUnity(t: f32) {
    with_host("SetTimeFromUnity", |host| host.plugin.set_time(t));
}

/// Register the host texture to refresh each frame. A null `texture`
/// disables texture updates.
///
/// `texture` is the GL texture name cast to a pointer; it is never
/// dereferenced.
#[no_mangle]
pub extern "C" fn SetTextureFromUnity(texture: *mut c_void, w: c_int, h: c_int) {
    with_host("SetTextureFromUnity", |host| {
        host.plugin.set_texture(texture.addr(), w, h);
    });
}

/// Register the function used to resolve GL entry points. Pass null to fall
/// back to resolving symbols from the process.
///
/// Takes effect on the next device initialization.
#[no_mangle]
pub extern "C" fn SetGlLoaderFromUnity(loader: Option<GlLoader>) {
    with_host("SetGlLoaderFromUnity", |host| host.loader = loader);
}

/// Device lifecycle notification.
///
/// # Safety
///
/// Must be called on the thread where the host's GL context is current.
#[no_mangle]
pub unsafe extern "C" fn UnitySetGraphicsDevice(
    device: *mut c_void,
    device_type: c_int,
    event_type: c_int,
) {
    let kind = DeviceKind::from_raw(device_type);
    let event = DeviceEvent::from_raw(event_type);

    with_host("UnitySetGraphicsDevice", |host| {
        log::debug!("device event {event:?} for {kind:?} (device {device:p})");

        if event.rebuilds_session() && kind.dialect().is_some() {
            match unsafe { load_context(host.loader) } {
                Ok(gl) => host.plugin.attach_context(Arc::new(gl)),
                Err(e) => log::error!("{e}"),
            }
        }

        unsafe { host.plugin.on_graphics_device_event(kind, event) };
    });
}

/// Per-frame render notification. `event_id` is currently ignored.
///
/// # Safety
///
/// Must be called on the thread where the host's GL context is current.
#[no_mangle]
pub unsafe extern "C" fn UnityRenderEvent(event_id: c_int) {
    with_host("UnityRenderEvent", |host| unsafe {
        host.plugin.on_render_event(event_id);
    });
}
