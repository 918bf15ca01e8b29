//! The plugin as a context object: device lifecycle, shared frame state, and
//! configuration in one value that the C entry points (or a test) drive.

use std::sync::Arc;

use crate::backend::GlApi;
use crate::config::PluginConfig;
use crate::device::{DeviceManager, DeviceState};
use crate::render;
use crate::state::FrameState;
use crate::types::{DeviceEvent, DeviceKind};

/// One independent instance of the rendering plugin.
///
/// Dropping a plugin with a live session deletes its GL objects, which needs
/// the host's context to be current. Where that cannot be arranged at drop
/// time, call [`Plugin::destroy`] while it is.
///
/// # Example
///
/// ```no_run
/// # use gles_render_plugin::{DeviceEvent, DeviceKind, Plugin, PluginConfig};
/// # use std::sync::Arc;
/// # fn example(gl: Arc<glow::Context>) {
/// let mut plugin = Plugin::new(PluginConfig::default());
/// plugin.attach_context(gl);
/// // With the host's context current:
/// unsafe { plugin.on_graphics_device_event(DeviceKind::Gles30, DeviceEvent::Initialize) };
///
/// // Each frame:
/// plugin.set_time(1.5);
/// unsafe { plugin.on_render_event(0) };
/// # }
/// ```
pub struct Plugin<G: GlApi> {
    config: PluginConfig,
    frame: FrameState,
    device: DeviceManager<G>,
}

impl<G: GlApi> Plugin<G> {
    /// A plugin with no context, no session and an empty frame state.
    #[must_use]
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            frame: FrameState::default(),
            device: DeviceManager::new(),
        }
    }

    /// The configuration this plugin was created with.
    #[must_use]
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Provide the GL context used for sessions built from now on.
    pub fn attach_context(&mut self, gl: Arc<G>) {
        self.device.attach_context(gl);
    }

    /// Whether a GL context has been attached.
    #[must_use]
    pub fn has_context(&self) -> bool {
        self.device.has_context()
    }

    /// Current device state.
    #[must_use]
    pub fn device_state(&self) -> DeviceState {
        self.device.state()
    }

    /// The shared frame inputs.
    #[must_use]
    pub fn frame_state(&self) -> &FrameState {
        &self.frame
    }

    /// Set the time driving the rotation and plasma animation.
    pub fn set_time(&mut self, time: f32) {
        self.frame.set_time(time);
    }

    /// Register (or, with a zero handle, clear) the host texture to refresh.
    pub fn set_texture(&mut self, handle: usize, width: i32, height: i32) {
        self.frame.set_texture(handle, width, height);
    }

    /// Handle a device lifecycle notification.
    ///
    /// # Safety
    ///
    /// The host's GL context must be current.
    pub unsafe fn on_graphics_device_event(&mut self, kind: DeviceKind, event: DeviceEvent) {
        unsafe { self.device.on_device_event(kind, event) };
    }

    /// Draw a frame. `event_id` is accepted for future dispatch and ignored.
    ///
    /// # Safety
    ///
    /// The host's GL context must be current, and a registered texture must
    /// match the dimensions it was registered with.
    pub unsafe fn on_render_event(&mut self, event_id: i32) {
        log::trace!("render event {event_id}");
        unsafe {
            render::render_frame(
                self.device.session(),
                &self.frame,
                self.config.animation_speed,
            );
        }
    }

    /// Delete every GL object the plugin owns and consume it.
    ///
    /// # Safety
    ///
    /// The host's GL context must be current.
    pub unsafe fn destroy(self) {
        unsafe { self.device.destroy() };
    }
}
