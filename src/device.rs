//! Device lifecycle: which API the host is running and the GL objects built
//! for it.

use std::sync::Arc;

use crate::backend::GlApi;
use crate::error::GlError;
use crate::shaders::{self, ProgramObjects};
use crate::types::{DeviceEvent, DeviceKind, Dialect, TRIANGLE};

/// Whether the plugin currently has something to draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// No session; frame events are ignored.
    Uninitialized,
    /// A session exists for this device kind.
    Recognized(DeviceKind),
}

/// GL objects valid for one graphics-context epoch.
///
/// Every object is deleted when the session is dropped, so the context it was
/// built in must still be current at that point.
pub struct DeviceSession<G: GlApi> {
    gl: Arc<G>,
    kind: DeviceKind,
    pub(crate) objects: ProgramObjects<G>,
    /// Static buffer holding [`TRIANGLE`].
    pub(crate) vertex_buffer: G::Buffer,
}

impl<G: GlApi> DeviceSession<G> {
    /// Compile the program for `dialect` and upload the triangle mesh.
    ///
    /// Shader diagnostics are logged and otherwise ignored.
    ///
    /// # Safety
    ///
    /// `gl` must be current.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot create a shader, program, or
    /// buffer object.
    pub unsafe fn create(gl: Arc<G>, kind: DeviceKind, dialect: Dialect) -> Result<Self, GlError> {
        let objects = unsafe {
            shaders::compile_program(
                &*gl,
                &shaders::vertex_source(dialect),
                &shaders::fragment_source(dialect),
            )
        }?;
        for diagnostic in &objects.diagnostics {
            log::warn!("{diagnostic}");
        }

        let vertex_buffer = match unsafe { gl.create_buffer() } {
            Ok(buffer) => buffer,
            Err(reason) => {
                unsafe { objects.delete(&gl) };
                return Err(GlError::creation("vertex buffer", reason));
            }
        };
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&TRIANGLE),
                glow::STATIC_DRAW,
            );
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }

        Ok(Self {
            gl,
            kind,
            objects,
            vertex_buffer,
        })
    }

    /// The device kind this session was built for.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// The context the session's objects live in.
    #[must_use]
    pub fn gl(&self) -> &G {
        &self.gl
    }

    /// The linked program.
    #[must_use]
    pub fn program(&self) -> G::Program {
        self.objects.program
    }

    /// Compile and link problems seen while building this session.
    #[must_use]
    pub fn diagnostics(&self) -> &[GlError] {
        &self.objects.diagnostics
    }
}

impl<G: GlApi> Drop for DeviceSession<G> {
    fn drop(&mut self) {
        log::debug!("releasing {:?} session", self.kind);
        // Not enforced here: owners document that the context must be current
        // when they drop, and offer `release`/`destroy` as `unsafe` calls.
        unsafe {
            self.objects.delete(&self.gl);
            self.gl.delete_buffer(self.vertex_buffer);
        }
    }
}

/// Tracks the host device and owns the current [`DeviceSession`].
///
/// Dropping a manager that still holds a session deletes its GL objects, so
/// either drop it with the context current or call [`DeviceManager::destroy`]
/// at a point where it is.
pub struct DeviceManager<G: GlApi> {
    gl: Option<Arc<G>>,
    session: Option<DeviceSession<G>>,
}

impl<G: GlApi> Default for DeviceManager<G> {
    fn default() -> Self {
        Self {
            gl: None,
            session: None,
        }
    }
}

impl<G: GlApi> DeviceManager<G> {
    /// A manager with no context and no session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the context used for sessions built from now on.
    pub fn attach_context(&mut self, gl: Arc<G>) {
        self.gl = Some(gl);
    }

    /// Whether a context has been attached.
    #[must_use]
    pub fn has_context(&self) -> bool {
        self.gl.is_some()
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        match &self.session {
            Some(session) => DeviceState::Recognized(session.kind()),
            None => DeviceState::Uninitialized,
        }
    }

    /// The current session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DeviceSession<G>> {
        self.session.as_ref()
    }

    /// React to a device notification.
    ///
    /// The previous session is always released first. A new one is built
    /// only when the event leaves a usable context and `kind` is a supported
    /// API; otherwise the manager stays uninitialized until the next
    /// notification.
    ///
    /// # Safety
    ///
    /// The context of the previous session (if any) and the attached context
    /// must be current.
    pub unsafe fn on_device_event(&mut self, kind: DeviceKind, event: DeviceEvent) {
        self.release();

        if !event.rebuilds_session() {
            log::info!("{event:?} for {kind:?}: session released");
            return;
        }

        let Some(dialect) = kind.dialect() else {
            log::info!("unsupported graphics device {kind:?}; rendering disabled");
            return;
        };

        let Some(gl) = self.gl.clone() else {
            log::error!("{kind:?} device reported but no GL context is attached");
            return;
        };

        match unsafe { DeviceSession::create(gl, kind, dialect) } {
            Ok(session) => {
                log::info!("{kind:?} device ready ({event:?})");
                self.session = Some(session);
            }
            Err(e) => log::error!("failed to build {kind:?} session: {e}"),
        }
    }

    /// Drop the current session, deleting its GL objects.
    ///
    /// # Safety
    ///
    /// The session's context must be current.
    pub unsafe fn release(&mut self) {
        self.session = None;
    }

    /// Release the session and consume the manager.
    ///
    /// # Safety
    ///
    /// The session's context must be current.
    pub unsafe fn destroy(mut self) {
        unsafe { self.release() };
    }
}
