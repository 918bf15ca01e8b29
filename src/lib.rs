//! A low-level OpenGL ES rendering plugin, driven by a host through plain C
//! entry points.
//!
//! The host tells the plugin when its graphics device comes and goes, hands
//! it a time value and a texture it owns, and fires a render event once per
//! frame. On each render event the plugin draws a spinning colored triangle
//! into whatever framebuffer the host has bound and overwrites the host's
//! texture with an animated "plasma" image.
//!
//! # Contract
//!
//! - **One session per device event.** Every device notification releases
//!   the previous set of GL objects and, for OpenGL ES 2.0 and 3.0 devices,
//!   compiles a fresh program with the matching GLSL ES dialect. Other APIs
//!   leave the plugin idle.
//! - **Unknown incoming state.** Each frame forces the culling, blending and
//!   depth state it relies on and unbinds whatever buffers the host left
//!   bound.
//! - **Borrowed resources.** The host texture is only ever written with
//!   `glTexSubImage2D`; it is never created, resized or deleted here.
//! - **Nothing crosses the boundary.** Entry points return nothing, log
//!   failures, and catch panics.
//!
//! The C layer lives in [`ffi`]. [`Plugin`] is the same machinery as a
//! plain value, generic over the [`GlApi`] backend, for embedding and tests.
//!
//! # Safety
//!
//! Anything that issues GL calls is `unsafe`: the host's context must be
//! current on the calling thread.

mod backend;
mod config;
mod device;
mod error;
pub mod ffi;
mod logging;
mod plasma;
mod plugin;
mod render;
mod shaders;
mod state;
mod types;

pub use backend::GlApi;
pub use config::PluginConfig;
pub use device::{DeviceManager, DeviceSession, DeviceState};
pub use error::{GlError, ShaderStage};
pub use logging::init_logging;
pub use plasma::{synthesize, synthesize_with_speed};
pub use plugin::Plugin;
pub use render::{projection_matrix, world_matrix, Matrix};
pub use shaders::{compile_program, fragment_source, vertex_source, ProgramObjects};
pub use state::{FrameState, TextureTarget};
pub use types::{DeviceEvent, DeviceKind, Dialect, Vertex, TRIANGLE};
