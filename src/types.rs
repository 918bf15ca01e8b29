//! Plain data shared across the plugin: the triangle mesh and the host's
//! device and event tags.

use bytemuck::{Pod, Zeroable};

/// A vertex of the triangle mesh, laid out the way the attribute pointers
/// read it: three position floats followed by four color bytes.
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Packed color, one byte per channel in memory order.
    pub color: u32,
}

/// Byte distance between consecutive vertices.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const VERTEX_STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

/// Byte offset of [`Vertex::color`].
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const COLOR_OFFSET: i32 = std::mem::size_of::<[f32; 3]>() as i32;

/// The colored triangle drawn every frame.
///
/// Color bytes come out in a different channel order than on D3D hosts, so
/// the same table shows different colors there.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex {
        position: [-0.5, -0.25, 0.0],
        color: 0xFFff_0000,
    },
    Vertex {
        position: [0.5, -0.25, 0.0],
        color: 0xFF00_ff00,
    },
    Vertex {
        position: [0.0, 0.5, 0.0],
        color: 0xFF00_00ff,
    },
];

/// Host renderer code for OpenGL ES 2.0.
pub const RENDERER_GLES20: i32 = 8;
/// Host renderer code for OpenGL ES 3.0.
pub const RENDERER_GLES30: i32 = 11;

/// Which graphics API the host is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    /// Anything the plugin does not know how to drive. Carries the raw code.
    Unrecognized(i32),
    /// OpenGL ES 2.0.
    Gles20,
    /// OpenGL ES 3.0.
    Gles30,
}

impl DeviceKind {
    /// Decode the host's renderer code.
    #[must_use]
    pub fn from_raw(code: i32) -> Self {
        match code {
            RENDERER_GLES20 => Self::Gles20,
            RENDERER_GLES30 => Self::Gles30,
            other => Self::Unrecognized(other),
        }
    }

    /// The shader dialect for this device, or `None` if unsupported.
    #[must_use]
    pub fn dialect(self) -> Option<Dialect> {
        match self {
            Self::Gles20 => Some(Dialect::Legacy),
            Self::Gles30 => Some(Dialect::Modern),
            Self::Unrecognized(_) => None,
        }
    }
}

/// GLSL ES flavor used for the shader sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// GLSL ES 1.00: `attribute`/`varying`, writes `gl_FragColor`.
    Legacy,
    /// GLSL ES 3.00: `in`/`out`, declares its own color output.
    Modern,
}

/// Device lifecycle notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// A device was created and its context is current.
    Initialize,
    /// The device is going away.
    Shutdown,
    /// The device is about to be reset; GL objects will not survive.
    BeforeReset,
    /// The device was reset and is usable again.
    AfterReset,
    /// A code this plugin does not know.
    Other(i32),
}

impl DeviceEvent {
    /// Decode the host's event code.
    #[must_use]
    pub fn from_raw(code: i32) -> Self {
        match code {
            0 => Self::Initialize,
            1 => Self::Shutdown,
            2 => Self::BeforeReset,
            3 => Self::AfterReset,
            other => Self::Other(other),
        }
    }

    /// Whether this event leaves a usable context behind, so the session
    /// should be rebuilt.
    #[must_use]
    pub fn rebuilds_session(self) -> bool {
        !matches!(self, Self::Shutdown | Self::BeforeReset)
    }
}
