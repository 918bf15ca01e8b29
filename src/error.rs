//! Error type for GL object creation and shader compilation.

use std::fmt;

/// A shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// The vertex stage.
    Vertex,
    /// The fragment stage.
    Fragment,
}

impl ShaderStage {
    /// The GL enum for this stage, as passed to `glCreateShader`.
    #[must_use]
    pub fn gl_kind(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failures reported while talking to the GL driver.
///
/// None of these ever cross the C boundary; they are logged and the plugin
/// falls back to a no-op or best-effort state.
#[derive(Debug, thiserror::Error)]
pub enum GlError {
    /// The driver refused to hand out a new object name, which usually means
    /// the context is gone.
    #[error("failed to create GL {what}: {reason}")]
    ObjectCreation {
        /// Which kind of object was being created.
        what: &'static str,
        /// Driver-provided reason.
        reason: String,
    },

    /// A shader stage failed to compile.
    #[error("{stage} shader compile error: {log}")]
    ShaderCompile {
        /// The stage that failed.
        stage: ShaderStage,
        /// The driver's info log.
        log: String,
    },

    /// The program failed to link.
    #[error("program link error: {log}")]
    ProgramLink {
        /// The driver's info log.
        log: String,
    },

    /// No way to resolve GL entry points was available.
    #[error("no GL entry point loader is available")]
    MissingLoader,
}

impl GlError {
    pub(crate) fn creation(what: &'static str, reason: String) -> Self {
        Self::ObjectCreation { what, reason }
    }
}
