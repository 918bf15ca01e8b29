//! GLSL ES shader sources and compilation helpers.
//!
//! Both dialects implement the same contract: the vertex stage transforms
//! `pos` by `projMatrix * worldMatrix` and forwards `color`, and the fragment
//! stage writes the interpolated color unchanged.

use crate::backend::GlApi;
use crate::error::{GlError, ShaderStage};
use crate::types::Dialect;

/// Attribute slot bound to `pos` before linking.
pub const POSITION_ATTRIB: u32 = 0;
/// Attribute slot bound to `color` before linking.
pub const COLOR_ATTRIB: u32 = 1;

/// Name of the world matrix uniform.
pub const WORLD_MATRIX_UNIFORM: &str = "worldMatrix";
/// Name of the projection matrix uniform.
pub const PROJ_MATRIX_UNIFORM: &str = "projMatrix";

/// Dialect-specific spellings.
struct Keywords {
    version: &'static str,
    attribute: &'static str,
    varying_out: &'static str,
    varying_in: &'static str,
}

impl Keywords {
    fn of(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Legacy => Self {
                version: "",
                attribute: "attribute",
                varying_out: "varying",
                varying_in: "varying",
            },
            Dialect::Modern => Self {
                version: "#version 300 es",
                attribute: "in",
                varying_out: "out",
                varying_in: "in",
            },
        }
    }
}

/// Vertex shader source.
///
/// # Uniforms
///
/// | Name          | Type   | Description                  |
/// |---------------|--------|------------------------------|
/// | `worldMatrix` | `mat4` | Object rotation and offset   |
/// | `projMatrix`  | `mat4` | Depth-range corrected identity |
#[must_use]
pub fn vertex_source(dialect: Dialect) -> String {
    let Keywords {
        version,
        attribute,
        varying_out,
        ..
    } = Keywords::of(dialect);
    format!(
        "{version}
{attribute} highp vec3 pos;
{attribute} lowp vec4 color;

{varying_out} lowp vec4 ocolor;

uniform highp mat4 worldMatrix;
uniform highp mat4 projMatrix;

void main()
{{
    gl_Position = (projMatrix * worldMatrix) * vec4(pos, 1);
    ocolor = color;
}}
"
    )
}

/// Fragment shader source. Writes the interpolated vertex color.
#[must_use]
pub fn fragment_source(dialect: Dialect) -> String {
    let Keywords {
        version, varying_in, ..
    } = Keywords::of(dialect);
    let (output_decl, output) = match dialect {
        Dialect::Legacy => ("", "gl_FragColor"),
        Dialect::Modern => ("out lowp vec4 fragColor;", "fragColor"),
    };
    format!(
        "{version}
{output_decl}
{varying_in} lowp vec4 ocolor;

void main()
{{
    {output} = ocolor;
}}
"
    )
}

/// Everything produced by [`compile_program`].
///
/// Handles are kept even when compilation or linking failed; drawing with a
/// program that did not link is a no-op in a conformant driver.
#[derive(Debug)]
pub struct ProgramObjects<G: GlApi> {
    /// The vertex stage.
    pub vertex: G::Shader,
    /// The fragment stage.
    pub fragment: G::Shader,
    /// The linked (or failed) program.
    pub program: G::Program,
    /// Location of `worldMatrix`, if the driver reported one.
    pub world_matrix: Option<G::UniformLocation>,
    /// Location of `projMatrix`, if the driver reported one.
    pub proj_matrix: Option<G::UniformLocation>,
    /// Compile and link failures, in the order they were observed.
    pub diagnostics: Vec<GlError>,
}

impl<G: GlApi> ProgramObjects<G> {
    /// Delete the program and both stages.
    ///
    /// # Safety
    ///
    /// Requires the context the objects were created in to be current.
    pub unsafe fn delete(&self, gl: &G) {
        unsafe {
            gl.delete_program(self.program);
            gl.delete_shader(self.vertex);
            gl.delete_shader(self.fragment);
        }
    }
}

/// Compile both stages, bind the fixed attribute slots, link, and resolve
/// the two matrix uniforms.
///
/// Compile and link failures are collected into
/// [`ProgramObjects::diagnostics`] rather than aborting.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns [`GlError::ObjectCreation`] if the driver cannot create a shader
/// or program object at all. Anything created before the failure is deleted.
pub unsafe fn compile_program<G: GlApi>(
    gl: &G,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<ProgramObjects<G>, GlError> {
    let mut diagnostics = Vec::new();

    let vertex = unsafe { compile_shader(gl, ShaderStage::Vertex, vertex_src) }?;
    let fragment = match unsafe { compile_shader(gl, ShaderStage::Fragment, fragment_src) } {
        Ok(shader) => shader,
        Err(e) => {
            unsafe { gl.delete_shader(vertex) };
            return Err(e);
        }
    };

    for (stage, shader) in [(ShaderStage::Vertex, vertex), (ShaderStage::Fragment, fragment)] {
        if !unsafe { gl.get_shader_compile_status(shader) } {
            let log = unsafe { gl.get_shader_info_log(shader) };
            diagnostics.push(GlError::ShaderCompile { stage, log });
        }
    }

    let program = match unsafe { gl.create_program() } {
        Ok(program) => program,
        Err(reason) => {
            unsafe {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
            }
            return Err(GlError::creation("program", reason));
        }
    };

    unsafe {
        gl.bind_attrib_location(program, POSITION_ATTRIB, "pos");
        gl.bind_attrib_location(program, COLOR_ATTRIB, "color");
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            diagnostics.push(GlError::ProgramLink { log });
        }
    }

    let world_matrix = unsafe { gl.get_uniform_location(program, WORLD_MATRIX_UNIFORM) };
    let proj_matrix = unsafe { gl.get_uniform_location(program, PROJ_MATRIX_UNIFORM) };

    Ok(ProgramObjects {
        vertex,
        fragment,
        program,
        world_matrix,
        proj_matrix,
        diagnostics,
    })
}

/// Create a shader object and compile `source` into it.
///
/// The compile status is left for the caller to inspect.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader<G: GlApi>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, GlError> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_kind())
            .map_err(|reason| GlError::creation("shader", reason))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        Ok(shader)
    }
}
