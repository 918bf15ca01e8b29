//! The per-frame draw: reset GL state the host may have left behind, draw the
//! spinning triangle, and refresh the host texture with a fresh plasma frame.

use crate::backend::GlApi;
use crate::device::DeviceSession;
use crate::plasma;
use crate::shaders::{COLOR_ATTRIB, POSITION_ATTRIB};
use crate::state::{FrameState, TextureTarget};
use crate::types::{DeviceKind, COLOR_OFFSET, VERTEX_STRIDE};

/// A 4×4 matrix in the column-major order GL expects.
pub type Matrix = [f32; 16];

/// The identity matrix, used as the view transform.
#[rustfmt::skip]
pub const IDENTITY: Matrix = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// Offset baked into the world matrix.
const WORLD_Z: f32 = 0.7;

/// Rotation about the Z axis by `time` radians, pushed back along Z.
#[must_use]
pub fn world_matrix(time: f32) -> Matrix {
    let (sin, cos) = time.sin_cos();
    #[rustfmt::skip]
    let m = [
        cos, -sin, 0.0, 0.0,
        sin,  cos, 0.0, 0.0,
        0.0,  0.0, 1.0, 0.0,
        0.0,  0.0, WORLD_Z, 1.0,
    ];
    m
}

/// Identity projection patched so GL's `[-1, 1]` clip depth matches what an
/// identity projection produces on a `[0, 1]` depth API.
#[must_use]
pub fn projection_matrix() -> Matrix {
    let mut m = IDENTITY;
    m[10] = 2.0;
    m[14] = -1.0;
    m
}

/// Draw one frame.
///
/// Does nothing at all when `session` is `None`. The triangle is always
/// drawn when a session exists; the texture is refreshed only when the frame
/// state names a target.
///
/// # Safety
///
/// The session's context must be current, and the target texture (if any)
/// must really be `width × height` RGBA.
pub unsafe fn render_frame<G: GlApi>(
    session: Option<&DeviceSession<G>>,
    frame: &FrameState,
    animation_speed: f32,
) {
    let Some(session) = session else {
        return;
    };

    let world = world_matrix(frame.time());
    let projection = projection_matrix();

    unsafe {
        set_default_graphics_state(session.gl());
        draw_triangle(session, &world, &projection);
        if let Some(target) = frame.target() {
            update_texture(session.gl(), target, frame.time() * animation_speed);
        }
    }
}

/// Force the state the draw depends on, since the host may leave anything
/// bound or enabled: no culling, no blending, depth test with `LEQUAL`, no
/// depth writes.
unsafe fn set_default_graphics_state<G: GlApi>(gl: &G) {
    unsafe {
        gl.disable(glow::CULL_FACE);
        gl.disable(glow::BLEND);
        gl.depth_func(glow::LEQUAL);
        gl.enable(glow::DEPTH_TEST);
        gl.depth_mask(false);
    }
}

unsafe fn draw_triangle<G: GlApi>(session: &DeviceSession<G>, world: &Matrix, projection: &Matrix) {
    let gl = session.gl();
    let objects = &session.objects;

    unsafe {
        gl.use_program(Some(objects.program));
        gl.uniform_matrix_4_f32_slice(objects.world_matrix.as_ref(), false, world);
        gl.uniform_matrix_4_f32_slice(objects.proj_matrix.as_ref(), false, projection);

        // Vertex array objects only exist from ES 3.0 on.
        if session.kind() == DeviceKind::Gles30 {
            gl.unbind_vertex_array();
        }
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(session.vertex_buffer));

        gl.enable_vertex_attrib_array(POSITION_ATTRIB);
        gl.vertex_attrib_pointer_f32(POSITION_ATTRIB, 3, glow::FLOAT, false, VERTEX_STRIDE, 0);
        gl.enable_vertex_attrib_array(COLOR_ATTRIB);
        gl.vertex_attrib_pointer_f32(
            COLOR_ATTRIB,
            4,
            glow::UNSIGNED_BYTE,
            true,
            VERTEX_STRIDE,
            COLOR_OFFSET,
        );

        gl.draw_arrays(glow::TRIANGLES, 0, 3);

        gl.bind_buffer(glow::ARRAY_BUFFER, None);
    }
}

/// Overwrite the whole host texture with a plasma frame at phase `t`.
///
/// Only the contents change; the texture's storage is never reallocated.
unsafe fn update_texture<G: GlApi>(gl: &G, target: TextureTarget, t: f32) {
    let Some(texture) = gl.texture_from_name(target.name) else {
        return;
    };
    let (Ok(width), Ok(height)) = (i32::try_from(target.width), i32::try_from(target.height))
    else {
        log::warn!(
            "texture {}x{} exceeds GL limits; skipping update",
            target.width,
            target.height
        );
        return;
    };

    let (Some(row_stride), Some(len)) = (target.row_stride(), target.byte_len()) else {
        log::warn!(
            "texture {}x{} does not fit in memory; skipping update",
            target.width,
            target.height
        );
        return;
    };

    let width_px = target.width as usize;
    let height_px = target.height as usize;
    let mut pixels = vec![0u8; len];
    plasma::fill(&mut pixels, width_px, height_px, row_stride, t);

    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_sub_image_2d(
            glow::TEXTURE_2D,
            0,
            0,
            0,
            width,
            height,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            &pixels,
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::recording::{Call, RecordingGl};
    use crate::types::Dialect;

    fn assert_matrix_eq(actual: &Matrix, expected: &Matrix) {
        assert!(
            actual
                .iter()
                .zip(expected)
                .all(|(a, e)| (a - e).abs() < 1e-6),
            "expected {expected:?}, got {actual:?}",
        );
    }

    fn session(kind: DeviceKind, dialect: Dialect) -> (Arc<RecordingGl>, DeviceSession<RecordingGl>) {
        let gl = Arc::new(RecordingGl::new());
        let session = unsafe { DeviceSession::create(Arc::clone(&gl), kind, dialect) }.unwrap();
        gl.clear();
        (gl, session)
    }

    #[test]
    fn world_matrix_at_time_zero() {
        #[rustfmt::skip]
        let expected = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.7, 1.0,
        ];
        assert_matrix_eq(&world_matrix(0.0), &expected);
    }

    #[test]
    fn world_matrix_quarter_turn() {
        let m = world_matrix(std::f32::consts::FRAC_PI_2);
        assert!((m[0]).abs() < 1e-6);
        assert!((m[1] + 1.0).abs() < 1e-6);
        assert!((m[4] - 1.0).abs() < 1e-6);
        assert!((m[5]).abs() < 1e-6);
        assert!((m[14] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn projection_patches_depth_range() {
        #[rustfmt::skip]
        let expected = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 2.0, 0.0,
            0.0, 0.0, -1.0, 1.0,
        ];
        assert_matrix_eq(&projection_matrix(), &expected);
    }

    #[test]
    fn no_session_is_a_no_op() {
        let mut frame = FrameState::default();
        frame.set_texture(5, 4, 4);
        // Nothing to record into; this only has to return quietly.
        unsafe { render_frame::<RecordingGl>(None, &frame, plasma::DEFAULT_SPEED) };
    }

    #[test]
    fn frame_sets_baseline_state_before_drawing() {
        let (gl, session) = session(DeviceKind::Gles20, Dialect::Legacy);
        unsafe { render_frame(Some(&session), &FrameState::default(), plasma::DEFAULT_SPEED) };

        let calls = gl.calls();
        assert_eq!(
            &calls[..5],
            &[
                Call::Disable(glow::CULL_FACE),
                Call::Disable(glow::BLEND),
                Call::DepthFunc(glow::LEQUAL),
                Call::Enable(glow::DEPTH_TEST),
                Call::DepthMask(false),
            ]
        );
        assert_eq!(
            calls.iter().filter(|c| matches!(c, Call::DrawArrays { .. })).last(),
            Some(&Call::DrawArrays {
                mode: glow::TRIANGLES,
                first: 0,
                count: 3
            })
        );
    }

    #[test]
    fn uniforms_and_attributes_are_configured() {
        let (gl, session) = session(DeviceKind::Gles20, Dialect::Legacy);
        let mut frame = FrameState::default();
        frame.set_time(0.0);
        unsafe { render_frame(Some(&session), &frame, plasma::DEFAULT_SPEED) };

        let calls = gl.calls();
        assert!(calls.contains(&Call::UseProgram(Some(session.program()))));
        let matrices: Vec<_> = calls
            .iter()
            .filter_map(|c| match c {
                Call::UniformMatrix4 {
                    location,
                    transpose,
                    values,
                } => Some((*location, *transpose, values.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(matrices.len(), 2);
        assert_eq!(matrices[0].0, session.objects.world_matrix);
        assert_eq!(matrices[1].0, session.objects.proj_matrix);
        assert!(matrices.iter().all(|(_, transpose, _)| !transpose));
        assert_matrix_eq(matrices[0].2.as_slice().try_into().unwrap(), &world_matrix(0.0));
        assert_matrix_eq(matrices[1].2.as_slice().try_into().unwrap(), &projection_matrix());

        assert!(calls.contains(&Call::BindBuffer {
            target: glow::ELEMENT_ARRAY_BUFFER,
            buffer: None
        }));
        assert!(calls.contains(&Call::VertexAttribPointer {
            index: POSITION_ATTRIB,
            size: 3,
            data_type: glow::FLOAT,
            normalized: false,
            stride: 16,
            offset: 0,
        }));
        assert!(calls.contains(&Call::VertexAttribPointer {
            index: COLOR_ATTRIB,
            size: 4,
            data_type: glow::UNSIGNED_BYTE,
            normalized: true,
            stride: 16,
            offset: 12,
        }));
        assert_eq!(
            calls.last(),
            Some(&Call::BindBuffer {
                target: glow::ARRAY_BUFFER,
                buffer: None
            })
        );
        assert_eq!(gl.count(|c| *c == Call::UnbindVertexArray), 0);
    }

    #[test]
    fn gles3_unbinds_host_vertex_array() {
        let (gl, session) = session(DeviceKind::Gles30, Dialect::Modern);
        unsafe { render_frame(Some(&session), &FrameState::default(), plasma::DEFAULT_SPEED) };
        assert_eq!(gl.count(|c| *c == Call::UnbindVertexArray), 1);
    }

    #[test]
    fn no_texture_target_skips_update_but_still_draws() {
        let (gl, session) = session(DeviceKind::Gles20, Dialect::Legacy);
        let mut frame = FrameState::default();
        frame.set_texture(9, 8, 8);
        frame.set_texture(0, 8, 8);
        unsafe { render_frame(Some(&session), &frame, plasma::DEFAULT_SPEED) };
        assert_eq!(gl.draw_count(), 1);
        assert_eq!(gl.texture_update_count(), 0);
        assert_eq!(gl.count(|c| matches!(c, Call::BindTexture { .. })), 0);
    }

    #[test]
    fn texture_target_receives_full_plasma_frame() {
        let (gl, session) = session(DeviceKind::Gles30, Dialect::Modern);
        let mut frame = FrameState::default();
        frame.set_time(0.25);
        frame.set_texture(9, 5, 3);
        unsafe { render_frame(Some(&session), &frame, plasma::DEFAULT_SPEED) };

        let calls = gl.calls();
        let upload = calls
            .iter()
            .position(|c| matches!(c, Call::TexSubImage2D { .. }))
            .unwrap();
        assert_eq!(
            calls[upload - 1],
            Call::BindTexture {
                target: glow::TEXTURE_2D,
                texture: Some(9)
            }
        );
        assert_eq!(
            calls[upload],
            Call::TexSubImage2D {
                width: 5,
                height: 3,
                format: glow::RGBA,
                ty: glow::UNSIGNED_BYTE,
                pixels: plasma::synthesize(5, 3, 20, 0.25),
            }
        );
        assert_eq!(
            calls[upload + 1],
            Call::BindTexture {
                target: glow::TEXTURE_2D,
                texture: None
            }
        );
        assert_eq!(gl.draw_count(), 1);
    }

    #[test]
    fn oversized_texture_is_skipped_without_allocating() {
        let (gl, _session) = session(DeviceKind::Gles20, Dialect::Legacy);
        let name = std::num::NonZeroU32::new(9).unwrap();
        let huge = TextureTarget {
            name,
            width: u32::MAX,
            height: u32::MAX,
        };
        unsafe { update_texture(gl.as_ref(), huge, 0.0) };
        // Within GL limits, but the byte length wraps a 32-bit usize.
        #[cfg(target_pointer_width = "32")]
        {
            let wide = TextureTarget {
                name,
                width: 0x7fff_ffff,
                height: 2,
            };
            unsafe { update_texture(gl.as_ref(), wide, 0.0) };
        }
        assert!(gl.calls().is_empty());
    }
}
