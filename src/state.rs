//! Values the host pushes between frames.

use std::num::NonZeroU32;

/// A texture owned by the host that the plugin writes into each frame.
///
/// The plugin never allocates, resizes, or deletes it. `width` and `height`
/// are trusted to match the texture's real storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureTarget {
    /// GL texture name.
    pub name: NonZeroU32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TextureTarget {
    /// Byte length of one tightly packed RGBA row, or `None` if it does not
    /// fit in `usize`.
    #[must_use]
    pub fn row_stride(&self) -> Option<usize> {
        usize::try_from(self.width)
            .ok()?
            .checked_mul(crate::plasma::BYTES_PER_PIXEL)
    }

    /// Byte length of the whole RGBA image, or `None` if it does not fit in
    /// `usize`.
    #[must_use]
    pub fn byte_len(&self) -> Option<usize> {
        self.row_stride()?
            .checked_mul(usize::try_from(self.height).ok()?)
    }
}

/// Shared per-frame inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameState {
    time: f32,
    target: Option<TextureTarget>,
}

impl FrameState {
    /// Current host time in seconds.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// The texture to refresh, if any.
    #[must_use]
    pub fn target(&self) -> Option<TextureTarget> {
        self.target
    }

    /// Record the host time.
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    /// Register the host texture from its native handle.
    ///
    /// A zero handle, a handle that does not fit a GL name, or a
    /// non-positive dimension clears the target, which disables texture
    /// updates.
    pub fn set_texture(&mut self, handle: usize, width: i32, height: i32) {
        self.target = texture_target(handle, width, height);
        match self.target {
            Some(target) => log::debug!(
                "texture target set to {} ({}x{})",
                target.name,
                target.width,
                target.height
            ),
            None if handle != 0 => {
                log::warn!("ignoring texture handle {handle:#x} with size {width}x{height}");
            }
            None => log::debug!("texture target cleared"),
        }
    }
}

fn texture_target(handle: usize, width: i32, height: i32) -> Option<TextureTarget> {
    let name = NonZeroU32::new(u32::try_from(handle).ok()?)?;
    let width = u32::try_from(width).ok().filter(|&w| w > 0)?;
    let height = u32::try_from(height).ok().filter(|&h| h > 0)?;
    Some(TextureTarget {
        name,
        width,
        height,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let state = FrameState::default();
        assert!(state.time().abs() < f32::EPSILON);
        assert_eq!(state.target(), None);
    }

    #[test]
    fn texture_round_trips_through_setter() {
        let mut state = FrameState::default();
        state.set_texture(7, 256, 128);
        let target = state.target().unwrap();
        assert_eq!(target.name.get(), 7);
        assert_eq!((target.width, target.height), (256, 128));
        assert_eq!(target.row_stride(), Some(1024));
        assert_eq!(target.byte_len(), Some(1024 * 128));
    }

    #[test]
    fn image_size_overflow_is_reported() {
        let target = TextureTarget {
            name: NonZeroU32::new(1).unwrap(),
            width: u32::MAX,
            height: u32::MAX,
        };
        // u32::MAX * 4 * u32::MAX exceeds a 64-bit usize; on 32-bit targets
        // the row stride alone already does.
        assert_eq!(target.byte_len(), None);
        #[cfg(target_pointer_width = "32")]
        assert_eq!(target.row_stride(), None);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(target.row_stride(), Some(u32::MAX as usize * 4));
    }

    #[test]
    fn null_handle_clears_target() {
        let mut state = FrameState::default();
        state.set_texture(7, 4, 4);
        state.set_texture(0, 4, 4);
        assert_eq!(state.target(), None);
    }

    #[test]
    fn bad_dimensions_or_oversized_handles_are_rejected() {
        let mut state = FrameState::default();
        state.set_texture(3, 0, 4);
        assert_eq!(state.target(), None);
        state.set_texture(3, 4, -1);
        assert_eq!(state.target(), None);
        #[cfg(target_pointer_width = "64")]
        {
            state.set_texture(1usize << 33, 4, 4);
            assert_eq!(state.target(), None);
        }
    }
}
