/// Frame rate used when the capture device does not report one.
pub const DEFAULT_FPS: f64 = 30.0;

/// Geometry and timing of a frame stream.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl VideoMetadata {
    /// Frame rate rounded to a whole number, falling back to 30 when the
    /// reported rate is missing, zero, or negative.
    pub fn effective_fps(&self) -> i32 {
        let fps = self.fps.round();
        if fps.is_finite() && fps >= 1.0 {
            fps as i32
        } else {
            DEFAULT_FPS as i32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn meta(fps: f64) -> VideoMetadata {
        VideoMetadata {
            width: 640,
            height: 480,
            fps,
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let meta = meta(24.0);
        let cloned = meta.clone();
        assert_eq!(meta, cloned);
    }

    #[rstest]
    #[case::reported(30.0, 30)]
    #[case::rounded(29.97, 30)]
    #[case::low(15.4, 15)]
    #[case::zero(0.0, 30)]
    #[case::negative(-1.0, 30)]
    #[case::nan(f64::NAN, 30)]
    fn test_effective_fps(#[case] fps: f64, #[case] expected: i32) {
        assert_eq!(meta(fps).effective_fps(), expected);
    }
}
