/// Axis-aligned face detection in frame-pixel coordinates (origin top-left).
///
/// Produced fresh for every frame; coordinates may extend past the frame
/// edges and are only made safe by [`FaceBox::clamp_to`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// In-bounds rectangle within a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoiRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamps the box into a `frame_width` x `frame_height` frame.
    ///
    /// The top-left corner is moved to `(max(0, x), max(0, y))` and the far
    /// corner is derived from the clamped corner plus the box size, then cut
    /// at the frame edge. Returns `None` when nothing of the box remains.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Option<RoiRect> {
        let x1 = i64::from(self.x.max(0));
        let y1 = i64::from(self.y.max(0));
        let x2 = (x1 + i64::from(self.width)).min(i64::from(frame_width));
        let y2 = (y1 + i64::from(self.height)).min(i64::from(frame_height));

        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(RoiRect {
            x: x1 as usize,
            y: y1 as usize,
            w: (x2 - x1) as usize,
            h: (y2 - y1) as usize,
        })
    }
}
