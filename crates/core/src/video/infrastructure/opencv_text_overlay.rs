use opencv::core::{Point, Scalar};
use opencv::imgproc;

use crate::shared::frame::Frame;
use crate::video::domain::text_overlay::{Font, TextOverlay, TextStyle};

use super::mat_conversion::{frame_to_mat_raw, mat_to_frame_raw};

/// Renders text with OpenCV's Hershey fonts.
///
/// Drawing happens on a raw copy of the frame, so the style colour is
/// passed in the frame's own channel order and copied back afterwards.
pub struct OpencvTextOverlay;

impl OpencvTextOverlay {
    pub fn new() -> Self {
        Self
    }
}

fn hershey_face(font: Font) -> i32 {
    match font {
        Font::Simplex => imgproc::FONT_HERSHEY_SIMPLEX,
        Font::Complex => imgproc::FONT_HERSHEY_COMPLEX,
    }
}

impl Default for OpencvTextOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextOverlay for OpencvTextOverlay {
    fn draw_text(
        &self,
        frame: &mut Frame,
        text: &str,
        origin: (i32, i32),
        style: TextStyle,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut mat = frame_to_mat_raw(frame)?;
        let [r, g, b] = style.color;
        let color = if frame.channels() == 1 {
            Scalar::all(f64::from(r))
        } else {
            Scalar::new(f64::from(r), f64::from(g), f64::from(b), 0.0)
        };

        imgproc::put_text(
            &mut mat,
            text,
            Point::new(origin.0, origin.1),
            hershey_face(style.font),
            style.scale,
            color,
            style.thickness,
            imgproc::LINE_8,
            false,
        )?;

        let drawn = mat_to_frame_raw(&mat, frame.index())?;
        frame.data_mut().copy_from_slice(drawn.data());
        Ok(())
    }
}
