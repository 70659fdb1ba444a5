//! Conversions between [`Frame`] (RGB, row-major) and OpenCV `Mat` (BGR).

use opencv::core::{self, Mat, Scalar, CV_8UC1, CV_8UC3, CV_8UC4};
use opencv::imgproc;
use opencv::prelude::*;

use crate::shared::frame::Frame;

/// Copies frame bytes into a new `Mat` without reordering channels.
pub fn frame_to_mat_raw(frame: &Frame) -> opencv::Result<Mat> {
    let typ = match frame.channels() {
        1 => CV_8UC1,
        3 => CV_8UC3,
        4 => CV_8UC4,
        other => {
            return Err(opencv::Error::new(
                core::StsBadArg,
                format!("unsupported channel count: {other}"),
            ))
        }
    };
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        typ,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(frame.data());
    Ok(mat)
}

/// Converts an RGB frame to a BGR `Mat`. Single-channel frames are copied as-is.
pub fn frame_to_mat(frame: &Frame) -> opencv::Result<Mat> {
    let raw = frame_to_mat_raw(frame)?;
    if frame.channels() != 3 {
        return Ok(raw);
    }
    let mut bgr = Mat::default();
    imgproc::cvt_color_def(&raw, &mut bgr, imgproc::COLOR_RGB2BGR)?;
    Ok(bgr)
}

/// Copies `Mat` bytes into a frame without reordering channels.
pub fn mat_to_frame_raw(mat: &Mat, index: usize) -> opencv::Result<Frame> {
    let owned;
    let mat = if mat.is_continuous() {
        mat
    } else {
        owned = mat.try_clone()?;
        &owned
    };
    let data = mat.data_bytes()?.to_vec();
    Ok(Frame::new(
        data,
        mat.cols() as u32,
        mat.rows() as u32,
        mat.channels() as u8,
        index,
    ))
}

/// Converts a BGR `Mat` (as delivered by capture devices) to an RGB frame.
pub fn mat_to_frame(mat: &Mat, index: usize) -> opencv::Result<Frame> {
    if mat.channels() != 3 {
        return mat_to_frame_raw(mat, index);
    }
    let mut rgb = Mat::default();
    imgproc::cvt_color_def(mat, &mut rgb, imgproc::COLOR_BGR2RGB)?;
    mat_to_frame_raw(&rgb, index)
}
