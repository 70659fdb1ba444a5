use ndarray::{Array3, ArrayView3};
use opencv::core::{self, Mat, Scalar, Size};
use opencv::imgproc;
use opencv::prelude::*;

/// Blurs a region with a `kernel_size x kernel_size` Gaussian.
///
/// Sigma is derived from the kernel size by OpenCV
/// (`0.3 * ((k - 1) * 0.5 - 1) + 0.8`) and borders reflect without
/// repeating the edge pixel. `kernel_size` must be odd; 1 is the identity.
pub fn blur(region: ArrayView3<'_, u8>, kernel_size: usize) -> opencv::Result<Array3<u8>> {
    let (h, w, channels) = region.dim();
    if kernel_size <= 1 || h == 0 || w == 0 {
        return Ok(region.to_owned());
    }

    let mut src = Mat::new_rows_cols_with_default(
        h as i32,
        w as i32,
        core::CV_8UC(channels as i32)?,
        Scalar::all(0.0),
    )?;
    for (dst, &src_px) in src.data_bytes_mut()?.iter_mut().zip(region.iter()) {
        *dst = src_px;
    }

    let k = kernel_size as i32;
    let mut dst = Mat::default();
    imgproc::gaussian_blur_def(&src, &mut dst, Size::new(k, k), 0.0)?;

    let data = dst.data_bytes()?.to_vec();
    Array3::from_shape_vec((h, w, channels), data).map_err(|e| {
        opencv::Error::new(core::StsUnmatchedSizes, format!("blurred region shape: {e}"))
    })
}
