use image::imageops::{self, FilterType};
use image::GrayImage;
use ndarray::{Array3, ArrayView2, ArrayView3, Axis};

/// Pixelates a region: smooth downsample to `(max(1, h / block), max(1, w / block))`
/// followed by a nearest-neighbour upsample back to `h x w`.
///
/// Each channel is resampled as its own plane so any channel count works.
pub fn pixelate(region: ArrayView3<'_, u8>, block_size: usize) -> Array3<u8> {
    let (h, w, channels) = region.dim();
    if h == 0 || w == 0 {
        return region.to_owned();
    }
    let block = block_size.max(1);
    let small_h = (h / block).max(1) as u32;
    let small_w = (w / block).max(1) as u32;

    let mut out = Array3::<u8>::zeros((h, w, channels));
    for c in 0..channels {
        let plane: Vec<u8> = region.index_axis(Axis(2), c).iter().copied().collect();
        let plane = GrayImage::from_raw(w as u32, h as u32, plane)
            .expect("plane length must equal width * height");

        let small = imageops::resize(&plane, small_w, small_h, FilterType::Triangle);
        let blocky = imageops::resize(&small, w as u32, h as u32, FilterType::Nearest);

        let view = ArrayView2::from_shape((h, w), blocky.as_raw().as_slice())
            .expect("resized plane must match region size");
        out.index_axis_mut(Axis(2), c).assign(&view);
    }
    out
}
