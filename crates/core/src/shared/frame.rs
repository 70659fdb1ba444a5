use ndarray::{ArrayView3, ArrayViewMut3};

/// BT.601 luma weights used for intensity conversion.
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// A single video frame: contiguous RGB (or single-channel intensity)
/// bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; the domain layer
/// treats pixel data as opaque.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Flips the frame left-to-right in place.
    pub fn mirror_horizontal(&mut self) {
        let width = self.width as usize;
        let channels = self.channels as usize;
        if width < 2 || channels == 0 {
            return;
        }
        for row in self.data.chunks_exact_mut(width * channels) {
            for x in 0..width / 2 {
                let left = x * channels;
                let right = (width - 1 - x) * channels;
                for c in 0..channels {
                    row.swap(left + c, right + c);
                }
            }
        }
    }

    /// Returns a single-channel intensity copy, keeping the frame index.
    ///
    /// Three-channel frames are treated as RGB. Frames that are already
    /// single-channel are cloned; for other layouts the first channel is used.
    pub fn to_intensity(&self) -> Frame {
        let channels = self.channels as usize;
        if channels == 1 {
            return self.clone();
        }
        let gray: Vec<u8> = self
            .data
            .chunks_exact(channels.max(1))
            .map(|px| {
                if px.len() >= 3 {
                    let luma = px[0] as f32 * LUMA_WEIGHTS[0]
                        + px[1] as f32 * LUMA_WEIGHTS[1]
                        + px[2] as f32 * LUMA_WEIGHTS[2];
                    luma.round().clamp(0.0, 255.0) as u8
                } else {
                    px[0]
                }
            })
            .collect();
        Frame::new(gray, self.width, self.height, 1, self.index)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let data = vec![0u8; 24]; // 2x4x3
        let frame = Frame::new(data, 4, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 3]); // (height, width, channels)
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let data = vec![0u8; 12]; // 2x2x3
        let mut frame = Frame::new(data, 2, 2, 3, 0);
        {
            let mut arr = frame.as_ndarray_mut();
            arr[[0, 1, 2]] = 128; // row=0, col=1, B channel
        }
        assert_eq!(frame.as_ndarray()[[0, 1, 2]], 128);
    }

    #[test]
    fn test_mirror_swaps_columns() {
        // 3x1 RGB: red, green, blue
        let data = vec![255, 0, 0, 0, 255, 0, 0, 0, 255];
        let mut frame = Frame::new(data, 3, 1, 3, 0);
        frame.mirror_horizontal();
        assert_eq!(frame.data(), &[0, 0, 255, 0, 255, 0, 255, 0, 0]);
    }

    #[test]
    fn test_mirror_keeps_rows_separate() {
        // 2x2 single channel: [1 2; 3 4]
        let mut frame = Frame::new(vec![1, 2, 3, 4], 2, 2, 1, 0);
        frame.mirror_horizontal();
        assert_eq!(frame.data(), &[2, 1, 4, 3]);
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        let data: Vec<u8> = (0..5 * 4 * 3).map(|v| v as u8).collect();
        let mut frame = Frame::new(data.clone(), 5, 4, 3, 0);
        frame.mirror_horizontal();
        frame.mirror_horizontal();
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_intensity_of_primaries() {
        let data = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let frame = Frame::new(data, 4, 1, 3, 7);
        let gray = frame.to_intensity();
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.index(), 7);
        assert_eq!(gray.data(), &[76, 150, 29, 255]);
    }

    #[test]
    fn test_intensity_of_gray_frame_is_copy() {
        let frame = Frame::new(vec![9, 8, 7, 6], 2, 2, 1, 0);
        assert_eq!(frame.to_intensity().data(), frame.data());
    }
}
