/// Divisor applied to the region's short edge for whole-region blurs.
pub const DEFAULT_KERNEL_FACTOR: usize = 3;

/// Divisor applied to a face's width to get the mosaic block edge.
pub const FACE_BLOCK_DIVISOR: usize = 15;

/// Smallest kernel edge and block edge the engine will use.
pub const MIN_MASK_SIZE: usize = 3;

/// Smallest odd integer that is at least `max(3, n)`.
pub fn oddize(n: i64) -> usize {
    let n = n.max(MIN_MASK_SIZE as i64) as usize;
    if n % 2 == 1 {
        n
    } else {
        n + 1
    }
}

/// How kernel and block sizes are derived for a masked region.
///
/// Face regions are sized from the detection width alone; the height of
/// the box never affects the kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskSizing {
    /// Derive sizes from the region's own shorter edge.
    Region,
    /// Derive sizes from the width of the detected face.
    Face { width: usize },
}

impl MaskSizing {
    pub fn face(width: i32) -> Self {
        MaskSizing::Face {
            width: width.max(0) as usize,
        }
    }

    /// Gaussian kernel edge length for an `h` x `w` region. Always odd and >= 3.
    pub fn kernel_size(&self, h: usize, w: usize) -> usize {
        let base = match *self {
            MaskSizing::Region => h.min(w) / DEFAULT_KERNEL_FACTOR,
            MaskSizing::Face { width } => width / DEFAULT_KERNEL_FACTOR,
        };
        oddize(base.max(MIN_MASK_SIZE) as i64)
    }

    /// Mosaic block edge length for an `h` x `w` region. Always >= 3.
    pub fn block_size(&self, h: usize, w: usize) -> usize {
        let base = match *self {
            MaskSizing::Region => h.min(w) / FACE_BLOCK_DIVISOR,
            MaskSizing::Face { width } => width / FACE_BLOCK_DIVISOR,
        };
        base.max(MIN_MASK_SIZE)
    }
}
