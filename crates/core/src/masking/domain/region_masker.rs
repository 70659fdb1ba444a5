use ndarray::{Array3, ArrayView3};

use super::mask_algorithm::MaskAlgorithm;
use super::mask_sizing::MaskSizing;

/// Domain interface for obfuscating an image sub-region.
///
/// Takes an `h x w x channels` view and returns a new array of exactly the
/// same shape. Implementations must not touch anything outside the region;
/// writing the result back into a frame is the caller's job. Callers never
/// pass an empty region. An error means the backend failed, not that the
/// region was unsuitable.
pub trait RegionMasker: Send {
    fn mask(
        &self,
        region: ArrayView3<'_, u8>,
        algorithm: MaskAlgorithm,
        sizing: MaskSizing,
    ) -> Result<Array3<u8>, Box<dyn std::error::Error>>;
}
