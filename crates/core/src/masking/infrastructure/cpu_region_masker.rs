use ndarray::{Array3, ArrayView3};

use crate::masking::domain::mask_algorithm::MaskAlgorithm;
use crate::masking::domain::mask_sizing::MaskSizing;
use crate::masking::domain::region_masker::RegionMasker;

use super::{gaussian, mosaic};

/// CPU region masker dispatching on [`MaskAlgorithm`].
///
/// Gaussian mode blurs through OpenCV with a kernel sized by
/// [`MaskSizing::kernel_size`]; mosaic mode pixelates with blocks sized by
/// [`MaskSizing::block_size`].
#[derive(Default)]
pub struct CpuRegionMasker;

impl CpuRegionMasker {
    pub fn new() -> Self {
        Self
    }
}

impl RegionMasker for CpuRegionMasker {
    fn mask(
        &self,
        region: ArrayView3<'_, u8>,
        algorithm: MaskAlgorithm,
        sizing: MaskSizing,
    ) -> Result<Array3<u8>, Box<dyn std::error::Error>> {
        let (h, w, _) = region.dim();
        if h == 0 || w == 0 {
            return Ok(region.to_owned());
        }
        Ok(match algorithm {
            MaskAlgorithm::Gaussian => gaussian::blur(region, sizing.kernel_size(h, w))?,
            MaskAlgorithm::Mosaic => mosaic::pixelate(region, sizing.block_size(h, w)),
        })
    }
}
