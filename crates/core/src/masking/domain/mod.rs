pub mod mask_algorithm;
pub mod mask_sizing;
pub mod region_masker;
