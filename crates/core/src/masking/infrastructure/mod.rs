pub mod cpu_region_masker;
mod gaussian;
mod mosaic;
