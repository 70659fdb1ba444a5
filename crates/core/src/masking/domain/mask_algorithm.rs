use std::fmt;
use std::str::FromStr;

/// Obfuscation filter applied to each detected face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaskAlgorithm {
    #[default]
    Gaussian,
    Mosaic,
}

impl MaskAlgorithm {
    /// Upper-case label shown in the on-screen status line.
    pub fn label(&self) -> &'static str {
        match self {
            MaskAlgorithm::Gaussian => "GAUSSIAN",
            MaskAlgorithm::Mosaic => "MOSAIC",
        }
    }
}

impl fmt::Display for MaskAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskAlgorithm::Gaussian => f.write_str("gaussian"),
            MaskAlgorithm::Mosaic => f.write_str("mosaic"),
        }
    }
}

impl FromStr for MaskAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gaussian" | "blur" => Ok(MaskAlgorithm::Gaussian),
            "mosaic" | "pixelate" => Ok(MaskAlgorithm::Mosaic),
            other => Err(format!(
                "Mask must be 'gaussian' or 'mosaic', got '{other}'"
            )),
        }
    }
}
