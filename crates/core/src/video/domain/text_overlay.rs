use crate::shared::frame::Frame;

/// Typeface for overlay text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// Plain sans-serif stroke font.
    Simplex,
    /// Serif stroke font with doubled strokes.
    Complex,
}

/// Font, colour, size, and stroke of overlay text. Colours are RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub color: [u8; 3],
    pub scale: f64,
    pub thickness: i32,
}

impl TextStyle {
    pub const NO_FACE: TextStyle = TextStyle {
        font: Font::Complex,
        color: [255, 0, 0],
        scale: 1.0,
        thickness: 2,
    };

    pub const STATUS: TextStyle = TextStyle {
        font: Font::Simplex,
        color: [0, 255, 0],
        scale: 0.6,
        thickness: 2,
    };

    pub const STATUS_RECORDING: TextStyle = TextStyle {
        font: Font::Simplex,
        color: [255, 0, 0],
        scale: 0.6,
        thickness: 2,
    };
}

/// Draws text onto a frame in place. `origin` is the bottom-left corner of
/// the text baseline in frame pixels.
pub trait TextOverlay: Send {
    fn draw_text(
        &self,
        frame: &mut Frame,
        text: &str,
        origin: (i32, i32),
        style: TextStyle,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
