use opencv::highgui;

use crate::shared::frame::Frame;
use crate::video::domain::preview_surface::PreviewSurface;

use super::mat_conversion::frame_to_mat;

/// A HighGUI window that shows frames and reports key presses.
pub struct OpencvPreview {
    title: String,
    open: bool,
}

impl OpencvPreview {
    pub fn new(title: &str) -> Result<Self, Box<dyn std::error::Error>> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            title: title.to_string(),
            open: true,
        })
    }
}

impl PreviewSurface for OpencvPreview {
    fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mat = frame_to_mat(frame)?;
        highgui::imshow(&self.title, &mat)?;
        Ok(())
    }

    fn poll_key(&mut self, wait_ms: i32) -> Result<Option<char>, Box<dyn std::error::Error>> {
        let key = highgui::wait_key(wait_ms.max(1))?;
        if key < 0 {
            return Ok(None);
        }
        Ok(Some(char::from((key & 0xff) as u8)))
    }

    fn is_open(&self) -> bool {
        if !self.open {
            return false;
        }
        highgui::get_window_property(&self.title, highgui::WND_PROP_VISIBLE)
            .map(|visible| visible != 0.0)
            .unwrap_or(false)
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        if let Err(e) = highgui::destroy_window(&self.title) {
            log::warn!("Failed to close preview window: {e}");
        }
        // Give HighGUI a chance to process the destroy event.
        let _ = highgui::wait_key(1);
        self.open = false;
    }
}

impl Drop for OpencvPreview {
    fn drop(&mut self) {
        self.close();
    }
}
