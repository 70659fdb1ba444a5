/// A control input routed from the preview window's keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeCommand {
    SelectGaussian,
    SelectMosaic,
    ToggleMask,
    ToggleRecording,
    Quit,
}

impl ModeCommand {
    /// Maps a key press to a command. Bindings are lowercase only.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'q' => Some(ModeCommand::Quit),
            'g' => Some(ModeCommand::SelectGaussian),
            'm' => Some(ModeCommand::SelectMosaic),
            'b' => Some(ModeCommand::ToggleMask),
            'r' => Some(ModeCommand::ToggleRecording),
            _ => None,
        }
    }
}
