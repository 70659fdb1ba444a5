pub mod mode_command;
pub mod mode_controller;
pub mod recorder;
pub mod session_state;
