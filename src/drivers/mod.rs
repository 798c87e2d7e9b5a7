pub mod display;
pub mod feedback;
pub mod joystick;
