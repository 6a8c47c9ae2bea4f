/// User interface module
///
/// - `screen.rs` - pure projection of state into display structures
/// - `panels.rs` - iced widgets for each part of the screen

pub mod panels;
pub mod screen;
