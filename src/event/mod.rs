pub mod input;

/// Application events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(crossterm::event::KeyEvent),
}
