// Input handler module: the desktop's event model and the
// translation from terminal events into it

pub mod terminal;
pub mod types;

pub use terminal::EventTranslator;
pub use types::*;
