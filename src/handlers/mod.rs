/// Event handlers for the application
pub mod app_state;
pub mod form;
pub mod keyboard;
pub mod mouse;

pub use app_state::AppStateHandler;
pub use form::FormHandler;
pub use keyboard::KeyboardHandler;
pub use mouse::MouseHandler;
