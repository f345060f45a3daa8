//! Terminal frontend: pure view projection plus the raw-mode writer.

pub mod game_view;
pub mod renderer;

pub use game_view::GameView;
pub use renderer::TerminalRenderer;
