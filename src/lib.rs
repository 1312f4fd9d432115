// Library surface for headless/integration tests and reuse.
// Terminal set-up and CLI parsing stay in main.rs.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod difficulty;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod theme;
pub mod ui;
pub mod util;

pub use app::App;
pub use difficulty::Difficulty;
pub use session::TypingSession;

/// Redraw interval when no input arrives
pub const TICK_RATE_MS: u64 = 250;
