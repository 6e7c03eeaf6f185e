//! Replay session state: position timeline, analysis cache, and the
//! rules-engine boundary. No I/O lives here.

pub mod analysis;
pub mod game;
pub mod notation;
pub mod rules;
pub mod session;
pub mod timeline;

pub use session::GameSession;
pub use timeline::START_FEN;
