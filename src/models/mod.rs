//! Data models for the voting server.
//!
//! Form bodies, session-held state, and the ephemeral vote.

mod forms;
pub mod session;
mod vote;

pub use forms::*;
pub use session::{SessionUser, SESSION_USERNAME_KEY};
pub use vote::*;
