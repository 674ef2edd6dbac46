mod actions;
mod reducers;
mod session;

pub use actions::FormCommand;
pub use reducers::{CommandEffect, FormEngine};
pub use session::{FormSession, SubmitAttempt};
