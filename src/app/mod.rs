mod builder;
pub(crate) mod focus;
pub(crate) mod input;
pub(crate) mod keymap;
pub(crate) mod options;
mod popup;
pub(crate) mod runtime;
mod status;
mod terminal;

pub use builder::{FormDeck, SessionSummary};
pub use keymap::KeymapStore;
pub use options::UiOptions;
