use std::{sync::Arc, time::Duration};

use crate::submit::DEFAULT_SUBMIT_DELAY;

use super::keymap::{self, KeymapStore};

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub tick_rate: Duration,
    pub submit_delay: Duration,
    pub confirm_exit: bool,
    pub show_help: bool,
    pub(crate) keymap_store: Arc<KeymapStore>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
            submit_delay: DEFAULT_SUBMIT_DELAY,
            confirm_exit: true,
            show_help: true,
            keymap_store: keymap::default_store(),
        }
    }
}

impl UiOptions {
    pub fn with_keymap(mut self, keymap: KeymapStore) -> Self {
        self.keymap_store = Arc::new(keymap);
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }
}
