use std::{path::Path, sync::{Arc, LazyLock}};

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use super::input::KeyAction;

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum KeymapContext {
    Global,
    Navigation,
    Choice,
    DropZone,
    Button,
    Field,
    Files,
    Drag,
}

impl KeymapContext {
    fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "global" => Some(KeymapContext::Global),
            "navigation" => Some(KeymapContext::Navigation),
            "choice" => Some(KeymapContext::Choice),
            "dropzone" => Some(KeymapContext::DropZone),
            "button" => Some(KeymapContext::Button),
            "field" => Some(KeymapContext::Field),
            "files" => Some(KeymapContext::Files),
            "drag" => Some(KeymapContext::Drag),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    description: String,
    contexts: Vec<String>,
    action: RawAction,
    combos: Vec<String>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Submit,
    Quit,
    Dismiss,
    FocusStep { delta: i32 },
    SelectStep { delta: i32 },
    Activate,
    RemoveEntry,
    MoveField { delta: i32 },
    Grab,
    DragStep { delta: i32 },
    Drop,
    CancelDrag,
}

impl RawAction {
    fn into_action(self) -> KeyAction {
        match self {
            RawAction::Submit => KeyAction::Submit,
            RawAction::Quit => KeyAction::Quit,
            RawAction::Dismiss => KeyAction::Dismiss,
            RawAction::FocusStep { delta } => KeyAction::FocusStep(delta),
            RawAction::SelectStep { delta } => KeyAction::SelectStep(delta),
            RawAction::Activate => KeyAction::Activate,
            RawAction::RemoveEntry => KeyAction::RemoveEntry,
            RawAction::MoveField { delta } => KeyAction::MoveField(delta),
            RawAction::Grab => KeyAction::Grab,
            RawAction::DragStep { delta } => KeyAction::DragStep(delta),
            RawAction::Drop => KeyAction::Drop,
            RawAction::CancelDrag => KeyAction::CancelDrag,
        }
    }
}

#[derive(Debug)]
struct KeyBinding {
    action: KeyAction,
    contexts: Vec<KeymapContext>,
    combos: Vec<KeyPattern>,
    snippet: String,
}

impl KeyBinding {
    fn from_raw(raw: RawEntry) -> Result<Self> {
        let mut contexts = Vec::with_capacity(raw.contexts.len());
        for ctx in &raw.contexts {
            let context = KeymapContext::from_str(ctx)
                .ok_or_else(|| anyhow!("keymap entry {} uses unknown context '{ctx}'", raw.id))?;
            contexts.push(context);
        }
        if contexts.is_empty() {
            bail!("keymap entry {} must declare at least one context", raw.id);
        }
        let combos = raw
            .combos
            .iter()
            .map(|combo| {
                KeyPattern::parse(combo)
                    .map_err(|err| anyhow!("failed to parse combo '{combo}' for {}: {err}", raw.id))
            })
            .collect::<Result<Vec<_>>>()?;
        if combos.is_empty() {
            bail!("keymap entry {} must declare combos", raw.id);
        }
        let combos_display = combos
            .iter()
            .map(|pattern| pattern.display.clone())
            .collect::<Vec<_>>()
            .join("/");
        let snippet = format!("{combos_display} {}", raw.description);
        Ok(Self {
            action: raw.action.into_action(),
            contexts,
            combos,
            snippet,
        })
    }

    fn matches(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.combos
            .iter()
            .find(|pattern| pattern.matches(key))
            .map(|_| self.action)
    }
}

#[derive(Debug)]
struct KeyPattern {
    matcher: CodeMatcher,
    required: KeyModifiers,
    allow_shift: bool,
    display: String,
}

impl KeyPattern {
    fn parse(spec: &str) -> Result<Self, String> {
        let display = spec.trim().to_string();
        if display.is_empty() {
            return Err("combo cannot be empty".into());
        }
        let mut tokens = display
            .split('+')
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        let Some(key_token) = tokens.pop() else {
            return Err("combo must contain key".into());
        };
        let matcher = CodeMatcher::from_token(key_token)?;
        let mut required = KeyModifiers::empty();
        for token in tokens {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => required |= KeyModifiers::CONTROL,
                "shift" => required |= KeyModifiers::SHIFT,
                "alt" => required |= KeyModifiers::ALT,
                other => {
                    return Err(format!("unsupported modifier '{other}'"));
                }
            }
        }
        let allow_shift = matcher.allows_extra_shift() && !required.contains(KeyModifiers::SHIFT);
        Ok(Self {
            matcher,
            required,
            allow_shift,
            display,
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        if !self.matcher.matches(&key.code) {
            return false;
        }
        if !key.modifiers.contains(self.required) {
            return false;
        }
        let extra = key.modifiers - self.required;
        if self.allow_shift {
            (extra - KeyModifiers::SHIFT).is_empty()
        } else {
            extra.is_empty()
        }
    }
}

#[derive(Clone, Debug)]
enum CodeMatcher {
    Literal(KeyCode),
    Alpha(char),
}

impl CodeMatcher {
    fn from_token(token: &str) -> Result<Self, String> {
        let normalized = token.to_lowercase();
        let matcher = match normalized.as_str() {
            "tab" => CodeMatcher::Literal(KeyCode::Tab),
            "backtab" => CodeMatcher::Literal(KeyCode::BackTab),
            "enter" => CodeMatcher::Literal(KeyCode::Enter),
            "esc" | "escape" => CodeMatcher::Literal(KeyCode::Esc),
            "left" => CodeMatcher::Literal(KeyCode::Left),
            "right" => CodeMatcher::Literal(KeyCode::Right),
            "up" => CodeMatcher::Literal(KeyCode::Up),
            "down" => CodeMatcher::Literal(KeyCode::Down),
            "delete" | "del" => CodeMatcher::Literal(KeyCode::Delete),
            "space" => CodeMatcher::Literal(KeyCode::Char(' ')),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => CodeMatcher::Alpha(ch),
                    _ => return Err(format!("unsupported key '{token}'")),
                }
            }
        };
        Ok(matcher)
    }

    fn matches(&self, code: &KeyCode) -> bool {
        match (self, code) {
            (CodeMatcher::Literal(expected), actual) => actual == expected,
            (CodeMatcher::Alpha(expected), KeyCode::Char(actual)) => {
                actual.to_ascii_lowercase() == *expected
            }
            _ => false,
        }
    }

    fn allows_extra_shift(&self) -> bool {
        matches!(
            self,
            CodeMatcher::Alpha(_) | CodeMatcher::Literal(KeyCode::BackTab)
        )
    }
}

/// Parsed key bindings. Earlier contexts in a lookup win over later ones.
#[derive(Debug)]
pub struct KeymapStore {
    bindings: Vec<KeyBinding>,
}

impl KeymapStore {
    pub fn from_json(source: &str) -> Result<Self> {
        let raw_entries: Vec<RawEntry> =
            serde_json::from_str(source).context("invalid keymap JSON")?;
        let bindings = raw_entries
            .into_iter()
            .map(KeyBinding::from_raw)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bindings })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read keymap {}", path.display()))?;
        Self::from_json(&source).with_context(|| format!("failed to load keymap {}", path.display()))
    }

    pub(crate) fn classify(&self, key: &KeyEvent, contexts: &[KeymapContext]) -> Option<KeyAction> {
        contexts.iter().find_map(|context| {
            self.bindings
                .iter()
                .filter(|binding| binding.contexts.contains(context))
                .find_map(|binding| binding.matches(key))
        })
    }

    pub(crate) fn help_text(&self, contexts: &[KeymapContext]) -> Option<String> {
        let mut snippets: Vec<&str> = Vec::new();
        for context in contexts {
            for binding in self
                .bindings
                .iter()
                .filter(|binding| binding.contexts.contains(context))
            {
                if !snippets.contains(&binding.snippet.as_str()) {
                    snippets.push(&binding.snippet);
                }
            }
        }
        if snippets.is_empty() {
            None
        } else {
            Some(snippets.join(" • "))
        }
    }
}

static DEFAULT_STORE: LazyLock<Arc<KeymapStore>> = LazyLock::new(|| {
    Arc::new(KeymapStore::from_json(keymap_source!()).expect("invalid keymap/default.keymap.json"))
});

pub fn default_store() -> Arc<KeymapStore> {
    Arc::clone(&DEFAULT_STORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_keymap_parses() {
        let store = default_store();
        assert!(store.bindings.len() >= 10);
    }

    #[test]
    fn context_order_decides_between_bindings() {
        let store = default_store();
        let esc = key(KeyCode::Esc, KeyModifiers::NONE);
        let dragging = [KeymapContext::Drag, KeymapContext::Global];
        let browsing = [KeymapContext::Navigation, KeymapContext::Global];
        assert!(matches!(store.classify(&esc, &dragging), Some(KeyAction::CancelDrag)));
        assert!(matches!(store.classify(&esc, &browsing), Some(KeyAction::Dismiss)));
        let down = key(KeyCode::Down, KeyModifiers::NONE);
        assert!(matches!(store.classify(&down, &dragging), Some(KeyAction::DragStep(1))));
        assert!(matches!(store.classify(&down, &browsing), Some(KeyAction::FocusStep(1))));
    }

    #[test]
    fn ctrl_arrows_move_fields_only_in_field_context() {
        let store = default_store();
        let ctrl_up = key(KeyCode::Up, KeyModifiers::CONTROL);
        let field = [KeymapContext::Field, KeymapContext::Navigation, KeymapContext::Global];
        assert!(matches!(store.classify(&ctrl_up, &field), Some(KeyAction::MoveField(-1))));
        let welcome = [KeymapContext::Navigation, KeymapContext::Global];
        assert!(store.classify(&ctrl_up, &welcome).is_none());
    }

    #[test]
    fn shift_tab_arrives_as_backtab() {
        let store = default_store();
        let action = store.classify(
            &key(KeyCode::BackTab, KeyModifiers::SHIFT),
            &[KeymapContext::Navigation],
        );
        assert!(matches!(action, Some(KeyAction::FocusStep(-1))));
    }

    #[test]
    fn plain_characters_are_left_for_text_input() {
        let store = default_store();
        let typed = key(KeyCode::Char('s'), KeyModifiers::NONE);
        let field = [KeymapContext::Field, KeymapContext::Navigation, KeymapContext::Global];
        assert!(store.classify(&typed, &field).is_none());
    }

    #[test]
    fn help_text_deduplicates_snippets() {
        let store = default_store();
        let help = store
            .help_text(&[KeymapContext::Drag, KeymapContext::Global])
            .expect("help");
        assert!(help.contains("Ctrl+S submit"));
        assert!(help.contains("Enter drop"));
        assert!(!help.contains("Tab/Down next"));
    }

    #[test]
    fn rejects_unknown_contexts() {
        let source = r#"[{"id":"x","description":"x","contexts":["nowhere"],"action":{"kind":"quit"},"combos":["Ctrl+Q"]}]"#;
        let err = KeymapStore::from_json(source).unwrap_err();
        assert!(err.to_string().contains("unknown context"));
    }

    #[test]
    fn rejects_bad_combos() {
        let source = r#"[{"id":"x","description":"x","contexts":["global"],"action":{"kind":"quit"},"combos":["Hyper+Q"]}]"#;
        let err = KeymapStore::from_json(source).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported modifier"));
    }
}
