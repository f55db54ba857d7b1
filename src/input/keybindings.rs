use crate::config::{Config, Keybinding};
use crate::view::controls::EditCommand;
use crate::view::file_viewer::ScrollDirection;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Context in which a key is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Script and requirement panes side by side
    Panes,
    /// Lint results overlay
    LintResults,
    /// Commit message input has focus
    CommitInput,
    /// Commit button has focus
    CommitButton,
}

impl KeyContext {
    /// Check if a context should allow input
    pub fn allows_text_input(&self) -> bool {
        matches!(self, KeyContext::CommitInput)
    }

    /// Parse context from a "when" string
    pub fn from_when_clause(when: &str) -> Option<Self> {
        match when.trim() {
            "panes" => Some(KeyContext::Panes),
            "lint_results" => Some(KeyContext::LintResults),
            "commit_input" => Some(KeyContext::CommitInput),
            "commit_button" => Some(KeyContext::CommitButton),
            _ => None,
        }
    }

    /// Convert context to "when" clause string
    pub fn to_when_clause(self) -> &'static str {
        match self {
            KeyContext::Panes => "panes",
            KeyContext::LintResults => "lint_results",
            KeyContext::CommitInput => "commit_input",
            KeyContext::CommitButton => "commit_button",
        }
    }
}

/// High-level actions that can be performed in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Viewer scrolling
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // Lab workflow
    RunLint,
    OpenCommit,
    RecordSession,
    NextLab,
    Push,
    Reload,
    Quit,

    // Commit message editing
    InsertChar(char),
    HardBreak,
    DeleteBackward,
    DeleteForward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MoveLineStart,
    MoveLineEnd,
    ToggleFocus,
    Submit,
    Cancel,

    None,
}

impl Action {
    /// Parse an action name used in the config file
    pub fn from_str(s: &str) -> Option<Action> {
        Some(match s {
            "scroll_up" => Action::ScrollUp,
            "scroll_down" => Action::ScrollDown,
            "page_up" => Action::PageUp,
            "page_down" => Action::PageDown,
            "run_lint" => Action::RunLint,
            "open_commit" => Action::OpenCommit,
            "record_session" => Action::RecordSession,
            "next_lab" => Action::NextLab,
            "push" => Action::Push,
            "reload" => Action::Reload,
            "quit" => Action::Quit,
            "hard_break" => Action::HardBreak,
            "delete_backward" => Action::DeleteBackward,
            "delete_forward" => Action::DeleteForward,
            "move_left" => Action::MoveLeft,
            "move_right" => Action::MoveRight,
            "move_up" => Action::MoveUp,
            "move_down" => Action::MoveDown,
            "move_line_start" => Action::MoveLineStart,
            "move_line_end" => Action::MoveLineEnd,
            "toggle_focus" => Action::ToggleFocus,
            "submit" => Action::Submit,
            "cancel" => Action::Cancel,
            _ => return None,
        })
    }

    /// Viewer scroll for this action, if it is one
    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        match self {
            Action::ScrollUp => Some(ScrollDirection::Up),
            Action::ScrollDown => Some(ScrollDirection::Down),
            Action::PageUp => Some(ScrollDirection::PageUp),
            Action::PageDown => Some(ScrollDirection::PageDown),
            _ => None,
        }
    }

    /// Text area command for this action, if it is one
    pub fn edit_command(&self) -> Option<EditCommand> {
        match *self {
            Action::InsertChar(c) => Some(EditCommand::Insert(c)),
            Action::HardBreak => Some(EditCommand::HardBreak),
            Action::DeleteBackward => Some(EditCommand::DeleteBefore),
            Action::DeleteForward => Some(EditCommand::DeleteAt),
            Action::MoveLeft => Some(EditCommand::Left),
            Action::MoveRight => Some(EditCommand::Right),
            Action::MoveUp => Some(EditCommand::Up),
            Action::MoveDown => Some(EditCommand::Down),
            Action::MoveLineStart => Some(EditCommand::LineStart),
            Action::MoveLineEnd => Some(EditCommand::LineEnd),
            Action::ToggleFocus => Some(EditCommand::ToggleFocus),
            Action::Submit => Some(EditCommand::Submit),
            Action::Cancel => Some(EditCommand::Cancel),
            _ => None,
        }
    }
}

type BindingMap = HashMap<KeyContext, HashMap<(KeyCode, KeyModifiers), Action>>;

/// Resolves key events to actions
#[derive(Debug, Clone)]
pub struct KeybindingResolver {
    /// Bindings from the user's config
    bindings: BindingMap,
    /// Built-in bindings
    default_bindings: BindingMap,
}

impl KeybindingResolver {
    pub fn new(config: &Config) -> Self {
        let mut resolver = Self {
            bindings: HashMap::new(),
            default_bindings: Self::create_default_bindings(),
        };
        resolver.load_bindings_from_vec(&config.keybindings);
        resolver
    }

    fn load_bindings_from_vec(&mut self, bindings: &[Keybinding]) {
        for binding in bindings {
            let Some(key_code) = Self::parse_key(&binding.key) else {
                tracing::warn!("Ignoring keybinding with unknown key {:?}", binding.key);
                continue;
            };
            let Some(action) = Action::from_str(&binding.action) else {
                tracing::warn!("Ignoring keybinding with unknown action {:?}", binding.action);
                continue;
            };
            let context = match binding.when.as_deref() {
                None => KeyContext::Panes,
                Some(when) => match KeyContext::from_when_clause(when) {
                    Some(context) => context,
                    None => {
                        tracing::warn!("Ignoring keybinding with unknown context {:?}", when);
                        continue;
                    }
                },
            };
            let modifiers = Self::parse_modifiers(&binding.modifiers);
            self.bindings
                .entry(context)
                .or_default()
                .insert((key_code, modifiers), action);
        }
    }

    /// Resolve a key event to an action in the given context
    pub fn resolve(&self, event: &KeyEvent, context: KeyContext) -> Action {
        tracing::trace!(
            "KeybindingResolver.resolve: code={:?}, modifiers={:?}, context={:?}",
            event.code,
            event.modifiers,
            context
        );

        let key = (event.code, event.modifiers);

        if let Some(action) = self.bindings.get(&context).and_then(|b| b.get(&key)) {
            tracing::trace!("  -> Found in custom {} bindings: {:?}", context.to_when_clause(), action);
            return *action;
        }

        if let Some(action) = self.default_bindings.get(&context).and_then(|b| b.get(&key)) {
            tracing::trace!("  -> Found in default {} bindings: {:?}", context.to_when_clause(), action);
            return *action;
        }

        // Handle regular character input in text input contexts
        if context.allows_text_input()
            && (event.modifiers.is_empty() || event.modifiers == KeyModifiers::SHIFT)
        {
            if let KeyCode::Char(c) = event.code {
                tracing::trace!("  -> Character input: '{}'", c);
                return Action::InsertChar(c);
            }
        }

        tracing::trace!("  -> No binding found, returning Action::None");
        Action::None
    }

    /// Parse a key string to KeyCode
    fn parse_key(key: &str) -> Option<KeyCode> {
        let lower = key.to_lowercase();
        match lower.as_str() {
            "enter" => Some(KeyCode::Enter),
            "backspace" => Some(KeyCode::Backspace),
            "delete" | "del" => Some(KeyCode::Delete),
            "tab" => Some(KeyCode::Tab),
            "esc" | "escape" => Some(KeyCode::Esc),
            "space" => Some(KeyCode::Char(' ')),

            "left" => Some(KeyCode::Left),
            "right" => Some(KeyCode::Right),
            "up" => Some(KeyCode::Up),
            "down" => Some(KeyCode::Down),
            "home" => Some(KeyCode::Home),
            "end" => Some(KeyCode::End),
            "pageup" => Some(KeyCode::PageUp),
            "pagedown" => Some(KeyCode::PageDown),

            // Single characters keep their case
            _ if key.chars().count() == 1 => key.chars().next().map(KeyCode::Char),
            // Handle function keys like "f1", "f2", ..., "f12"
            s if s.starts_with('f') && s.len() >= 2 => s[1..].parse::<u8>().ok().map(KeyCode::F),
            _ => None,
        }
    }

    /// Parse modifiers from strings
    fn parse_modifiers(modifiers: &[String]) -> KeyModifiers {
        let mut result = KeyModifiers::empty();
        for m in modifiers {
            match m.to_lowercase().as_str() {
                "ctrl" | "control" => result |= KeyModifiers::CONTROL,
                "shift" => result |= KeyModifiers::SHIFT,
                "alt" => result |= KeyModifiers::ALT,
                _ => {}
            }
        }
        result
    }

    /// Create default keybindings organized by context
    fn create_default_bindings() -> BindingMap {
        let none = KeyModifiers::NONE;
        let mut all = BindingMap::new();

        let scrolling = [
            ((KeyCode::Up, none), Action::ScrollUp),
            ((KeyCode::Down, none), Action::ScrollDown),
            ((KeyCode::PageUp, none), Action::PageUp),
            ((KeyCode::PageDown, none), Action::PageDown),
        ];

        let mut panes: HashMap<_, _> = scrolling.into_iter().collect();
        panes.extend([
            ((KeyCode::Char('c'), none), Action::RunLint),
            ((KeyCode::Char('g'), none), Action::OpenCommit),
            ((KeyCode::Char('s'), none), Action::RecordSession),
            ((KeyCode::Char('l'), none), Action::NextLab),
            ((KeyCode::Char('p'), none), Action::Push),
            ((KeyCode::Char('r'), none), Action::Reload),
            ((KeyCode::Char('q'), none), Action::Quit),
        ]);
        all.insert(KeyContext::Panes, panes);

        let mut lint: HashMap<_, _> = scrolling.into_iter().collect();
        lint.extend([
            ((KeyCode::Char('q'), none), Action::Quit),
            ((KeyCode::Esc, none), Action::Quit),
        ]);
        all.insert(KeyContext::LintResults, lint);

        all.insert(
            KeyContext::CommitInput,
            HashMap::from([
                ((KeyCode::Enter, none), Action::HardBreak),
                ((KeyCode::Backspace, none), Action::DeleteBackward),
                ((KeyCode::Delete, none), Action::DeleteForward),
                ((KeyCode::Left, none), Action::MoveLeft),
                ((KeyCode::Right, none), Action::MoveRight),
                ((KeyCode::Up, none), Action::MoveUp),
                ((KeyCode::Down, none), Action::MoveDown),
                ((KeyCode::Home, none), Action::MoveLineStart),
                ((KeyCode::End, none), Action::MoveLineEnd),
                ((KeyCode::Tab, none), Action::ToggleFocus),
                ((KeyCode::Esc, none), Action::Cancel),
            ]),
        );

        all.insert(
            KeyContext::CommitButton,
            HashMap::from([
                ((KeyCode::Enter, none), Action::Submit),
                ((KeyCode::Tab, none), Action::ToggleFocus),
                ((KeyCode::Esc, none), Action::Cancel),
                ((KeyCode::Char('q'), none), Action::Cancel),
            ]),
        );

        all
    }
}
