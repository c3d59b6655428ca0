/// Modifier keys held at the time of an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

/// Keys the board reacts to. Anything else arrives as `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    KeyC,
    KeyR,
    KeyL,
    KeyV,
    Escape,
    Backspace,
    Other(String),
}

impl Key {
    pub fn from_code(code: &str) -> Self {
        match code {
            "KeyC" => Key::KeyC,
            "KeyR" => Key::KeyR,
            "KeyL" => Key::KeyL,
            "KeyV" => Key::KeyV,
            "Escape" => Key::Escape,
            "Backspace" => Key::Backspace,
            other => Key::Other(other.to_owned()),
        }
    }
}

/// Tracks modifier state across key events so pointer handlers can consult
/// it without receiving the keyboard event themselves.
#[derive(Debug, Default)]
pub struct Keyboard {
    modifiers: Modifiers,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn track(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }
}
