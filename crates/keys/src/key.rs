//! Keyboard stroke types with modifier support.

use std::fmt;

/// Key codes a stroke can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	BackTab,
	Backspace,
	Delete,
	Down,
	End,
	Enter,
	Esc,
	Home,
	Insert,
	Left,
	PageDown,
	PageUp,
	Right,
	Space,
	Tab,
	Up,
	F(u8),
	Char(char),
}

impl fmt::Display for KeyCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Char(c) => write!(f, "{c}"),
			Self::F(n) => write!(f, "f{n}"),
			Self::BackTab => write!(f, "backtab"),
			Self::Backspace => write!(f, "backspace"),
			Self::Delete => write!(f, "delete"),
			Self::Down => write!(f, "down"),
			Self::End => write!(f, "end"),
			Self::Enter => write!(f, "enter"),
			Self::Esc => write!(f, "esc"),
			Self::Home => write!(f, "home"),
			Self::Insert => write!(f, "insert"),
			Self::Left => write!(f, "left"),
			Self::PageDown => write!(f, "pagedown"),
			Self::PageUp => write!(f, "pageup"),
			Self::Right => write!(f, "right"),
			Self::Space => write!(f, "space"),
			Self::Tab => write!(f, "tab"),
			Self::Up => write!(f, "up"),
		}
	}
}

/// Key modifiers (Ctrl, Alt, Shift, Meta).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Alt is held.
	pub alt: bool,
	/// Whether Shift is held.
	pub shift: bool,
	/// Whether Meta (Cmd/Win) is held.
	pub meta: bool,
}

impl Modifiers {
	/// No modifiers pressed.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
		meta: false,
	};

	/// Only Ctrl pressed.
	pub const CTRL: Self = Self {
		ctrl: true,
		alt: false,
		shift: false,
		meta: false,
	};

	/// Only Alt pressed.
	pub const ALT: Self = Self {
		ctrl: false,
		alt: true,
		shift: false,
		meta: false,
	};

	/// Only Shift pressed.
	pub const SHIFT: Self = Self {
		ctrl: false,
		alt: false,
		shift: true,
		meta: false,
	};

	/// Returns true if no modifiers are set.
	pub fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift && !self.meta
	}
}

/// One atomic key press with its modifier set.
///
/// Strokes are uninterpreted equality-comparable values to the matching
/// engine; all layout-dependent folding happens before one is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stroke {
	/// The key code (character, special key, or function key).
	pub code: KeyCode,
	/// Active modifiers for this stroke.
	pub modifiers: Modifiers,
}

impl Stroke {
	/// Create a stroke from a key code with no modifiers.
	pub const fn new(code: KeyCode) -> Self {
		Self {
			code,
			modifiers: Modifiers::NONE,
		}
	}

	/// Create a stroke from a character with no modifiers.
	///
	/// Whitespace characters are canonicalized: `' '` → `Space`, `'\t'` → `Tab`,
	/// `'\n'` → `Enter`.
	pub const fn char(c: char) -> Self {
		let code = match c {
			' ' => KeyCode::Space,
			'\t' => KeyCode::Tab,
			'\n' => KeyCode::Enter,
			_ => KeyCode::Char(c),
		};
		Self {
			code,
			modifiers: Modifiers::NONE,
		}
	}

	/// Create a stroke with Ctrl held.
	pub const fn ctrl(c: char) -> Self {
		Self {
			code: KeyCode::Char(c),
			modifiers: Modifiers::CTRL,
		}
	}

	/// Create a stroke with Alt held.
	pub const fn alt(c: char) -> Self {
		Self {
			code: KeyCode::Char(c),
			modifiers: Modifiers::ALT,
		}
	}

	/// Add Ctrl.
	pub const fn with_ctrl(self) -> Self {
		Self {
			modifiers: Modifiers { ctrl: true, ..self.modifiers },
			..self
		}
	}

	/// Add Alt.
	pub const fn with_alt(self) -> Self {
		Self {
			modifiers: Modifiers { alt: true, ..self.modifiers },
			..self
		}
	}

	/// Add Shift.
	pub const fn with_shift(self) -> Self {
		Self {
			modifiers: Modifiers { shift: true, ..self.modifiers },
			..self
		}
	}

	/// Add Meta.
	pub const fn with_meta(self) -> Self {
		Self {
			modifiers: Modifiers { meta: true, ..self.modifiers },
			..self
		}
	}

	/// Drop the shift modifier, preserving the key code.
	pub const fn drop_shift(self) -> Self {
		Self {
			modifiers: Modifiers {
				shift: false,
				..self.modifiers
			},
			..self
		}
	}

	/// Canonicalizes the key code so equivalent inputs have one representation.
	///
	/// `Char(' ')` → `Space`, `Char('\t')` → `Tab`, `Char('\n')` → `Enter`.
	pub fn canonicalize(self) -> Self {
		let code = match self.code {
			KeyCode::Char(' ') => KeyCode::Space,
			KeyCode::Char('\t') => KeyCode::Tab,
			KeyCode::Char('\n') => KeyCode::Enter,
			other => other,
		};
		Self { code, ..self }
	}

	/// Get the character if this is a character key.
	pub fn codepoint(&self) -> Option<char> {
		match self.code {
			KeyCode::Char(c) => Some(c),
			KeyCode::Space => Some(' '),
			_ => None,
		}
	}
}

impl fmt::Display for Stroke {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.modifiers.ctrl {
			write!(f, "ctrl-")?;
		}
		if self.modifiers.alt {
			write!(f, "alt-")?;
		}
		if self.modifiers.shift {
			write!(f, "shift-")?;
		}
		if self.modifiers.meta {
			write!(f, "meta-")?;
		}
		write!(f, "{}", self.code)
	}
}
