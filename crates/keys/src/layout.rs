//! Keyboard layouts and key-input canonicalization.
//!
//! A [`Layout`] folds the two spellings of a shifted key into one canonical
//! [`Stroke`]: the authored form (`"shift-;"`) and the produced glyph the host
//! reports (`":"` with the shift flag set) both normalize to the same value,
//! so sequence matching can compare strokes by plain equality.

use crate::key::{KeyCode, Modifiers, Stroke};
use crate::parser::{self, ParseError};

/// Raw key input as observed by the host on a key-press event.
///
/// `key` is the host's primary-key identifier: the produced character for
/// printable keys (`"d"`, `";"`, `":"`), or a key name (`"Enter"`,
/// `"ArrowLeft"`) for the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
	/// Primary key identifier.
	pub key: String,
	/// Whether Ctrl was held.
	pub ctrl: bool,
	/// Whether Alt was held.
	pub alt: bool,
	/// Whether Shift was held.
	pub shift: bool,
	/// Whether Meta was held.
	pub meta: bool,
}

impl KeyInput {
	/// Create an input with no modifiers.
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			ctrl: false,
			alt: false,
			shift: false,
			meta: false,
		}
	}

	/// Returns a copy with Ctrl added.
	pub fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Alt added.
	pub fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns a copy with Meta added.
	pub fn meta(self) -> Self {
		Self { meta: true, ..self }
	}
}

/// A keyboard layout: the shifted-glyph table used to canonicalize strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
	name: &'static str,
	/// `(base, shifted)` pairs for non-letter keys.
	shifted: &'static [(char, char)],
}

/// US-English shifted-glyph pairs for the non-letter rows.
const US_ENGLISH_SHIFTED: &[(char, char)] = &[
	('`', '~'),
	('1', '!'),
	('2', '@'),
	('3', '#'),
	('4', '$'),
	('5', '%'),
	('6', '^'),
	('7', '&'),
	('8', '*'),
	('9', '('),
	('0', ')'),
	('-', '_'),
	('=', '+'),
	('[', '{'),
	(']', '}'),
	('\\', '|'),
	(';', ':'),
	('\'', '"'),
	(',', '<'),
	('.', '>'),
	('/', '?'),
];

impl Default for Layout {
	fn default() -> Self {
		Self::us_english()
	}
}

impl Layout {
	/// The default US-English layout.
	pub const fn us_english() -> Self {
		Self {
			name: "en-US",
			shifted: US_ENGLISH_SHIFTED,
		}
	}

	/// Layout name (BCP 47-ish tag).
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// The glyph produced by shift on the given base key, if any.
	pub fn shifted_glyph(&self, base: char) -> Option<char> {
		self.shifted.iter().find(|(b, _)| *b == base).map(|(_, s)| *s)
	}

	/// Whether the given character is itself a shifted glyph on this layout.
	fn is_shifted_glyph(&self, c: char) -> bool {
		c.is_ascii_uppercase() || self.shifted.iter().any(|(_, s)| *s == c)
	}

	/// Translates a raw host key input into a canonical stroke.
	///
	/// Returns `None` when the input does not denote a shortcut stroke:
	/// bare modifier presses, dead keys, and unidentified keys.
	pub fn canonicalize(&self, input: &KeyInput) -> Option<Stroke> {
		let modifiers = Modifiers {
			ctrl: input.ctrl,
			alt: input.alt,
			shift: input.shift,
			meta: input.meta,
		};

		let mut chars = input.key.chars();
		let code = match (chars.next(), chars.next()) {
			(Some(c), None) => KeyCode::Char(c),
			_ => named_input_key(&input.key)?,
		};

		Some(self.fold(Stroke { code, modifiers }))
	}

	/// Normalizes a user-authored stroke string.
	///
	/// # Errors
	///
	/// Returns a [`ParseError`] if the string does not conform to the
	/// stroke grammar.
	pub fn normalize(&self, s: &str) -> Result<Stroke, ParseError> {
		Ok(self.fold(parser::parse(s)?))
	}

	/// Normalizes a whitespace-separated stroke sequence string.
	///
	/// # Errors
	///
	/// Returns a [`ParseError`] if any segment fails to parse.
	pub fn normalize_seq(&self, s: &str) -> Result<Vec<Stroke>, ParseError> {
		s.split_whitespace().map(|part| self.normalize(part)).collect()
	}

	/// Folds shift into the glyph for printable keys.
	///
	/// `shift-a` → `A`, `shift-;` → `:`, and a produced glyph that still
	/// carries the shift flag (`:` with shift held) drops it. Shift on
	/// non-printable keys (`shift-enter`) stays a modifier.
	fn fold(&self, stroke: Stroke) -> Stroke {
		let stroke = stroke.canonicalize();
		if !stroke.modifiers.shift {
			return stroke;
		}

		let KeyCode::Char(c) = stroke.code else {
			return stroke;
		};

		if c.is_ascii_lowercase() {
			return Stroke {
				code: KeyCode::Char(c.to_ascii_uppercase()),
				..stroke
			}
			.drop_shift();
		}
		if self.is_shifted_glyph(c) {
			return stroke.drop_shift();
		}
		if let Some(glyph) = self.shifted_glyph(c) {
			return Stroke {
				code: KeyCode::Char(glyph),
				..stroke
			}
			.drop_shift();
		}

		stroke
	}
}

/// Maps a multi-character host key name to a key code.
///
/// Modifier-only presses (`"Control"`, `"Shift"`, ...) and unrecognized
/// names yield `None`: they are not shortcut strokes.
fn named_input_key(name: &str) -> Option<KeyCode> {
	let code = match name {
		"Enter" => KeyCode::Enter,
		"Tab" => KeyCode::Tab,
		"Escape" => KeyCode::Esc,
		"Backspace" => KeyCode::Backspace,
		"Delete" => KeyCode::Delete,
		"Insert" => KeyCode::Insert,
		"Home" => KeyCode::Home,
		"End" => KeyCode::End,
		"PageUp" => KeyCode::PageUp,
		"PageDown" => KeyCode::PageDown,
		"ArrowUp" => KeyCode::Up,
		"ArrowDown" => KeyCode::Down,
		"ArrowLeft" => KeyCode::Left,
		"ArrowRight" => KeyCode::Right,
		_ => {
			if let Some(num) = name.strip_prefix('F')
				&& let Ok(n) = num.parse::<u8>()
				&& (1..=35).contains(&n)
			{
				return Some(KeyCode::F(n));
			}
			return None;
		}
	};
	Some(code)
}
