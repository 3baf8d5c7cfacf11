//! Parsing of plain-text stroke definitions into [`Stroke`] values.
//!
//! Supports expressions such as `"ctrl-alt-f1"`, `"shift-left"`, or `";"` and
//! maps them to key/modifier combinations.
//!
//! ## Supported Syntax
//!
//! ```text
//! stroke    = modifiers* key
//! modifiers = modifier "-"
//! modifier  = "ctrl" | "alt" | "shift" | "meta" | "cmd"
//! key       = fn-key | named-key | char
//! fn-key    = "f" digit digit?
//! named-key = "del" | "insert" | "end" | ...
//! char      = ascii-char
//! ```

use std::str::FromStr;

use thiserror::Error;

use crate::key::{KeyCode, Modifiers, Stroke};

/// Separator between modifiers and the key (`ctrl-a`).
const KEY_SEP: char = '-';

/// Function pointer type for parser combinators.
type ParserFn<T> = fn(&mut Parser) -> Result<Option<T>, ParseError>;

/// Represents an error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
	/// Human-readable description of the parse error.
	pub message: String,
	/// Byte offset in the input where the error occurred.
	pub position: usize,
}

/// Maintains the parser's state for recursive descent parsing.
struct Parser<'a> {
	/// The input string being parsed.
	input: &'a str,
	/// Current byte position in the input.
	position: usize,
}

impl<'a> Parser<'a> {
	fn new(input: &'a str) -> Self {
		Self { input, position: 0 }
	}

	/// Peeks at the next character without consuming it.
	fn peek(&self) -> Option<char> {
		self.input.chars().next()
	}

	/// Peeks at the character `n` positions ahead without consuming it.
	fn peek_at(&self, n: usize) -> Option<char> {
		self.input.chars().nth(n)
	}

	/// Consumes and returns the next character, advancing the parser.
	fn next(&mut self) -> Option<char> {
		if let Some(ch) = self.peek() {
			self.position += ch.len_utf8();
			self.input = &self.input[ch.len_utf8()..];

			Some(ch)
		} else {
			None
		}
	}

	/// Returns `true` if the parser has consumed all input.
	fn is_end(&self) -> bool {
		self.input.is_empty()
	}

	/// Consumes the next character if it matches the expected one.
	fn take(&mut self, expected: char) -> Result<(), ParseError> {
		match self.next() {
			Some(ch) if ch == expected => Ok(()),
			Some(ch) => Err(ParseError {
				message: format!("expected '{expected}', found '{ch}'"),
				position: self.position - ch.len_utf8(),
			}),
			None => Err(ParseError {
				message: format!("expected '{expected}', found end of input"),
				position: self.position,
			}),
		}
	}

	/// Attempts to parse with a fallback: restores state if parsing fails.
	///
	/// Returns `Ok(Some(value))` if successful, or `Ok(None)` on failure.
	fn try_parse<T, F>(&mut self, f: F) -> Result<Option<T>, ParseError>
	where
		F: FnOnce(&mut Parser<'a>) -> Result<Option<T>, ParseError>,
	{
		let snapshot = (self.input, self.position);
		match f(self) {
			Ok(Some(val)) => Ok(Some(val)),
			Ok(None) | Err(_) => {
				self.input = snapshot.0;
				self.position = snapshot.1;
				Ok(None)
			}
		}
	}

	/// Consumes and returns characters that satisfy a predicate.
	fn take_while<F>(&mut self, predicate: F) -> String
	where
		F: Fn(char) -> bool,
	{
		let mut result = String::new();

		while let Some(ch) = self.peek() {
			if predicate(ch) {
				result.push(ch);
				self.next();
			} else {
				break;
			}
		}

		result
	}

	/// Tries multiple parsers in sequence, returning the result of the first successful one.
	fn alt<T>(&mut self, parsers: &[ParserFn<T>]) -> Result<Option<T>, ParseError> {
		for p in parsers {
			match p(self)? {
				Some(value) => return Ok(Some(value)),
				None => continue,
			}
		}

		Ok(None)
	}

	/// Creates a [`ParseError`] with the current parser position.
	fn error(&self, message: String) -> ParseError {
		ParseError {
			message,
			position: self.position,
		}
	}
}

/// Parses a single stroke expression into a [`Stroke`].
///
/// Accepts strings like `"ctrl-b"`, `"shift-left"`, or `"f1"`.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input does not match the expected grammar.
///
/// # Examples
///
/// ```
/// use vellum_keys::{Stroke, parser::parse};
///
/// let stroke = parse("ctrl-a").unwrap();
/// assert_eq!(stroke, Stroke::ctrl('a'));
/// ```
pub fn parse(s: &str) -> Result<Stroke, ParseError> {
	let mut parser = Parser::new(s);
	let stroke = parse_stroke(&mut parser)?;

	if !parser.is_end() {
		return Err(parser.error(format!("expect end of input, found: {}", parser.peek().unwrap())));
	}

	Ok(stroke)
}

/// Parses a key combination with optional modifiers followed by a key.
///
/// Grammar: `stroke = modifiers* key`
fn parse_stroke(parser: &mut Parser) -> Result<Stroke, ParseError> {
	let mut modifiers = Modifiers::NONE;

	for _ in 0..4 {
		if let Some(apply) = try_parse_modifier(parser)? {
			apply(&mut modifiers);
		} else {
			break;
		}
	}

	let code = parse_key(parser)?;
	Ok(Stroke { code, modifiers })
}

/// Attempts to parse a single modifier, followed by a `-`.
///
/// Returns `None` if no valid modifier name is found.
fn try_parse_modifier(parser: &mut Parser) -> Result<Option<fn(&mut Modifiers)>, ParseError> {
	parser.try_parse(|p| {
		let name = p.take_while(|ch| ch.is_ascii_alphabetic());
		let apply: fn(&mut Modifiers) = match name.as_str() {
			"ctrl" => |m| m.ctrl = true,
			"alt" => |m| m.alt = true,
			"shift" => |m| m.shift = true,
			"meta" | "cmd" => |m| m.meta = true,
			_ => return Ok(None),
		};

		p.take(KEY_SEP)?;

		Ok(Some(apply))
	})
}

/// Parses a key value, which may be a function key, named key, or ASCII char.
fn parse_key(parser: &mut Parser) -> Result<KeyCode, ParseError> {
	match parser.alt(&[try_parse_fn_key, try_parse_named_key, try_parse_char])? {
		Some(key) => Ok(key),
		None => Err(parser.error("expected a valid key".to_string())),
	}
}

/// Attempts to parse a function key (e.g., `"f1"` to `"f35"`).
///
/// Only activates when the input starts with `f` followed by a digit. Once
/// activated, the digits must form a valid function key number (1-35) or an
/// error is returned (no silent degradation to a char key).
fn try_parse_fn_key(parser: &mut Parser) -> Result<Option<KeyCode>, ParseError> {
	if parser.peek() != Some('f') {
		return Ok(None);
	}

	if !matches!(parser.peek_at(1), Some(ch) if ch.is_ascii_digit()) {
		return Ok(None);
	}

	parser.take('f')?;
	let num = parser.take_while(|ch| ch.is_ascii_digit());

	match num.parse::<u8>() {
		Ok(n) if (1..=35).contains(&n) => Ok(Some(KeyCode::F(n))),
		_ => Err(parser.error("invalid function key number (must be 1-35)".to_string())),
	}
}

/// Attempts to parse a named key such as `"del"`, `"insert"`, or `"end"`.
fn try_parse_named_key(parser: &mut Parser) -> Result<Option<KeyCode>, ParseError> {
	parser.try_parse(|p| {
		let name = p.take_while(|ch| ch.is_ascii_alphabetic());
		if name.len() < 2 {
			return Ok(None);
		}

		Ok(named_key(&name))
	})
}

fn named_key(name: &str) -> Option<KeyCode> {
	let code = match name {
		"backtab" => KeyCode::BackTab,
		"backspace" | "bs" => KeyCode::Backspace,
		"del" | "delete" => KeyCode::Delete,
		"down" => KeyCode::Down,
		"end" => KeyCode::End,
		"enter" | "return" => KeyCode::Enter,
		"esc" | "escape" => KeyCode::Esc,
		"home" => KeyCode::Home,
		"insert" | "ins" => KeyCode::Insert,
		"left" => KeyCode::Left,
		"pagedown" | "pgdn" => KeyCode::PageDown,
		"pageup" | "pgup" => KeyCode::PageUp,
		"right" => KeyCode::Right,
		"space" => KeyCode::Space,
		"tab" => KeyCode::Tab,
		"up" => KeyCode::Up,
		_ => return None,
	};
	Some(code)
}

/// Attempts to parse a single ASCII character as a key.
fn try_parse_char(parser: &mut Parser) -> Result<Option<KeyCode>, ParseError> {
	if let Some(ch) = parser.peek() {
		if ch.is_ascii() && !ch.is_ascii_whitespace() {
			parser.next();
			Ok(Some(KeyCode::Char(ch)))
		} else {
			Ok(None)
		}
	} else {
		Ok(None)
	}
}

impl FromStr for Stroke {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse(s)
	}
}

#[cfg(test)]
mod tests;
