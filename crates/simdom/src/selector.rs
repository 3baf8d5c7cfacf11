//! Compound simple selectors: `tag`, `#id`, `.class`, and combinations.

use thiserror::Error;

use crate::dom::ElementData;

/// Selector syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
	#[error("empty selector")]
	Empty,
	#[error("unexpected character '{ch}' at position {position}")]
	UnexpectedChar { ch: char, position: usize },
}

/// A parsed compound simple selector.
///
/// Grammar: `selector = "*" | [tag] ("#" ident | "." ident)*` with at least
/// one component. No combinators: one selector describes one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
	universal: bool,
	tag: Option<String>,
	id: Option<String>,
	classes: Vec<String>,
}

impl Selector {
	/// Parses a selector string.
	pub fn parse(input: &str) -> Result<Self, SelectorError> {
		let trimmed = input.trim();
		if trimmed.is_empty() {
			return Err(SelectorError::Empty);
		}

		let mut selector = Selector::default();
		let mut chars = trimmed.char_indices().peekable();

		if let Some(&(_, ch)) = chars.peek() {
			if ch == '*' {
				selector.universal = true;
				chars.next();
			} else if is_ident_start(ch) {
				selector.tag = Some(take_ident(&mut chars));
			}
		}

		while let Some(&(position, ch)) = chars.peek() {
			match ch {
				'#' => {
					chars.next();
					let ident = take_ident(&mut chars);
					if ident.is_empty() {
						return Err(SelectorError::UnexpectedChar { ch, position });
					}
					selector.id = Some(ident);
				}
				'.' => {
					chars.next();
					let ident = take_ident(&mut chars);
					if ident.is_empty() {
						return Err(SelectorError::UnexpectedChar { ch, position });
					}
					selector.classes.push(ident);
				}
				_ => return Err(SelectorError::UnexpectedChar { ch, position }),
			}
		}

		Ok(selector)
	}

	/// CSS-like specificity: ids weigh 100, classes 10, tags 1.
	pub fn specificity(&self) -> u32 {
		let mut weight = 0;
		if self.id.is_some() {
			weight += 100;
		}
		weight += 10 * self.classes.len() as u32;
		if self.tag.is_some() {
			weight += 1;
		}
		weight
	}

	pub(crate) fn matches(&self, element: &ElementData) -> bool {
		if let Some(tag) = &self.tag
			&& element.tag != *tag
		{
			return false;
		}
		if let Some(id) = &self.id
			&& element.id.as_ref() != Some(id)
		{
			return false;
		}
		self.classes.iter().all(|class| element.classes.contains(class))
	}
}

fn is_ident_start(ch: char) -> bool {
	ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
	let mut ident = String::new();
	while let Some(&(_, ch)) = chars.peek() {
		let ok = if ident.is_empty() { is_ident_start(ch) } else { is_ident_continue(ch) };
		if !ok {
			break;
		}
		ident.push(ch);
		chars.next();
	}
	ident
}
