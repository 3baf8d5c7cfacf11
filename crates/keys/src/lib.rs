//! Keystroke types, grammar, and canonicalization for vellum.
//!
//! * [`Stroke`] — one atomic key press with its modifier set
//! * [`parser`] — the grammar for user-authored stroke strings (`"ctrl-;"`, `"alt-f3"`, `"d"`)
//! * [`Layout`] — canonicalizes raw host key input and authored strings into strokes

pub use key::{KeyCode, Modifiers, Stroke};
pub use layout::{KeyInput, Layout};
pub use parser::ParseError;

mod key;
mod layout;
pub mod parser;
