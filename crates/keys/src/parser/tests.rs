use super::{ParseError, parse};
use crate::key::{KeyCode, Modifiers, Stroke};

#[test]
fn test_parse() {
	let err = |message: &str, position: usize| {
		Err::<Stroke, ParseError>(ParseError {
			message: message.to_string(),
			position,
		})
	};

	for (input, result) in [
		("alt-f", Ok(Stroke::alt('f'))),
		("space", Ok(Stroke::new(KeyCode::Space))),
		("delta", err("expect end of input, found: e", 1)),
		("shift-a", Ok(Stroke::char('a').with_shift())),
		("shift-a-delete", err("expect end of input, found: -", 7)),
		("al", err("expect end of input, found: l", 1)),
		(";", Ok(Stroke::char(';'))),
		("ctrl-;", Ok(Stroke::ctrl(';'))),
		("ctrl-alt-pageup", Ok(Stroke::new(KeyCode::PageUp).with_ctrl().with_alt())),
	] {
		let output = parse(input);
		assert_eq!(result, output);
	}
}

#[test]
fn test_parse_fn_key() {
	for n in 1..=12 {
		let input = format!("f{n}");
		let result = parse(&input);
		assert_eq!(KeyCode::F(n), result.unwrap().code);
	}

	// Out of the valid 1-35 range
	for n in [0, 36, 99] {
		let input = format!("f{n}");
		assert!(parse(&input).is_err());
	}
}

#[test]
fn test_parse_named_keys() {
	for (s, code) in [
		("up", KeyCode::Up),
		("esc", KeyCode::Esc),
		("escape", KeyCode::Esc),
		("del", KeyCode::Delete),
		("enter", KeyCode::Enter),
		("backtab", KeyCode::BackTab),
	] {
		let result = parse(s);
		assert_eq!(result.unwrap().code, code);
	}
}

#[test]
fn test_meta_aliases() {
	assert_eq!(parse("meta-k").unwrap(), parse("cmd-k").unwrap());
	assert!(parse("meta-k").unwrap().modifiers.meta);
}

#[test]
fn test_rejects_whitespace_and_empty() {
	assert!(parse("").is_err());
	assert!(parse("a b").is_err());
	assert!(parse(" ").is_err());
	assert!(parse("ctrl-").is_err());
}

#[test]
fn test_format() {
	for (stroke, expected) in [
		(Stroke::new(KeyCode::F(3)), "f3"),
		(Stroke::new(KeyCode::Delete), "delete"),
		(Stroke::new(KeyCode::Space), "space"),
		(Stroke::char('g'), "g"),
		(Stroke::char('#'), "#"),
		(Stroke::alt('f'), "alt-f"),
		(
			Stroke {
				code: KeyCode::Char('f'),
				modifiers: Modifiers { shift: true, meta: true, ..Modifiers::NONE },
			},
			"shift-meta-f",
		),
	] {
		assert_eq!(expected, format!("{stroke}"));
	}
}

#[test]
fn test_parse_str() {
	[
		(Stroke::new(KeyCode::F(3)), "f3"),
		(Stroke::new(KeyCode::Delete), "delete"),
		(Stroke::new(KeyCode::Space), "space"),
	]
	.iter()
	.for_each(|(expected, input)| {
		let stroke = input.parse::<Stroke>().unwrap();
		assert_eq!(expected, &stroke);
	});
}
