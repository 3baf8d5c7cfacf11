//! Declarative keymap registration through [`KeymapSpec`] and [`ActionTable`].

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::Fixture;
use vellum_engine::{ActionTable, KeymapSpec, ProblemKind};

#[test]
fn spec_bindings_resolve_and_fire() {
	let fx = Fixture::new();

	let spec: KeymapSpec = toml::from_str(
		r##"
		[[bindings]]
		keys = "g g"
		selector = "#n"
		action = "goto_top"

		[[bindings]]
		keys = "ctrl-;"
		selector = "div"
		action = "toggle_comment"
		"##,
	)
	.unwrap();

	let goto_count = Rc::new(Cell::new(0));
	let mut actions = ActionTable::new();
	{
		let goto_count = Rc::clone(&goto_count);
		actions.insert("goto_top", move |_| {
			goto_count.set(goto_count.get() + 1);
			Ok(true)
		});
	}
	actions.insert("toggle_comment", |_| Ok(true));

	fx.engine.register_spec(&fx.host, &spec, &actions);

	fx.press("g");
	fx.press("g");
	assert_eq!(goto_count.get(), 1);
	assert!(fx.engine.problems().is_empty());
}

#[test]
fn unknown_actions_are_skipped_with_a_problem() {
	let fx = Fixture::new();

	let spec: KeymapSpec = toml::from_str(
		r##"
		[[bindings]]
		keys = "d"
		selector = "#n"
		action = "present"

		[[bindings]]
		keys = "e"
		selector = "#n"
		action = "absent"
		"##,
	)
	.unwrap();

	let count = Rc::new(Cell::new(0));
	let mut actions = ActionTable::new();
	{
		let count = Rc::clone(&count);
		actions.insert("present", move |_| {
			count.set(count.get() + 1);
			Ok(true)
		});
	}

	let handle = fx.engine.register_spec(&fx.host, &spec, &actions);

	fx.press("d");
	assert_eq!(count.get(), 1);

	let event = fx.press("e");
	assert!(!event.default_prevented());

	let problems = fx.engine.problems();
	assert_eq!(problems.len(), 1);
	assert_eq!(problems[0].kind, ProblemKind::UnknownActionTarget);

	fx.engine.unregister(&handle);
	fx.press("d");
	assert_eq!(count.get(), 1);
}

#[test]
fn spec_entries_with_bad_keys_keep_the_rest_of_the_batch() {
	let fx = Fixture::new();

	let spec: KeymapSpec = toml::from_str(
		r##"
		[[bindings]]
		keys = "totally wrong"
		selector = "#n"
		action = "noop"

		[[bindings]]
		keys = "x"
		selector = "#n"
		action = "noop"
		"##,
	)
	.unwrap();

	let count = Rc::new(Cell::new(0));
	let mut actions = ActionTable::new();
	{
		let count = Rc::clone(&count);
		actions.insert("noop", move |_| {
			count.set(count.get() + 1);
			Ok(true)
		});
	}

	fx.engine.register_spec(&fx.host, &spec, &actions);

	fx.press("x");
	assert_eq!(count.get(), 1);
	assert_eq!(fx.engine.problems().len(), 1);
	assert_eq!(fx.engine.problems()[0].kind, ProblemKind::InvalidKeySequence);
}
