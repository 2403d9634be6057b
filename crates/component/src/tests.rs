use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::persist::{delete, save};

#[derive(Debug, Settings)]
struct Swatch {
	#[settings(skip)]
	pub state: ComponentState,
	pub color: String,
	pub size: i64,
	draft: bool,
}

impl Swatch {
	fn new(id: Option<ComponentId>) -> Self {
		let mut state = ComponentState::new();
		state.id = id;
		Self {
			state,
			color: "red".to_string(),
			size: 10,
			draft: false,
		}
	}
}

impl SavableComponent for Swatch {
	fn state(&self) -> &ComponentState {
		&self.state
	}

	fn state_mut(&mut self) -> &mut ComponentState {
		&mut self.state
	}
}

#[derive(Debug, Settings)]
struct HiddenWidget {
	#[settings(skip)]
	pub state: ComponentState,
}

impl SavableComponent for HiddenWidget {
	fn state(&self) -> &ComponentState {
		&self.state
	}

	fn state_mut(&mut self) -> &mut ComponentState {
		&mut self.state
	}

	fn is_selectable() -> bool {
		false
	}

	fn settings_html(&self) -> Option<String> {
		Some("<p>nothing to configure</p>".to_string())
	}
}

fn counter(count: &Rc<RefCell<usize>>, result: HookResult) -> Listener {
	let count = Rc::clone(count);
	Box::new(move |_: &LifecycleEvent| {
		*count.borrow_mut() += 1;
		Ok(result)
	})
}

#[test]
fn is_new_follows_id() {
	let cases: [(Option<ComponentId>, bool); 7] = [
		(None, true),
		(Some("".into()), true),
		(Some("new1".into()), true),
		(Some("new".into()), true),
		(Some("42".into()), false),
		(Some(ComponentId::Int(0)), true),
		(Some(ComponentId::Int(7)), false),
	];
	for (id, expected) in cases {
		let label = format!("{id:?}");
		assert_eq!(Swatch::new(id).is_new(), expected, "{label}");
	}
}

#[test]
fn placeholder_component_reports_settings_in_order() {
	let swatch = Swatch::new(Some("new3".into()));
	assert!(swatch.is_new());

	let settings = swatch.settings();
	let names: Vec<_> = settings.keys().copied().collect();
	assert_eq!(names, vec!["color", "size"]);
	assert_eq!(settings["color"], SettingValue::from("red"));
	assert_eq!(settings["size"], SettingValue::Int(10));
	assert!(!swatch.draft);
}

#[test]
fn settings_reflect_current_values() {
	let mut swatch = Swatch::new(None);
	swatch.color = "teal".to_string();
	swatch.size = 3;

	let settings = swatch.settings();
	assert_eq!(settings["color"].as_str(), Some("teal"));
	assert_eq!(settings["size"].as_int(), Some(3));
}

#[test]
fn settings_serialize_as_plain_json() {
	let swatch = Swatch::new(Some("new3".into()));
	let json = serde_json::to_value(swatch.settings()).expect("serialize settings");
	assert_eq!(json, serde_json::json!({ "color": "red", "size": 10 }));
	assert_eq!(json.to_string(), r#"{"color":"red","size":10}"#);
}

#[test]
fn apply_settings_writes_fields() {
	let mut swatch = Swatch::new(Some(ComponentId::Int(5)));
	swatch
		.apply_settings([("color", SettingValue::from("blue")), ("size", SettingValue::Int(12))])
		.expect("apply settings");
	assert_eq!(swatch.color, "blue");
	assert_eq!(swatch.size, 12);
}

#[test]
fn apply_settings_rejects_unknown_and_mistyped_values() {
	let mut swatch = Swatch::new(None);

	let err = swatch
		.apply_settings([("draft", SettingValue::Bool(true))])
		.expect_err("draft is not a setting");
	assert_eq!(err, SettingsError::UnknownSetting("draft".to_string()));

	let err = swatch
		.apply_settings([("size", SettingValue::from("large"))])
		.expect_err("size must be an int");
	assert_eq!(
		err,
		SettingsError::InvalidValue {
			name: "size".to_string(),
			source: ValueError::TypeMismatch {
				expected: "int",
				got: "string",
			},
		}
	);
	assert_eq!(swatch.size, 10);
}

#[test]
fn before_save_without_listeners_allows() {
	let mut swatch = Swatch::new(None);
	assert!(!swatch.state.events().has_listeners(EVENT_BEFORE_SAVE));
	assert!(swatch.before_save(true).expect("before_save"));
	assert!(swatch.before_delete().expect("before_delete"));
}

#[test]
fn any_veto_blocks_regardless_of_position() {
	for veto_at in 0..3 {
		let count = Rc::new(RefCell::new(0));
		let mut swatch = Swatch::new(None);
		for i in 0..3 {
			let result = if i == veto_at {
				HookResult::Cancel
			} else {
				HookResult::Continue
			};
			swatch.on(EVENT_BEFORE_SAVE, counter(&count, result));
		}

		assert!(!swatch.before_save(true).expect("before_save"));
		assert_eq!(*count.borrow(), 3, "veto at {veto_at} must not short-circuit");
	}
}

#[test]
fn before_delete_veto() {
	let count = Rc::new(RefCell::new(0));
	let mut swatch = Swatch::new(Some(ComponentId::Int(9)));
	swatch.on(EVENT_BEFORE_DELETE, counter(&count, HookResult::Cancel));
	assert!(swatch.state.events().has_listeners(EVENT_BEFORE_DELETE));
	assert!(!swatch.state.events().has_listeners(EVENT_BEFORE_SAVE));
	assert!(!swatch.before_delete().expect("before_delete"));
	assert!(swatch.before_save(false).expect("save channel is separate"));
}

#[test]
fn before_save_passes_callers_is_new() {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&seen);
	let mut swatch = Swatch::new(Some(ComponentId::Int(9)));
	swatch.on(EVENT_BEFORE_SAVE, move |event| {
		sink.borrow_mut().push(event.is_new());
		Ok(HookResult::Continue)
	});

	assert!(!swatch.is_new());
	swatch.before_save(true).expect("before_save");
	assert_eq!(*seen.borrow(), vec![Some(true)]);
}

#[test]
fn listener_failure_is_an_error_not_a_veto() {
	let mut swatch = Swatch::new(None);
	swatch.on(EVENT_BEFORE_SAVE, |_| Err(HookError::msg("listener broke")));

	let err = swatch.before_save(true).expect_err("listener failure");
	assert_eq!(err.to_string(), "listener broke");
}

#[test]
fn after_hooks_fire_every_call() {
	let saves = Rc::new(RefCell::new(0));
	let deletes = Rc::new(RefCell::new(0));
	let mut swatch = Swatch::new(None);
	swatch.on(EVENT_AFTER_SAVE, counter(&saves, HookResult::Cancel));
	swatch.on(EVENT_AFTER_DELETE, counter(&deletes, HookResult::Continue));

	swatch.after_save(true).expect("after_save");
	swatch.after_save(true).expect("after_save");
	swatch.after_delete().expect("after_delete");

	assert_eq!(*saves.borrow(), 2);
	assert_eq!(*deletes.borrow(), 1);
}

#[test]
fn selectability_and_settings_html_are_overridable() {
	assert!(Swatch::is_selectable());
	assert!(!HiddenWidget::is_selectable());

	let swatch = Swatch::new(None);
	assert_eq!(swatch.settings_html(), None);

	let hidden = HiddenWidget {
		state: ComponentState::new(),
	};
	assert!(hidden.settings_html().is_some());
	assert!(hidden.settings().is_empty());
	assert!(HiddenWidget::settings_attributes().is_empty());
}

/// Bus that records channel names and cancels everything on `beforeDelete`.
#[derive(Default)]
struct JournalBus {
	journal: Rc<RefCell<Vec<String>>>,
}

impl EventBus for JournalBus {
	fn subscribe(&mut self, _channel: &str, _listener: Listener) -> ListenerId {
		ListenerId::new(0)
	}

	fn unsubscribe(&mut self, _channel: &str, _id: ListenerId) -> bool {
		false
	}

	fn publish(&mut self, channel: &str, _event: &LifecycleEvent) -> Result<HookResult, HookError> {
		self.journal.borrow_mut().push(channel.to_string());
		Ok(HookResult::from(channel != EVENT_BEFORE_DELETE))
	}

	fn has_listeners(&self, _channel: &str) -> bool {
		true
	}
}

#[test]
fn component_works_over_any_event_bus() {
	let journal = Rc::new(RefCell::new(Vec::new()));
	let bus = JournalBus {
		journal: Rc::clone(&journal),
	};
	let mut swatch = Swatch {
		state: ComponentState::with_bus(bus).with_id(3u64),
		color: "red".to_string(),
		size: 1,
		draft: true,
	};

	assert!(swatch.before_save(false).expect("before_save"));
	swatch.after_save(false).expect("after_save");
	assert!(!swatch.before_delete().expect("before_delete"));
	assert_eq!(
		*journal.borrow(),
		vec!["beforeSave", "afterSave", "beforeDelete"]
	);
}

#[derive(Default)]
struct MemoryStore {
	rows: Vec<u64>,
	next: u64,
	fail: bool,
}

impl Store<Swatch> for MemoryStore {
	type Error = std::io::Error;

	fn write(&mut self, component: &Swatch, is_new: bool) -> Result<ComponentId, Self::Error> {
		if self.fail {
			return Err(std::io::Error::other("disk full"));
		}
		if !is_new && let Some(ComponentId::Int(id)) = component.id() {
			return Ok(ComponentId::Int(*id));
		}
		self.next += 1;
		self.rows.push(self.next);
		Ok(ComponentId::Int(self.next))
	}

	fn delete(&mut self, component: &Swatch) -> Result<(), Self::Error> {
		if let Some(ComponentId::Int(id)) = component.id() {
			self.rows.retain(|row| row != id);
		}
		Ok(())
	}
}

#[test]
fn save_assigns_id_and_notifies() {
	let after = Rc::new(RefCell::new(0));
	let mut store = MemoryStore::default();
	let mut swatch = Swatch::new(Some("new1".into()));
	swatch.on(EVENT_AFTER_SAVE, counter(&after, HookResult::Continue));

	assert_eq!(save(&mut store, &mut swatch).expect("save"), Outcome::Applied);
	assert_eq!(swatch.id(), Some(&ComponentId::Int(1)));
	assert!(!swatch.is_new());
	assert_eq!(*after.borrow(), 1);

	assert_eq!(save(&mut store, &mut swatch).expect("resave"), Outcome::Applied);
	assert_eq!(store.rows, vec![1]);
}

#[test]
fn vetoed_save_never_reaches_store() {
	let after = Rc::new(RefCell::new(0));
	let veto = Rc::new(RefCell::new(0));
	let mut store = MemoryStore::default();
	let mut swatch = Swatch::new(None);
	swatch.on(EVENT_BEFORE_SAVE, counter(&veto, HookResult::Cancel));
	swatch.on(EVENT_AFTER_SAVE, counter(&after, HookResult::Continue));

	assert_eq!(save(&mut store, &mut swatch).expect("save"), Outcome::Vetoed);
	assert!(store.rows.is_empty());
	assert_eq!(swatch.id(), None);
	assert_eq!(*after.borrow(), 0);
}

#[test]
fn store_failure_skips_after_hook() {
	let after = Rc::new(RefCell::new(0));
	let mut store = MemoryStore {
		fail: true,
		..MemoryStore::default()
	};
	let mut swatch = Swatch::new(None);
	swatch.on(EVENT_AFTER_SAVE, counter(&after, HookResult::Continue));

	let err = save(&mut store, &mut swatch).expect_err("store failure");
	assert!(matches!(err, PersistError::Store(_)));
	assert_eq!(err.to_string(), "store error: disk full");
	assert_eq!(*after.borrow(), 0);
}

#[test]
fn delete_runs_gate_then_notifies() {
	let after = Rc::new(RefCell::new(0));
	let mut store = MemoryStore::default();
	let mut swatch = Swatch::new(None);
	save(&mut store, &mut swatch).expect("save");
	swatch.on(EVENT_AFTER_DELETE, counter(&after, HookResult::Continue));

	assert_eq!(delete(&mut store, &mut swatch).expect("delete"), Outcome::Applied);
	assert!(store.rows.is_empty());
	assert_eq!(*after.borrow(), 1);
}

#[test]
fn vetoed_delete_keeps_row() {
	let veto = Rc::new(RefCell::new(0));
	let mut store = MemoryStore::default();
	let mut swatch = Swatch::new(None);
	save(&mut store, &mut swatch).expect("save");
	swatch.on(EVENT_BEFORE_DELETE, counter(&veto, HookResult::Cancel));

	assert_eq!(delete(&mut store, &mut swatch).expect("delete"), Outcome::Vetoed);
	assert_eq!(store.rows, vec![1]);
}

#[test]
fn hook_failure_surfaces_through_persist() {
	let mut store = MemoryStore::default();
	let mut swatch = Swatch::new(None);
	swatch.on(EVENT_BEFORE_SAVE, |_| Err(HookError::msg("nope")));

	let err = save(&mut store, &mut swatch).expect_err("hook failure");
	assert!(matches!(err, PersistError::Hook(_)));
	assert_eq!(err.to_string(), "nope");
	assert!(store.rows.is_empty());
}

#[test]
fn setting_value_conversions() {
	assert_eq!(SettingValue::from(Some(3u8)), SettingValue::Int(3));
	assert_eq!(SettingValue::from(None::<String>), SettingValue::Null);
	assert_eq!(
		SettingValue::from(vec!["a", "b"]),
		SettingValue::List(vec!["a".into(), "b".into()])
	);
	assert!(SettingValue::from(None::<u8>).is_null());

	assert_eq!(u8::from_setting(SettingValue::Int(200)), Ok(200));
	assert_eq!(
		u8::from_setting(SettingValue::Int(300)),
		Err(ValueError::OutOfRange {
			value: "300".to_string(),
			target: "u8",
		})
	);
	assert_eq!(f64::from_setting(SettingValue::Int(2)), Ok(2.0));
	assert_eq!(f32::from_setting(SettingValue::Float(0.5)), Ok(0.5));
	assert_eq!(
		f32::from_setting(SettingValue::Float(1e300)),
		Err(ValueError::OutOfRange {
			value: 1e300_f64.to_string(),
			target: "f32",
		})
	);
	assert_eq!(Option::<bool>::from_setting(SettingValue::Null), Ok(None));
	assert_eq!(
		Vec::<String>::from_setting(SettingValue::from(vec!["x"])),
		Ok(vec!["x".to_string()])
	);
	assert_eq!(
		bool::from_setting(SettingValue::Float(1.0)),
		Err(ValueError::TypeMismatch {
			expected: "bool",
			got: "float",
		})
	);
}

#[test]
fn unsigned_values_above_i64_keep_their_value() {
	assert_eq!(SettingValue::from(7u64), SettingValue::Int(7));
	assert_eq!(SettingValue::from(u64::MAX), SettingValue::UInt(u64::MAX));
	assert_eq!(SettingValue::from(u64::MAX).type_name(), "int");
	assert_eq!(SettingValue::from(u64::MAX).as_int(), None);
	assert_eq!(SettingValue::Int(-1).as_uint(), None);

	assert_eq!(u64::from_setting(SettingValue::UInt(u64::MAX)), Ok(u64::MAX));
	assert_eq!(u64::from_setting(SettingValue::Int(5)), Ok(5));
	assert_eq!(
		u64::from_setting(SettingValue::Int(-1)),
		Err(ValueError::OutOfRange {
			value: "-1".to_string(),
			target: "u64",
		})
	);
	assert_eq!(
		i64::from_setting(SettingValue::UInt(u64::MAX)),
		Err(ValueError::OutOfRange {
			value: u64::MAX.to_string(),
			target: "i64",
		})
	);

	let json = serde_json::to_string(&SettingValue::from(u64::MAX)).expect("serialize");
	assert_eq!(json, "18446744073709551615");
	let back: SettingValue = serde_json::from_str(&json).expect("deserialize");
	assert_eq!(back, SettingValue::UInt(u64::MAX));
	let negative: SettingValue = serde_json::from_str("-3").expect("deserialize");
	assert_eq!(negative, SettingValue::Int(-3));
}

#[test]
fn component_id_parses_from_json() {
	let ids: Vec<ComponentId> = serde_json::from_str(r#"[12, "new7"]"#).expect("parse ids");
	assert_eq!(ids, vec![ComponentId::Int(12), ComponentId::from("new7")]);
	assert_eq!(ids[0].to_string(), "12");
	assert!(ids[1].is_placeholder());
}
