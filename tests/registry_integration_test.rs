//! End-to-end behaviour of the callback registry through its public API.

mod common;

use common::{count_of, counter, InvocationLog};
use pugback::{write_report, CallbackEngine, Status};
use serde_json::{json, Value};

fn engine() -> CallbackEngine<Value> {
    CallbackEngine::new()
}

#[test]
fn on_start_scenario() {
    let engine = engine();
    let log = InvocationLog::new();

    assert_eq!(
        engine.register_handler("A", "onStart", log.recorder("A", 0)),
        Status::CreatedNewGroup
    );
    assert_eq!(
        engine.register_handler("B", "onStart", log.recorder("B", 1)),
        Status::Success
    );

    let payload = json!({"reason": "boot"});
    let report = engine.dispatch_with_report("onStart", &payload).unwrap();
    let statuses: Vec<(&str, Status)> = report
        .outcomes
        .iter()
        .map(|o| (o.handler_name.as_str(), o.status))
        .collect();
    assert_eq!(statuses, vec![("A", Status::Success), ("B", Status::Failure)]);

    assert_eq!(engine.dispatch("onStart", &payload), Status::Success);
    assert_eq!(log.entries(), vec!["A", "B", "A", "B"]);
    assert_eq!(engine.list_group_names(), vec!["onStart"]);
}

#[test]
fn handlers_are_listed_in_registration_order() {
    let engine = engine();
    for name in ["first", "second", "third", "second"] {
        engine.register_handler(name, "ordered", |_| 0);
    }

    let names: Vec<String> = engine
        .list_handlers("ordered")
        .iter()
        .map(|h| h.name().to_string())
        .collect();
    assert_eq!(names, vec!["first", "second", "third", "second"]);
}

#[test]
fn dispatch_to_missing_group_invokes_nothing() {
    let engine = engine();
    let (calls, callable) = counter();
    engine.register_handler("counter", "present", callable);

    assert_eq!(engine.dispatch("absent", &json!({})), Status::Failure);
    assert_eq!(count_of(&calls), 0);
}

#[test]
fn disabled_handler_is_skipped_until_reenabled() {
    let engine = engine();
    let (calls, callable) = counter();
    let (other_calls, other) = counter();
    engine.register_handler("toggled", "onTick", callable);
    engine.register_handler("always", "onTick", other);

    let id = engine.list_handlers("onTick")[0].id();
    assert_eq!(engine.disable_handler("onTick", id), Status::Success);

    engine.dispatch("onTick", &json!(1));
    assert_eq!(count_of(&calls), 0);
    assert_eq!(count_of(&other_calls), 1);

    assert_eq!(engine.enable_handler("onTick", id), Status::Success);
    engine.dispatch("onTick", &json!(2));
    assert_eq!(count_of(&calls), 1);
    assert_eq!(count_of(&other_calls), 2);
}

#[test]
fn panicking_handler_does_not_stop_fan_out() {
    let engine = engine();
    let log = InvocationLog::new();
    engine.register_handler("before", "onCrash", log.recorder("before", 0));
    engine.register_handler("crashes", "onCrash", |payload| {
        let _ = payload["missing"].as_str().unwrap();
        0
    });
    engine.register_handler("after", "onCrash", log.recorder("after", 0));

    let report = engine.dispatch_with_report("onCrash", &json!({})).unwrap();
    assert_eq!(report.outcomes[1].status, Status::Invalid);
    assert!(report.outcomes[1].fault.is_some());
    assert_eq!(report.faulted(), 1);
    assert_eq!(log.entries(), vec!["before", "after"]);

    // Registry is still usable after the fault
    assert_eq!(engine.dispatch("onCrash", &json!({})), Status::Success);
    assert_eq!(engine.list_handlers("onCrash").len(), 3);
}

#[test]
fn delete_group_removes_it_and_missing_delete_fails() {
    let engine = engine();
    engine.register_handler("a", "keep", |_| 0);
    engine.register_handler("b", "drop", |_| 0);

    assert_eq!(engine.delete_group("nope"), Status::Failure);
    assert_eq!(engine.list_group_names(), vec!["keep", "drop"]);

    assert_eq!(engine.delete_group("drop"), Status::Success);
    assert_eq!(engine.list_group_names(), vec!["keep"]);
    assert_eq!(engine.dispatch("drop", &json!({})), Status::Failure);
    assert!(engine.list_handlers("drop").is_empty());

    // Re-registering recreates the group
    assert_eq!(
        engine.register_handler("c", "drop", |_| 0),
        Status::CreatedNewGroup
    );
}

#[test]
fn empty_group_dispatch_after_all_handlers_disabled() {
    let engine = engine();
    engine.register_handler("only", "quiet", |_| 1);
    let id = engine.list_handlers("quiet")[0].id();
    engine.disable_handler("quiet", id);

    let report = engine.dispatch_with_report("quiet", &json!({})).unwrap();
    assert_eq!(report.invoked(), 0);
    assert_eq!(report.skipped(), 1);
    assert_eq!(engine.dispatch("quiet", &json!({})), Status::Success);
}

#[test]
fn text_report_lists_every_group() {
    let engine = engine();
    engine.register_handler("A", "onStart", |_| 0);
    engine.register_handler("B", "onStop", |_| 0);

    let mut out = Vec::new();
    write_report(&engine, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("'onStart'\n"));
    assert!(text.contains("  1: 'A' IsDisabled=false\n"));
    assert!(text.contains("'onStop'\n"));
    assert!(text.contains("  2: 'B' IsDisabled=false\n"));
}
