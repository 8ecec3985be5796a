//! Renaming property definitions.

use mingle_tests::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_rename_round_trip_keeps_values_and_card_types() {
    let p = Planning::new();

    Scenario::new("rename_round_trip")
        .project(p.project.clone())
        .step(
            "rename_size",
            Action::change(ChangeRequest::new(p.size).rename("points")),
            |a| {
                a.applied()
                    .resolves("points", true)
                    .resolves("size", false)
                    .value(p.login, p.size, Value::Number(3.0))
                    .card_types(p.size, [p.story, p.bug, p.task])
                    .custom(move |project| {
                        formula_text(project, p.size_times_two) == "points * 2"
                    })
            },
        )
        .step(
            "rename_back",
            Action::change(ChangeRequest::new(p.size).rename("size")),
            |a| {
                a.applied()
                    .resolves("size", true)
                    .value(p.login, p.size, Value::Number(3.0))
                    .value(p.crash, p.size, Value::Number(2.0))
                    .card_types(p.size, [p.story, p.bug, p.task])
                    .custom(move |project| formula_text(project, p.size_times_two) == "size * 2")
            },
        )
        .run()
        .unwrap();
}

#[test]
fn test_rename_keeps_managed_list_values() {
    let p = Planning::new();

    let project = Scenario::new("rename_managed_list")
        .project(p.project.clone())
        .step(
            "rename_status",
            Action::change(ChangeRequest::new(p.status).rename("State")),
            |a| a.applied().value(p.crash, p.status, Value::from("open")),
        )
        .run()
        .unwrap();

    let status = project.schema().property(p.status).unwrap();
    assert_eq!(status.name, "State");
    assert_eq!(
        status.kind,
        PropertyKind::ManagedList {
            values: vec!["open".into(), "closed".into()],
            numeric: false,
        }
    );
}

#[test]
fn test_rename_to_taken_or_reserved_name_is_invalid() {
    let p = Planning::new();

    Scenario::new("rename_invalid")
        .project(p.project.clone())
        .step(
            "taken",
            Action::change(ChangeRequest::new(p.size).rename("ESTIMATE")),
            |a| a.invalid().resolves("size", true),
        )
        .step(
            "reserved",
            Action::change(ChangeRequest::new(p.size).rename("Number")),
            |a| a.invalid().message("reserved"),
        )
        .step(
            "bad_characters",
            Action::change(ChangeRequest::new(p.size).rename("size [pts]")),
            |a| a.invalid(),
        )
        .step(
            "blank",
            Action::change(ChangeRequest::new(p.size).rename("   ")),
            |a| a.invalid().resolves("size", true),
        )
        .run()
        .unwrap();
}

#[test]
fn test_rename_to_name_with_quote_keeps_formula_readable() {
    let p = Planning::new();

    Scenario::new("rename_with_quote")
        .project(p.project.clone())
        .step(
            "rename_size",
            Action::change(ChangeRequest::new(p.size).rename("size's")),
            |a| {
                a.applied()
                    .resolves("size's", true)
                    .custom(move |project| {
                        formula_text(project, p.size_times_two) == "'size''s' * 2"
                    })
            },
        )
        .step(
            "formula_gains_task",
            Action::change(
                ChangeRequest::new(p.size_times_two)
                    .card_types([p.story, p.task])
                    .confirmed(),
            ),
            |a| {
                a.applied()
                    .card_types(p.size_times_two, [p.story, p.task])
                    .value(p.wiring, p.size_times_two, Value::Number(2.0))
                    .formula_invariant()
            },
        )
        .step(
            "task_leaves_component",
            Action::change(ChangeRequest::new(p.size).card_types([p.story, p.bug])),
            |a| a.needs_confirmation().message("size times two"),
        )
        .step(
            "task_leaves_component_confirmed",
            Action::change(
                ChangeRequest::new(p.size)
                    .card_types([p.story, p.bug])
                    .confirmed(),
            ),
            |a| {
                a.applied()
                    .card_types(p.size_times_two, [p.story])
                    .formula_invariant()
            },
        )
        .run()
        .unwrap();
}

fn formula_text(project: &Project, formula: PropertyDefinitionId) -> String {
    project
        .schema()
        .property(formula)
        .and_then(|f| f.kind.as_formula())
        .map(|f| f.expression.clone())
        .unwrap_or_default()
}
