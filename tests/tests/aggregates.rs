//! Changes that would break aggregate properties.

use mingle_tests::prelude::*;

#[test]
fn test_orphaning_aggregate_target_is_blocked() {
    let p = Planning::new();

    Scenario::new("remove_story_from_size")
        .project(p.project.clone())
        .step(
            "drop_story",
            Action::change(
                ChangeRequest::new(p.size)
                    .card_types([p.bug, p.task])
                    .confirmed(),
            ),
            |a| {
                a.blocked()
                    .message("size is used as the target property of Story size.")
                    .card_types(p.size, [p.story, p.bug, p.task])
                    .value(p.login, p.size, Value::Number(3.0))
                    .value(p.login, p.size_times_two, Value::Number(6.0))
            },
        )
        .run()
        .unwrap();
}

#[test]
fn test_card_type_outside_aggregate_scope_may_go() {
    let p = Planning::new();

    Scenario::new("remove_task_from_size")
        .project(p.project.clone())
        .step(
            "unconfirmed",
            Action::change(ChangeRequest::new(p.size).card_types([p.story, p.bug])),
            |a| a.needs_confirmation().message("1 card of type Task"),
        )
        .step(
            "confirmed",
            Action::change(
                ChangeRequest::new(p.size)
                    .card_types([p.story, p.bug])
                    .confirmed(),
            ),
            |a| {
                a.applied()
                    .card_types(p.size, [p.story, p.bug])
                    .value(p.wiring, p.size, Value::Null)
                    .value(p.login, p.size, Value::Number(3.0))
            },
        )
        .run()
        .unwrap();
}

#[test]
fn test_aggregate_formula_target_must_stay_numeric() {
    let p = Planning::new();
    let mut project = p.project.clone();
    // Story size reads the formula instead of size.
    let mut story_size = project.schema.property(p.story_size).unwrap().clone();
    if let PropertyKind::Aggregate(def) = &mut story_size.kind {
        def.target = Some(p.size_times_two);
    }
    project.schema.put_property(story_size);

    Scenario::new("date_formula_under_aggregate")
        .project(project)
        .step(
            "make_date",
            Action::change(
                ChangeRequest::new(p.size_times_two)
                    .formula("'start date' + 2")
                    .confirmed(),
            ),
            |a| {
                a.blocked()
                    .message("must remain numeric")
                    .value(p.login, p.size_times_two, Value::Number(6.0))
            },
        )
        .step(
            "drop_story_from_component",
            Action::change(
                ChangeRequest::new(p.size)
                    .card_types([p.bug, p.task])
                    .confirmed(),
            ),
            |a| a.blocked().message("which is the target property of Story size"),
        )
        .run()
        .unwrap();
}

#[test]
fn test_blocking_wins_over_warnings() {
    let p = Planning::new();

    Scenario::new("delete_size")
        .project(p.project.clone())
        .step("delete", Action::delete(p.size), |a| {
            a.blocked()
                .message("size is used as a component property of size times two.")
                .resolves("size", true)
                .transitions(1)
                .views(1)
        })
        .run()
        .unwrap();
}
