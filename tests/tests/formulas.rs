//! Formula edits and formula creation.

use mingle_registry::{CardListView, PropertyDefinition};
use mingle_tests::prelude::*;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

#[test]
fn test_formula_and_card_type_change_recomputes_values() {
    let p = Planning::new();

    Scenario::new("size_times_two_to_storysize")
        .project(p.project.clone())
        .step(
            "edit",
            Action::change(
                ChangeRequest::new(p.size_times_two)
                    .formula("storysize * 2")
                    .card_types([p.story]),
            ),
            |a| {
                a.applied()
                    .value(p.login, p.size_times_two, Value::Number(8.0))
                    .value(p.signup, p.size_times_two, Value::Number(3.0))
                    .formula_invariant()
            },
        )
        .run()
        .unwrap();
}

#[test]
fn test_formula_on_card_type_missing_component_is_invalid() {
    let p = Planning::new();

    Scenario::new("storysize_on_bug")
        .project(p.project.clone())
        .step(
            "edit",
            Action::change(
                ChangeRequest::new(p.size_times_two)
                    .formula("storysize * 2")
                    .card_types([p.story, p.bug])
                    .confirmed(),
            ),
            |a| {
                a.invalid()
                    .message("storysize is not available to Bug")
                    .card_types(p.size_times_two, [p.story])
                    .value(p.login, p.size_times_two, Value::Number(6.0))
            },
        )
        .run()
        .unwrap();
}

#[test]
fn test_number_minus_date_creates_nothing() {
    let p = Planning::new();
    let before = p.project.schema.properties().count();

    let project = Scenario::new("two_minus_start_date")
        .project(p.project.clone())
        .step(
            "create",
            Action::create(
                NewProperty::new("days", PropertyKind::Formula(FormulaDef::new("2 - 'start date'")))
                    .on([p.story]),
            ),
            |a| {
                a.invalid()
                    .message("a date (start date) cannot be subtracted from a number (2)")
                    .resolves("days", false)
            },
        )
        .run()
        .unwrap();

    assert_eq!(project.schema().properties().count(), before);
    assert_eq!(project, p.project);
}

#[test]
fn test_date_formulas() {
    let p = Planning::new();

    let project = Scenario::new("date_formulas")
        .project(p.project.clone())
        .step(
            "due",
            Action::create(
                NewProperty::new("due", PropertyKind::Formula(FormulaDef::new("'start date' + 14")))
                    .on([p.story]),
            ),
            |a| a.applied(),
        )
        .step(
            "dates_added",
            Action::create(
                NewProperty::new(
                    "nonsense",
                    PropertyKind::Formula(FormulaDef::new("'start date' + 'start date'")),
                )
                .on([p.story]),
            ),
            |a| a.invalid().message("two dates cannot be added"),
        )
        .step(
            "nested",
            Action::create(
                NewProperty::new("nested", PropertyKind::Formula(FormulaDef::new("due + 1")))
                    .on([p.story]),
            ),
            |a| a.invalid().message("cannot be used within another formula"),
        )
        .run()
        .unwrap();

    let due = project.schema().find_property("due").unwrap().id;
    let login = project.cards().get(p.login).unwrap();
    let signup = project.cards().get(p.signup).unwrap();
    assert_eq!(login.value(due), &date("2024-03-15"));
    assert_eq!(signup.value(due), &Value::Null);
}

#[test]
fn test_views_on_detached_formula_are_destroyed() {
    // `estimate doubled` lives on Story and Bug; "Bug doubles" groups Bug
    // cards by it
    let p = Planning::new();
    let mut project = p.project.clone();
    let schema = project.schema_mut();
    let doubled = schema.allocate_property_id();
    schema.put_property(PropertyDefinition::new(
        doubled,
        "estimate doubled",
        PropertyKind::Formula(FormulaDef::new("estimate * 2")),
    ));
    schema.associate(doubled, p.story).unwrap();
    schema.associate(doubled, p.bug).unwrap();
    let bug_doubles = schema.allocate_view_id();
    let mut view = CardListView::new(bug_doubles, "Bug doubles");
    view.card_types = BTreeSet::from([p.bug]);
    view.group_by = Some(doubled);
    schema.put_view(view);
    let request = ChangeRequest::new(p.estimate).card_types([p.story]);

    Scenario::new("detach_formula_with_view")
        .project(project)
        .step("unconfirmed", Action::change(request.clone()), |a| {
            a.needs_confirmation()
                .message("The following 1 saved view will be deleted: Bug doubles.")
                .views(2)
        })
        .step("confirmed", Action::change(request.confirmed()), |a| {
            a.applied()
                .card_types(doubled, [p.story])
                .views(1)
                .formula_invariant()
                .custom(move |project| project.schema().view(bug_doubles).is_none())
        })
        .run()
        .unwrap();
}
