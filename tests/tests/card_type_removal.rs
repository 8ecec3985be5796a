//! Removing card types from a property definition.

use mingle_registry::{CardListView, CardType, Transition};
use mingle_tests::prelude::*;
use pretty_assertions::assert_eq;
use std::collections::{BTreeMap, BTreeSet};

#[test]
fn test_removing_card_type_nulls_values_and_deletes_transitions() {
    let p = Planning::new();
    let request = ChangeRequest::new(p.status).card_types([p.story]);

    Scenario::new("remove_bug_from_status")
        .project(p.project.clone())
        .step("unconfirmed", Action::change(request.clone()), |a| {
            a.needs_confirmation()
                .message("1 card of type Bug will lose their value for status.")
                .message("The following 1 transition will be deleted: close.")
                .message("The following 1 team favorite will be deleted: Open bugs.")
                .value(p.crash, p.status, Value::from("open"))
                .transitions(1)
                .views(1)
        })
        .step("confirmed", Action::change(request.clone().confirmed()), |a| {
            a.applied()
                .value(p.crash, p.status, Value::Null)
                .value(p.login, p.status, Value::from("open"))
                .card_types(p.status, [p.story])
                .transitions(0)
                .views(0)
                .custom(move |project| project.schema().card_defaults(p.bug).is_none())
        })
        .step("repeated", Action::change(request), |a| {
            a.applied()
                .card_types(p.status, [p.story])
                .value(p.login, p.status, Value::from("open"))
        })
        .run()
        .unwrap();
}

#[test]
fn test_removing_formula_component_detaches_formula() {
    let p = Planning::new();

    Scenario::new("remove_story_from_estimate")
        .project(p.project.clone())
        .step(
            "add_estimate_formula",
            Action::create(
                NewProperty::new(
                    "double estimate",
                    PropertyKind::Formula(FormulaDef::new("estimate * 2")),
                )
                .on([p.story, p.bug]),
            ),
            |a| a.applied().resolves("double estimate", true),
        )
        .step(
            "drop_bug",
            Action::change(
                ChangeRequest::new(p.estimate)
                    .card_types([p.story])
                    .confirmed(),
            ),
            |a| {
                a.applied()
                    .card_types(p.estimate, [p.story])
                    .formula_invariant()
                    .custom(move |project| {
                        project
                            .schema()
                            .find_property("double estimate")
                            .map(|f| project.schema().card_types_of(f.id))
                            .is_some_and(|types| types.len() == 1 && types.contains(&p.story))
                    })
            },
        )
        .run()
        .unwrap();
}

#[test]
fn test_failed_change_leaves_project_unchanged() {
    let p = Planning::new();
    let before = p.project.clone();

    let after = Scenario::new("status_on_unknown_card_type")
        .project(p.project.clone())
        .step(
            "unknown_card_type",
            Action::change(
                ChangeRequest::new(p.status)
                    .card_types([p.story, CardTypeId::new(99)])
                    .confirmed(),
            ),
            |a| a.invalid(),
        )
        .run()
        .unwrap();

    assert_eq!(after, before);
}

#[test]
fn test_deleting_card_type_removes_its_views_and_transitions() {
    // Epic has a transition, a view filtered to Epic alone and a view over
    // Epic and Bug
    let p = Planning::new();
    let mut project = p.project.clone();
    let schema = project.schema_mut();
    let epic = schema.allocate_card_type_id();
    schema.put_card_type(CardType::new(epic, "Epic", 4));
    let promote = schema.allocate_transition_id();
    schema.put_transition(Transition {
        id: promote,
        name: "promote".into(),
        card_type: epic,
        requires: BTreeMap::new(),
        sets: BTreeMap::new(),
    });
    let epics = schema.allocate_view_id();
    let mut view = CardListView::new(epics, "Epics");
    view.card_types = BTreeSet::from([epic]);
    view.group_by = Some(p.status);
    schema.put_view(view);
    let mixed = schema.allocate_view_id();
    let mut view = CardListView::new(mixed, "Epics and bugs");
    view.card_types = BTreeSet::from([epic, p.bug]);
    schema.put_view(view);

    let project = Scenario::new("delete_epic")
        .project(project)
        .step("bug_has_cards", Action::delete_card_type(p.bug), |a| {
            a.invalid().transitions(2).views(3)
        })
        .step("delete_epic", Action::delete_card_type(epic), |a| {
            a.applied()
                .transitions(1)
                .views(2)
                .custom(move |project| project.schema().view(epics).is_none())
        })
        .step("already_gone", Action::delete_card_type(epic), |a| a.invalid())
        .run()
        .unwrap();

    assert_eq!(
        project.schema().view(mixed).unwrap().card_types,
        BTreeSet::from([p.bug])
    );
    assert!(project.schema().transition(promote).is_none());
    assert!(project.schema().card_type(epic).is_none());
}
