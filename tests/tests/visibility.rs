//! Hiding and unhiding property definitions.

use mingle_tests::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_hide_then_unhide_restores_lookup() {
    let p = Planning::new();

    Scenario::new("hide_status")
        .project(p.project.clone())
        .step(
            "unconfirmed",
            Action::Hide {
                property: p.status,
                confirm: false,
            },
            |a| {
                a.needs_confirmation()
                    .message("Open bugs")
                    .resolves("status", true)
                    .views(1)
            },
        )
        .step("hide", Action::hide(p.status), |a| {
            a.applied().resolves("status", false).views(0)
        })
        .step("unhide", Action::unhide(p.status), |a| {
            a.applied()
                .resolves("status", true)
                .card_types(p.status, [p.story, p.bug])
                .value(p.crash, p.status, Value::from("open"))
                .value(p.login, p.status, Value::from("open"))
                .transitions(1)
        })
        .run()
        .unwrap();
}

#[test]
fn test_hidden_property_still_feeds_formulas() {
    let p = Planning::new();

    let project = Scenario::new("formula_on_hidden")
        .project(p.project.clone())
        .step("hide", Action::hide(p.storysize), |a| a.applied())
        .step(
            "create",
            Action::create(
                NewProperty::new("story points", PropertyKind::Formula(FormulaDef::new("storysize + 1")))
                    .on([p.story]),
            ),
            |a| a.applied().resolves("story points", true).resolves("storysize", false),
        )
        .run()
        .unwrap();

    let points = project.schema().find_property("story points").unwrap().id;
    let login = project.cards().get(p.login).unwrap();
    assert_eq!(login.value(points), &Value::Number(5.0));
}

#[test]
fn test_hiding_twice_is_harmless() {
    let p = Planning::new();

    Scenario::new("hide_twice")
        .project(p.project.clone())
        .step("first", Action::hide(p.estimate), |a| a.applied())
        .step("second", Action::hide(p.estimate), |a| {
            a.applied().resolves("estimate", false)
        })
        .step("unhide", Action::unhide(p.estimate), |a| {
            a.applied().resolves("estimate", true)
        })
        .run()
        .unwrap();
}
