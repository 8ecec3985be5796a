//! Deleting property definitions.

use mingle_tests::prelude::*;

#[test]
fn test_delete_unused_property_needs_no_confirmation() {
    let p = Planning::new();

    Scenario::new("delete_estimate")
        .project(p.project.clone())
        .step(
            "delete",
            Action::Delete {
                property: p.estimate,
                confirm: false,
            },
            |a| {
                a.applied()
                    .resolves("estimate", false)
                    .custom(move |project| project.schema().property(p.estimate).is_none())
            },
        )
        .run()
        .unwrap();
}

#[test]
fn test_delete_with_values_asks_first() {
    let p = Planning::new();

    Scenario::new("delete_storysize")
        .project(p.project.clone())
        .step(
            "unconfirmed",
            Action::Delete {
                property: p.storysize,
                confirm: false,
            },
            |a| {
                a.needs_confirmation()
                    .message("2 cards of type Story will lose their value for storysize.")
                    .value(p.login, p.storysize, Value::Number(4.0))
            },
        )
        .step("confirmed", Action::delete(p.storysize), |a| {
            a.applied()
                .resolves("storysize", false)
                .value(p.login, p.storysize, Value::Null)
                .value(p.signup, p.storysize, Value::Null)
                .custom(move |project| !project.schema().is_enabled(p.storysize, p.story))
        })
        .step("again", Action::delete(p.storysize), |a| a.invalid())
        .run()
        .unwrap();
}

#[test]
fn test_delete_cleans_views_transitions_and_defaults() {
    let p = Planning::new();

    Scenario::new("delete_status")
        .project(p.project.clone())
        .step("delete", Action::delete(p.status), |a| {
            a.applied()
                .transitions(0)
                .views(0)
                .value(p.crash, p.status, Value::Null)
                .custom(move |project| project.schema().card_defaults(p.bug).is_none())
        })
        .run()
        .unwrap();
}
