//! A formula is only ever enabled where all of its components are.

use mingle_tests::prelude::*;
use proptest::prelude::*;
use proptest::sample::subsequence;
use std::collections::BTreeSet;

fn card_types(p: &Planning) -> Vec<CardTypeId> {
    vec![p.release, p.story, p.task, p.bug]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_formula_card_types_never_outrun_components(picks in subsequence(vec![0usize, 1, 2, 3], 0..=4)) {
        let p = Planning::new();
        let types = card_types(&p);
        let chosen: Vec<CardTypeId> = picks.iter().map(|&i| types[i]).collect();

        let project = Scenario::new("formula_card_types")
            .project(p.project.clone())
            .step(
                "retarget",
                Action::change(
                    ChangeRequest::new(p.size_times_two)
                        .card_types(chosen.clone())
                        .confirmed(),
                ),
                |a| a.formula_invariant(),
            )
            .run()
            .unwrap();

        // size lives on Story, Task and Bug, so only Release can be refused
        let applied = !chosen.contains(&p.release);
        let actual = project.schema().card_types_of(p.size_times_two);
        if applied {
            prop_assert_eq!(actual, chosen.into_iter().collect::<BTreeSet<_>>());
        } else {
            prop_assert_eq!(actual, BTreeSet::from([p.story]));
        }
    }

    #[test]
    fn test_component_card_types_keep_formulas_consistent(picks in subsequence(vec![0usize, 1, 2, 3], 0..=4)) {
        let p = Planning::new();
        let types = card_types(&p);
        let chosen: Vec<CardTypeId> = picks.iter().map(|&i| types[i]).collect();

        Scenario::new("component_card_types")
            .project(p.project.clone())
            .step(
                "retarget",
                Action::change(
                    ChangeRequest::new(p.storysize)
                        .card_types(chosen)
                        .confirmed(),
                ),
                |a| a.applied().formula_invariant(),
            )
            .step(
                "formula_on_storysize",
                Action::change(
                    ChangeRequest::new(p.size_times_two)
                        .formula("storysize + size")
                        .confirmed(),
                ),
                |a| a.formula_invariant(),
            )
            .run()
            .unwrap();
    }
}

#[test]
fn test_repeated_card_type_removal_is_a_noop() {
    let p = Planning::new();
    let request = ChangeRequest::new(p.size).card_types([p.story, p.bug]).confirmed();

    let once = Scenario::new("once")
        .project(p.project.clone())
        .step("remove", Action::change(request.clone()), |a| a.applied())
        .run()
        .unwrap();
    let twice = Scenario::new("twice")
        .project(once.clone())
        .step("remove_again", Action::change(request), |a| a.applied())
        .run()
        .unwrap();

    pretty_assertions::assert_eq!(once, twice);
}
