//! Shared projects for scenarios.

use mingle_analyzer::FormulaAnalyzer;
use mingle_core::{parse_date, CardId, CardTypeId, PropertyDefinitionId, TreeId, Value, ViewId};
use mingle_graph::Project;
use mingle_registry::{
    AggregateFunction, AggregateScope, FilterOperator, PropertyKind, Schema, SchemaBuilder,
};

/// A date value from ISO text. Panics on bad input; fixtures only.
pub fn date(raw: &str) -> Value {
    Value::Date(parse_date(raw).expect("fixture date"))
}

/// Check that every formula's components are enabled wherever the formula is.
pub fn formula_invariant_holds(schema: &Schema) -> bool {
    let analyzer = FormulaAnalyzer::new(schema);
    schema.formulas().all(|formula| {
        let Some(def) = formula.kind.as_formula() else {
            return true;
        };
        let Ok(components) = analyzer.components(&def.expression) else {
            return false;
        };
        schema.card_types_of(formula.id).into_iter().all(|ct| {
            components
                .iter()
                .all(|&component| schema.is_enabled(component, ct))
        })
    })
}

/// A release planning project.
///
/// ```text
/// Release > Story > Task          tree "Planning"
/// Bug
///
/// size            Story Bug Task
/// estimate        Story Bug
/// storysize       Story
/// status          Story Bug       managed list: open, closed
/// start date      Story Task
/// size times two  Story           formula: size * 2
/// Story size      Release         aggregate: SUM(size) over Story
/// ```
///
/// Bug has a transition `close` (open to closed), a card default
/// `status = open`, and a favorite view "Open bugs" filtering on status.
#[derive(Debug, Clone)]
pub struct Planning {
    pub project: Project,
    pub release: CardTypeId,
    pub story: CardTypeId,
    pub task: CardTypeId,
    pub bug: CardTypeId,
    pub tree: TreeId,
    pub size: PropertyDefinitionId,
    pub estimate: PropertyDefinitionId,
    pub storysize: PropertyDefinitionId,
    pub status: PropertyDefinitionId,
    pub start_date: PropertyDefinitionId,
    pub size_times_two: PropertyDefinitionId,
    pub story_size: PropertyDefinitionId,
    pub open_bugs: ViewId,
    pub login: CardId,
    pub signup: CardId,
    pub crash: CardId,
    pub wiring: CardId,
}

impl Planning {
    pub fn new() -> Self {
        let mut b = SchemaBuilder::new();
        let release = b.add_card_type("Release").done().expect("release");
        let story = b.add_card_type("Story").done().expect("story");
        let task = b.add_card_type("Task").done().expect("task");
        let bug = b.add_card_type("Bug").done().expect("bug");

        let size = b
            .add_property("size", PropertyKind::FreeNumber)
            .on(&[story, bug, task])
            .done()
            .expect("size");
        let estimate = b
            .add_property("estimate", PropertyKind::FreeNumber)
            .on(&[story, bug])
            .done()
            .expect("estimate");
        let storysize = b
            .add_property("storysize", PropertyKind::FreeNumber)
            .on(&[story])
            .done()
            .expect("storysize");
        let status = b
            .add_property(
                "status",
                PropertyKind::ManagedList {
                    values: vec!["open".into(), "closed".into()],
                    numeric: false,
                },
            )
            .on(&[story, bug])
            .done()
            .expect("status");
        let start_date = b
            .add_property("start date", PropertyKind::Date)
            .on(&[story, task])
            .done()
            .expect("start date");
        let size_times_two = b
            .add_formula("size times two", "size * 2")
            .on(&[story])
            .done()
            .expect("size times two");

        let tree = b
            .add_tree("Planning")
            .level(release)
            .level(story)
            .level(task)
            .done()
            .expect("tree");
        let story_size = b
            .add_aggregate(
                "Story size",
                tree,
                release,
                AggregateFunction::Sum,
                AggregateScope::CardType(story),
                Some(size),
            )
            .done()
            .expect("story size");

        b.add_transition("close", bug)
            .requires(status, "open")
            .sets(status, "closed")
            .done()
            .expect("close");
        b.card_default(bug, status, "open").expect("default");
        let open_bugs = b
            .add_view("Open bugs")
            .favorite()
            .card_types(&[bug])
            .filter(status, FilterOperator::Is, "open")
            .column(size)
            .done()
            .expect("view");

        let mut project = Project::new("Planning", b.build().expect("schema"));
        let login = project
            .create_card(
                story,
                "Login",
                [
                    (size, Value::Number(3.0)),
                    (storysize, Value::Number(4.0)),
                    (status, Value::from("open")),
                    (start_date, date("2024-03-01")),
                    (size_times_two, Value::Number(6.0)),
                ],
            )
            .expect("login");
        let signup = project
            .create_card(
                story,
                "Signup",
                [
                    (size, Value::Number(5.0)),
                    (storysize, Value::Number(1.5)),
                    (size_times_two, Value::Number(10.0)),
                ],
            )
            .expect("signup");
        let crash = project
            .create_card(
                bug,
                "Crash",
                [(size, Value::Number(2.0)), (status, Value::from("open"))],
            )
            .expect("crash");
        let wiring = project
            .create_card(task, "Wiring", [(size, Value::Number(1.0))])
            .expect("wiring");

        Self {
            project,
            release,
            story,
            task,
            bug,
            tree,
            size,
            estimate,
            storysize,
            status,
            start_date,
            size_times_two,
            story_size,
            open_bugs,
            login,
            signup,
            crash,
            wiring,
        }
    }
}

impl Default for Planning {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planning_satisfies_formula_invariant() {
        let p = Planning::new();
        assert!(formula_invariant_holds(&p.project.schema));
    }
}
