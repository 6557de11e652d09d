//! Budget targets on the aggregation tree

use std::collections::HashMap;

use super::aggregate::AggregatedNode;
use super::dimension::Dimension;
use crate::models::{Budget, Money};

const MONTHS_PER_YEAR: i64 = 12;

/// Attach `budgeted_total` to every budget-kind node that names an entry of
/// `budget`, at any depth.
///
/// Month children of such a node get the monthly target and year children
/// twelve times it; the node itself gets the sum of those, or the bare
/// target when it has neither. The unassigned bucket is left alone.
pub fn apply_budget_targets(groups: &mut [AggregatedNode], budget: &Budget) {
    let targets: HashMap<String, Money> = budget
        .entries
        .iter()
        .map(|e| (e.id.key(), e.target_amount))
        .collect();
    apply(groups, &targets);
}

fn apply(nodes: &mut [AggregatedNode], targets: &HashMap<String, Money>) {
    for node in nodes {
        if node.groupby_kind == Some(Dimension::Budget) {
            if let Some(&target) = targets.get(&node.group_id) {
                let mut from_children = None;
                for child in &mut node.subgroups {
                    let child_target = match child.groupby_kind {
                        Some(Dimension::Month) => target,
                        Some(Dimension::Year) => target.times(MONTHS_PER_YEAR),
                        _ => continue,
                    };
                    child.budgeted_total = Some(child_target);
                    *from_children.get_or_insert(Money::zero()) += child_target;
                }
                node.budgeted_total = Some(from_children.unwrap_or(target));
            }
        }
        apply(&mut node.subgroups, targets);
    }
}
