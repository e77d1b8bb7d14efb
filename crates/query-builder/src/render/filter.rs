//! Recursive rendering of the filter tree into a WHERE clause body.

use crate::render::{Renderer, value};
use model::query::filter::{CompareOp, Condition, FilterNode, Group, GroupOp};
use serde_json::Value;

/// Renders a filter node. Returns `None` when nothing renders (an empty
/// group, or a condition whose shape cannot produce valid SQL). Nested
/// groups are parenthesized; the top level is left bare.
pub fn filter_sql(node: &FilterNode, top_level: bool, r: &Renderer) -> Option<String> {
    match node {
        FilterNode::Condition(cond) => condition_sql(cond, r),
        FilterNode::Group(group) => group_sql(group, top_level, r),
    }
}

fn group_sql(group: &Group, top_level: bool, r: &Renderer) -> Option<String> {
    let op = match group.op {
        GroupOp::And => " AND ",
        GroupOp::Or => " OR ",
    };
    let rendered: Vec<String> = group
        .elements
        .iter()
        .filter_map(|child| filter_sql(child, false, r))
        .collect();
    if rendered.is_empty() {
        return None;
    }

    let body = rendered.join(op);
    if top_level {
        Some(body)
    } else {
        Some(format!("({body})"))
    }
}

fn condition_sql(cond: &Condition, r: &Renderer) -> Option<String> {
    let column = r.qualify(&cond.source_field);
    match cond.operator {
        CompareOp::IsNull => Some(format!("{column} IS NULL")),
        CompareOp::IsNotNull => Some(format!("{column} IS NOT NULL")),
        CompareOp::Like => Some(format!("{column} LIKE {}", value::format_like(&cond.value))),
        CompareOp::In => Some(format!("{column} IN ({})", value::format_list(&cond.value))),
        CompareOp::NotIn => Some(format!(
            "{column} NOT IN ({})",
            value::format_list(&cond.value)
        )),
        CompareOp::Between => between_sql(&column, &cond.value),
        CompareOp::Eq | CompareOp::Ne | CompareOp::Gt | CompareOp::Gte | CompareOp::Lt
        | CompareOp::Lte => {
            let rhs = if cond.compare_with_other_field {
                r.qualify(cond.target_field.as_ref()?)
            } else {
                value::format_value(&cond.value)
            };
            Some(format!("{column} {} {rhs}", compare_sql(cond.operator)))
        }
    }
}

/// BETWEEN needs exactly two bounds; anything else drops the condition.
fn between_sql(column: &str, bounds: &Value) -> Option<String> {
    let Value::Array(items) = bounds else {
        return None;
    };
    let [low, high] = items.as_slice() else {
        return None;
    };
    Some(format!(
        "{column} BETWEEN {} AND {}",
        value::format_value(low),
        value::format_value(high)
    ))
}

fn compare_sql(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "=",
        CompareOp::Ne => "!=",
        CompareOp::Gt => ">",
        CompareOp::Gte => ">=",
        CompareOp::Lt => "<",
        CompareOp::Lte => "<=",
        // Handled before reaching the plain comparison path.
        _ => unreachable!("not a plain comparison operator"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TableMap;
    use model::query::field::Field;
    use serde_json::json;

    fn tables() -> TableMap {
        TableMap::from([("src-1".to_string(), "t".to_string())])
    }

    fn cond(field: &str, op: CompareOp, value: serde_json::Value) -> FilterNode {
        FilterNode::condition(Field::new("src-1", field), op, value)
    }

    fn render(node: &FilterNode) -> Option<String> {
        let tables = tables();
        let r = Renderer::new(&tables);
        filter_sql(node, true, &r)
    }

    #[test]
    fn top_level_group_renders_bare() {
        let node = FilterNode::group(
            GroupOp::And,
            vec![
                cond("a", CompareOp::Eq, json!(1)),
                cond("b", CompareOp::Eq, json!(2)),
            ],
        );
        assert_eq!(render(&node).unwrap(), "t.a = 1 AND t.b = 2");
    }

    #[test]
    fn nested_groups_are_parenthesized() {
        let node = FilterNode::group(
            GroupOp::And,
            vec![
                cond("a", CompareOp::Eq, json!(1)),
                FilterNode::group(
                    GroupOp::Or,
                    vec![
                        cond("b", CompareOp::Eq, json!(2)),
                        cond("c", CompareOp::Eq, json!(3)),
                    ],
                ),
            ],
        );
        assert_eq!(render(&node).unwrap(), "t.a = 1 AND (t.b = 2 OR t.c = 3)");
    }

    #[test]
    fn empty_group_renders_nothing() {
        let node = FilterNode::group(GroupOp::And, vec![]);
        assert_eq!(render(&node), None);
    }

    #[test]
    fn like_wraps_the_pattern() {
        let node = cond("name", CompareOp::Like, json!("smith"));
        assert_eq!(render(&node).unwrap(), "t.name LIKE '%smith%'");
    }

    #[test]
    fn in_and_not_in_render_lists() {
        let node = cond("region", CompareOp::In, json!(["eu", "us"]));
        assert_eq!(render(&node).unwrap(), "t.region IN ('eu', 'us')");

        let node = cond("region", CompareOp::NotIn, json!(["eu"]));
        assert_eq!(render(&node).unwrap(), "t.region NOT IN ('eu')");
    }

    #[test]
    fn between_requires_two_bounds() {
        let node = cond("amount", CompareOp::Between, json!([10, 20]));
        assert_eq!(render(&node).unwrap(), "t.amount BETWEEN 10 AND 20");

        let node = cond("amount", CompareOp::Between, json!([10]));
        assert_eq!(render(&node), None);
    }

    #[test]
    fn null_checks_take_no_value() {
        let node = cond("deleted_at", CompareOp::IsNull, serde_json::Value::Null);
        assert_eq!(render(&node).unwrap(), "t.deleted_at IS NULL");
    }

    #[test]
    fn column_to_column_comparison_uses_target_field() {
        let node = FilterNode::Condition(Condition {
            id: None,
            operator: CompareOp::Gte,
            value: serde_json::Value::Null,
            source_field: Field::new("src-1", "updated_at"),
            target_field: Some(Field::new("src-1", "created_at")),
            compare_with_other_field: true,
        });
        assert_eq!(render(&node).unwrap(), "t.updated_at >= t.created_at");
    }

    #[test]
    fn column_comparison_without_target_is_dropped() {
        let node = FilterNode::Condition(Condition {
            id: None,
            operator: CompareOp::Eq,
            value: serde_json::Value::Null,
            source_field: Field::new("src-1", "a"),
            target_field: None,
            compare_with_other_field: true,
        });
        assert_eq!(render(&node), None);
    }
}
