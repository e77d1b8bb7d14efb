//! Clause-ordered rendering of the full query.

use crate::render::{Renderer, filter};
use model::query::{
    Pagination, QueryOption,
    field::Field,
    filter::CompareOp,
    join::{JoinCondition, JoinSpec},
};

pub fn render_query(query: &QueryOption, main_table: &str, r: &mut Renderer) {
    // 1. SELECT
    r.sql.push_str("SELECT ");
    if query.fields.is_empty() {
        r.sql.push('*');
    } else {
        for (i, field) in query.fields.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            render_projection(field, r);
        }
    }

    // 2. FROM
    r.sql.push_str(" FROM ");
    r.sql.push_str(main_table);

    // 3. JOIN
    for join in &query.joins {
        render_join(join, r);
    }

    // 4. WHERE
    if let Some(filters) = &query.filters {
        if let Some(clause) = filter::filter_sql(filters, true, r) {
            r.sql.push_str(" WHERE ");
            r.sql.push_str(&clause);
        }
    }

    // 5. GROUP BY
    if !query.group_by.is_empty() {
        r.sql.push_str(" GROUP BY ");
        r.sql.push_str(&query.group_by.join(", "));
    }

    // 6. HAVING
    if !query.having.is_empty() {
        r.sql.push_str(" HAVING ");
        for (i, agg) in query.having.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            render_aggregation(agg, r);
        }
    }

    // 7. ORDER BY
    if !query.sort.is_empty() {
        r.sql.push_str(" ORDER BY ");
        for (i, sort) in query.sort.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push_str(&sort.field);
            r.sql.push(' ');
            r.sql.push_str(sort.direction.as_sql());
        }
    }

    // 8. LIMIT / OFFSET
    if let Some(pagination) = &query.pagination {
        render_pagination(pagination, r);
    }
}

fn render_projection(field: &Field, r: &mut Renderer) {
    let mut column = String::new();
    if let Some(prefix) = field.prefix.as_deref().filter(|p| !p.is_empty()) {
        column.push_str(prefix);
        column.push(' ');
    }
    column.push_str(&r.qualify(field));

    match field.function {
        Some(function) => {
            r.sql.push_str(function.as_sql());
            r.sql.push('(');
            r.sql.push_str(&column);
            r.sql.push(')');
        }
        None => r.sql.push_str(&column),
    }

    if let Some(alias) = field.alias.as_deref().filter(|a| !a.is_empty()) {
        r.sql.push_str(" AS ");
        r.sql.push_str(alias);
    }
}

/// HAVING entries render the aggregation itself; the default alias is
/// `<function>_<field>`.
fn render_aggregation(field: &Field, r: &mut Renderer) {
    let column = field.column_name().to_string();
    match field.function {
        Some(function) => {
            r.sql.push_str(function.as_sql());
            r.sql.push('(');
            r.sql.push_str(&column);
            r.sql.push(')');
            r.sql.push_str(" AS ");
            match field.alias.as_deref().filter(|a| !a.is_empty()) {
                Some(alias) => r.sql.push_str(alias),
                None => {
                    r.sql.push_str(function.lower());
                    r.sql.push('_');
                    r.sql.push_str(&column);
                }
            }
        }
        None => r.sql.push_str(&column),
    }
}

fn render_join(join: &JoinSpec, r: &mut Renderer) {
    let target = join
        .table
        .as_deref()
        .and_then(|id| r.resolve(id))
        .or(join.table_name.as_deref())
        .map(str::to_string);
    // A join whose target cannot be resolved is omitted like any other
    // malformed optional section.
    let Some(target) = target else {
        return;
    };

    r.sql.push(' ');
    r.sql.push_str(join.kind.as_sql());
    r.sql.push_str(" JOIN ");
    r.sql.push_str(&target);

    let conditions: Vec<String> = join
        .conditions
        .iter()
        .filter_map(join_condition_sql)
        .collect();
    if !conditions.is_empty() {
        r.sql.push_str(" ON ");
        r.sql.push_str(&conditions.join(" AND "));
    }
}

/// Only EQ/GT/GTE/LT/LTE are legal join operators; anything else drops the
/// condition without error.
fn join_condition_sql(cond: &JoinCondition) -> Option<String> {
    let op = match cond.operator {
        CompareOp::Eq => "=",
        CompareOp::Gt => ">",
        CompareOp::Gte => ">=",
        CompareOp::Lt => "<",
        CompareOp::Lte => "<=",
        _ => return None,
    };
    Some(format!(
        "{}.{} {op} {}.{}",
        cond.left_table, cond.left_field, cond.right_table, cond.right_field
    ))
}

fn render_pagination(pagination: &Pagination, r: &mut Renderer) {
    let Some(size) = pagination.size else {
        return;
    };
    r.sql.push_str(" LIMIT ");
    r.sql.push_str(&size.to_string());

    let page = pagination.page.unwrap_or(1);
    if page > 1 {
        r.sql.push_str(" OFFSET ");
        r.sql.push_str(&(u64::from(page - 1) * u64::from(size)).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TableMap, compile};
    use model::query::{
        SourceRef,
        field::AggregateFunction,
        filter::{FilterNode, GroupOp},
        join::JoinKind,
        sort::{Sort, SortDirection},
    };
    use serde_json::json;

    fn tables() -> TableMap {
        TableMap::from([
            ("src-1".to_string(), "orders".to_string()),
            ("src-2".to_string(), "customers".to_string()),
        ])
    }

    fn join(kind: JoinKind, target: &str, conditions: Vec<JoinCondition>) -> JoinSpec {
        JoinSpec {
            table: Some(target.to_string()),
            table_name: None,
            table_alias: None,
            kind,
            conditions,
        }
    }

    fn join_cond(op: CompareOp) -> JoinCondition {
        JoinCondition {
            left_table: "orders".to_string(),
            left_field: "customer_id".to_string(),
            right_table: "customers".to_string(),
            right_field: "id".to_string(),
            operator: op,
        }
    }

    #[test]
    fn fields_resolve_through_the_source_map() {
        let query = QueryOption {
            fields: vec![
                Field::new("src-1", "amount").with_alias("total"),
                Field::new("src-1", "region"),
            ],
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT orders.amount AS total, orders.region FROM orders"
        );
    }

    #[test]
    fn aggregate_and_prefix_wrap_the_projection() {
        let query = QueryOption {
            fields: vec![
                Field::new("src-1", "customer_id")
                    .with_function(AggregateFunction::Count)
                    .with_prefix("DISTINCT")
                    .with_alias("buyers"),
            ],
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT COUNT(DISTINCT orders.customer_id) AS buyers FROM orders"
        );
    }

    #[test]
    fn unresolved_source_falls_back_to_the_bare_column() {
        let query = QueryOption {
            fields: vec![Field::new("missing", "amount")],
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT amount FROM orders"
        );
    }

    #[test]
    fn joins_render_with_on_conditions() {
        let query = QueryOption {
            joins: vec![join(
                JoinKind::Left,
                "src-2",
                vec![join_cond(CompareOp::Eq), join_cond(CompareOp::Gte)],
            )],
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT * FROM orders LEFT JOIN customers \
             ON orders.customer_id = customers.id AND orders.customer_id >= customers.id"
        );
    }

    #[test]
    fn illegal_join_operator_drops_the_condition() {
        let query = QueryOption {
            joins: vec![join(
                JoinKind::Inner,
                "src-2",
                vec![join_cond(CompareOp::Like), join_cond(CompareOp::Eq)],
            )],
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT * FROM orders INNER JOIN customers ON orders.customer_id = customers.id"
        );
    }

    #[test]
    fn cross_join_renders_without_on() {
        let query = QueryOption {
            joins: vec![join(JoinKind::Cross, "src-2", vec![])],
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT * FROM orders CROSS JOIN customers"
        );
    }

    #[test]
    fn where_clause_joins_top_level_conditions() {
        let query = QueryOption {
            filters: Some(FilterNode::group(
                GroupOp::And,
                vec![
                    FilterNode::condition(Field::new("src-1", "a"), CompareOp::Eq, json!(1)),
                    FilterNode::condition(Field::new("src-1", "b"), CompareOp::Eq, json!(2)),
                ],
            )),
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT * FROM orders WHERE orders.a = 1 AND orders.b = 2"
        );
    }

    #[test]
    fn group_by_and_having_render_after_where() {
        let query = QueryOption {
            group_by: vec!["region".to_string()],
            having: vec![Field::new("src-1", "amount").with_function(AggregateFunction::Sum)],
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT * FROM orders GROUP BY region HAVING SUM(amount) AS sum_amount"
        );
    }

    #[test]
    fn aggregation_alias_overrides_the_default() {
        let query = QueryOption {
            having: vec![
                Field::new("src-1", "amount")
                    .with_function(AggregateFunction::Avg)
                    .with_alias("mean"),
            ],
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT * FROM orders HAVING AVG(amount) AS mean"
        );
    }

    #[test]
    fn order_by_renders_direction_per_key() {
        let query = QueryOption {
            sort: vec![
                Sort::new("amount", SortDirection::Desc),
                Sort::new("region", SortDirection::Asc),
            ],
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT * FROM orders ORDER BY amount DESC, region ASC"
        );
    }

    #[test]
    fn first_page_has_no_offset() {
        let query = QueryOption {
            pagination: Some(Pagination {
                page: Some(1),
                size: Some(10),
            }),
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT * FROM orders LIMIT 10"
        );
    }

    #[test]
    fn later_pages_compute_the_offset() {
        let query = QueryOption {
            pagination: Some(Pagination {
                page: Some(2),
                size: Some(10),
            }),
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT * FROM orders LIMIT 10 OFFSET 10"
        );
    }

    #[test]
    fn missing_size_omits_the_limit_clause() {
        let query = QueryOption {
            pagination: Some(Pagination {
                page: Some(3),
                size: None,
            }),
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT * FROM orders"
        );
    }

    #[test]
    fn full_query_renders_clauses_in_order() {
        let query = QueryOption {
            source: Some(SourceRef {
                id: "src-1".to_string(),
                source_type: "csv".to_string(),
            }),
            fields: vec![Field::new("src-1", "region")],
            filters: Some(FilterNode::condition(
                Field::new("src-1", "status"),
                CompareOp::Ne,
                json!("void"),
            )),
            joins: vec![join(JoinKind::Inner, "src-2", vec![join_cond(CompareOp::Eq)])],
            group_by: vec!["region".to_string()],
            having: vec![Field::new("src-1", "amount").with_function(AggregateFunction::Sum)],
            sort: vec![Sort::new("region", SortDirection::Asc)],
            pagination: Some(Pagination {
                page: Some(2),
                size: Some(25),
            }),
            ..Default::default()
        };
        assert_eq!(
            compile(&query, &tables(), "orders").unwrap(),
            "SELECT orders.region FROM orders \
             INNER JOIN customers ON orders.customer_id = customers.id \
             WHERE orders.status != 'void' \
             GROUP BY region \
             HAVING SUM(amount) AS sum_amount \
             ORDER BY region ASC \
             LIMIT 25 OFFSET 25"
        );
    }
}
