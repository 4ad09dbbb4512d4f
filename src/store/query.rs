use serde_json::Value;

/// Sort direction for a single ORDER column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub sort: SortDirection,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self { column: column.into(), sort: SortDirection::Asc }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self { column: column.into(), sort: SortDirection::Desc }
    }

    /// PostgREST form: `updated_at.desc`
    pub fn to_param(&self) -> String {
        format!("{}.{}", self.column, self.sort.as_str())
    }
}

/// Conjunction of column equality conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single `column = value` filter
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().and_eq(column, value)
    }

    pub fn and_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// True when every condition holds for `row`
    pub fn matches(&self, row: &serde_json::Map<String, Value>) -> bool {
        self.conditions
            .iter()
            .all(|(column, expected)| row.get(column) == Some(expected))
    }

    /// PostgREST query pairs: `("id", "eq.proj-1")`
    pub fn to_params(&self) -> Vec<(String, String)> {
        self.conditions
            .iter()
            .map(|(column, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    Value::Null => "null".to_string(),
                    other => other.to_string(),
                };
                let op = if value.is_null() { "is" } else { "eq" };
                (column.clone(), format!("{}.{}", op, rendered))
            })
            .collect()
    }
}

/// A filtered, optionally ordered SELECT * against one table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub order: Option<Order>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(self.filter.to_params());
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.to_param()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_select_with_filter_and_order() {
        let query = Query::all()
            .filter(Filter::eq("id", "proj-42"))
            .order(Order::desc("updated_at"));

        assert_eq!(
            query.to_params(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("id".to_string(), "eq.proj-42".to_string()),
                ("order".to_string(), "updated_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn renders_non_string_values() {
        let filter = Filter::eq("is_active", true).and_eq("deleted_at", Value::Null);
        assert_eq!(
            filter.to_params(),
            vec![
                ("is_active".to_string(), "eq.true".to_string()),
                ("deleted_at".to_string(), "is.null".to_string()),
            ]
        );
    }

    #[test]
    fn matches_rows_on_every_condition() {
        let row = json!({"id": "proj-1", "status": "DRAFT"});
        let row = row.as_object().unwrap();

        assert!(Filter::eq("id", "proj-1").matches(row));
        assert!(Filter::eq("id", "proj-1").and_eq("status", "DRAFT").matches(row));
        assert!(!Filter::eq("id", "proj-1").and_eq("status", "APPROVED").matches(row));
        assert!(!Filter::eq("missing", "x").matches(row));
        assert!(Filter::new().matches(row));
    }
}
