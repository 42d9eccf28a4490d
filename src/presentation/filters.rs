/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Filter state rendered into PostgREST query parameters

use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Comparison applied to one column
#[derive(Debug, Clone, Copy, DisplaySimple, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// `eq.<v>`
    #[default]
    Eq,
    /// `neq.<v>`
    Neq,
    /// `ilike.*<v>*`, whitespace turned into wildcards
    Ilike,
    /// `gt.<v>`
    Gt,
    /// `gte.<v>`
    Gte,
    /// `lt.<v>`
    Lt,
    /// `lte.<v>`
    Lte,
    /// `in.(<a>,<b>)`
    In,
    /// `is.<v>`, for `null`, `true`, `false`
    Is,
    /// `fts.<a>&<b>`, full-text search over whitespace separated words
    Fts,
    /// Two-sided range: `gte.<from>` and `lte.<to>` on the same column
    Between,
}

/// Sort direction
#[derive(Debug, Clone, Copy, DisplaySimple, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl OrderDirection {
    fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

/// Value held by one filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Single value
    Single(String),
    /// List of values, for [`FilterOperator::In`]
    List(Vec<String>),
    /// Bounds, for [`FilterOperator::Between`]; either side may be open
    Range(Option<String>, Option<String>),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Single(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Single(value)
    }
}

#[derive(Debug, Clone)]
struct Filter {
    column: String,
    operator: FilterOperator,
    value: Option<FilterValue>,
}

/// Set of column filters plus ordering
///
/// Columns are declared up front with their operator; values are set and
/// cleared as the user edits the form. [`FiltersVm::parameters`] renders the
/// current state as the `data` of a read.
#[derive(Debug, Clone, Default)]
pub struct FiltersVm {
    filters: Vec<Filter>,
    order: Vec<(String, OrderDirection)>,
}

impl FiltersVm {
    /// Declares the filterable columns
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, FilterOperator)>,
        S: Into<String>,
    {
        Self {
            filters: columns
                .into_iter()
                .map(|(column, operator)| Filter {
                    column: column.into(),
                    operator,
                    value: None,
                })
                .collect(),
            order: Vec::new(),
        }
    }

    /// Sets the value of a declared column; unknown columns are ignored
    pub fn set(&mut self, column: &str, value: impl Into<FilterValue>) -> &mut Self {
        if let Some(filter) = self.filters.iter_mut().find(|f| f.column == column) {
            filter.value = Some(value.into());
        }
        self
    }

    /// Clears the value of a column
    pub fn clear(&mut self, column: &str) -> &mut Self {
        if let Some(filter) = self.filters.iter_mut().find(|f| f.column == column) {
            filter.value = None;
        }
        self
    }

    /// Clears every value, keeping declarations and order
    pub fn clear_all(&mut self) -> &mut Self {
        for filter in &mut self.filters {
            filter.value = None;
        }
        self
    }

    /// Replaces the ordering
    pub fn order<I, S>(&mut self, order: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, OrderDirection)>,
        S: Into<String>,
    {
        self.order = order.into_iter().map(|(c, d)| (c.into(), d)).collect();
        self
    }

    /// Renders the non-empty filters and the ordering as query parameters
    #[must_use]
    pub fn parameters(&self) -> Value {
        let mut params = Map::new();
        for filter in &self.filters {
            if let Some(rendered) = filter
                .value
                .as_ref()
                .and_then(|value| render(filter.operator, value))
            {
                params.insert(filter.column.clone(), rendered);
            }
        }

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(column, direction)| format!("{column}.{}", direction.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            params.insert("order".to_string(), Value::String(order));
        }

        Value::Object(params)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn words(value: &str, separator: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(separator)
}

fn render(operator: FilterOperator, value: &FilterValue) -> Option<Value> {
    let text = |s: String| Some(Value::String(s));
    match (operator, value) {
        (FilterOperator::Between, FilterValue::Range(from, to)) => {
            let mut bounds = Vec::new();
            if let Some(from) = from.as_deref().and_then(non_empty) {
                bounds.push(Value::String(format!("gte.{from}")));
            }
            if let Some(to) = to.as_deref().and_then(non_empty) {
                bounds.push(Value::String(format!("lte.{to}")));
            }
            (!bounds.is_empty()).then_some(Value::Array(bounds))
        }
        (_, FilterValue::Range(..)) | (FilterOperator::Between, _) => None,
        (FilterOperator::In, FilterValue::List(items)) => {
            let items: Vec<&str> = items.iter().filter_map(|i| non_empty(i)).collect();
            if items.is_empty() {
                return None;
            }
            text(format!("in.({})", items.join(",")))
        }
        (_, FilterValue::List(_)) => None,
        (operator, FilterValue::Single(raw)) => {
            let v = non_empty(raw)?;
            match operator {
                FilterOperator::Eq => text(format!("eq.{v}")),
                FilterOperator::Neq => text(format!("neq.{v}")),
                FilterOperator::Ilike => text(format!("ilike.*{}*", words(v, "*"))),
                FilterOperator::Gt => text(format!("gt.{v}")),
                FilterOperator::Gte => text(format!("gte.{v}")),
                FilterOperator::Lt => text(format!("lt.{v}")),
                FilterOperator::Lte => text(format!("lte.{v}")),
                FilterOperator::In => text(format!("in.({v})")),
                FilterOperator::Is => text(format!("is.{v}")),
                FilterOperator::Fts => text(format!("fts.{}", words(v, "&"))),
                FilterOperator::Between => None,
            }
        }
    }
}
