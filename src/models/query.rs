//! List query model: filter criteria plus pagination, and the query-string
//! parameters they are built from.

use serde::Deserialize;
use std::str::FromStr;
use utoipa::IntoParams;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Comparison operator of a filter criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Equals,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    DoesNotEqual,
}

impl QueryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            QueryOperator::Equals => "=",
            QueryOperator::LessThan => "<",
            QueryOperator::GreaterThan => ">",
            QueryOperator::LessThanOrEqual => "<=",
            QueryOperator::GreaterThanOrEqual => ">=",
            QueryOperator::DoesNotEqual => "!=",
        }
    }
}

impl FromStr for QueryOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(QueryOperator::Equals),
            "<" => Ok(QueryOperator::LessThan),
            ">" => Ok(QueryOperator::GreaterThan),
            "<=" => Ok(QueryOperator::LessThanOrEqual),
            ">=" => Ok(QueryOperator::GreaterThanOrEqual),
            "!=" => Ok(QueryOperator::DoesNotEqual),
            other => Err(format!("unknown query operator '{}'", other)),
        }
    }
}

impl std::fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

/// One filter constraint: `field operator value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub field: String,
    pub operator: QueryOperator,
    pub value: FilterValue,
}

impl Criterion {
    pub fn equals(field: impl Into<String>, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            operator: QueryOperator::Equals,
            value,
        }
    }
}

/// Storage-agnostic description of a list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub criteria: Vec<Criterion>,
    pub skip: u64,
    pub limit: i64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            criteria: Vec::new(),
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Recognized query-string parameters of the list endpoint.
///
/// Values are kept as raw strings so that malformed numbers fall back
/// to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page size (default: 10)
    pub size: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Exact author match
    pub author: Option<String>,
    /// Exact status match (1 = checked in, 2 = checked out)
    pub status: Option<String>,
    /// Exact rating match
    pub rating: Option<String>,
}

impl ListParams {
    pub fn into_list_query(self) -> ListQuery {
        let limit = self
            .size
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);

        let mut criteria = Vec::new();
        if let Some(author) = self.author {
            criteria.push(Criterion::equals(
                "author",
                FilterValue::Text(author.replace('+', " ")),
            ));
        }
        // Unparsable numbers filter on 0
        for (field, raw) in [("status", self.status), ("rating", self.rating)] {
            if let Some(raw) = raw {
                let value = raw.trim().parse::<i64>().unwrap_or(0);
                criteria.push(Criterion::equals(field, FilterValue::Integer(value)));
            }
        }

        ListQuery {
            criteria,
            skip: (limit.saturating_mul(page - 1)) as u64,
            limit,
        }
    }
}
