//! Query specification for message listings.
//!
//! [`build_query_spec`] is the only way a caller's [`IndexQueryOptions`]
//! reach the persistence store. It whitelists filters, maps sort key names to
//! concrete orderings, and bounds pagination.

use murmur_types::message::{Message, MessageType};
use murmur_types::query::{IndexQueryOptions, SORT_CREATED_AT_ASC, SORT_CREATED_AT_DESC};
use serde::Serialize;

use super::SortOrder;

/// Hard cap on the number of rows a single listing may return.
pub const MAX_TAKE: u64 = 1000;

/// Sortable message columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageField {
    CreatedAt,
}

impl MessageField {
    /// Column name in the messages table.
    pub fn column(&self) -> &'static str {
        match self {
            MessageField::CreatedAt => "created_at",
        }
    }
}

/// A validated equality predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WhereClause {
    OwnerId(i64),
    MessageType(MessageType),
    /// Owner filter on a number no stored id can equal, such as `1.5`.
    NoOwner,
}

impl WhereClause {
    pub fn matches(&self, message: &Message) -> bool {
        match self {
            WhereClause::OwnerId(id) => message.owner_id == *id,
            WhereClause::MessageType(t) => message.message_type == *t,
            WhereClause::NoOwner => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderClause {
    pub field: MessageField,
    pub order: SortOrder,
}

/// Recognised sort key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAtDesc,
    CreatedAtAsc,
}

impl SortKey {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            SORT_CREATED_AT_DESC => Some(SortKey::CreatedAtDesc),
            SORT_CREATED_AT_ASC => Some(SortKey::CreatedAtAsc),
            _ => None,
        }
    }

    pub fn order_clause(&self) -> OrderClause {
        match self {
            SortKey::CreatedAtDesc => OrderClause {
                field: MessageField::CreatedAt,
                order: SortOrder::Desc,
            },
            SortKey::CreatedAtAsc => OrderClause {
                field: MessageField::CreatedAt,
                order: SortOrder::Asc,
            },
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::CreatedAtDesc
    }
}

/// Validated, bounded description of a listing.
///
/// `where_clauses` are ANDed. `order_clauses` is never empty and each field
/// appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySpec {
    pub where_clauses: Vec<WhereClause>,
    pub order_clauses: Vec<OrderClause>,
    pub skip: u64,
    pub take: u64,
}

impl QuerySpec {
    /// Whether a message satisfies every where clause.
    pub fn matches(&self, message: &Message) -> bool {
        self.where_clauses.iter().all(|clause| clause.matches(message))
    }
}

/// Build a [`QuerySpec`] from raw caller options.
///
/// Invalid filters and unknown sort keys are dropped, never reported.
pub fn build_query_spec(options: &IndexQueryOptions) -> QuerySpec {
    let mut where_clauses = Vec::new();

    if let Some(clause) = options.filters.user_id.as_ref().and_then(owner_clause) {
        where_clauses.push(clause);
    }

    if let Some(message_type) = options
        .filters
        .message_type
        .as_deref()
        .and_then(|t| t.parse::<MessageType>().ok())
    {
        where_clauses.push(WhereClause::MessageType(message_type));
    }

    let mut order_clauses: Vec<OrderClause> = Vec::new();
    for clause in options
        .sort
        .iter()
        .filter_map(|name| SortKey::from_name(name))
        .map(|key| key.order_clause())
    {
        // A repeated field keeps its first position and takes the later direction.
        match order_clauses.iter_mut().find(|c| c.field == clause.field) {
            Some(existing) => existing.order = clause.order,
            None => order_clauses.push(clause),
        }
    }
    if order_clauses.is_empty() {
        order_clauses.push(SortKey::default().order_clause());
    }

    let skip = match (options.page, options.limit) {
        (Some(page), Some(limit)) if page > 0 && limit > 0 => {
            u64::from(page - 1) * u64::from(limit)
        }
        _ => 0,
    };

    let take = options
        .limit
        .filter(|limit| *limit > 0)
        .map_or(MAX_TAKE, |limit| u64::from(limit).min(MAX_TAKE));

    QuerySpec {
        where_clauses,
        order_clauses,
        skip,
        take,
    }
}

/// Owner filter for any finite JSON number; other values yield no filter.
///
/// Numbers that cannot be an id (fractions, out of range) still filter, and
/// match nothing.
fn owner_clause(value: &serde_json::Value) -> Option<WhereClause> {
    let number = value.as_number()?;
    if let Some(id) = number.as_i64() {
        return Some(WhereClause::OwnerId(id));
    }

    let f = number.as_f64().filter(|f| f.is_finite())?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(WhereClause::OwnerId(f as i64))
    } else {
        Some(WhereClause::NoOwner)
    }
}
