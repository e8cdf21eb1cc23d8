//! PostgREST query-string encoding for collection filters and pages.
//!
//! Pure functions only, so the encoding is testable without a server.

use airdrop_core::filters::{escape_like, CollectionFilters};
use airdrop_core::pagination::PageRequest;

/// Table holding the collection records.
pub const DEFAULT_TABLE: &str = "airdrop_collections";

/// Columns for the list-view projection.
pub const SUMMARY_COLUMNS: &str = "id,name,subtitle,image_url,chain,cost,stage,backers";

/// Stable ordering so pages do not overlap.
pub const ORDERING: &str = "created_at.desc,id.asc";

/// Query-string pairs, in the order they are sent.
pub type QueryParams = Vec<(String, String)>;

/// Wrap a value in double quotes, escaping `"` and `\`, so reserved
/// characters (`,` `.` `:` `(` `)`) inside it are taken literally.
pub fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// `eq.` predicate for a top-level column parameter.
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

/// OR-combined case-insensitive substring match on name and subtitle.
///
/// PostgREST turns every `*` in an `ilike` operand into `%` and offers no
/// escape for it, so `*` is dropped from the term.
pub fn search_clause(term: &str) -> String {
    let term: String = term.chars().filter(|&c| c != '*').collect();
    let pattern = quote_value(&format!("*{}*", escape_like(&term)));
    format!("(name.ilike.{pattern},subtitle.ilike.{pattern})")
}

/// Predicates for every set filter field.
pub fn filter_params(filters: &CollectionFilters) -> QueryParams {
    let mut params = QueryParams::new();

    if let Some(chain) = &filters.chain {
        params.push(("chain".into(), eq(chain)));
    }
    if let Some(stage) = filters.stage {
        params.push(("stage".into(), eq(stage)));
    }
    if let Some(cost) = filters.cost {
        params.push(("cost".into(), eq(cost)));
    }
    if let Some(search) = &filters.search {
        params.push(("or".into(), search_clause(search)));
    }

    params
}

/// `offset`/`limit` pair covering one page.
pub fn page_params(request: PageRequest) -> QueryParams {
    vec![
        ("offset".into(), request.offset().to_string()),
        ("limit".into(), request.limit().to_string()),
    ]
}

/// Single-row lookup by primary key.
pub fn id_params(id: &str) -> QueryParams {
    vec![("id".into(), eq(id)), ("limit".into(), "1".into())]
}

/// Extract the total from a `Content-Range` header (`0-9/42`, `*/42`).
pub fn parse_content_range(value: &str) -> Option<i64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
