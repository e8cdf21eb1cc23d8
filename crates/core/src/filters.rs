//! Filter predicates for listing collections.
//!
//! All set fields are AND-combined. The free-text `search` term is the only
//! OR: it matches a case-insensitive substring of either name or subtitle.

use serde::{Deserialize, Serialize};

use crate::collection::{AirdropCollection, Stage};
use crate::error::CoreError;
use crate::pagination::PageRequest;

/// Query-string literal selecting free airdrops.
pub const COST_LABEL_FREE: &str = "FREE";

/// Query-string literal selecting paid airdrops.
pub const COST_LABEL_PAID: &str = "PAID";

/// Stored cost value for free airdrops.
pub const COST_FREE: f64 = 0.0;

/// Cost value the `PAID` label is matched against.
pub const COST_PAID: f64 = 1.0;

/// Search terms are cut to this many characters.
pub const MAX_SEARCH_CHARS: usize = 100;

/// Map a `FREE`/`PAID` query literal to the numeric cost it filters on.
/// Unrecognised labels select no cost filter.
pub fn parse_cost_label(label: &str) -> Option<f64> {
    let label = label.trim();
    if label.eq_ignore_ascii_case(COST_LABEL_FREE) {
        Some(COST_FREE)
    } else if label.eq_ignore_ascii_case(COST_LABEL_PAID) {
        Some(COST_PAID)
    } else {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionFilters {
    pub search: Option<String>,
    pub chain: Option<String>,
    pub stage: Option<Stage>,
    pub cost: Option<f64>,
}

impl CollectionFilters {
    /// Build filters from raw query-string values. Blank values are unset.
    ///
    /// The search term loses any `*` (a wildcard on the REST backend) and is
    /// cut to [`MAX_SEARCH_CHARS`], so every backend matches it the same way
    /// and cache keys stay bounded. Fails only when `stage` names an unknown
    /// stage.
    pub fn from_query(
        search: Option<&str>,
        chain: Option<&str>,
        cost: Option<&str>,
        stage: Option<&str>,
    ) -> Result<Self, CoreError> {
        let stage = non_blank(stage).map(str::parse::<Stage>).transpose()?;

        Ok(Self {
            search: non_blank(search).and_then(normalize_search),
            chain: non_blank(chain).map(str::to_string),
            stage,
            cost: non_blank(cost).and_then(parse_cost_label),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.chain.is_none() && self.stage.is_none() && self.cost.is_none()
    }

    /// Whether `record` satisfies every set predicate.
    pub fn matches(&self, record: &AirdropCollection) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = record.name.to_lowercase().contains(&term)
                || record.subtitle.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        if self.chain.as_ref().is_some_and(|chain| *chain != record.chain) {
            return false;
        }

        if self.stage.is_some_and(|stage| stage != record.stage) {
            return false;
        }

        // A record without a cost never equals a cost filter.
        if self.cost.is_some_and(|cost| record.cost != Some(cost)) {
            return false;
        }

        true
    }

    /// Stable string form used inside cache keys.
    pub fn cache_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Cache key for a filtered page.
pub fn filtered_cache_key(filters: &CollectionFilters, request: PageRequest) -> String {
    format!(
        "filtered-airdrops-{}-{}-{}",
        filters.cache_key(),
        request.page,
        request.page_size
    )
}

/// Escape `%`, `_` and `\` so a search term matches literally inside `ILIKE`.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn normalize_search(term: &str) -> Option<String> {
    let term: String = term
        .chars()
        .filter(|&c| c != '*')
        .take(MAX_SEARCH_CHARS)
        .collect();
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
