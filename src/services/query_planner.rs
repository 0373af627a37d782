//! Turns raw listing parameters into a validated [`QueryPlan`].
//!
//! Sort input is matched against the [`SortField`] / [`SortOrder`]
//! whitelists; anything else silently falls back to the configured
//! defaults, so user text never reaches the query builder.

use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::constants::catalog::{DEFAULT_SORT_FIELD, DEFAULT_SORT_ORDER};
use crate::domain::{FilterSpec, ListFilters, SortField, SortOrder, SortSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub sort: SortSpec,
    pub filter: FilterSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPlanner {
    default_field: SortField,
    default_order: SortOrder,
}

impl Default for QueryPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_FIELD, DEFAULT_SORT_ORDER)
    }
}

impl QueryPlanner {
    #[must_use]
    pub const fn new(default_field: SortField, default_order: SortOrder) -> Self {
        Self {
            default_field,
            default_order,
        }
    }

    /// Reads listing defaults from config; unknown values keep the built-in defaults.
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        let field = SortField::parse(&config.default_sort_field).unwrap_or_else(|| {
            warn!(
                value = %config.default_sort_field,
                "Unknown catalog.default_sort_field, using {}", DEFAULT_SORT_FIELD
            );
            DEFAULT_SORT_FIELD
        });

        let order = SortOrder::parse(&config.default_sort_order).unwrap_or_else(|| {
            warn!(
                value = %config.default_sort_order,
                "Unknown catalog.default_sort_order, using {}", DEFAULT_SORT_ORDER
            );
            DEFAULT_SORT_ORDER
        });

        Self::new(field, order)
    }

    #[must_use]
    pub fn plan(
        &self,
        sort_by: Option<&str>,
        order: Option<&str>,
        filters: &ListFilters,
    ) -> QueryPlan {
        let field = sort_by
            .and_then(SortField::parse)
            .unwrap_or(self.default_field);
        let order = order
            .and_then(SortOrder::parse)
            .unwrap_or(self.default_order);

        let plan = QueryPlan {
            sort: SortSpec { field, order },
            filter: FilterSpec {
                title: normalize_needle(filters.title.as_deref()),
                search: normalize_needle(filters.search.as_deref()),
            },
        };

        debug!(?plan, "Planned movie listing");
        plan
    }
}

/// Blank needles mean "no filter"; others are matched lower-cased.
fn normalize_needle(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_filters() -> ListFilters {
        ListFilters::default()
    }

    #[test]
    fn plan_defaults_to_released_ascending() {
        let plan = QueryPlanner::default().plan(None, None, &no_filters());
        assert_eq!(plan.sort.field, SortField::Released);
        assert_eq!(plan.sort.order, SortOrder::Ascending);
        assert!(plan.filter.is_empty());
    }

    #[test]
    fn unknown_sort_field_is_equivalent_to_default() {
        let planner = QueryPlanner::default();
        assert_eq!(
            planner.plan(Some("bogus"), Some("desc"), &no_filters()),
            planner.plan(Some("released"), Some("desc"), &no_filters())
        );
        assert_eq!(
            planner.plan(Some("title; DROP TABLE movies"), None, &no_filters()),
            planner.plan(None, None, &no_filters())
        );
    }

    #[test]
    fn unknown_order_falls_back_to_default() {
        let plan = QueryPlanner::default().plan(Some("rating"), Some("upwards"), &no_filters());
        assert_eq!(plan.sort.field, SortField::Rating);
        assert_eq!(plan.sort.order, SortOrder::Ascending);
    }

    #[test]
    fn filters_are_trimmed_and_lowercased() {
        let filters = ListFilters {
            title: Some("  InCep ".to_string()),
            search: Some("   ".to_string()),
        };
        let plan = QueryPlanner::default().plan(None, None, &filters);
        assert_eq!(plan.filter.title.as_deref(), Some("incep"));
        assert_eq!(plan.filter.search, None);
    }

    #[test]
    fn from_config_applies_configured_defaults() {
        let config = CatalogConfig {
            default_sort_field: "rating".to_string(),
            default_sort_order: "DESC".to_string(),
        };
        let plan = QueryPlanner::from_config(&config).plan(Some("nope"), None, &no_filters());
        assert_eq!(plan.sort.field, SortField::Rating);
        assert_eq!(plan.sort.order, SortOrder::Descending);
    }

    #[test]
    fn from_config_ignores_invalid_values() {
        let config = CatalogConfig {
            default_sort_field: "popularity".to_string(),
            default_sort_order: "random".to_string(),
        };
        assert_eq!(QueryPlanner::from_config(&config), QueryPlanner::default());
    }
}
