//! Visibility Resolver
//!
//! Reconciles caller-provided columns, a "simple" column subset and inferred columns
//! into one ordered column list plus a show/hide map.

use ahash::{AHashMap, AHashSet};

use super::column::Column;
use crate::constants::DEFAULT_HIDDEN_COLUMNS;

/// Per-column show/hide state
pub type VisibilityMap = AHashMap<String, bool>;

/// Visibility map hiding storage bookkeeping columns
pub fn default_visibility() -> VisibilityMap {
    DEFAULT_HIDDEN_COLUMNS
        .iter()
        .map(|id| (id.to_string(), false))
        .collect()
}

/// Columns without an entry are shown
pub fn is_visible(visibility: &VisibilityMap, id: &str) -> bool {
    visibility.get(id).copied().unwrap_or(true)
}

/// Which reconciliation rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Every inferred column, all visible
    AllInferred,
    /// Every inferred column, visible only when in the simple subset
    Simple,
    /// Explicit columns first, inferred ones appended hidden
    Explicit,
}

impl ResolveMode {
    /// A non-empty simple subset wins over explicit columns
    pub fn select(explicit: &[Column], simple: &[String]) -> Self {
        if !simple.is_empty() {
            ResolveMode::Simple
        } else if !explicit.is_empty() {
            ResolveMode::Explicit
        } else {
            ResolveMode::AllInferred
        }
    }
}

/// Final column list and the visibility covering it
#[derive(Debug, Clone)]
pub struct Resolution {
    pub mode: ResolveMode,
    pub columns: Vec<Column>,
    pub visibility: VisibilityMap,
}

/// Reconcile columns.
///
/// The returned map starts from `prior`, so entries for columns outside the final
/// list are carried along untouched.
pub fn resolve_columns(
    explicit: &[Column],
    simple: &[String],
    inferred: Vec<Column>,
    prior: &VisibilityMap,
) -> Resolution {
    let mode = ResolveMode::select(explicit, simple);
    let mut visibility = prior.clone();

    let columns = match mode {
        ResolveMode::AllInferred => {
            for column in &inferred {
                visibility.insert(column.id.clone(), true);
            }
            inferred
        }
        ResolveMode::Simple => {
            for column in &inferred {
                visibility.insert(column.id.clone(), simple.contains(&column.id));
            }
            inferred
        }
        ResolveMode::Explicit => {
            let provided: AHashSet<&str> = explicit.iter().map(|c| c.id.as_str()).collect();
            let mut columns: Vec<Column> = explicit.to_vec();
            columns.extend(
                inferred
                    .into_iter()
                    .filter(|c| !provided.contains(c.id.as_str())),
            );
            for column in &columns {
                visibility.insert(column.id.clone(), provided.contains(column.id.as_str()));
            }
            columns
        }
    };

    Resolution {
        mode,
        columns,
        visibility,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inferred() -> Vec<Column> {
        ["a", "b", "c"].into_iter().map(Column::inferred).collect()
    }

    fn ids(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_all_inferred_visible() {
        let res = resolve_columns(&[], &[], inferred(), &VisibilityMap::new());
        assert_eq!(res.mode, ResolveMode::AllInferred);
        assert_eq!(ids(&res.columns), vec!["a", "b", "c"]);
        assert!(res.visibility.values().all(|v| *v));
        assert_eq!(res.visibility.len(), 3);
    }

    #[test]
    fn test_simple_subset() {
        let res = resolve_columns(&[], &["b".to_string()], inferred(), &VisibilityMap::new());
        assert_eq!(res.mode, ResolveMode::Simple);
        assert_eq!(res.visibility.get("a"), Some(&false));
        assert_eq!(res.visibility.get("b"), Some(&true));
        assert_eq!(res.visibility.get("c"), Some(&false));
    }

    #[test]
    fn test_explicit_columns_first() {
        let explicit = vec![Column::new("a", "A")];
        let res = resolve_columns(&explicit, &[], inferred(), &VisibilityMap::new());
        assert_eq!(res.mode, ResolveMode::Explicit);
        assert_eq!(ids(&res.columns), vec!["a", "b", "c"]);
        assert_eq!(res.columns[0].label, "A");
        assert_eq!(res.visibility.get("a"), Some(&true));
        assert_eq!(res.visibility.get("b"), Some(&false));
        assert_eq!(res.visibility.get("c"), Some(&false));
    }

    #[test]
    fn test_explicit_column_not_in_data_is_kept() {
        let explicit = vec![Column::new("z", "Z"), Column::new("b", "B")];
        let res = resolve_columns(&explicit, &[], inferred(), &VisibilityMap::new());
        assert_eq!(ids(&res.columns), vec!["z", "b", "a", "c"]);
        assert_eq!(res.visibility.get("z"), Some(&true));
    }

    #[test]
    fn test_simple_subset_wins_over_explicit() {
        let explicit = vec![Column::new("a", "A")];
        let res = resolve_columns(&explicit, &["c".to_string()], inferred(), &VisibilityMap::new());
        assert_eq!(res.mode, ResolveMode::Simple);
        assert_eq!(ids(&res.columns), vec!["a", "b", "c"]);
        assert_eq!(res.columns[0].label, "a");
        assert_eq!(res.visibility.get("a"), Some(&false));
        assert_eq!(res.visibility.get("c"), Some(&true));
    }

    #[test]
    fn test_prior_entries_carried() {
        let prior = default_visibility();
        let res = resolve_columns(&[], &[], inferred(), &prior);
        assert_eq!(res.visibility.get("RowKey"), Some(&false));
        for column in &res.columns {
            assert!(res.visibility.contains_key(&column.id));
        }
    }

    #[test]
    fn test_missing_entry_is_visible() {
        let map = default_visibility();
        assert!(!is_visible(&map, "ETag"));
        assert!(is_visible(&map, "displayName"));
    }

    #[test]
    fn test_all_inferred_overrides_default_hidden() {
        let columns = vec![Column::inferred("id"), Column::inferred("name")];
        let res = resolve_columns(&[], &[], columns, &default_visibility());
        assert_eq!(res.visibility.get("id"), Some(&true));
    }
}
