//! Gallery filtering.
//!
//! A [`FilteredView`] is the authoritative "visible subset": an ordered list
//! of catalog indices. Gallery visibility and lightbox navigation are both
//! derived from it, never from what the surface happens to display.

use crate::catalog::Catalog;
use crate::types::ImageDescriptor;
use std::fmt;

/// Filter key that selects the whole catalog.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// Parse a filter control key. `"all"` is the sentinel; anything else is
    /// a category, matched exactly.
    pub fn from_key(key: &str) -> Self {
        if key == ALL {
            Filter::All
        } else {
            Filter::Category(key.to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Filter::All => ALL,
            Filter::Category(c) => c,
        }
    }

    pub fn matches(&self, image: &ImageDescriptor) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => image.category == *c,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ordered subset of the catalog selected by a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    filter: Filter,
    members: Vec<usize>,
}

impl FilteredView {
    /// The unfiltered view.
    pub fn all(catalog: &Catalog) -> Self {
        apply_filter(catalog, Filter::All)
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Catalog indices of the members, in catalog order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn contains(&self, catalog_index: usize) -> bool {
        // members are sorted, they come from an in-order scan
        self.members.binary_search(&catalog_index).is_ok()
    }

    /// Member at `position`, resolved against the catalog it was built from.
    pub fn get<'a>(&self, catalog: &'a Catalog, position: usize) -> Option<&'a ImageDescriptor> {
        self.members
            .get(position)
            .and_then(|&index| catalog.get(index))
    }

    /// Position of the first member whose location is `location`.
    pub fn position_of(&self, catalog: &Catalog, location: &str) -> Option<usize> {
        self.members.iter().position(|&index| {
            catalog
                .get(index)
                .is_some_and(|img| img.location == location)
        })
    }

    pub fn images<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = &'a ImageDescriptor> + 'a {
        self.members.iter().filter_map(|&index| catalog.get(index))
    }
}

/// Narrow the catalog to `filter`, preserving catalog order.
///
/// An unmatched category yields an empty view.
pub fn apply_filter(catalog: &Catalog, filter: Filter) -> FilteredView {
    let members = catalog
        .iter()
        .enumerate()
        .filter(|(_, img)| filter.matches(img))
        .map(|(index, _)| index)
        .collect();
    FilteredView { filter, members }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{catalog_of, wedding_catalog};

    #[test]
    fn all_is_the_whole_catalog_in_order() {
        let catalog = wedding_catalog();
        let view = apply_filter(&catalog, Filter::from_key("all"));
        let locations: Vec<&str> = view.images(&catalog).map(|i| i.location.as_str()).collect();
        let expected: Vec<&str> = catalog.iter().map(|i| i.location.as_str()).collect();
        assert_eq!(locations, expected);
    }

    #[test]
    fn category_keeps_only_matches_in_order() {
        let catalog = catalog_of(&["wedding", "portrait", "wedding"]);
        let view = apply_filter(&catalog, Filter::from_key("wedding"));
        assert_eq!(view.members(), &[0, 2]);
        assert!(view.images(&catalog).all(|i| i.category == "wedding"));
    }

    #[test]
    fn absent_category_is_empty() {
        let catalog = wedding_catalog();
        let view = apply_filter(&catalog, Filter::from_key("newborn"));
        assert!(view.is_empty());
        assert_eq!(view.get(&catalog, 0), None);
    }

    #[test]
    fn empty_catalog_filters_to_empty() {
        let catalog = Catalog::default();
        assert!(apply_filter(&catalog, Filter::All).is_empty());
    }

    #[test]
    fn category_match_is_exact() {
        let catalog = catalog_of(&["Wedding", "wedding"]);
        let view = apply_filter(&catalog, Filter::from_key("wedding"));
        assert_eq!(view.members(), &[1]);
    }

    #[test]
    fn position_of_uses_location_identity() {
        let catalog = catalog_of(&["wedding", "portrait", "wedding"]);
        let view = apply_filter(&catalog, Filter::from_key("wedding"));
        let third = catalog.get(2).unwrap().location.clone();
        assert_eq!(view.position_of(&catalog, &third), Some(1));
        let second = catalog.get(1).unwrap().location.clone();
        assert_eq!(view.position_of(&catalog, &second), None);
    }

    #[test]
    fn contains_reports_membership() {
        let catalog = catalog_of(&["a", "b", "a", "b"]);
        let view = apply_filter(&catalog, Filter::from_key("b"));
        assert!(view.contains(1));
        assert!(view.contains(3));
        assert!(!view.contains(0));
    }

    #[test]
    fn filter_key_round_trips_sentinel() {
        assert_eq!(Filter::from_key("all"), Filter::All);
        assert_eq!(Filter::All.key(), "all");
        assert_eq!(Filter::from_key("portrait").to_string(), "portrait");
    }
}
