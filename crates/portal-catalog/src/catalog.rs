//! The in-memory catalog and its derived views.
//!
//! All views are pure reads recomputed from the current entries and query;
//! nothing here mutates the collection.

use std::collections::BTreeSet;

use portal_model::CatalogEntry;

use crate::query::{ALL_FACET, CatalogQuery, FacetValue, FilterPolicy};

/// The normalized collection produced by the last ingestion cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Entries in ingestion order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the whole collection.
    pub fn replace(&mut self, entries: Vec<CatalogEntry>) {
        self.entries = entries;
    }

    /// Drops every entry, signaling "no data".
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// `All` followed by the distinct categories in ascending order.
    pub fn categories(&self) -> Vec<String> {
        with_all_prefix(self.entries.iter().map(|entry| entry.category.as_str()))
    }

    /// `All` followed by the distinct brands within `category`, ascending.
    pub fn brands(&self, category: &FacetValue) -> Vec<String> {
        with_all_prefix(
            self.entries
                .iter()
                .filter(|entry| category.matches(&entry.category))
                .map(|entry| entry.brand.as_str()),
        )
    }

    /// Entries matching the text query alone, in ingestion order.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&CatalogEntry> {
        let needle = query.needle();
        self.entries
            .iter()
            .filter(|entry| entry.matches_text(&needle))
            .collect()
    }

    /// Entries matching the facet selections alone, in ingestion order.
    pub fn facet_matches(&self, query: &CatalogQuery) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| matches_facets(entry, query))
            .collect()
    }

    /// The primary result set for `query` under `policy`.
    ///
    /// An empty text query with `All`/`All` facets returns every entry.
    /// Results always keep ingestion order.
    pub fn filter(&self, query: &CatalogQuery, policy: FilterPolicy) -> Vec<&CatalogEntry> {
        let needle = query.needle();
        match policy {
            FilterPolicy::Fallback => {
                let results: Vec<&CatalogEntry> = self
                    .entries
                    .iter()
                    .filter(|entry| entry.matches_text(&needle) && matches_facets(entry, query))
                    .collect();
                if results.is_empty() && !needle.is_empty() {
                    let broadened = self.search(query);
                    if !broadened.is_empty() {
                        tracing::debug!(
                            query = %needle,
                            category = %query.category(),
                            brand = %query.brand(),
                            matches = broadened.len(),
                            "facets matched nothing, broadening to text-only results"
                        );
                        return broadened;
                    }
                }
                results
            }
            FilterPolicy::Override => {
                if needle.is_empty() {
                    self.facet_matches(query)
                } else {
                    self.search(query)
                }
            }
        }
    }
}

fn matches_facets(entry: &CatalogEntry, query: &CatalogQuery) -> bool {
    query.category().matches(&entry.category) && query.brand().matches(&entry.brand)
}

fn with_all_prefix<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = values.collect();
    std::iter::once(ALL_FACET)
        .chain(unique)
        .map(str::to_string)
        .collect()
}
