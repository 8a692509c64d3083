//! Full-text search over the catalog using Tantivy.
//!
//! The index lives entirely in RAM and is built once per session from the
//! flattened item list, after the catalog fetch completes. Until then (and
//! whenever the query is empty) searches return no hits rather than an
//! error. Results are recomputed per call; nothing is memoized.

use std::sync::{Arc, PoisonError, RwLock};

use charcoal_core::{ItemId, MenuItem};
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, FuzzyTermQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{
    Field, IndexRecordOption, NumericOptions, Schema, TextFieldIndexing, TextOptions, Value,
};
use tantivy::{Index, IndexReader, ReloadPolicy, TantivyDocument, Term};
use tracing::{debug, info, instrument, warn};

/// Minimum term length for fuzzy matching; shorter terms get prefix
/// (regex) matching instead.
const FUZZY_MIN_TERM_LEN: usize = 3;

const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Search errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Index error: {0}")]
    Index(String),
    #[error("Query error: {0}")]
    Query(String),
    #[error("Build error: {0}")]
    Build(String),
}

/// Externally observable index lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

/// A ranked search hit referencing a catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: ItemId,
    pub score: f32,
}

/// Schema field handles for the search index.
#[derive(Clone)]
struct SearchFields {
    id: Field,
    name_text: Field,
    description_text: Field,
    tags_text: Field,
}

struct ReadyIndex {
    #[allow(dead_code)]
    index: Index,
    reader: IndexReader,
    fields: SearchFields,
}

enum IndexState {
    Uninitialized,
    Initializing,
    Ready(ReadyIndex),
    Failed(String),
}

/// The catalog search index.
///
/// Cheaply cloneable; all clones share one lifecycle state.
#[derive(Clone)]
pub struct SearchIndex {
    inner: Arc<RwLock<IndexState>>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    /// Create a new index in the `Uninitialized` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(IndexState::Uninitialized)),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> IndexStatus {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match *guard {
            IndexState::Uninitialized => IndexStatus::Uninitialized,
            IndexState::Initializing => IndexStatus::Initializing,
            IndexState::Ready(_) => IndexStatus::Ready,
            IndexState::Failed(_) => IndexStatus::Failed,
        }
    }

    /// Build the index from the flattened item list.
    ///
    /// The first call transitions `Uninitialized` to `Initializing` and then
    /// to `Ready` (or `Failed`). Calls that arrive while a build is running,
    /// or after one succeeded, are no-ops. A failed build may be retried.
    ///
    /// # Errors
    ///
    /// Returns an error if index construction fails; the same message is
    /// recorded in the `Failed` state.
    #[instrument(skip_all, fields(items = items.len()))]
    pub fn build(&self, items: &[MenuItem]) -> Result<(), SearchError> {
        {
            let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            match *guard {
                IndexState::Initializing | IndexState::Ready(_) => {
                    debug!("Index build already done or in flight, skipping");
                    return Ok(());
                }
                IndexState::Uninitialized | IndexState::Failed(_) => {
                    *guard = IndexState::Initializing;
                }
            }
        }

        match Self::build_ready(items) {
            Ok(ready) => {
                info!(items = items.len(), "Search index ready");
                *self.inner.write().unwrap_or_else(PoisonError::into_inner) =
                    IndexState::Ready(ready);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Search index build failed");
                *self.inner.write().unwrap_or_else(PoisonError::into_inner) =
                    IndexState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn build_ready(items: &[MenuItem]) -> Result<ReadyIndex, SearchError> {
        let (schema, fields) = Self::build_schema();
        let index = Index::create_in_ram(schema);

        index.tokenizers().register(
            "en_stem",
            tantivy::tokenizer::TextAnalyzer::builder(
                tantivy::tokenizer::SimpleTokenizer::default(),
            )
            .filter(tantivy::tokenizer::RemoveLongFilter::limit(40))
            .filter(tantivy::tokenizer::LowerCaser)
            .filter(tantivy::tokenizer::Stemmer::new(
                tantivy::tokenizer::Language::English,
            ))
            .build(),
        );

        let mut writer = index
            .writer(WRITER_HEAP_BYTES)
            .map_err(|e| SearchError::Build(format!("Failed to create writer: {e}")))?;

        for item in items {
            let mut doc = TantivyDocument::default();
            doc.add_i64(fields.id, item.id.as_i64());
            doc.add_text(fields.name_text, &item.name);
            doc.add_text(fields.description_text, &item.description);
            doc.add_text(fields.tags_text, item.tags.join(" "));
            writer
                .add_document(doc)
                .map_err(|e| SearchError::Build(format!("Failed to add document: {e}")))?;
        }

        writer
            .commit()
            .map_err(|e| SearchError::Build(format!("Failed to commit index: {e}")))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| SearchError::Index(format!("Failed to create reader: {e}")))?;

        Ok(ReadyIndex {
            index,
            reader,
            fields,
        })
    }

    fn build_schema() -> (Schema, SearchFields) {
        let mut schema_builder = Schema::builder();

        let id = schema_builder.add_i64_field(
            "id",
            NumericOptions::default().set_stored().set_indexed(),
        );

        let text_indexing = TextFieldIndexing::default()
            .set_tokenizer("en_stem")
            .set_index_option(IndexRecordOption::WithFreqsAndPositions);
        let text_options = TextOptions::default().set_indexing_options(text_indexing);

        let name_text = schema_builder.add_text_field("name_text", text_options.clone());
        let description_text =
            schema_builder.add_text_field("description_text", text_options.clone());
        let tags_text = schema_builder.add_text_field("tags_text", text_options);

        let schema = schema_builder.build();
        let fields = SearchFields {
            id,
            name_text,
            description_text,
            tags_text,
        };
        (schema, fields)
    }

    /// Search the catalog, returning ranked item ids.
    ///
    /// Empty or whitespace-only queries, and searches before the index is
    /// ready, return no hits.
    ///
    /// # Errors
    ///
    /// Returns an error if the search query fails to execute.
    #[instrument(skip(self))]
    // Allow: the read guard must outlive `ready`, which borrows from it for
    // the whole search.
    #[allow(clippy::significant_drop_tightening)]
    pub fn search(&self, query_str: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        let query_str = query_str.trim().to_lowercase();
        if query_str.is_empty() {
            return Ok(Vec::new());
        }

        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let IndexState::Ready(ready) = &*guard else {
            return Ok(Vec::new());
        };

        let searcher = ready.reader.searcher();

        let mut subqueries: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for term in query_str.split_whitespace() {
            if term.len() < FUZZY_MIN_TERM_LEN {
                // Prefix match via regex so "br" finds "brisket"
                let prefix_pattern = format!("{}.*", escape_regex(term));
                if let Ok(regex_query) =
                    RegexQuery::from_pattern(&prefix_pattern, ready.fields.name_text)
                {
                    subqueries.push((Occur::Should, Box::new(regex_query)));
                }
                if let Ok(regex_query) =
                    RegexQuery::from_pattern(&prefix_pattern, ready.fields.tags_text)
                {
                    subqueries.push((Occur::Should, Box::new(regex_query)));
                }
            } else {
                let name_term = Term::from_field_text(ready.fields.name_text, term);
                subqueries.push((
                    Occur::Should,
                    Box::new(TermQuery::new(name_term.clone(), IndexRecordOption::Basic)),
                ));
                subqueries.push((
                    Occur::Should,
                    Box::new(FuzzyTermQuery::new(name_term, 1, true)),
                ));

                let desc_term = Term::from_field_text(ready.fields.description_text, term);
                subqueries.push((
                    Occur::Should,
                    Box::new(FuzzyTermQuery::new(desc_term, 1, true)),
                ));

                let tags_term = Term::from_field_text(ready.fields.tags_text, term);
                subqueries.push((
                    Occur::Should,
                    Box::new(TermQuery::new(tags_term, IndexRecordOption::Basic)),
                ));
            }
        }

        let query = BooleanQuery::new(subqueries);
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit))
            .map_err(|e| SearchError::Query(format!("Search failed: {e}")))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc = searcher
                .doc::<TantivyDocument>(doc_address)
                .map_err(|e| SearchError::Query(format!("Failed to retrieve doc: {e}")))?;
            let id = doc
                .get_first(ready.fields.id)
                .and_then(|v| v.as_i64())
                .ok_or_else(|| SearchError::Query("Document missing id field".to_string()))?;
            hits.push(SearchHit {
                id: ItemId::new(id),
                score,
            });
        }
        Ok(hits)
    }

    /// Number of indexed documents, or 0 before the index is ready.
    #[must_use]
    pub fn num_docs(&self) -> u64 {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match &*guard {
            IndexState::Ready(ready) => ready.reader.searcher().num_docs(),
            _ => 0,
        }
    }
}

/// Escape regex metacharacters in a user-supplied term.
fn escape_regex(term: &str) -> String {
    term.chars()
        .flat_map(|c| match c {
            '.' | '*' | '+' | '?' | '^' | '$' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\' => {
                vec!['\\', c]
            }
            _ => vec![c],
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(id: i64, name: &str, description: &str, tags: &[&str]) -> MenuItem {
        MenuItem {
            id: ItemId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            price: dec!(10),
            image: String::new(),
            category: "Mains".to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            available: true,
            calories: None,
            nutrition: None,
            dietary: None,
            allergens: Vec::new(),
            ingredients: Vec::new(),
            pairings: Vec::new(),
        }
    }

    fn sample_items() -> Vec<MenuItem> {
        vec![
            item(1, "Smoked Brisket Plate", "Twelve-hour oak smoke", &["smoked", "beef"]),
            item(2, "Charred Leeks", "Ember-roasted with romesco", &["vegetarian", "vegan"]),
            item(3, "Burnt Basque Cheesecake", "Caramelized top", &["dessert"]),
        ]
    }

    #[test]
    fn test_lifecycle_transitions() {
        let index = SearchIndex::new();
        assert_eq!(index.status(), IndexStatus::Uninitialized);

        index.build(&sample_items()).unwrap();
        assert_eq!(index.status(), IndexStatus::Ready);
        assert_eq!(index.num_docs(), 3);
    }

    #[test]
    fn test_rebuild_after_ready_is_a_no_op() {
        let index = SearchIndex::new();
        index.build(&sample_items()).unwrap();

        // A second build with different items changes nothing
        index.build(&[item(9, "Other", "", &[])]).unwrap();
        assert_eq!(index.num_docs(), 3);
    }

    #[test]
    fn test_search_before_ready_returns_empty() {
        let index = SearchIndex::new();
        assert!(index.search("brisket", 10).unwrap().is_empty());
    }

    #[test]
    fn test_empty_query_returns_empty() {
        let index = SearchIndex::new();
        index.build(&sample_items()).unwrap();
        assert!(index.search("", 10).unwrap().is_empty());
        assert!(index.search("   ", 10).unwrap().is_empty());
    }

    #[test]
    fn test_exact_and_fuzzy_name_match() {
        let index = SearchIndex::new();
        index.build(&sample_items()).unwrap();

        let hits = index.search("brisket", 10).unwrap();
        assert_eq!(hits[0].id, ItemId::new(1));

        // One edit away still matches
        let hits = index.search("briskit", 10).unwrap();
        assert!(hits.iter().any(|h| h.id == ItemId::new(1)));
    }

    #[test]
    fn test_short_term_prefix_match() {
        let index = SearchIndex::new();
        index.build(&sample_items()).unwrap();

        let hits = index.search("ch", 10).unwrap();
        let ids: Vec<ItemId> = hits.iter().map(|h| h.id).collect();
        assert!(ids.contains(&ItemId::new(2)));
        assert!(ids.contains(&ItemId::new(3)));
    }

    #[test]
    fn test_tag_match() {
        let index = SearchIndex::new();
        index.build(&sample_items()).unwrap();

        let hits = index.search("vegan", 10).unwrap();
        assert_eq!(hits[0].id, ItemId::new(2));
    }

    #[test]
    fn test_limit_is_respected() {
        let index = SearchIndex::new();
        index.build(&sample_items()).unwrap();

        let hits = index.search("smoked charred burnt", 2).unwrap();
        assert!(hits.len() <= 2);
    }
}
