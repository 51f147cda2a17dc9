use std::collections::HashMap;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::dataset::parse_records;
use super::error::{TaxonomyError, TaxonomyResult};
use crate::hashing::{fingerprint, short_hex};
use crate::text::tokenize;

/// Fixed fallback categories used when no dataset can be loaded.
pub const EMERGENCY_CATEGORIES: &[(&str, &str)] = &[
    ("gid://shopify/TaxonomyCategory/emergency-1", "Apparel & Accessories"),
    ("gid://shopify/TaxonomyCategory/emergency-2", "Home & Garden"),
    ("gid://shopify/TaxonomyCategory/emergency-3", "Electronics"),
    ("gid://shopify/TaxonomyCategory/emergency-4", "Health & Beauty"),
    ("gid://shopify/TaxonomyCategory/emergency-5", "Sports & Outdoors"),
    ("gid://shopify/TaxonomyCategory/emergency-6", "Toys & Games"),
    ("gid://shopify/TaxonomyCategory/emergency-7", "Food & Beverages"),
];

/// A single taxonomy category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    /// Opaque category identifier from the dataset.
    pub id: String,
    /// Full hierarchical path, e.g. `"Home & Garden > Kitchen & Dining"`.
    pub path: String,
    /// Lowercased `path`, used for substring matching and exact lookup.
    #[serde(skip)]
    pub path_lower: String,
}

impl CategoryNode {
    fn new(id: impl Into<String>, path: &str) -> Self {
        let path = path.trim().to_string();
        let path_lower = path.to_lowercase();
        Self {
            id: id.into(),
            path,
            path_lower,
        }
    }
}

/// Where an index's categories came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    /// Built from a taxonomy dataset.
    Dataset,
    /// Built from [`EMERGENCY_CATEGORIES`] after a load failure.
    Emergency,
}

impl IndexSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexSource::Dataset => "dataset",
            IndexSource::Emergency => "emergency",
        }
    }
}

impl std::fmt::Display for IndexSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only category index: exact path lookup plus a keyword inverted index.
///
/// Nodes are addressed by their position in [`nodes`](Self::nodes), which follows
/// dataset order. Keyword sets keep first-insertion order so scoring iterates
/// them deterministically.
pub struct TaxonomyIndex {
    nodes: Vec<CategoryNode>,
    exact_paths: HashMap<String, usize>,
    keywords: IndexMap<String, IndexSet<usize>>,
    source: IndexSource,
    fingerprint: [u8; 32],
}

impl TaxonomyIndex {
    /// Builds an index from dataset bytes, falling back to the emergency set on any error.
    pub fn build(bytes: &[u8]) -> Self {
        match Self::try_build(bytes) {
            Ok(index) => index,
            Err(e) => {
                warn!(error = %e, "Taxonomy dataset rejected, activating emergency taxonomy");
                Self::emergency()
            }
        }
    }

    /// Builds an index from dataset bytes, surfacing structural errors.
    pub fn try_build(bytes: &[u8]) -> TaxonomyResult<Self> {
        let records = parse_records(bytes)?;
        let total_records = records.len();

        let entries: Vec<(String, String)> = records
            .into_iter()
            .filter_map(|record| record.into_entry())
            .collect();

        if entries.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let mut index = Self::from_entries(entries, IndexSource::Dataset);
        index.fingerprint = fingerprint(bytes);

        info!(
            records = total_records,
            categories = index.len(),
            keywords = index.keyword_count(),
            fingerprint = %short_hex(&index.fingerprint),
            "Taxonomy index built"
        );

        Ok(index)
    }

    /// Reads and builds an index from `path`, falling back to the emergency set on any error.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(index) => index,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Taxonomy load failed, activating emergency taxonomy"
                );
                Self::emergency()
            }
        }
    }

    /// Reads and builds an index from `path`, surfacing I/O and structural errors.
    pub fn try_load(path: impl AsRef<Path>) -> TaxonomyResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading taxonomy");
        let bytes = std::fs::read(path).map_err(|source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::try_build(&bytes)
    }

    /// Builds the fixed seven-category emergency index.
    pub fn emergency() -> Self {
        let entries = EMERGENCY_CATEGORIES
            .iter()
            .map(|(id, path)| (id.to_string(), path.to_string()));
        let index = Self::from_entries(entries, IndexSource::Emergency);
        info!(categories = index.len(), "Emergency taxonomy loaded");
        index
    }

    /// Builds an index directly from `(id, path)` pairs.
    pub fn from_categories<I, S, T>(categories: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<str>,
    {
        let entries = categories
            .into_iter()
            .map(|(id, path)| (id.into(), path.as_ref().to_string()));
        Self::from_entries(entries, IndexSource::Dataset)
    }

    fn from_entries<I>(entries: I, source: IndexSource) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut index = Self {
            nodes: Vec::new(),
            exact_paths: HashMap::new(),
            keywords: IndexMap::new(),
            source,
            fingerprint: [0u8; 32],
        };

        for (id, path) in entries {
            index.insert(CategoryNode::new(id, &path));
        }

        let joined: Vec<&str> = index.nodes.iter().map(|n| n.path.as_str()).collect();
        index.fingerprint = fingerprint(joined.join("\n").as_bytes());

        index
    }

    /// Registers a node. A repeated lowercase path replaces the earlier node in place.
    fn insert(&mut self, node: CategoryNode) {
        let position = match self.exact_paths.get(&node.path_lower) {
            Some(&existing) => {
                debug!(path = %node.path, "Duplicate taxonomy path, last write wins");
                existing
            }
            None => {
                let position = self.nodes.len();
                self.exact_paths.insert(node.path_lower.clone(), position);
                self.nodes.push(node.clone());
                position
            }
        };

        for keyword in tokenize(&node.path) {
            self.keywords.entry(keyword).or_default().insert(position);
        }

        self.nodes[position] = node;
    }

    /// Looks up a category by full path (case-insensitive, trimmed).
    pub fn lookup_exact(&self, path: &str) -> Option<&CategoryNode> {
        self.position_of(path).map(|pos| &self.nodes[pos])
    }

    /// Position of the node with the given full path (case-insensitive, trimmed).
    pub fn position_of(&self, path: &str) -> Option<usize> {
        let key = path.trim().to_lowercase();
        self.exact_paths.get(&key).copied()
    }

    /// All nodes in dataset order.
    #[inline]
    pub fn nodes(&self) -> &[CategoryNode] {
        &self.nodes
    }

    /// Node at `position`, if any.
    #[inline]
    pub fn node(&self, position: usize) -> Option<&CategoryNode> {
        self.nodes.get(position)
    }

    /// Positions of nodes whose tokenized path contains `keyword`.
    pub fn keyword_positions(&self, keyword: &str) -> impl Iterator<Item = usize> + '_ {
        self.keywords
            .get(keyword)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Returns `true` if `keyword` was indexed for the node at `position`.
    pub fn has_keyword(&self, keyword: &str, position: usize) -> bool {
        self.keywords
            .get(keyword)
            .is_some_and(|set| set.contains(&position))
    }

    /// Paths of nodes whose tokenized path contains `keyword`.
    pub fn paths_for_keyword(&self, keyword: &str) -> impl Iterator<Item = &str> + '_ {
        self.keyword_positions(keyword)
            .map(move |pos| self.nodes[pos].path.as_str())
    }

    /// Number of distinct indexed keywords.
    #[inline]
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Number of categories.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the index holds no categories.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Where the categories came from.
    #[inline]
    pub fn source(&self) -> IndexSource {
        self.source
    }

    /// Returns `true` if this is the emergency fallback index.
    #[inline]
    pub fn is_emergency(&self) -> bool {
        self.source == IndexSource::Emergency
    }

    /// BLAKE3 fingerprint of the dataset bytes (or of the joined paths for in-memory builds).
    #[inline]
    pub fn fingerprint(&self) -> &[u8; 32] {
        &self.fingerprint
    }
}

impl std::fmt::Debug for TaxonomyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxonomyIndex")
            .field("categories", &self.nodes.len())
            .field("keywords", &self.keywords.len())
            .field("source", &self.source)
            .field("fingerprint", &short_hex(&self.fingerprint))
            .finish()
    }
}
