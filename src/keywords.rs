use std::collections::HashSet;

use crate::error::{Result, TagbookError};
use crate::models::{Keyword, KeywordId};
use crate::store::Store;

/// Snapshot of the keyword rules used to tag descriptions.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    rules: Vec<Keyword>,
}

impl KeywordIndex {
    /// Build an index from stored rules. An empty keyword would match every
    /// description, so it is rejected here rather than silently applied.
    pub fn new(rules: Vec<Keyword>) -> Result<Self> {
        if rules.iter().any(|r| r.keyword.trim().is_empty()) {
            return Err(TagbookError::EmptyKeyword);
        }
        Ok(Self { rules })
    }

    pub fn load<S: Store>(store: &S) -> Result<Self> {
        Self::new(store.all_keywords()?)
    }

    /// Tags of every rule whose keyword occurs in the lowercased description.
    pub fn match_tags(&self, description: &str) -> HashSet<String> {
        let description = description.to_lowercase();
        self.rules
            .iter()
            .filter(|r| description.contains(&r.keyword))
            .map(|r| r.tag.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Store a new keyword rule. The keyword is lowercased but otherwise kept
/// verbatim, so `" bp "` only matches a padded `bp`. Tags may not contain a
/// comma since that is the separator of the stored tag list.
///
/// Every stored transaction is stale afterwards; callers must follow up with
/// a full [`crate::propagator::recompute_all`].
pub fn add_keyword<S: Store>(store: &mut S, keyword: &str, tag: &str) -> Result<Keyword> {
    let keyword = keyword.to_lowercase();
    let tag = tag.trim();
    if keyword.trim().is_empty() {
        return Err(TagbookError::EmptyKeyword);
    }
    if tag.is_empty() {
        return Err(TagbookError::EmptyTag);
    }
    if tag.contains(',') {
        return Err(TagbookError::InvalidTag(tag.to_string()));
    }
    if store.all_keywords()?.iter().any(|k| k.keyword == keyword) {
        return Err(TagbookError::DuplicateKeyword(keyword));
    }
    let stored = store.insert_keyword(&keyword, tag)?;
    tracing::info!(id = stored.id, keyword = %stored.keyword, tag = %stored.tag, "keyword added");
    Ok(stored)
}

/// Delete a keyword rule. Same follow-up obligation as [`add_keyword`].
pub fn remove_keyword<S: Store>(store: &mut S, id: KeywordId) -> Result<Keyword> {
    let removed = store.delete_keyword(id)?;
    tracing::info!(id, keyword = %removed.keyword, "keyword removed");
    Ok(removed)
}
