//! Thread-local cache of compiled regexes for fragment queries.
//!
//! Capped at 256 entries; when full the cache is cleared and rebuilt on
//! demand.

use crate::query::RegexOptions;
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;

const MAX_CACHE_ENTRIES: usize = 256;

thread_local! {
    // Same pattern under different options compiles differently.
    static REGEX_CACHE: RefCell<HashMap<(String, RegexOptions), Regex>> =
        RefCell::new(HashMap::new());
}

/// Get a compiled regex from cache, or compile and cache it.
///
/// `Regex` clones share the compiled program, so hits are cheap.
pub fn get_or_compile(pattern: &str, options: RegexOptions) -> Result<Regex, regex::Error> {
    REGEX_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        let key = (pattern.to_string(), options);

        if let Some(regex) = cache.get(&key) {
            return Ok(regex.clone());
        }

        tracing::trace!(pattern, ?options, "regex cache miss");
        let compiled = options.compile(pattern)?;
        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }
        cache.insert(key, compiled.clone());
        Ok(compiled)
    })
}

/// Clear the regex cache (mainly for testing).
pub fn clear_cache() {
    REGEX_CACHE.with(|cache| {
        cache.borrow_mut().clear();
    });
}

pub fn cache_size() -> usize {
    REGEX_CACHE.with(|cache| cache.borrow().len())
}
