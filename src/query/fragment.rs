use crate::cache;
use crate::query::{FragmentQuery, Predicate, QueryError};
use crate::source::{Fragment, Slice};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Compilation flags for fragment patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegexOptions {
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries.
    pub multi_line: bool,
}

impl Default for RegexOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            multi_line: true,
        }
    }
}

impl RegexOptions {
    pub fn case_sensitive() -> Self {
        Self {
            case_insensitive: false,
            ..Self::default()
        }
    }

    pub fn compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .build()
    }
}

impl Predicate<Fragment<'_>> {
    /// Matches fragments whose contents contain `pattern` (default options).
    pub fn pattern(pattern: &str) -> Result<Self, QueryError> {
        Ok(Self::from_matcher(cache::get_or_compile(
            pattern,
            RegexOptions::default(),
        )?))
    }
}

impl<'d> FragmentQuery<'d> {
    /// Every match of `pattern` inside the selected fragments.
    pub fn subfragments(&self, pattern: &str) -> Result<Self, QueryError> {
        self.subfragments_with_options(pattern, RegexOptions::default(), Predicate::any())
    }

    pub fn subfragments_of(
        &self,
        pattern: &str,
        predicate: impl Into<Predicate<Fragment<'d>>>,
    ) -> Result<Self, QueryError> {
        self.subfragments_with_options(pattern, RegexOptions::default(), predicate)
    }

    pub fn subfragments_with_options(
        &self,
        pattern: &str,
        options: RegexOptions,
        predicate: impl Into<Predicate<Fragment<'d>>>,
    ) -> Result<Self, QueryError> {
        let regex = cache::get_or_compile(pattern, options)?;
        Ok(self.subfragments_by(&regex, predicate))
    }

    /// Run `regex` over each selected fragment, in selection order.
    ///
    /// With capture groups, every participating group of a match becomes a
    /// subfragment, in group order. Without, the whole match does.
    pub fn subfragments_by(
        &self,
        regex: &Regex,
        predicate: impl Into<Predicate<Fragment<'d>>>,
    ) -> Self {
        let predicate = predicate.into();
        let digest = self.digest();
        let grouped = regex.captures_len() > 1;

        let mut found = Vec::new();
        for parent in self.iter() {
            let base = parent.start();
            for captures in regex.captures_iter(parent.contents()) {
                let groups = if grouped { 1..captures.len() } else { 0..1 };
                for m in groups.filter_map(|i| captures.get(i)) {
                    if let Some(fragment) = digest.fragment(base + m.start()..base + m.end()) {
                        found.push(fragment);
                    }
                }
            }
        }

        self.query(found.into_iter().filter(|f| predicate.matches(f)))
    }
}
