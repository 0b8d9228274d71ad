//! Canonical join keys for administrative-district names.
//!
//! Demographic tables publish names like `경기도 성남시 중원구 도촌동(4113157000)`
//! while boundary files publish `경기도 성남시 중원구 도촌동`, or occasionally the
//! same name with no spaces at all. Both sides reduce to the district token
//! (`도촌동`), which is the join key.

use serde::{Deserialize, Serialize};

/// Which tokens count as a district name and which higher-unit names to peel off
/// space-less compounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// A token is a district name if it contains any of these.
    pub district_suffixes: Vec<String>,
    /// Higher-unit names (province, city, borough) stripped from the front of a
    /// name that has no whitespace.
    pub unit_prefixes: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            district_suffixes: vec!["동".to_string(), "dong".to_string()],
            unit_prefixes: ["경기도", "성남시", "수정구", "중원구", "분당구"]
                .into_iter().map(String::from).collect(),
        }
    }
}

/// Pure name → key functions. Holds configuration only, no state between calls.
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    config: NormalizerConfig,
}

impl NameNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig { &self.config }

    /// Key for a demographic-table name: the last whitespace token naming a district,
    /// cut at its first `(`. `None` when no token names a district.
    pub fn normalize_demographic_name(&self, raw: &str) -> Option<String> {
        raw.split_whitespace().rev()
            .map(strip_parenthetical)
            .find(|token| self.is_district(token))
            .map(str::to_owned)
    }

    /// Key for a boundary admin name: the last token when the name has several,
    /// otherwise the name with leading higher-unit names removed. `None` when the
    /// result does not name a district.
    pub fn normalize_boundary_name(&self, admin_name: &str) -> Option<String> {
        let trimmed = admin_name.trim();
        let mut tokens = trimmed.split_whitespace();

        let candidate = match (tokens.next_back(), tokens.next_back()) {
            (Some(last), Some(_)) => last,
            _ => self.strip_unit_prefixes(trimmed),
        };

        self.is_district(candidate).then(|| candidate.to_owned())
    }

    fn is_district(&self, token: &str) -> bool {
        !token.is_empty() && self.config.district_suffixes.iter().any(|suffix| token.contains(suffix.as_str()))
    }

    fn strip_unit_prefixes<'a>(&self, mut name: &'a str) -> &'a str {
        loop {
            let rest = self.config.unit_prefixes.iter()
                .filter(|prefix| !prefix.is_empty())
                .find_map(|prefix| name.strip_prefix(prefix.as_str()));
            match rest {
                Some(rest) => name = rest,
                None => return name,
            }
        }
    }
}

/// Everything before the first `(`, trimmed.
fn strip_parenthetical(token: &str) -> &str {
    token.split('(').next().unwrap_or(token).trim()
}
