//! Configuration for weighted searches

use serde::{Deserialize, Serialize};

/// Options for a weighted [`Pathfinder`](crate::Pathfinder) search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest path cost explored (None = unbounded)
    pub range: Option<u32>,
    /// Assume every cell costs the same to enter, which allows expanding only
    /// the three forward directions of each node. Paths may be suboptimal when
    /// entry costs actually vary.
    pub uniform_on_entry: bool,
    /// Yield nodes when first discovered instead of when settled
    pub permissive: bool,
}

impl SearchConfig {
    /// Config bounded to `range`
    pub fn bounded(range: u32) -> Self {
        Self {
            range: Some(range),
            ..Default::default()
        }
    }

    /// Set the cost bound
    pub fn with_range(mut self, range: Option<u32>) -> Self {
        self.range = range;
        self
    }

    pub fn with_uniform_on_entry(mut self, uniform_on_entry: bool) -> Self {
        self.uniform_on_entry = uniform_on_entry;
        self
    }

    pub fn with_permissive(mut self, permissive: bool) -> Self {
        self.permissive = permissive;
        self
    }

    /// Whether a path cost lies inside the bound
    pub fn admits(&self, cost: u32) -> bool {
        self.range.map_or(true, |range| cost <= range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.range, None);
        assert!(!config.uniform_on_entry);
        assert!(!config.permissive);
        assert!(config.admits(u32::MAX));
    }

    #[test]
    fn test_builders() {
        let config = SearchConfig::bounded(4).with_permissive(true).with_uniform_on_entry(true);
        assert_eq!(config.range, Some(4));
        assert!(config.permissive);
        assert!(config.uniform_on_entry);
        assert!(config.admits(4));
        assert!(!config.admits(5));
        assert_eq!(config.with_range(None).range, None);
    }

    #[test]
    fn test_partial_json() {
        let config: SearchConfig = serde_json::from_str(r#"{"range": 7}"#).unwrap();
        assert_eq!(config, SearchConfig::bounded(7));
    }
}
