use nucleo_matcher::{pattern::Pattern, Matcher};

/// Fuzzy search over file names using nucleo-matcher
pub struct FuzzyFinder {
    matcher: Matcher,
}

impl FuzzyFinder {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Match `query` against each candidate path string.
    /// Returns (candidate_index, score) sorted by score descending, truncated
    /// to `limit`, with scores normalized to 0-1 against the best hit.
    pub fn search(&mut self, query: &str, candidates: &[String], limit: usize) -> Vec<(usize, f32)> {
        let pattern = Pattern::parse(
            query,
            nucleo_matcher::pattern::CaseMatching::Smart,
            nucleo_matcher::pattern::Normalization::Smart,
        );

        let mut scored: Vec<(usize, u32)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(idx, candidate)| {
                let haystack = nucleo_matcher::Utf32String::from(candidate.as_str());
                pattern
                    .score(haystack.slice(..), &mut self.matcher)
                    .map(|score| (idx, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(limit);

        // nucleo scores are u32; normalize against the best hit
        let max_score = scored.first().map(|(_, s)| *s as f32).unwrap_or(1.0);

        scored
            .into_iter()
            .map(|(idx, score)| {
                let normalized = if max_score > 0.0 {
                    score as f32 / max_score
                } else {
                    0.0
                };
                (idx, normalized)
            })
            .collect()
    }
}

impl Default for FuzzyFinder {
    fn default() -> Self {
        Self::new()
    }
}
