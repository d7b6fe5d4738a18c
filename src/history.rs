use std::collections::HashSet;

use crate::catalog::Sample;

pub const HISTORY_LIMIT: usize = 4;

/// Active result first, then recent results, first occurrence of each id kept,
/// cut to [`HISTORY_LIMIT`].
pub fn visible_history(active: &Sample, recent: &[Sample]) -> Vec<Sample> {
    visible_history_with_limit(active, recent, HISTORY_LIMIT)
}

pub fn visible_history_with_limit(active: &Sample, recent: &[Sample], limit: usize) -> Vec<Sample> {
    let mut seen = HashSet::new();
    std::iter::once(active)
        .chain(recent)
        .filter(|s| seen.insert(s.id))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;

    fn sample(id: u32, prompt: &str) -> Sample {
        catalog()[(id - 1) as usize].to_sample().with_prompt(prompt)
    }

    #[test]
    fn active_comes_first_and_wins_its_id() {
        let active = sample(2, "new");
        let recent = vec![sample(1, "a"), sample(2, "old"), sample(3, "b")];
        let view = visible_history(&active, &recent);
        let ids: Vec<u32> = view.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(view[0].prompt, "new");
    }

    #[test]
    fn later_duplicates_dropped_in_order() {
        let active = sample(1, "x");
        let recent = vec![sample(3, "c1"), sample(3, "c2"), sample(1, "x"), sample(2, "b")];
        let view = visible_history(&active, &recent);
        let prompts: Vec<&str> = view.iter().map(|s| s.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["x", "c1", "b"]);
    }

    #[test]
    fn bounded_to_limit() {
        let active = sample(4, "d");
        let recent: Vec<Sample> = (1..=4).rev().chain(1..=4).map(|id| sample(id, "p")).collect();
        let view = visible_history(&active, &recent);
        assert_eq!(view.len(), HISTORY_LIMIT);
        let ids: HashSet<u32> = view.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), view.len());
        assert_eq!(view[0].id, 4);
    }

    #[test]
    fn custom_limit() {
        let active = sample(1, "a");
        let recent = vec![sample(2, "b"), sample(3, "c")];
        assert_eq!(visible_history_with_limit(&active, &recent, 2).len(), 2);
        assert!(visible_history_with_limit(&active, &recent, 0).is_empty());
    }

    #[test]
    fn empty_recent_still_shows_active() {
        let active = sample(3, "only");
        assert_eq!(visible_history(&active, &[]), vec![active.clone()]);
    }
}
