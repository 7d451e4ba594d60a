//! In-memory result cache keyed by the scoring engine and the exact
//! (resume, job description) pair
//!
//! The engine part is [`AtsEngine::fingerprint`], so one cache can be shared by
//! engines with different profiles or reference years.

use crate::processing::analyzer::AtsEngine;
use crate::processing::scorer::ScoreResult;
use moka::sync::Cache;

/// (engine fingerprint, resume, job description)
type CacheKey = (String, String, String);

/// Concurrent score cache. Lookups for the same key made while a score is
/// being computed wait for that computation instead of starting another.
pub struct ScoreCache {
    entries: Cache<CacheKey, ScoreResult>,
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCache {
    const DEFAULT_CAPACITY: u64 = 1_000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub fn get_or_score(&self, engine: &AtsEngine, resume: &str, job_description: &str) -> ScoreResult {
        self.get_or_insert_with(&engine.fingerprint(), resume, job_description, || {
            engine.score(resume, job_description)
        })
    }

    /// `scope` separates results computed under different scoring settings.
    pub fn get_or_insert_with<F>(&self, scope: &str, resume: &str, job_description: &str, compute: F) -> ScoreResult
    where
        F: FnOnce() -> ScoreResult,
    {
        let key = (scope.to_string(), resume.to_string(), job_description.to_string());
        self.entries.get_with(key, compute)
    }

    pub fn get(&self, engine: &AtsEngine, resume: &str, job_description: &str) -> Option<ScoreResult> {
        self.entries.get(&(engine.fingerprint(), resume.to_string(), job_description.to_string()))
    }

    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_cached_result_is_reused() {
        let engine = AtsEngine::new().unwrap();
        let cache = ScoreCache::new();

        let first = cache.get_or_score(&engine, "Python developer, 5 years of experience", "Python developer");
        let second = cache.get_or_score(&engine, "Python developer, 5 years of experience", "Python developer");

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert!(cache
            .get(&engine, "Python developer, 5 years of experience", "Python developer")
            .is_some());
    }

    #[test]
    fn test_distinct_pairs_are_distinct_entries() {
        let engine = AtsEngine::new().unwrap();
        let cache = ScoreCache::new();

        cache.get_or_score(&engine, "resume a", "job");
        cache.get_or_score(&engine, "resume b", "job");
        cache.get_or_score(&engine, "resume a", "other job");

        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_profiles_do_not_share_entries() {
        use crate::processing::profile::ScoringProfile;

        let resume = "Senior Python Developer. Experience: 7 years building Django and Flask apps. \
                      Skills: Python, Django, Flask, PostgreSQL. Education: BS Computer Science. Contact: a@b.com";
        let job = "Need 5+ years Python experience with Django and PostgreSQL";
        let detailed = AtsEngine::with_profile(ScoringProfile::detailed()).unwrap().with_reference_year(2025);
        let compact = AtsEngine::with_profile(ScoringProfile::compact()).unwrap().with_reference_year(2025);
        let cache = ScoreCache::new();

        let first = cache.get_or_score(&detailed, resume, job);
        let second = cache.get_or_score(&compact, resume, job);

        assert_eq!(first.total_score, detailed.score(resume, job).total_score);
        assert_eq!(second.total_score, compact.score(resume, job).total_score);
        assert_eq!(second.total_score, second.total_score.trunc());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_reference_year_is_part_of_the_key() {
        let earlier = AtsEngine::new().unwrap().with_reference_year(2020);
        let later = AtsEngine::new().unwrap().with_reference_year(2030);
        let cache = ScoreCache::new();

        cache.get_or_score(&earlier, "Acme 2015 - present", "job");
        assert!(cache.get(&later, "Acme 2015 - present", "job").is_none());
        assert!(cache.get(&earlier, "Acme 2015 - present", "job").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_one_computation_per_key_under_contention() {
        let cache = Arc::new(ScoreCache::new());
        let computations = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let computations = Arc::clone(&computations);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_insert_with("scope", "same resume", "same job", || {
                        computations.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(20));
                        ScoreResult::empty_resume()
                    })
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(computations.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }
}
