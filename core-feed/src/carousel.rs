//! Carousel sampling.

use core_library::Video;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const DEFAULT_CAROUSEL_SIZE: usize = 4;

/// Draws `min(size, len)` distinct videos in random order.
pub struct CarouselSampler {
    size: usize,
    rng: StdRng,
}

impl CarouselSampler {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sampler for tests.
    pub fn seeded(size: usize, seed: u64) -> Self {
        Self {
            size,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sample(&mut self, videos: &[Video]) -> Vec<Video> {
        videos
            .choose_multiple(&mut self.rng, self.size)
            .cloned()
            .collect()
    }
}

impl Default for CarouselSampler {
    fn default() -> Self {
        Self::new(DEFAULT_CAROUSEL_SIZE)
    }
}

impl std::fmt::Debug for CarouselSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselSampler")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn videos(n: usize) -> Vec<Video> {
        (0..n)
            .map(|i| Video {
                id: i.to_string(),
                title: format!("Video {i}"),
                thumbnail_url: String::new(),
                duration: String::new(),
                upload_time: String::new(),
                views: String::new(),
                author: String::new(),
                video_url: format!("https://example.com/{i}.mp4"),
                description: String::new(),
                subscriber: String::new(),
                is_live: false,
            })
            .collect()
    }

    #[test]
    fn test_sample_size_is_bounded() {
        let mut sampler = CarouselSampler::new(4);
        for n in 0..10 {
            let pool = videos(n);
            assert_eq!(sampler.sample(&pool).len(), n.min(4));
        }
    }

    #[test]
    fn test_sample_is_distinct_subset() {
        let pool = videos(20);
        let ids: HashSet<_> = pool.iter().map(|v| v.id.clone()).collect();
        let mut sampler = CarouselSampler::default();

        for _ in 0..50 {
            let picked = sampler.sample(&pool);
            let unique: HashSet<_> = picked.iter().map(|v| v.id.clone()).collect();
            assert_eq!(unique.len(), picked.len());
            assert!(unique.is_subset(&ids));
        }
    }

    #[test]
    fn test_small_list_returns_everything() {
        let pool = videos(3);
        let mut sampler = CarouselSampler::seeded(4, 7);
        let mut picked: Vec<_> = sampler.sample(&pool).into_iter().map(|v| v.id).collect();
        picked.sort();
        assert_eq!(picked, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let pool = videos(12);
        let a = CarouselSampler::seeded(4, 42).sample(&pool);
        let b = CarouselSampler::seeded(4, 42).sample(&pool);
        assert_eq!(a, b);
    }
}
