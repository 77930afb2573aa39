use lru::LruCache;
use std::num::NonZeroUsize;

use crate::plot::raster::rasterize;
use crate::plot::types::{RenderCommand, RenderedFrame};

pub const DEFAULT_FRAME_CACHE: usize = 256;

/// LRU cache of rasterized frames, keyed by frame index.
///
/// Valid for one session only: a frame's pixels depend on the trajectory,
/// trail length and color scale, which are fixed until the session restarts.
pub struct FrameCache {
    cache: LruCache<usize, RenderedFrame>,
    misses: u64,
}

impl FrameCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            misses: 0,
        }
    }

    /// Fetch the raster for `cmd`, rendering it on a miss.
    pub fn get_or_render(&mut self, cmd: &RenderCommand) -> Result<&RenderedFrame, String> {
        if !self.cache.contains(&cmd.frame_index) {
            self.misses += 1;
            let frame = rasterize(cmd)?;
            self.cache.put(cmd.frame_index, frame);
        }
        self.cache
            .get(&cmd.frame_index)
            .ok_or_else(|| format!("frame {} evicted", cmd.frame_index))
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
