//! Session construction: the bounded video pool and the random draw.
//!
//! A session is built in three steps:
//!
//! 1. [`scan`](crate::scan::scan) the directory into images and videos.
//! 2. Sample at most `max_videos` distinct videos (without replacement). This
//!    bounds how many different video files one session can open.
//! 3. Draw `length` entries from images ∪ sampled videos, *with* replacement,
//!    keeping draw order as presentation order.
//!
//! All randomness comes from the caller's [`Rng`], so tests pass a seeded
//! `StdRng` and get the same session every time.

use crate::scan::{self, Inventory, MediaKind};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default bound on distinct videos per session.
pub const DEFAULT_MAX_VIDEOS: usize = 10;

/// One item of a session: what to decode and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolEntry {
    pub kind: MediaKind,
    pub path: PathBuf,
}

/// An ordered practice run plus the video pool it was drawn from.
///
/// Built once per load and replaced wholesale by the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    entries: Vec<PoolEntry>,
    video_pool: Vec<PathBuf>,
}

impl Session {
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }

    pub fn video_pool(&self) -> &[PathBuf] {
        &self.video_pool
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PoolEntry> {
        self.entries.get(index)
    }
}

/// Uniformly sample `min(max_videos, videos.len())` distinct videos.
pub fn sample_video_pool<R: Rng + ?Sized>(
    videos: &[PathBuf],
    max_videos: usize,
    rng: &mut R,
) -> Vec<PathBuf> {
    videos
        .choose_multiple(rng, max_videos.min(videos.len()))
        .cloned()
        .collect()
}

/// Build a session from an already scanned inventory.
pub fn session_from_inventory<R: Rng + ?Sized>(
    inventory: &Inventory,
    length: usize,
    max_videos: usize,
    rng: &mut R,
) -> Session {
    let video_pool = sample_video_pool(&inventory.videos, max_videos, rng);

    let pool: Vec<PoolEntry> = inventory
        .images
        .iter()
        .map(|path| (MediaKind::Image, path))
        .chain(video_pool.iter().map(|path| (MediaKind::Video, path)))
        .map(|(kind, path)| PoolEntry {
            kind,
            path: path.clone(),
        })
        .collect();

    let entries = (0..length)
        .filter_map(|_| pool.choose(rng).cloned())
        .collect();

    Session {
        entries,
        video_pool,
    }
}

/// Scan `dir` and draw a session of `length` entries.
///
/// A missing or unreadable directory yields an empty session rather than an
/// error; callers check [`Session::is_empty`].
#[tracing::instrument(skip(rng))]
pub fn build_session<R: Rng + ?Sized>(
    dir: &Path,
    length: usize,
    max_videos: usize,
    rng: &mut R,
) -> Session {
    let inventory = match scan::scan(dir) {
        Ok(inventory) => inventory,
        Err(e) => {
            tracing::warn!("cannot read media directory: {e}");
            return Session::default();
        }
    };

    let session = session_from_inventory(&inventory, length, max_videos, rng);
    tracing::info!(
        entries = session.len(),
        images = inventory.images.len(),
        videos = session.video_pool().len(),
        "session built"
    );
    session
}
