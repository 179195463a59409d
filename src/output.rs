//! CLI output formatting for every subcommand.
//!
//! # Information-First Display
//!
//! Output leads with *what* an item is (its position and file name) and shows
//! paths and parameters as indented context lines. Paths are printed relative
//! to the media directory so the listing reads as an inventory.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Images (2)
//!     001 pose-01.jpg
//!     002 pose-02.webp
//!
//! Videos (1)
//!     001 dance.mp4
//! ```
//!
//! ## Session
//!
//! ```text
//! Session (3 items)
//!     001 image pose-02.webp
//!     002 video dance.mp4
//!     003 image pose-01.jpg
//!
//! Video pool (1)
//!     dance.mp4
//! ```
//!
//! ## Inspect
//!
//! ```text
//! 002 dance.mp4
//!     Frame: 1280x720
//!     Origin: decoded
//!     Effects: Gray, Zoom+
//!     Zoom: 1.15  Brightness: 0  Contrast: 1.00
//! ```
//!
//! ## Play
//!
//! ```text
//! [ 3/20]  10%   2.9s  pose-01.jpg
//! ```
//!
//! # Architecture
//!
//! Each subcommand has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::acquire::FrameOrigin;
use crate::effects::{Effect, EffectState, Source};
use crate::imaging::Frame;
use crate::playback::Playback;
use crate::scan::{Inventory, MediaKind};
use crate::session::{PoolEntry, Session};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Path relative to `root` when possible, otherwise as given.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_inventory(inventory: &Inventory, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Images ({})", inventory.images.len()));
    for (i, path) in inventory.images.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), display_path(path, source_root)));
    }

    lines.push(String::new());
    lines.push(format!("Videos ({})", inventory.videos.len()));
    for (i, path) in inventory.videos.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), display_path(path, source_root)));
    }

    if inventory.is_empty() {
        lines.push(String::new());
        lines.push("No usable media found".to_string());
    }

    lines
}

pub fn print_inventory(inventory: &Inventory, source_root: &Path) {
    print_lines(format_inventory(inventory, source_root));
}

// ============================================================================
// Session
// ============================================================================

pub fn format_session(session: &Session, source_root: &Path) -> Vec<String> {
    if session.is_empty() {
        return vec!["Session is empty".to_string()];
    }

    let mut lines = vec![format!("Session ({} items)", session.len())];
    for (i, entry) in session.entries().iter().enumerate() {
        lines.push(format!(
            "    {} {} {}",
            format_index(i + 1),
            kind_label(entry.kind),
            display_path(&entry.path, source_root)
        ));
    }

    if !session.video_pool().is_empty() {
        lines.push(String::new());
        lines.push(format!("Video pool ({})", session.video_pool().len()));
        for path in session.video_pool() {
            lines.push(format!("    {}", display_path(path, source_root)));
        }
    }

    lines
}

pub fn print_session(session: &Session, source_root: &Path) {
    print_lines(format_session(session, source_root));
}

// ============================================================================
// Inspect
// ============================================================================

/// Everything `inspect` reports about one acquired frame.
pub struct FrameReport<'a> {
    pub index: usize,
    pub entry: &'a PoolEntry,
    pub frame: &'a Frame,
    pub origin: &'a FrameOrigin,
    pub applied: &'a [Effect],
    pub state: EffectState,
}

pub fn format_frame_report(report: &FrameReport<'_>, source_root: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {}",
        format_index(report.index + 1),
        display_path(&report.entry.path, source_root)
    )];

    let (width, height) = report.frame.dimensions();
    lines.push(format!("    Frame: {}x{}", width, height));
    lines.push(match report.origin {
        FrameOrigin::Decoded => "    Origin: decoded".to_string(),
        FrameOrigin::Placeholder { reason } => format!("    Origin: placeholder ({})", reason),
    });

    if !report.applied.is_empty() {
        let names: Vec<&str> = report.applied.iter().map(|e| e.name()).collect();
        lines.push(format!("    Effects: {}", names.join(", ")));
    }

    lines.push(format!(
        "    Zoom: {:.2}  Brightness: {}  Contrast: {:.2}",
        report.state.zoom.value(),
        report.state.brightness.value(),
        report.state.contrast.value()
    ));
    lines
}

pub fn print_frame_report(report: &FrameReport<'_>, source_root: &Path) {
    print_lines(format_frame_report(report, source_root));
}

// ============================================================================
// Play
// ============================================================================

/// One status line of the headless drill.
///
/// The position label is right-aligned to the width of the longest label so
/// columns stay put as the index grows.
pub fn format_playback_line(playback: &Playback, entry: &PoolEntry, source_root: &Path) -> String {
    let width = 2 * playback.len().to_string().len() + 1;
    format!(
        "[{:>width$}] {:>3.0}% {:>5.1}s  {}",
        playback.position_label(),
        playback.progress_percent(),
        playback.remaining().as_secs_f64(),
        display_path(&entry.path, source_root),
        width = width
    )
}

pub fn print_playback_line(playback: &Playback, entry: &PoolEntry, source_root: &Path) {
    println!("{}", format_playback_line(playback, entry, source_root));
}

// ============================================================================
// Effects
// ============================================================================

/// Recognized effect names with whether each reads the base or the display.
pub fn format_effect_list() -> Vec<String> {
    Effect::ALL
        .iter()
        .map(|effect| {
            let source = match effect.source() {
                Source::Base => "from base",
                Source::Display => "stacks",
            };
            format!("{:<10} {}", effect.name(), source)
        })
        .collect()
}

pub fn print_effect_list() {
    print_lines(format_effect_list());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::solid_frame;
    use std::path::PathBuf;
    use std::time::Duration;

    fn root() -> PathBuf {
        PathBuf::from("/refs")
    }

    fn entry(kind: MediaKind, name: &str) -> PoolEntry {
        PoolEntry {
            kind,
            path: root().join(name),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn display_path_strips_root() {
        assert_eq!(display_path(&root().join("a.png"), &root()), "a.png");
    }

    #[test]
    fn display_path_outside_root_is_unchanged() {
        assert_eq!(display_path(Path::new("/other/a.png"), &root()), "/other/a.png");
    }

    // =========================================================================
    // Scan
    // =========================================================================

    #[test]
    fn inventory_lists_images_and_videos() {
        let inventory = Inventory {
            images: vec![root().join("a.jpg"), root().join("b.png")],
            videos: vec![root().join("clip.mp4")],
        };
        let lines = format_inventory(&inventory, &root());
        assert_eq!(
            lines,
            vec![
                "Images (2)",
                "    001 a.jpg",
                "    002 b.png",
                "",
                "Videos (1)",
                "    001 clip.mp4",
            ]
        );
    }

    #[test]
    fn empty_inventory_says_so() {
        let lines = format_inventory(&Inventory::default(), &root());
        assert_eq!(lines.last().unwrap(), "No usable media found");
    }

    // =========================================================================
    // Session
    // =========================================================================

    #[test]
    fn empty_session_is_one_line() {
        assert_eq!(
            format_session(&Session::default(), &root()),
            vec!["Session is empty"]
        );
    }

    #[test]
    fn session_lists_entries_and_pool() {
        let inventory = Inventory {
            images: vec![],
            videos: vec![root().join("clip.mp4")],
        };
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(0);
        let session = crate::session::session_from_inventory(&inventory, 2, 10, &mut rng);

        let lines = format_session(&session, &root());
        assert_eq!(lines[0], "Session (2 items)");
        assert_eq!(lines[1], "    001 video clip.mp4");
        assert_eq!(lines[2], "    002 video clip.mp4");
        assert_eq!(lines[4], "Video pool (1)");
        assert_eq!(lines[5], "    clip.mp4");
    }

    // =========================================================================
    // Inspect
    // =========================================================================

    #[test]
    fn frame_report_decoded_with_effects() {
        let entry = entry(MediaKind::Image, "pose.png");
        let frame = solid_frame(640, 480, [0, 0, 0]);
        let state = EffectState::default().after(Effect::ZoomIn);
        let report = FrameReport {
            index: 1,
            entry: &entry,
            frame: &frame,
            origin: &FrameOrigin::Decoded,
            applied: &[Effect::Gray, Effect::ZoomIn],
            state,
        };

        let lines = format_frame_report(&report, &root());
        assert_eq!(
            lines,
            vec![
                "002 pose.png",
                "    Frame: 640x480",
                "    Origin: decoded",
                "    Effects: Gray, Zoom+",
                "    Zoom: 1.15  Brightness: 0  Contrast: 1.00",
            ]
        );
    }

    #[test]
    fn frame_report_placeholder_shows_reason() {
        let entry = entry(MediaKind::Video, "clip.mp4");
        let frame = solid_frame(800, 600, [255, 255, 255]);
        let origin = FrameOrigin::Placeholder {
            reason: "no frames".to_string(),
        };
        let report = FrameReport {
            index: 0,
            entry: &entry,
            frame: &frame,
            origin: &origin,
            applied: &[],
            state: EffectState::default(),
        };

        let lines = format_frame_report(&report, &root());
        assert_eq!(lines[2], "    Origin: placeholder (no frames)");
        assert!(!lines.iter().any(|l| l.contains("Effects:")));
    }

    // =========================================================================
    // Play
    // =========================================================================

    #[test]
    fn playback_line_shows_position_progress_and_countdown() {
        let mut playback = Playback::new(20, Duration::from_secs(3));
        playback.start();
        playback.tick(Duration::from_secs(3));
        playback.tick(Duration::from_secs(3));
        playback.tick(Duration::from_millis(100));

        let line = format_playback_line(&playback, &entry(MediaKind::Image, "a.jpg"), &root());
        assert_eq!(line, "[ 3/20]  10%   2.9s  a.jpg");
    }

    // =========================================================================
    // Effects
    // =========================================================================

    #[test]
    fn effect_list_covers_all_effects() {
        let lines = format_effect_list();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "Flip H     stacks");
        assert_eq!(lines[2], "Gray       from base");
    }
}
