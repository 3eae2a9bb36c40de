//! Output folder and file naming discipline.
//!
//! Both background jobs write into the same folder with the same
//! second-granularity timestamp stem, so one capture yields
//! `capture_<ts>.png` and `ocr_<ts>.txt` side by side. Collisions within
//! the same second are last-write-wins.

use std::io;
use std::path::{Path, PathBuf};

/// Local time, second granularity; shared by both files of one capture.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Idempotent create of the output folder.
pub fn ensure_output_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

pub fn image_path(dir: &Path, timestamp: &str) -> PathBuf {
    dir.join(format!("capture_{timestamp}.png"))
}

pub fn text_path(dir: &Path, timestamp: &str) -> PathBuf {
    dir.join(format!("ocr_{timestamp}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_second_granular() {
        let ts = timestamp_now();
        // YYYYMMDD_HHMMSS
        assert_eq!(ts.len(), 15);
        assert_eq!(ts.as_bytes()[8], b'_');
        assert!(ts.chars().filter(|c| c.is_ascii_digit()).count() == 14);
    }

    #[test]
    fn file_names_share_the_stem() {
        let dir = Path::new("screenshots");
        let img = image_path(dir, "20250101_120000");
        let txt = text_path(dir, "20250101_120000");
        assert_eq!(img, dir.join("capture_20250101_120000.png"));
        assert_eq!(txt, dir.join("ocr_20250101_120000.txt"));
    }
}
