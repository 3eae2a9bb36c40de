//! OCR job: recognize text in a captured frame and write it out.

use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;

use crate::ocr::{self, OcrError, RecognizerEngine};
use crate::storage;

#[derive(Debug, thiserror::Error)]
pub enum OcrJobError {
    #[error(transparent)]
    Recognition(#[from] OcrError),

    #[error("could not write text file: {0}")]
    Io(#[from] std::io::Error),
}

/// Owns a captured frame, its own lazily-built recognition engine, and
/// the destination for the recognized text.
pub struct OcrJob {
    frame: Arc<RgbaImage>,
    folder: PathBuf,
    timestamp: String,
    engine: RecognizerEngine,
}

impl OcrJob {
    pub fn new(frame: Arc<RgbaImage>, folder: PathBuf, timestamp: String) -> Self {
        Self::with_engine(frame, folder, timestamp, RecognizerEngine::tesseract())
    }

    /// Job with a caller-supplied engine, for tests.
    pub fn with_engine(
        frame: Arc<RgbaImage>,
        folder: PathBuf,
        timestamp: String,
        engine: RecognizerEngine,
    ) -> Self {
        Self {
            frame,
            folder,
            timestamp,
            engine,
        }
    }

    /// Run to completion; failures are logged here and go no further.
    pub fn run(mut self) {
        match self.recognize_and_write() {
            Ok(path) => log::info!("[OCR] text saved: {}", path.display()),
            Err(e) => log::error!("[OCR] job failed: {e}"),
        }
    }

    fn recognize_and_write(&mut self) -> Result<PathBuf, OcrJobError> {
        let raw = self.engine.recognize(&self.frame)?;
        let lines = ocr::normalize(raw);

        storage::ensure_output_dir(&self.folder)?;
        let path = storage::text_path(&self.folder, &self.timestamp);

        // One recognized line per file line; confidence is diagnostics
        // only and is not persisted.
        let mut body = String::new();
        for line in &lines {
            if !line.text.is_empty() {
                body.push_str(&line.text);
                body.push('\n');
            }
        }
        std::fs::write(&path, body)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::{RawRecognition, RawValue, Recognizer};

    struct TwoLineBackend;

    impl Recognizer for TwoLineBackend {
        fn recognize(&self, _frame: &RgbaImage) -> Result<Vec<RawRecognition>, OcrError> {
            Ok(vec![
                RawRecognition::Record {
                    text: Some("first line".into()),
                    label: None,
                    score: Some(0.91),
                },
                RawRecognition::Record {
                    text: None,
                    label: None,
                    score: Some(0.2),
                },
                RawRecognition::Sequence(vec![
                    RawValue::Text("second line".into()),
                    RawValue::Float(0.8),
                ]),
            ])
        }
    }

    #[test]
    fn writes_non_empty_lines_only() {
        let dir = std::env::temp_dir().join(format!("veilshot-ocr-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let frame = Arc::new(RgbaImage::new(4, 4));
        let job = OcrJob::with_engine(
            frame,
            dir.clone(),
            "20250101_000000".into(),
            RecognizerEngine::with_factory(|| Ok(Box::new(TwoLineBackend))),
        );
        job.run();
        let body = std::fs::read_to_string(dir.join("ocr_20250101_000000.txt")).unwrap();
        assert_eq!(body, "first line\nsecond line\n");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn engine_init_failure_leaves_no_file() {
        let dir = std::env::temp_dir().join(format!("veilshot-ocr-fail-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let frame = Arc::new(RgbaImage::new(4, 4));
        let job = OcrJob::with_engine(
            frame,
            dir.clone(),
            "20250101_000000".into(),
            RecognizerEngine::with_factory(|| Err(OcrError::EngineInit("unavailable".into()))),
        );
        job.run();
        assert!(!dir.join("ocr_20250101_000000.txt").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
