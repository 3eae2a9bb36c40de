//! Text recognition domain — public API.
//!
//! A [`RecognizerEngine`] owns an optional backend and constructs it on
//! first use; engine construction is the expensive part (and the part
//! that fails when tesseract is not installed), so it is deferred until a
//! capture actually needs it. Each OCR job owns its own engine; there is
//! no process-wide recognizer.

mod normalize;
mod tesseract;

pub use normalize::{normalize, RawRecognition, RawValue, RecognizedLine};

use image::RgbaImage;

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("recognizer initialization failed: {0}")]
    EngineInit(String),

    #[error("recognition failed: {0}")]
    Recognition(String),
}

/// A constructed recognition backend.
pub trait Recognizer: Send {
    fn recognize(&self, frame: &RgbaImage) -> Result<Vec<RawRecognition>, OcrError>;
}

/// Deferred backend constructor; may fail (missing binary, missing
/// language data); the failure belongs to the job that first needed it.
pub type RecognizerFactory = fn() -> Result<Box<dyn Recognizer>, OcrError>;

/// Lazily initialized recognition engine.
pub struct RecognizerEngine {
    backend: Option<Box<dyn Recognizer>>,
    factory: RecognizerFactory,
}

impl RecognizerEngine {
    /// The production engine: tesseract, constructed on first use.
    pub fn tesseract() -> Self {
        Self {
            backend: None,
            factory: tesseract::create,
        }
    }

    /// Engine with a custom backend factory, for tests.
    pub fn with_factory(factory: RecognizerFactory) -> Self {
        Self {
            backend: None,
            factory,
        }
    }

    /// Recognize text in a frame, constructing the backend first if this
    /// engine has never run.
    pub fn recognize(&mut self, frame: &RgbaImage) -> Result<Vec<RawRecognition>, OcrError> {
        if self.backend.is_none() {
            log::info!("[OCR] constructing recognition engine");
            self.backend = Some((self.factory)()?);
        }
        let backend = self
            .backend
            .as_mut()
            .ok_or_else(|| OcrError::EngineInit("backend factory returned nothing".into()))?;
        backend.recognize(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static FACTORY_RUNS: AtomicUsize = AtomicUsize::new(0);

    struct StaticBackend;

    impl Recognizer for StaticBackend {
        fn recognize(&self, _frame: &RgbaImage) -> Result<Vec<RawRecognition>, OcrError> {
            Ok(vec![RawRecognition::Record {
                text: Some("line".into()),
                label: None,
                score: Some(1.0),
            }])
        }
    }

    fn counting_factory() -> Result<Box<dyn Recognizer>, OcrError> {
        FACTORY_RUNS.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StaticBackend))
    }

    fn failing_factory() -> Result<Box<dyn Recognizer>, OcrError> {
        Err(OcrError::EngineInit("no binary".into()))
    }

    #[test]
    fn backend_is_constructed_once_per_engine() {
        FACTORY_RUNS.store(0, Ordering::SeqCst);
        let mut engine = RecognizerEngine::with_factory(counting_factory);
        let frame = RgbaImage::new(4, 4);
        engine.recognize(&frame).unwrap();
        engine.recognize(&frame).unwrap();
        assert_eq!(FACTORY_RUNS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn init_failure_surfaces_as_engine_init() {
        let mut engine = RecognizerEngine::with_factory(failing_factory);
        let frame = RgbaImage::new(4, 4);
        assert!(matches!(
            engine.recognize(&frame),
            Err(OcrError::EngineInit(_))
        ));
    }
}
