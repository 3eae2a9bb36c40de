//! Background save/OCR job pool.
//!
//! `submit` is fire-and-forget: the join handle is dropped, no result
//! flows back, and every job absorbs and logs its own failures. Jobs from
//! the same capture share one `Arc` pixel buffer and may run concurrently
//! on different workers; nothing orders them relative to each other.

mod recognize;
mod save;

pub use recognize::OcrJob;
pub use save::SaveJob;

/// A self-contained unit of background work.
pub enum Job {
    SaveImage(SaveJob),
    RecognizeText(OcrJob),
}

impl Job {
    /// Run the job to completion. Never panics the worker; failures are
    /// logged inside the job and end there.
    pub fn run(self) {
        match self {
            Job::SaveImage(job) => job.run(),
            Job::RecognizeText(job) => job.run(),
        }
    }
}

/// Where the capture sequencer hands off its jobs.
pub trait JobSink: Send + Sync {
    fn submit(&self, job: Job);
}

/// Bounded worker pool, independent of the UI thread and of Tauri's own
/// runtime. One scheduler thread; save/OCR work runs on the blocking pool.
pub struct TaskDispatcher {
    pool: tokio::runtime::Runtime,
}

impl TaskDispatcher {
    pub fn new(worker_threads: usize) -> std::io::Result<Self> {
        let pool = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(worker_threads.max(1))
            .thread_name("veilshot-job")
            .build()?;
        Ok(Self { pool })
    }
}

impl JobSink for TaskDispatcher {
    fn submit(&self, job: Job) {
        let _ = self.pool.spawn_blocking(move || job.run());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("veilshot-jobs-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn wait_for(path: &std::path::Path) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if path.exists() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn submitted_save_job_writes_without_a_result_channel() {
        let dir = scratch_dir("save");
        let dispatcher = TaskDispatcher::new(2).unwrap();
        let frame = Arc::new(RgbaImage::from_pixel(8, 8, image::Rgba([10, 20, 30, 255])));
        dispatcher.submit(Job::SaveImage(SaveJob::new(
            frame,
            dir.clone(),
            "20250101_120000".into(),
        )));
        assert!(wait_for(&dir.join("capture_20250101_120000.png")));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn failing_job_does_not_poison_the_pool() {
        let dir = scratch_dir("poison");
        let dispatcher = TaskDispatcher::new(1).unwrap();
        // The OCR job fails engine construction (stub factory below), the
        // save job behind it on the same single worker still runs.
        let frame = Arc::new(RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 0, 255])));
        let failing = OcrJob::with_engine(
            frame.clone(),
            dir.clone(),
            "20250101_120001".into(),
            crate::ocr::RecognizerEngine::with_factory(|| {
                Err(crate::ocr::OcrError::EngineInit("unavailable".into()))
            }),
        );
        dispatcher.submit(Job::RecognizeText(failing));
        dispatcher.submit(Job::SaveImage(SaveJob::new(
            frame,
            dir.clone(),
            "20250101_120001".into(),
        )));
        assert!(wait_for(&dir.join("capture_20250101_120001.png")));
        assert!(!dir.join("ocr_20250101_120001.txt").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
