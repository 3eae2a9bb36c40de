//! Tesseract backend via the `rusty-tesseract` CLI wrapper.
//!
//! Tesseract's TSV output is word-level; words are regrouped into lines
//! here so the normalizer sees one item per recognized line of text, with
//! the mean word confidence scaled to 0..1.

use std::collections::BTreeMap;

use image::{DynamicImage, RgbaImage};
use rusty_tesseract::{Args, Image};

use super::{OcrError, RawRecognition, Recognizer};

pub struct TesseractRecognizer {
    args: Args,
}

/// Backend factory for [`super::RecognizerEngine::tesseract`].
///
/// Probes the tesseract binary up front so a missing installation fails
/// the job at construction time with a clear message instead of on the
/// first recognition call.
pub fn create() -> Result<Box<dyn Recognizer>, OcrError> {
    let version = rusty_tesseract::get_tesseract_version()
        .map_err(|e| OcrError::EngineInit(e.to_string()))?;
    log::info!(
        "[OCR] tesseract ready: {}",
        version.lines().next().unwrap_or_default().trim()
    );
    Ok(Box::new(TesseractRecognizer {
        args: Args::default(),
    }))
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, frame: &RgbaImage) -> Result<Vec<RawRecognition>, OcrError> {
        let image = Image::from_dynamic_image(&DynamicImage::ImageRgba8(frame.clone()))
            .map_err(|e| OcrError::Recognition(e.to_string()))?;
        let output = rusty_tesseract::image_to_data(&image, &self.args)
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        // conf < 0 marks structural TSV rows (page/block/line headers).
        let mut lines: BTreeMap<(i32, i32, i32, i32), Vec<(String, f32)>> = BTreeMap::new();
        for word in &output.data {
            let text = word.text.trim();
            if text.is_empty() || word.conf < 0.0 {
                continue;
            }
            lines
                .entry((word.page_num, word.block_num, word.par_num, word.line_num))
                .or_default()
                .push((text.to_string(), word.conf));
        }

        Ok(lines
            .into_values()
            .map(|words| {
                let mean_conf =
                    words.iter().map(|(_, c)| f64::from(*c)).sum::<f64>() / words.len() as f64;
                let text = words
                    .into_iter()
                    .map(|(w, _)| w)
                    .collect::<Vec<_>>()
                    .join(" ");
                RawRecognition::Record {
                    text: Some(text),
                    label: None,
                    score: Some(mean_conf / 100.0),
                }
            })
            .collect())
    }
}
