use anyhow::Context;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::preprocessing::prepare_for_ocr;
use super::traits::TextExtractionProvider;

/// Preprocessed output shorter than this is retried on the original image.
const MIN_USEFUL_CHARS: usize = 10;

/// Local OCR through the `tesseract` command-line engine.
pub struct TesseractService {
    binary: String,
    languages: String,
}

impl TesseractService {
    pub fn new(binary: impl Into<String>, languages: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            languages: languages.into(),
        }
    }

    /// Runs `tesseract stdin stdout -l <langs>` with the image piped in.
    async fn recognize(&self, image_data: &[u8]) -> anyhow::Result<String> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", &self.languages])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.binary))?;

        let mut stdin = child
            .stdin
            .take()
            .context("tesseract stdin was not captured")?;
        let feed = async move {
            let written = stdin.write_all(image_data).await;
            drop(stdin);
            written
        };

        let (written, output) = tokio::join!(feed, child.wait_with_output());
        let output = output.context("tesseract did not exit cleanly")?;
        written.context("failed to pipe image into tesseract")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("tesseract exited with {}: {}", output.status, stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl TextExtractionProvider for TesseractService {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn attempt(&self, image_data: &[u8]) -> anyhow::Result<Option<String>> {
        let mut text = match prepare_for_ocr(image_data) {
            Ok(processed) => match self.recognize(&processed).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "OCR on the preprocessed image failed");
                    String::new()
                }
            },
            Err(e) => {
                warn!(error = %e, "Preprocessing failed, running OCR on the original image");
                String::new()
            }
        };

        if text.chars().count() < MIN_USEFUL_CHARS {
            debug!(chars = text.chars().count(), "Short OCR result, retrying on original image");
            text = self.recognize(image_data).await?;
        }

        Ok(Some(text).filter(|t| !t.is_empty()))
    }
}
