use async_trait::async_trait;

/// One strategy in the text-extraction fallback chain.
///
/// `Ok(None)` means the provider ran but produced nothing usable, so the
/// chain moves on to the next provider just as it does on `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextExtractionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Extract raw text from encoded image bytes
    async fn attempt(&self, image_data: &[u8]) -> anyhow::Result<Option<String>>;
}
