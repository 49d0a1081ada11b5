use async_trait::async_trait;

use crate::domain::analysis::value_objects::LanguageCode;

/// One strategy in the translation fallback chain.
///
/// `Ok(None)` signals an empty or unusable answer; callers treat it like an error
/// and move on to the next provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> anyhow::Result<Option<String>>;
}

/// Remote locale recognition.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageRecognizer: Send + Sync {
    /// Raw locale tag as returned by the service, e.g. `ko-KR`
    async fn recognize(&self, text: &str) -> anyhow::Result<Option<String>>;
}
