use super::provider::MaskedTextProvider;
use crate::error::MaskError;

/// Provider kept alive between keystrokes, rebuilt whenever the
/// (mask, prompt char) pair it was built for no longer matches.
#[derive(Debug, Clone, Default)]
pub(super) struct ProviderCache {
    entry: Option<MaskedTextProvider>,
}

impl ProviderCache {
    /// Returns the provider for `mask`/`prompt_char` with `text` re-applied,
    /// or `None` when masking is disabled.
    pub(super) fn provider(
        &mut self,
        mask: &str,
        prompt_char: char,
        text: &str,
    ) -> Result<Option<&mut MaskedTextProvider>, MaskError> {
        if mask.is_empty() {
            self.entry = None;
            return Ok(None);
        }

        let stale = self.entry.as_ref().is_none_or(|provider| {
            provider.mask() != mask || provider.prompt_char() != prompt_char
        });
        if stale {
            tracing::debug!(mask, prompt_char = %prompt_char, "rebuilding mask provider");
            self.entry = Some(MaskedTextProvider::new(mask, prompt_char)?);
        }

        let Some(provider) = self.entry.as_mut() else {
            return Ok(None);
        };
        if !provider.set(text) {
            tracing::debug!(text, "current text does not fit the mask");
        }
        Ok(Some(provider))
    }

    pub(super) fn current(&self) -> Option<&MaskedTextProvider> {
        self.entry.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::ProviderCache;

    #[test]
    fn empty_mask_disables_the_provider() {
        let mut cache = ProviderCache::default();
        assert!(cache.provider("00", '_', "").expect("valid").is_some());
        assert!(cache.provider("", '_', "").expect("valid").is_none());
        assert!(cache.current().is_none());
    }

    #[test]
    fn cached_provider_follows_the_current_text() {
        let mut cache = ProviderCache::default();
        cache.provider("00-00", '_', "").expect("valid");
        let provider = cache
            .provider("00-00", '_', "12-3_")
            .expect("valid")
            .expect("mask set");
        assert_eq!(provider.to_display_string(), "12-3_");

        let provider = cache
            .provider("00-00", '_', "")
            .expect("valid")
            .expect("mask set");
        assert_eq!(provider.to_display_string(), "__-__");
    }

    #[test]
    fn prompt_change_rebuilds() {
        let mut cache = ProviderCache::default();
        cache.provider("00", '_', "").expect("valid");
        let provider = cache
            .provider("00", '*', "1")
            .expect("valid")
            .expect("mask set");
        assert_eq!(provider.prompt_char(), '*');
        assert_eq!(provider.to_display_string(), "1*");
    }

    #[test]
    fn invalid_mask_surfaces_error() {
        let mut cache = ProviderCache::default();
        assert!(cache.provider(r"0\", '_', "").is_err());
    }
}
