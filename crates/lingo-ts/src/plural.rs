//! Plural form selection for `numerus="yes"` messages.
//!
//! Forms are stored in CLDR category order (`zero`, `one`, `two`, `few`,
//! `many`, `other`), keeping only the categories the language uses. This is
//! the order Transifex-managed catalogs follow.

use crate::Error;
use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralRules};
use unic_langid::LanguageIdentifier;

/// Cardinal plural rules of one language.
pub struct PluralRule {
    language: LanguageIdentifier,
    rules: PluralRules,
    categories: Vec<PluralCategory>,
}

impl std::fmt::Debug for PluralRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluralRule")
            .field("language", &self.language.to_string())
            .field("forms", &self.categories.len())
            .finish()
    }
}

fn category_rank(category: PluralCategory) -> u8 {
    match category {
        PluralCategory::Zero => 0,
        PluralCategory::One => 1,
        PluralCategory::Two => 2,
        PluralCategory::Few => 3,
        PluralCategory::Many => 4,
        PluralCategory::Other => 5,
    }
}

/// The CLDR keyword of a category.
pub fn category_name(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

impl PluralRule {
    pub fn for_language(language: &LanguageIdentifier) -> Result<Self, Error> {
        let plural_error = |message: String| Error::PluralRules {
            language: language.to_string(),
            message,
        };

        let locale: Locale = language
            .to_string()
            .parse()
            .map_err(|e| plural_error(format!("{e:?}")))?;
        let rules =
            PluralRules::try_new_cardinal(locale.into()).map_err(|e| plural_error(e.to_string()))?;

        let mut categories: Vec<PluralCategory> = rules.categories().collect();
        categories.sort_by_key(|c| category_rank(*c));
        categories.dedup();

        tracing::debug!(
            "Loaded plural rules for {}: {} form(s)",
            language,
            categories.len()
        );

        Ok(Self {
            language: language.clone(),
            rules,
            categories,
        })
    }

    pub fn language(&self) -> &LanguageIdentifier {
        &self.language
    }

    /// Number of `<numerusform>` entries a message needs.
    pub fn form_count(&self) -> usize {
        self.categories.len()
    }

    pub fn categories(&self) -> &[PluralCategory] {
        &self.categories
    }

    pub fn category(&self, n: u64) -> PluralCategory {
        self.rules.category_for(n)
    }

    /// Index of the form to display for `n`.
    pub fn form_index(&self, n: u64) -> usize {
        let category = self.category(n);
        self.categories
            .iter()
            .position(|c| *c == category)
            .unwrap_or(self.categories.len().saturating_sub(1))
    }
}
