use unic_langid::LanguageIdentifier;

/// Languages to try for a request, most specific first.
///
/// `sr-Latn-RS` yields `sr-Latn-RS`, `sr-Latn`, `sr`. Variants are dropped
/// together with the region.
pub fn fallback_chain(requested: &LanguageIdentifier) -> Vec<LanguageIdentifier> {
    let mut chain = vec![requested.clone()];

    let mut push = |candidate: LanguageIdentifier| {
        if !chain.contains(&candidate) {
            chain.push(candidate);
        }
    };

    if requested.script.is_some() {
        push(LanguageIdentifier::from_parts(
            requested.language,
            requested.script,
            None,
            &[],
        ));
    }
    push(LanguageIdentifier::from_parts(
        requested.language,
        None,
        None,
        &[],
    ));

    chain
}

/// Picks the language to load for `requested` among `available`.
///
/// Walks the fallback chain first. A request for a bare language then
/// accepts any regional catalog of it (`pt` takes `pt-BR`).
pub fn resolve_fallback_language(
    requested: &LanguageIdentifier,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    fallback_chain(requested)
        .into_iter()
        .find(|candidate| available.contains(candidate))
        .or_else(|| {
            available
                .iter()
                .find(|lang| lang.language == requested.language)
                .cloned()
        })
}
