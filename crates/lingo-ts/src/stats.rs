use crate::model::{Catalog, TranslationStatus};

/// Message counts of one catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    pub contexts: usize,
    pub messages: usize,
    pub finished: usize,
    pub unfinished: usize,
    /// Vanished and obsolete messages together.
    pub obsolete: usize,
    pub numerus: usize,
}

impl Statistics {
    pub fn of(catalog: &Catalog) -> Self {
        let mut stats = Statistics {
            contexts: catalog.contexts.len(),
            ..Statistics::default()
        };

        for unit in catalog.units() {
            let message = unit.message;
            stats.messages += 1;
            if message.numerus {
                stats.numerus += 1;
            }
            match message.translation.status {
                TranslationStatus::Finished => stats.finished += 1,
                TranslationStatus::Unfinished => stats.unfinished += 1,
                TranslationStatus::Vanished | TranslationStatus::Obsolete => stats.obsolete += 1,
            }
        }

        stats
    }

    /// Messages that would be served or still need work.
    pub fn live(&self) -> usize {
        self.finished + self.unfinished
    }

    /// Share of live messages that are finished, in percent. An empty
    /// catalog is complete.
    pub fn completion(&self) -> f64 {
        match self.live() {
            0 => 100.0,
            live => self.finished as f64 * 100.0 / live as f64,
        }
    }
}
