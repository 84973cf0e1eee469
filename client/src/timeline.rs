//! Timeline - Stato in memoria dei messaggi di una stanza
//!
//! Append-only: i messaggi già presenti non vengono mai mutati né
//! riordinati. Il cursore è l'id più alto già incorporato ed è la base
//! dei delta fetch.

use crate::api::Message;

#[derive(Debug, Default)]
pub struct Timeline {
    messages: Vec<Message>,
    cursor: i64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Cursore corrente: 0 se non è ancora arrivato nessun messaggio,
    /// così il primo delta fetch chiede tutto.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Sostituisce la timeline con la storia completa (fetch iniziale)
    /// e riporta il cursore all'id più alto del baseline.
    pub fn reset(&mut self, baseline: Vec<Message>) {
        self.cursor = baseline.iter().map(|m| m.message_id).max().unwrap_or(0);
        self.messages = baseline;
    }

    /// Accoda un batch di delta e avanza il cursore al massimo id visto.
    ///
    /// Nessuna deduplica per id: la consegna è at-least-once e un batch
    /// parzialmente ripetuto produce duplicati visibili. Ritorna quanti
    /// messaggi sono stati accodati.
    pub fn append(&mut self, batch: Vec<Message>) -> usize {
        let appended = batch.len();
        if let Some(max_id) = batch.iter().map(|m| m.message_id).max() {
            self.cursor = self.cursor.max(max_id);
        }
        self.messages.extend(batch);
        appended
    }
}
