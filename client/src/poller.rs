//! Poller - Sottoscrizione a una stanza con sincronizzazione incrementale
//!
//! Macchina a stati per stanza: `Idle` (creata, fetch non partito) ->
//! `Loading` (fetch iniziale in corso) -> `Synced` (baseline caricato,
//! delta fetch periodico con cursore). La sottoscrizione possiede il task
//! di polling: il Drop lo abortisce e nessun cursore sopravvive al cambio
//! stanza.

use crate::api::{ApiClient, Message};
use crate::error::ClientError;
use crate::timeline::Timeline;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Stato della sincronizzazione di una stanza
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Loading,
    Synced,
}

/// Eventi consegnati al consumatore della sottoscrizione
#[derive(Debug, Clone)]
pub enum TimelineEvent {
    /// Storia completa della stanza, dal fetch iniziale
    Baseline(Vec<Message>),
    /// Batch incrementale, da accodare senza riordinare
    Delta(Vec<Message>),
}

/// Sottoscrizione attiva a una stanza
///
/// Possiede il task di polling: quando viene droppata il task viene
/// abortito e il polling cessa immediatamente.
pub struct RoomSubscription {
    room_id: i64,
    api: ApiClient,
    poke_tx: mpsc::UnboundedSender<()>,
    state_rx: watch::Receiver<SyncState>,
    task: JoinHandle<()>,
}

impl RoomSubscription {
    /// Avvia la sottoscrizione: fetch iniziale subito, poi delta fetch
    /// ogni `poll_interval`. Gli eventi arrivano sul receiver ritornato.
    pub fn start(
        api: ApiClient,
        room_id: i64,
        poll_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<TimelineEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (poke_tx, poke_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SyncState::Idle);

        let task = tokio::spawn(run_sync_loop(
            api.clone(),
            room_id,
            poll_interval,
            event_tx,
            poke_rx,
            state_tx,
        ));

        (
            Self {
                room_id,
                api,
                poke_tx,
                state_rx,
                task,
            },
            event_rx,
        )
    }

    pub fn room_id(&self) -> i64 {
        self.room_id
    }

    /// Stato corrente della sincronizzazione
    pub fn state(&self) -> SyncState {
        *self.state_rx.borrow()
    }

    /// Receiver watch per osservare le transizioni di stato
    pub fn state_changes(&self) -> watch::Receiver<SyncState> {
        self.state_rx.clone()
    }

    /// Chiede al task un delta fetch immediato, fuori dall'intervallo
    pub fn poke(&self) {
        let _ = self.poke_tx.send(());
    }

    /// Invia un messaggio e sollecita subito il delta fetch: la copia
    /// autorevole (id e timestamp del server) arriva come evento Delta.
    pub async fn send(&self, content: &str) -> Result<Message, ClientError> {
        let message = self.api.send_message(self.room_id, content).await?;
        self.poke();
        Ok(message)
    }
}

impl Drop for RoomSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_sync_loop(
    api: ApiClient,
    room_id: i64,
    poll_interval: Duration,
    event_tx: mpsc::UnboundedSender<TimelineEvent>,
    mut poke_rx: mpsc::UnboundedReceiver<()>,
    state_tx: watch::Sender<SyncState>,
) {
    let mut timeline = Timeline::new();

    // Fetch iniziale: ritentato sull'intervallo finché non riesce
    let _ = state_tx.send(SyncState::Loading);
    loop {
        match api.room_messages(room_id).await {
            Ok(baseline) => {
                debug!(room_id, count = baseline.len(), "Baseline loaded");
                timeline.reset(baseline);
                if event_tx
                    .send(TimelineEvent::Baseline(timeline.messages().to_vec()))
                    .is_err()
                {
                    return;
                }
                let _ = state_tx.send(SyncState::Synced);
                break;
            }
            Err(e) => {
                warn!(room_id, "Initial fetch failed, retrying: {e}");
                tokio::time::sleep(poll_interval).await;
            }
        }
    }

    info!(room_id, cursor = timeline.cursor(), "Room subscription synced");

    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // il primo tick scatta subito: innocuo, il delta sarà vuoto
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            poke = poke_rx.recv() => {
                if poke.is_none() {
                    // sottoscrizione droppata
                    return;
                }
            }
        }

        match api.message_updates(room_id, timeline.cursor()).await {
            Ok(batch) if !batch.is_empty() => {
                debug!(room_id, count = batch.len(), "Delta batch received");
                timeline.append(batch.clone());
                if event_tx.send(TimelineEvent::Delta(batch)).is_err() {
                    return;
                }
            }
            Ok(_) => {}
            Err(e) => {
                // fetch fallito: si salta il giro senza avanzare il cursore,
                // il prossimo intervallo richiede lo stesso range
                warn!(room_id, "Delta fetch failed, will retry: {e}");
            }
        }
    }
}
