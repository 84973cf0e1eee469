//! Client library - API tipate e sincronizzazione a polling
//!
//! Tre pezzi: `ApiClient` (chiamate HTTP con busta `{message, code, data}`),
//! `Timeline` (stato in memoria con cursore), `RoomSubscription` (task di
//! polling per stanza con teardown deterministico).

pub mod api;
pub mod error;
pub mod poller;
pub mod timeline;

pub use api::{ApiClient, LoginData, Message, RoomInfo, RoomPreview, UserInfo};
pub use error::ClientError;
pub use poller::{RoomSubscription, SyncState, TimelineEvent};
pub use timeline::Timeline;
