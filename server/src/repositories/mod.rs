//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.
//!
//! Le query sono scritte con l'API runtime di sqlx (`query` / `query_as` con
//! `FromRow`): il check dello schema avviene nei test di integrazione, che
//! girano su un database SQLite in memoria con le migrations applicate.

pub mod message;
pub mod room;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use message::MessageRepository;
pub use room::RoomRepository;
pub use user::UserRepository;
