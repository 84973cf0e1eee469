//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod message;
pub mod query;
pub mod response;
pub mod room;
pub mod user;

// Re-exports per mantenere la compatibilità con il codice esistente
pub use message::{CreateMessageDTO, MessageDTO, SendMessageDTO};
pub use query::{MessageUpdatesQuery, RoomIdQuery};
pub use response::ApiResponse;
pub use room::{CreateRoomDTO, CreateRoomRequestDTO, RoomDTO, RoomPreviewDTO};
pub use user::{CreateUserDTO, LoginDTO, LoginResponseDTO, RegisterDTO, UserDTO};
