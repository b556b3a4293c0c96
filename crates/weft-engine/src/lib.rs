pub mod actions;
pub mod context;
pub mod engine;
pub mod error;
pub mod request;
pub mod respond;

pub use engine::{Engine, EngineResponse};
pub use error::EngineError;
pub use request::{ActionPayload, ActionRequest, ClientRequest, MessageRequest, UserInput};
