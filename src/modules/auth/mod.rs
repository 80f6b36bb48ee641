pub mod model;
pub mod service;

// Re-exports for easy external access
pub use model::{LoginData, LoginPayload, RegisterPayload, UserProfile};
pub use service::AuthService;
