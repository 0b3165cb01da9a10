pub mod claims;
pub mod errors;
pub mod secret;
pub mod service;

pub use claims::Claims;
pub use claims::TokenClass;
pub use errors::JwtError;
pub use secret::SigningSecret;
pub use service::TokenService;
pub use service::VerifiedToken;
