pub mod errors;
pub mod hasher;
pub mod kdf;
pub mod timing;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
pub use kdf::KeyDerivation;
