pub mod config;
pub mod credentials;
pub mod lookup_key;

pub use config::{Config, ConfigOverrides};
pub use credentials::CredentialRecord;
pub use lookup_key::LookupKey;
