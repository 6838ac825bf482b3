pub mod bundle;
pub mod codec;
pub mod config;
pub mod error;
pub mod field;
pub mod polynomial;
pub mod scheme;
pub mod sss;

pub use bundle::*;
pub use config::*;
pub use error::SharingError;
pub use field::*;
pub use polynomial::*;
pub use scheme::*;
pub use sss::*;
