//! Backend API access: an explicitly constructed HTTP client and the token
//! stores it reads credentials from.

mod request;
mod tokens;

pub use request::{ApiClient, ClientConfig, ClientEvent, RequestError, DEFAULT_TIMEOUT};
pub use tokens::{FileTokenStore, MemoryTokenStore, TokenFile};
