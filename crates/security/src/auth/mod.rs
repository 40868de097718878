//! Authentication data attached to outgoing service calls
//!
//! A binding asks its [`AuthenticationProvider`] for HTTP headers before
//! every call and, for SOAP endpoints, for a WS-Security header block.

mod credentials;
mod provider;
mod registry;
mod security_header;
mod standard;

pub use credentials::Credentials;
pub use provider::{AuthenticationProvider, HttpHeaders};
pub use registry::{AuthProviderConstructor, AuthProviderRegistry};
pub use security_header::{SecurityHeader, Timestamp, UsernameToken};
pub use standard::{StandardAuthenticationProvider, AUTHORIZATION, PROXY_AUTHORIZATION};
