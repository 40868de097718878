//! CMIS binding factory and protocol implementations
//!
//! ## Key Components
//!
//! - **`BindingFactory`**: validates session parameters and builds a
//!   `CmisBinding` for the AtomPub, Web Services, Browser or Local binding,
//!   or for any SPI registered under an identifier.
//! - **`spi`**: the nine CMIS service interfaces and the generic
//!   `ProtocolSpi` serving them for each wire protocol.
//! - **`BindingSession`**: per-binding state (session context, caches,
//!   authentication provider, transport).
//! - **`transport`**: the `Transport` trait that carries resolved service
//!   calls to the wire.

pub mod binding;
pub mod descriptor;
pub mod factory;
pub mod session;
pub mod spi;
pub mod transport;

pub use binding::CmisBinding;
pub use descriptor::BindingDescriptor;
pub use factory::BindingFactory;
pub use session::BindingSession;
pub use spi::{CmisSpi, ProtocolSpi, SpiRegistry};
pub use transport::{DetachedTransport, ServiceCall, ServiceKind, Transport};
