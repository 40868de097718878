use super::generic::ProtocolSpi;
use super::protocol::{AtomPub, Browser, Local, WebServices};
use super::CmisSpi;
use crate::session::BindingSession;
use cmis_core::constants::{SPI_ATOMPUB, SPI_BROWSER, SPI_LOCAL, SPI_WEBSERVICES};
use cmis_core::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds an SPI over a binding session
pub type SpiConstructor =
    Arc<dyn Fn(Arc<BindingSession>) -> Result<Box<dyn CmisSpi>> + Send + Sync>;

/// Maps `cmis.binding.spi` identifiers to SPI constructors
#[derive(Clone)]
pub struct SpiRegistry {
    constructors: HashMap<String, SpiConstructor>,
}

impl SpiRegistry {
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A registry holding the four built-in protocols
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(SPI_ATOMPUB, |session| {
            Ok(Box::new(ProtocolSpi::<AtomPub>::new(session)) as Box<dyn CmisSpi>)
        });
        registry.register(SPI_WEBSERVICES, |session| {
            Ok(Box::new(ProtocolSpi::<WebServices>::new(session)) as Box<dyn CmisSpi>)
        });
        registry.register(SPI_BROWSER, |session| {
            Ok(Box::new(ProtocolSpi::<Browser>::new(session)) as Box<dyn CmisSpi>)
        });
        registry.register(SPI_LOCAL, |session| {
            Ok(Box::new(ProtocolSpi::<Local>::new(session)) as Box<dyn CmisSpi>)
        });
        registry
    }

    pub fn register<F>(&mut self, id: &str, constructor: F)
    where
        F: Fn(Arc<BindingSession>) -> Result<Box<dyn CmisSpi>> + Send + Sync + 'static,
    {
        self.constructors.insert(id.to_string(), Arc::new(constructor));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    /// Look up the constructor registered as `id`
    ///
    /// # Errors
    ///
    /// `Configuration` if nothing is registered under `id`.
    pub fn resolve(&self, id: &str) -> Result<SpiConstructor> {
        self.constructors
            .get(id)
            .cloned()
            .ok_or_else(|| Error::configuration(format!("unknown SPI: {id}")))
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for SpiRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for SpiRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpiRegistry")
            .field("spis", &self.ids())
            .finish()
    }
}
