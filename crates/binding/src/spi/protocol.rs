//! What distinguishes the wire protocols from each other

use crate::session::BindingSession;
use crate::transport::ServiceKind;
use cmis_core::constants::{ATOMPUB_URL, BROWSER_URL, LOCAL_FACTORY};
use cmis_core::{BindingType, Result};
use serde_json::Value;
use tracing::{trace, warn};

/// Protocol strategy of a [`ProtocolSpi`](super::ProtocolSpi)
pub trait Protocol: Send + Sync + 'static {
    const BINDING: BindingType;

    /// Attach HTTP authentication headers
    const HTTP_AUTHENTICATION: bool = true;

    /// Attach a WS-Security header
    const SOAP_AUTHENTICATION: bool = false;

    /// ACL changes must be sent as a complete replacement ACL
    const REPLACES_ACL: bool = false;

    /// Endpoint for a call of `service`
    fn endpoint(
        session: &BindingSession,
        service: ServiceKind,
        repository_id: Option<&str>,
        object_id: Option<&str>,
    ) -> Result<String>;

    /// Inspect a response before it is decoded
    fn absorb_response(
        _session: &BindingSession,
        _repository_id: Option<&str>,
        _response: &Value,
    ) {
    }
}

/// Atom/REST. Objects are addressed through the links of earlier responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomPub;

impl Protocol for AtomPub {
    const BINDING: BindingType = BindingType::AtomPub;
    const REPLACES_ACL: bool = true;

    fn endpoint(
        session: &BindingSession,
        service: ServiceKind,
        repository_id: Option<&str>,
        object_id: Option<&str>,
    ) -> Result<String> {
        if let (Some(repository_id), Some(object_id), Some(rel)) =
            (repository_id, object_id, service.link_relation())
        {
            if let Some(href) = session.links().get_link(repository_id, object_id, rel) {
                trace!("Using cached '{}' link of '{}'", rel, object_id);
                return Ok(href);
            }
        }
        session.required_parameter(ATOMPUB_URL)
    }

    fn absorb_response(session: &BindingSession, repository_id: Option<&str>, response: &Value) {
        let Some(repository_id) = repository_id else {
            return;
        };
        let entries: Vec<&Value> = match response {
            Value::Array(items) => items.iter().collect(),
            Value::Object(fields) => match fields.get("objects") {
                Some(Value::Array(items)) => items.iter().collect(),
                _ => vec![response],
            },
            _ => Vec::new(),
        };
        for entry in entries {
            cache_links(session, repository_id, entry);
        }
    }
}

fn cache_links(session: &BindingSession, repository_id: &str, entry: &Value) {
    let (Some(id), Some(Value::Object(links))) =
        (entry.get("id").and_then(Value::as_str), entry.get("links"))
    else {
        return;
    };
    for (rel, href) in links {
        let Some(href) = href.as_str() else {
            continue;
        };
        if let Err(err) = session.links().add_link(repository_id, id, rel, href) {
            warn!("Could not cache '{}' link of '{}': {}", rel, id, err);
        }
    }
}

/// SOAP. Every service has its own endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebServices;

impl Protocol for WebServices {
    const BINDING: BindingType = BindingType::WebServices;
    const SOAP_AUTHENTICATION: bool = true;

    fn endpoint(
        session: &BindingSession,
        service: ServiceKind,
        _repository_id: Option<&str>,
        _object_id: Option<&str>,
    ) -> Result<String> {
        session.required_parameter(service.webservices_endpoint_key())
    }
}

/// JSON/REST. Repository calls go to the service URL, everything else to
/// the repository's root URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct Browser;

impl Protocol for Browser {
    const BINDING: BindingType = BindingType::Browser;

    fn endpoint(
        session: &BindingSession,
        _service: ServiceKind,
        repository_id: Option<&str>,
        _object_id: Option<&str>,
    ) -> Result<String> {
        let url = session.required_parameter(BROWSER_URL)?;
        let base = url.trim_end_matches('/');
        Ok(match repository_id {
            Some(repository_id) => format!("{base}/{repository_id}/root"),
            None => base.to_string(),
        })
    }
}

/// In-process repository, addressed by its factory id
#[derive(Debug, Clone, Copy, Default)]
pub struct Local;

impl Protocol for Local {
    const BINDING: BindingType = BindingType::Local;
    const HTTP_AUTHENTICATION: bool = false;

    fn endpoint(
        session: &BindingSession,
        _service: ServiceKind,
        _repository_id: Option<&str>,
        _object_id: Option<&str>,
    ) -> Result<String> {
        Ok(format!(
            "local://{}",
            session.required_parameter(LOCAL_FACTORY)?
        ))
    }
}
