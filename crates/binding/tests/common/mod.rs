//! Shared fixtures for binding integration tests

#![allow(dead_code)]

use cmis_binding::{ServiceCall, Transport};
use cmis_config::SessionParameters;
use cmis_core::constants::{PASSWORD, USER};
use cmis_core::Result;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Records every call and answers with canned responses keyed by operation
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<ServiceCall>>,
    responses: Mutex<HashMap<String, Value>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, operation: &str, response: Value) {
        self.responses.lock().insert(operation.to_string(), response);
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> ServiceCall {
        self.calls.lock().last().cloned().expect("no call recorded")
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.operation == operation)
            .count()
    }
}

impl Transport for RecordingTransport {
    fn invoke(&self, call: &ServiceCall) -> Result<Value> {
        self.calls.lock().push(call.clone());
        Ok(self
            .responses
            .lock()
            .get(&call.operation)
            .cloned()
            .unwrap_or(Value::Null))
    }
}

/// Route `tracing` output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

pub fn credentials(mut parameters: SessionParameters) -> SessionParameters {
    parameters.set(USER, "user");
    parameters.set(PASSWORD, "password");
    parameters
}
