//! In-process fake of the remote service.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use traducteur_api::{ApiClient, ApiRequest, RawResponse, Transport, TransportFailure};
use traducteur_license::{
    ActivationStore, LicenseError, LicenseResult, MemorySecureStorage, SecureStorage,
};

/// Answers each path with a scripted outcome and records what it was sent.
#[derive(Default)]
pub struct FakeService {
    routes: Mutex<HashMap<String, Result<RawResponse, TransportFailure>>>,
    pub sent: Mutex<Vec<ApiRequest>>,
}

impl FakeService {
    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Ok(RawResponse::new(status, body.to_string())));
    }

    pub fn fail(&self, path: &str, failure: TransportFailure) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Err(failure));
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.sent.lock().unwrap().last().and_then(|r| r.body.clone())
    }
}

pub struct SharedFake(pub Arc<FakeService>);

#[async_trait]
impl Transport for SharedFake {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportFailure> {
        self.0.sent.lock().unwrap().push(request.clone());
        let path = request
            .url
            .strip_prefix("http://fake")
            .unwrap_or(&request.url)
            .to_string();
        self.0
            .routes
            .lock()
            .unwrap()
            .get(&path)
            .cloned()
            .unwrap_or_else(|| Ok(RawResponse::new(404, "")))
    }
}

pub struct Harness {
    pub service: Arc<FakeService>,
    pub api: Arc<ApiClient>,
    pub storage: Arc<MemorySecureStorage>,
    pub store: Arc<ActivationStore>,
}

pub fn harness() -> Harness {
    let service = Arc::new(FakeService::default());
    let api = Arc::new(ApiClient::with_transport(
        "http://fake",
        SharedFake(service.clone()),
    ));
    let storage = Arc::new(MemorySecureStorage::new());
    let store = Arc::new(ActivationStore::new(storage.clone()));
    Harness {
        service,
        api,
        storage,
        store,
    }
}

/// Storage that reads nothing and refuses writes.
pub struct FullDisk;

impl SecureStorage for FullDisk {
    fn get_item(&self, _name: &str) -> LicenseResult<Option<String>> {
        Ok(None)
    }

    fn set_item(&self, _name: &str, _value: &str) -> LicenseResult<()> {
        Err(LicenseError::Storage("disk full".into()))
    }

    fn delete_item(&self, _name: &str) -> LicenseResult<()> {
        Ok(())
    }
}
