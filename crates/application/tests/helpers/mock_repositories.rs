#![allow(dead_code)]

use async_trait::async_trait;
use dnstoy_application::ports::{CacheStore, UpstreamResolver};
use dnstoy_domain::{CacheEntry, DomainError};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockCacheStore {
    entries: Arc<RwLock<Vec<CacheEntry>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    gets: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_entry(self, domain: &str, address: &str, query_count: u64) -> Self {
        self.entries
            .write()
            .await
            .push(CacheEntry::new(domain, address, query_count));
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn entry(&self, domain: &str) -> Option<CacheEntry> {
        self.entries
            .read()
            .await
            .iter()
            .find(|e| e.domain == domain)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_write(&self) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("mock write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for MockCacheStore {
    async fn get(&self, domain: &str) -> Result<Option<CacheEntry>, DomainError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("mock read failure".to_string()));
        }
        Ok(self.entry(domain).await)
    }

    async fn put(&self, domain: &str, address: &str) -> Result<(), DomainError> {
        self.check_write()?;
        let mut entries = self.entries.write().await;
        if entries.iter().any(|e| e.domain == domain) {
            return Err(DomainError::DuplicateKey(domain.to_string()));
        }
        entries.push(CacheEntry::new(domain, address, 0));
        Ok(())
    }

    async fn increment_and_check(&self, domain: &str, address: &str) -> Result<bool, DomainError> {
        self.check_write()?;
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.iter_mut().find(|e| e.domain == domain) {
            entry.query_count += 1;
            return Ok(true);
        }
        entries.push(CacheEntry::new(domain, address, 0));
        Ok(false)
    }

    async fn dump(&self) -> Result<Vec<CacheEntry>, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::StorageError("mock read failure".to_string()));
        }
        Ok(self.entries.read().await.clone())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.entries.read().await.len() as u64)
    }
}

#[derive(Clone, Default)]
pub struct MockUpstreamResolver {
    responses: Arc<std::sync::RwLock<HashMap<String, Result<Ipv4Addr, DomainError>>>>,
    calls: Arc<std::sync::Mutex<Vec<String>>>,
    delay: Arc<std::sync::RwLock<Option<Duration>>>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, domain: &str, address: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(domain.to_string(), Ok(address.parse().unwrap()));
    }

    pub fn set_error(&self, domain: &str, error: DomainError) {
        self.responses
            .write()
            .unwrap()
            .insert(domain.to_string(), Err(error));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write().unwrap() = Some(delay);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, domain: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.as_str() == domain)
            .count()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn resolve(&self, domain: &str) -> Result<Ipv4Addr, DomainError> {
        self.calls.lock().unwrap().push(domain.to_string());

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .read()
            .unwrap()
            .get(domain)
            .cloned()
            .unwrap_or_else(|| Err(DomainError::NoAddressFound(domain.to_string())))
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
