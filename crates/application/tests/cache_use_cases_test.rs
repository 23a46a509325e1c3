mod helpers;

use dnstoy_application::use_cases::{
    AddCacheEntryUseCase, CountCacheEntriesUseCase, DumpCacheUseCase,
};
use dnstoy_domain::DomainError;
use helpers::MockCacheStore;
use std::sync::Arc;

#[tokio::test]
async fn test_dump_returns_entries_in_storage_order() {
    let cache = MockCacheStore::new()
        .with_entry("b.example.", "192.0.2.2", 3)
        .await
        .with_entry("a.example.", "192.0.2.1", 0)
        .await;

    let use_case = DumpCacheUseCase::new(Arc::new(cache));
    let entries = use_case.execute().await.unwrap();

    let domains: Vec<&str> = entries.iter().map(|e| e.domain.as_str()).collect();
    assert_eq!(domains, vec!["b.example.", "a.example."]);
    assert_eq!(entries[0].query_count, 3);
}

#[tokio::test]
async fn test_dump_surfaces_storage_errors() {
    let cache = MockCacheStore::new();
    cache.set_fail_reads(true);

    let use_case = DumpCacheUseCase::new(Arc::new(cache));
    assert!(matches!(
        use_case.execute().await,
        Err(DomainError::StorageError(_))
    ));
}

#[tokio::test]
async fn test_add_normalizes_domain_and_address() {
    let cache = MockCacheStore::new();
    let use_case = AddCacheEntryUseCase::new(Arc::new(cache.clone()));

    let entry = use_case.execute("Printer.LAN", " 192.168.1.10 ").await.unwrap();

    assert_eq!(entry.domain, "printer.lan.");
    assert_eq!(entry.address, "192.168.1.10");
    assert_eq!(entry.query_count, 0);
    assert!(cache.entry("printer.lan.").await.is_some());
}

#[tokio::test]
async fn test_add_rejects_duplicates() {
    let cache = MockCacheStore::new()
        .with_entry("printer.lan.", "192.168.1.10", 0)
        .await;
    let use_case = AddCacheEntryUseCase::new(Arc::new(cache));

    let result = use_case.execute("printer.lan", "192.168.1.11").await;
    assert!(matches!(result, Err(DomainError::DuplicateKey(_))));
}

#[tokio::test]
async fn test_add_rejects_bad_input() {
    let cache = MockCacheStore::new();
    let use_case = AddCacheEntryUseCase::new(Arc::new(cache.clone()));

    assert!(matches!(
        use_case.execute("printer.lan", "not-an-ip").await,
        Err(DomainError::InvalidIpAddress(_))
    ));
    assert!(matches!(
        use_case.execute("", "192.168.1.10").await,
        Err(DomainError::InvalidDomain(_))
    ));
    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn test_count_entries() {
    let cache = MockCacheStore::new()
        .with_entry("a.example.", "192.0.2.1", 0)
        .await
        .with_entry("b.example.", "192.0.2.2", 0)
        .await;

    let use_case = CountCacheEntriesUseCase::new(Arc::new(cache));
    assert_eq!(use_case.execute().await.unwrap(), 2);
}
