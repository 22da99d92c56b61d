//! Integration tests for the full ingestion path:
//! raw text -> extraction -> normalization -> store -> lookup.

use fund_extraction::{
    extract_document, normalize, FactField, MemoryStore, RawDocument, SchemeStore,
};

const AXIS_PAGE: &str = "\
Axis Bluechip Fund Direct Growth | Groww
NAV: 21 Nov 2025 ₹42.58
Equity Large Cap scheme benchmarked to NIFTY 100 TRI.
Expense ratio: 0.45%
Exit load of 1% if redeemed within 1 year.
Min. SIP amount: ₹500
Riskometer: Very High
Fund manager: Shreyash Devalkar
Fund size: ₹33,518Cr
Holdings
Name | Instrument | Assets
HDFC Bank | Equity | 9.80%
TREPS | Cash Equivalent | 2.10%
";

const ELSS_PAGE: &str = "\
Quant ELSS Tax Saver Fund Direct Growth | Groww
This ELSS fund has a statutory lock-in.
Expense ratio: 0.59%
Min. SIP amount: ₹1,000
Riskometer: Very High
";

fn ingest(text: &str, locator: &str) -> fund_extraction::Scheme {
    let doc = RawDocument::new(text, locator);
    normalize(extract_document(&doc), &doc.source_locator)
}

#[tokio::test]
async fn round_trip_preserves_extracted_facts() {
    let locator = "https://groww.in/mutual-funds/axis-bluechip-fund-direct-growth";
    let scheme = ingest(AXIS_PAGE, locator);
    let expected_facts = scheme.facts.clone();

    let store = MemoryStore::new();
    store.store(vec![scheme]).await.unwrap();

    let found = store
        .find("Axis Bluechip Fund Direct Growth")
        .await
        .unwrap()
        .expect("stored scheme should be findable by its display name");

    assert_eq!(found.facts, expected_facts);
    assert_eq!(found.source_locator, locator);
    assert_eq!(found.facts.get(FactField::ExpenseRatio).value(), Some("0.45%"));
    assert_eq!(found.facts.get(FactField::Nav).value(), Some("₹42.58"));
}

#[tokio::test]
async fn ingesting_same_locator_twice_replaces_not_duplicates() {
    let locator = "https://groww.in/mutual-funds/axis-bluechip-fund-direct-growth";
    let store = MemoryStore::new();

    store.store(vec![ingest(AXIS_PAGE, locator)]).await.unwrap();
    store.store(vec![ingest(AXIS_PAGE, locator)]).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn same_name_different_locator_yields_two_records_sharing_an_id() {
    let store = MemoryStore::new();
    store
        .store(vec![
            ingest(AXIS_PAGE, "https://groww.in/mutual-funds/axis-bluechip"),
            ingest(AXIS_PAGE, "https://mirror.example/axis-bluechip"),
        ])
        .await
        .unwrap();

    let all = store.all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, all[1].id);
}

#[tokio::test]
async fn elss_page_gets_lock_in_and_category() {
    let scheme = ingest(ELSS_PAGE, "https://groww.in/mutual-funds/quant-elss");

    assert_eq!(scheme.category.as_deref(), Some("ELSS"));
    assert_eq!(
        scheme.facts.get(FactField::LockIn).value(),
        Some("3 years (ELSS)")
    );
}

#[tokio::test]
async fn holdings_survive_the_round_trip() {
    let locator = "https://groww.in/mutual-funds/axis-bluechip-fund-direct-growth";
    let store = MemoryStore::new();
    store.store(vec![ingest(AXIS_PAGE, locator)]).await.unwrap();

    let found = store.find("Axis Bluechip").await.unwrap().unwrap();
    assert_eq!(found.holdings.len(), 2);

    let composition = found.portfolio_composition();
    assert_eq!(composition.total_cash.as_deref(), Some("2.10%"));
    assert_eq!(composition.total_debt, None);
}

#[tokio::test]
async fn stats_reflect_field_completeness() {
    let store = MemoryStore::new();
    store
        .store(vec![
            ingest(AXIS_PAGE, "https://groww.in/mutual-funds/axis-bluechip"),
            ingest(ELSS_PAGE, "https://groww.in/mutual-funds/quant-elss"),
        ])
        .await
        .unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_schemes, 2);
    assert_eq!(stats.field_availability["expense_ratio"].available, 2);
    assert_eq!(stats.field_availability["fund_manager"].available, 1);
}
