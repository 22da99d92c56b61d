//! End-to-end demo: ingest two sample pages, then answer a batch of
//! queries against the resulting store.
//!
//! Run with `cargo run -p faq-assistant --example faq_demo`. Set
//! `RUST_LOG=debug` to watch extraction and resolution decisions.

use anyhow::Result;
use faq_assistant::FaqAssistant;
use fund_extraction::{extract_document, normalize, MemoryStore, RawDocument, SchemeStore};

const SAMPLE_PAGES: &[(&str, &str)] = &[
    (
        "https://groww.in/mutual-funds/axis-bluechip-fund-direct-growth",
        "\
Axis Bluechip Fund Direct Growth | Groww
NAV: 21 Nov 2025 ₹42.58
Equity Large Cap scheme benchmarked to NIFTY 100 TRI.
Expense ratio: 0.45%
Exit load of 1% if redeemed within 1 year.
Min. SIP amount: ₹500
Riskometer: Very High
Fund manager: Shreyash Devalkar
Fund size: ₹33,518Cr
",
    ),
    (
        "https://groww.in/mutual-funds/quant-elss-tax-saver-fund-direct-growth",
        "\
Quant ELSS Tax Saver Fund Direct Growth | Groww
This ELSS fund has a statutory lock-in.
Expense ratio: 0.59%
Min. SIP amount: ₹1,000
Riskometer: Very High
",
    ),
];

const DEMO_QUERIES: &[&str] = &[
    "Expense ratio of Axis Bluechip Fund?",
    "What is the minimum SIP for Quant ELSS Tax Saver Fund?",
    "ELSS lock-in period for Quant ELSS Tax Saver Fund?",
    "Who is the fund manager of Axis Bluechip Fund?",
    "Should I buy Axis Bluechip Fund?",
    "Benchmark of some unknown fund?",
];

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let store = MemoryStore::new();
    for (locator, text) in SAMPLE_PAGES {
        let doc = RawDocument::new(*text, *locator);
        let scheme = normalize(extract_document(&doc), &doc.source_locator);
        store.upsert(scheme).await?;
    }

    let stats = store.stats().await?;
    println!("Ingested {} schemes", stats.total_schemes);

    let assistant = FaqAssistant::new(store);

    for query in DEMO_QUERIES {
        let answer = assistant.answer(query, Some("demo-session")).await?;
        println!("\nQ: {query}");
        println!("A: {}", answer.answer);
        println!("   source: {}", answer.source_locator);
        println!("   intent: {}", answer.intent_label);
    }

    Ok(())
}
