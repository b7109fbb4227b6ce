//! Common test harness for pagequery integration tests.
//!
//! Provides a seeded content library and logging setup.

use std::sync::Once;

use chrono::{DateTime, Duration, TimeZone, Utc};
use pagequery::InMemorySource;
use pagequery::models::{Document, DocumentFilter, Language, Version};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(n)
}

/// 25 documents; 7 of them mention "faith" in their title (in varying
/// case), every fifth is unpublished, categories rotate through
/// sermon, article, bulletin.
pub fn documents() -> Vec<Document> {
    (0..25u64)
        .map(|i| {
            let title = match i {
                0 | 4 | 8 => format!("FAITH and Works {i}"),
                12 | 16 => format!("Faithful Servants {i}"),
                20 | 24 => format!("Small faith {i}"),
                _ => format!("Hope Renewed {i}"),
            };
            let category = ["sermon", "article", "bulletin"][(i % 3) as usize];
            Document {
                id: i + 1,
                title,
                author: if i % 2 == 0 { "M. Luther" } else { "J. Calvin" }.to_string(),
                summary: format!("Entry number {i}"),
                category: category.to_string(),
                published: i % 5 != 4,
                tags: vec![category.to_string()],
                created_at: day(i as i64),
                updated_at: day(i as i64),
            }
        })
        .collect()
}

/// The document library as a data source.
pub fn document_source() -> InMemorySource<Document, DocumentFilter> {
    init_tracing();
    InMemorySource::with_items(Document::SEARCHABLE_FIELDS, documents())
}

/// Three versions of document 1 and one of document 2.
pub fn versions() -> Vec<Version> {
    [(1, "en"), (1, "pt-BR"), (1, "es"), (2, "en")]
        .into_iter()
        .enumerate()
        .map(|(i, (document_id, language))| Version {
            id: i as u64 + 1,
            document_id,
            language: language.to_string(),
            title: format!("Title in {language}"),
            body: format!("Body of document {document_id}"),
            created_at: day(i as i64),
        })
        .collect()
}

/// Languages offered by the site.
pub fn languages() -> Vec<Language> {
    [("en", "English"), ("pt-BR", "Portuguese"), ("es", "Spanish")]
        .into_iter()
        .map(|(code, name)| Language {
            code: code.to_string(),
            name: name.to_string(),
            enabled: true,
        })
        .collect()
}
