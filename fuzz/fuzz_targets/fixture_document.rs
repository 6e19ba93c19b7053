#![no_main]

use fixture::{FixtureDocument, FixtureSummary};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = FixtureDocument::from_json_slice(data) else {
        return;
    };

    // Validation must report, never panic, on arbitrary documents.
    if doc.validate().is_ok() {
        let summary = FixtureSummary::from_document(&doc, 120.0);
        assert_eq!(summary.entity_count, doc.len());
        assert_eq!(summary.first_spawn.is_some(), !doc.is_empty());

        let json = doc.to_json_pretty().expect("serialize valid fixture");
        let reparsed = FixtureDocument::from_json_slice(json.as_bytes()).expect("reparse");
        assert_eq!(reparsed.len(), doc.len());
    }
});
