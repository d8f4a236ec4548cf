use std::fmt::Write;

use qamus_types::WordEntry;
use serde::Serialize;

pub const WELCOME: &str = "Type an English or Arabic word to look it up. Ctrl+D to quit.";

/// Plain text rendering of one entry
pub fn render_entry(entry: &WordEntry) -> String {
    let mut out = String::new();

    let _ = write!(out, "{} ({})", entry.word, entry.language);
    if !entry.pronunciation.is_empty() {
        let _ = write!(out, "  [{}]", entry.pronunciation);
    }
    match &entry.source {
        Some(source) => {
            let _ = write!(out, "  · {source}");
        }
        None => out.push_str("  · local"),
    }
    out.push('\n');

    for group in &entry.translations {
        let _ = writeln!(out, "  {}: {}", group.kind, group.meanings.join("; "));
    }
    if !entry.synonyms.is_empty() {
        let _ = writeln!(out, "  synonyms: {}", entry.synonyms.join(", "));
    }
    if !entry.audio.is_empty() {
        let _ = writeln!(out, "  audio: {}", entry.audio);
    }

    out
}

/// Result list, cut to `max_results` entries
pub fn render_results(query: &str, results: &[WordEntry], max_results: usize) -> String {
    let shown = results.len().min(max_results);
    let mut out = format!("{} result(s) for '{}'\n", results.len(), query);

    for entry in &results[..shown] {
        out.push('\n');
        out.push_str(&render_entry(entry));
    }
    if shown < results.len() {
        let _ = writeln!(out, "\n… {} more not shown", results.len() - shown);
    }

    out
}

pub fn render_no_results(query: &str) -> String {
    format!("No results for '{query}'\n")
}

#[derive(Serialize)]
struct JsonResults<'a> {
    query: &'a str,
    results: &'a [WordEntry],
}

/// One JSON document per query
pub fn render_json(query: &str, results: &[WordEntry], max_results: usize) -> anyhow::Result<String> {
    let shown = results.len().min(max_results);
    let json = serde_json::to_string(&JsonResults {
        query,
        results: &results[..shown],
    })?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use qamus_types::{Language, TranslationGroup};

    use super::*;

    fn book() -> WordEntry {
        let mut entry = WordEntry::new("book", Language::English);
        entry.pronunciation = "/bʊk/".into();
        entry.push_translation(TranslationGroup::new("noun", vec!["a written work".into()]));
        entry.push_translation(TranslationGroup::new("Arabic translation", vec!["كتاب".into()]));
        entry.push_synonym("volume");
        entry
    }

    #[test]
    fn test_render_entry() {
        let text = render_entry(&book());
        assert!(text.starts_with("book (English)  [/bʊk/]  · local"));
        assert!(text.contains("  noun: a written work\n"));
        assert!(text.contains("  Arabic translation: كتاب\n"));
        assert!(text.contains("  synonyms: volume\n"));
    }

    #[test]
    fn test_render_results_respects_max() {
        let results = vec![book(), book().with_source("Free Dictionary"), book()];
        let text = render_results("book", &results, 2);
        assert!(text.starts_with("3 result(s) for 'book'"));
        assert!(text.contains("Free Dictionary"));
        assert!(text.contains("1 more not shown"));
    }

    #[test]
    fn test_render_json_uses_wire_names() {
        let json = render_json("book", &[book().with_source("Wordnik")], 20).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["query"], "book");
        assert_eq!(value["results"][0]["sourceLabel"], "Wordnik");
        assert_eq!(value["results"][0]["translations"][0]["type"], "noun");
    }
}
