//! URL slug derivation for content records.
//!
//! A slug is the normalized title joined to a `YYYYMMDDHHmmss` timestamp with
//! a double hyphen, e.g. `my-title--20240315143022`. The timestamp makes
//! collisions possible only for identically-titled content created within the
//! same wall-clock second, so the counter suffix is a fallback, not the
//! primary uniqueness mechanism. The UNIQUE index on each content table is
//! the authoritative guard; callers that insert retry with the next candidate
//! on a constraint violation rather than trusting the probe alone.

use chrono::{DateTime, Utc};
use std::future::Future;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Punctuation stripped outright before the catch-all filter.
const STRIPPED_PUNCTUATION: &str = "&/\\#,+()$~%.'\":*?<>{}\u{bf}!\u{a1}";

/// Curly quotation-mark variants, removed like their ASCII counterparts.
const QUOTE_VARIANTS: &str = "\u{201c}\u{201d}\u{2018}\u{2019}";

/// Normalize a human-readable title into a URL-safe candidate prefix:
/// lowercase, diacritics dropped via NFD decomposition, punctuation stripped,
/// whitespace runs collapsed to single hyphens, repeated hyphens collapsed.
pub fn normalize(title: &str) -> String {
    let filtered: String = title
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !QUOTE_VARIANTS.contains(*c))
        .filter(|c| !STRIPPED_PUNCTUATION.contains(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(filtered.len());
    for c in filtered.trim().chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }
    slug
}

fn timestamp_suffix(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// Infinite candidate sequence for one title: the timestamp-suffixed base
/// first, then `base-1`, `base-2`, ... for collision fallback.
pub struct Candidates {
    base: String,
    counter: u32,
}

impl Candidates {
    pub fn new(title: &str, now: DateTime<Utc>) -> Self {
        Self {
            base: format!("{}--{}", normalize(title), timestamp_suffix(now)),
            counter: 0,
        }
    }

    pub fn next_candidate(&mut self) -> String {
        let candidate = match self.counter {
            0 => self.base.clone(),
            n => format!("{}-{}", self.base, n),
        };
        self.counter += 1;
        candidate
    }
}

/// Assign a unique slug for `title`: probe `exists` starting with the
/// timestamp-suffixed candidate and return the first free one. Errors from
/// `exists` propagate unchanged; the loop itself always terminates because
/// the counter is unbounded and candidates are distinct.
pub async fn assign<F, Fut, E>(title: &str, now: DateTime<Utc>, mut exists: F) -> Result<String, E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let mut candidates = Candidates::new(title, now);
    loop {
        let candidate = candidates.next_candidate();
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::convert::Infallible;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    async fn never_exists(_: String) -> Result<bool, Infallible> {
        Ok(false)
    }

    #[test]
    fn normalize_lowercases_and_hyphenates() {
        assert_eq!(normalize("My First Title"), "my-first-title");
        assert_eq!(normalize("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn normalize_strips_diacritics_and_punctuation() {
        assert_eq!(normalize("Caf\u{e9} & Vin\u{f6}!"), "cafe-vino");
        assert_eq!(normalize("CAFE VINO"), "cafe-vino");
        assert_eq!(
            normalize("\u{bf}Qu\u{e9} es la Inteligencia Artificial?"),
            "que-es-la-inteligencia-artificial"
        );
    }

    #[test]
    fn normalize_collapses_repeated_hyphens() {
        assert_eq!(normalize("a -- b --- c"), "a-b-c");
    }

    #[tokio::test]
    async fn assigned_slug_has_timestamp_suffix() {
        let slug = assign("Hello World", at(2024, 3, 15, 14, 30, 22), never_exists)
            .await
            .unwrap();
        assert_eq!(slug, "hello-world--20240315143022");
    }

    #[tokio::test]
    async fn spec_example_title_and_instant() {
        let slug = assign(
            "\u{bf}Qu\u{e9} es la Inteligencia Artificial?",
            at(2024, 3, 15, 14, 30, 22),
            never_exists,
        )
        .await
        .unwrap();
        assert_eq!(slug, "que-es-la-inteligencia-artificial--20240315143022");
    }

    #[tokio::test]
    async fn collision_appends_counter_and_probes_exactly_once_per_candidate() {
        // exists() is true for exactly the first k probed candidates
        let k = 3u32;
        let mut calls = 0u32;
        let slug = assign("My Title", at(2024, 1, 2, 3, 4, 5), |_candidate| {
            calls += 1;
            let exists = calls <= k;
            async move { Ok::<_, Infallible>(exists) }
        })
        .await
        .unwrap();
        assert_eq!(calls, k + 1);
        assert_eq!(slug, format!("my-title--20240102030405-{}", k));
    }

    #[tokio::test]
    async fn probe_errors_propagate() {
        let result = assign("t", at(2024, 1, 1, 0, 0, 0), |_| async {
            Err::<bool, &str>("store down")
        })
        .await;
        assert_eq!(result, Err("store down"));
    }

    #[test]
    fn candidate_sequence_is_base_then_counters() {
        let mut candidates = Candidates::new("My Title", at(2024, 1, 2, 3, 4, 5));
        assert_eq!(candidates.next_candidate(), "my-title--20240102030405");
        assert_eq!(candidates.next_candidate(), "my-title--20240102030405-1");
        assert_eq!(candidates.next_candidate(), "my-title--20240102030405-2");
    }
}
