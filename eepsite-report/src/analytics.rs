use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::invariants::{MonthKey, Page, Router};
use crate::models::LogEntry;

const TOP_N: usize = 50;

/// Requests from the site's own host are the operator, not visitors.
const LOOPBACK: &str = "127.0.0.1";

const IGNORED_REQUESTS: [&str; 4] = ["GET /", "GET /styles.css", "GET /favicon.png", "HEAD /"];
const IGNORED_SUFFIXES: [&str; 3] = [".png", ".ico", ".css"];

/// 56 months approximated as 56 x 30 days. Intentionally not calendar-month
/// arithmetic; the rollup window is a fixed duration.
const WINDOW_DAYS: i64 = 56 * 30;

/// Everything the report needs, computed in one pass over the full entry
/// set. `compute` is a pure function of the entries and the supplied clock
/// reference, so two runs over the same input with the same `now` are
/// identical.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub top_routers: Vec<(Router, u64)>,
    pub total_html_requests: u64,
    pub top_pages: Vec<(Page, u64)>,
    pub monthly_requests: Vec<(MonthKey, u64)>,
    pub average_monthly_loads: f64,
    pub most_popular_hour: Option<u32>,
    pub generated_at: String,
}

impl Statistics {
    pub fn compute(entries: &[LogEntry], now: NaiveDateTime) -> Self {
        let mut top_routers = ranked_counts(
            entries
                .iter()
                .filter(|e| e.router != LOOPBACK)
                .map(|e| Router::from(e.router.as_str())),
        );
        top_routers.truncate(TOP_N);

        let total_html_requests = entries
            .iter()
            .filter(|e| e.request.contains(".html"))
            .count() as u64;

        let mut top_pages = ranked_counts(
            entries
                .iter()
                .filter(|e| !is_ignored_request(&e.request))
                .map(|e| Page::from(e.request.as_str())),
        );
        top_pages.truncate(TOP_N);

        let cutoff = now - Duration::days(WINDOW_DAYS);
        let mut monthly: BTreeMap<MonthKey, u64> = BTreeMap::new();
        for entry in entries.iter().filter(|e| e.timestamp > cutoff) {
            *monthly.entry(MonthKey::from(entry.timestamp)).or_default() += 1;
        }
        let window_total: u64 = monthly.values().sum();
        let average_monthly_loads = if monthly.is_empty() {
            0.0
        } else {
            window_total as f64 / monthly.len() as f64
        };
        let monthly_requests: Vec<_> = monthly.into_iter().collect();

        // Hour popularity uses the full entry set, unlike the monthly rollup.
        let most_popular_hour = ranked_counts(entries.iter().map(|e| e.timestamp.hour()))
            .into_iter()
            .next()
            .map(|(hour, _)| hour);

        let generated_at = now.format("%d/%b/%Y %H:%M:%S").to_string();

        Self {
            top_routers,
            total_html_requests,
            top_pages,
            monthly_requests,
            average_monthly_loads,
            most_popular_hour,
            generated_at,
        }
    }
}

fn is_ignored_request(request: &str) -> bool {
    IGNORED_SUFFIXES.iter().any(|s| request.ends_with(s))
        || IGNORED_REQUESTS.contains(&request)
}

/// Frequency count over `keys`, sorted by count descending. Ties keep the
/// order in which a key was first seen, which makes ranking deterministic
/// for a fixed input ordering; beyond count-descending the order is
/// otherwise unspecified (there is no secondary sort key in the data).
fn ranked_counts<K, I>(keys: I) -> Vec<(K, u64)>
where
    K: Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let mut counts: HashMap<K, (usize, u64)> = HashMap::new();
    for key in keys {
        let first_seen = counts.len();
        counts.entry(key).or_insert((first_seen, 0)).1 += 1;
    }
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_unstable_by_key(|&(_, (first_seen, count))| (Reverse(count), first_seen));
    ranked
        .into_iter()
        .map(|(key, (_, count))| (key, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;
    use chrono::NaiveDate;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn entry(router: &str, timestamp: NaiveDateTime, request: &str) -> LogEntry {
        LogEntry {
            router: router.into(),
            timestamp,
            request: request.into(),
            status_code: "200".into(),
        }
    }

    fn repeat(count: usize, make: impl Fn() -> LogEntry) -> Vec<LogEntry> {
        (0..count).map(|_| make()).collect()
    }

    fn now_ref() -> NaiveDateTime {
        ts(2024, 6, 1, 12, 0, 0)
    }

    #[test]
    fn router_ranking_excludes_loopback() {
        let when = ts(2024, 5, 1, 10, 0, 0);
        let mut entries = repeat(5, || entry("router-a", when, "GET /a.html"));
        entries.extend(repeat(100, || entry("127.0.0.1", when, "GET /a.html")));
        entries.extend(repeat(3, || entry("router-b", when, "GET /a.html")));

        let stats = Statistics::compute(&entries, now_ref());
        let routers: Vec<_> = stats
            .top_routers
            .iter()
            .map(|(r, n)| (r.as_str(), *n))
            .collect();
        assert_that!(routers).is_equal_to(vec![("router-a", 5), ("router-b", 3)]);
    }

    #[test]
    fn html_requests_counted_by_substring() {
        let when = ts(2024, 5, 1, 10, 0, 0);
        let entries = vec![
            entry("r", when, "GET /index.html"),
            entry("r", when, "GET /index.html?from=feed"),
            entry("r", when, "GET /styles.css"),
        ];
        let stats = Statistics::compute(&entries, now_ref());
        assert_that!(stats.total_html_requests).is_equal_to(2);
    }

    #[test]
    fn page_ranking_skips_assets_and_ignored_literals() {
        let when = ts(2024, 5, 1, 10, 0, 0);
        let mut entries = repeat(10, || entry("r", when, "GET /index.html"));
        entries.extend(repeat(5, || entry("r", when, "GET /other.html")));
        entries.extend(repeat(50, || entry("r", when, "GET /favicon.png")));
        entries.extend(repeat(50, || entry("r", when, "GET /theme/dark.css")));
        entries.extend(repeat(50, || entry("r", when, "GET /icons/rss.ico")));
        entries.extend(repeat(50, || entry("r", when, "HEAD /")));

        let stats = Statistics::compute(&entries, now_ref());
        let pages: Vec<_> = stats
            .top_pages
            .iter()
            .map(|(p, n)| (p.as_str(), *n))
            .collect();
        assert_that!(pages).is_equal_to(vec![("GET /index.html", 10), ("GET /other.html", 5)]);
    }

    #[test]
    fn ranking_ties_keep_first_seen_order() {
        let when = ts(2024, 5, 1, 10, 0, 0);
        let entries = vec![
            entry("late-but-first", when, "GET /a.html"),
            entry("second", when, "GET /a.html"),
            entry("second", when, "GET /a.html"),
            entry("late-but-first", when, "GET /a.html"),
            entry("third", when, "GET /a.html"),
            entry("third", when, "GET /a.html"),
        ];
        let stats = Statistics::compute(&entries, now_ref());
        let routers: Vec<_> = stats.top_routers.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(routers, vec!["late-but-first", "second", "third"]);
    }

    #[test]
    fn ranking_truncates_to_fifty() {
        let when = ts(2024, 5, 1, 10, 0, 0);
        let entries: Vec<_> = (0..60)
            .map(|i| entry(&format!("router-{i}"), when, "GET /a.html"))
            .collect();
        let stats = Statistics::compute(&entries, now_ref());
        assert_that!(stats.top_routers).has_length(50);
    }

    #[test]
    fn monthly_window_boundary_is_strict() {
        let now = now_ref();
        let cutoff = now - Duration::days(WINDOW_DAYS);
        let entries = vec![
            entry("r", cutoff - Duration::seconds(1), "GET /old.html"),
            entry("r", cutoff + Duration::seconds(1), "GET /new.html"),
        ];
        let stats = Statistics::compute(&entries, now);
        let total: u64 = stats.monthly_requests.iter().map(|(_, n)| n).sum();
        assert_that!(total).is_equal_to(1);
    }

    #[test]
    fn monthly_rollup_sorted_ascending() {
        let now = now_ref();
        let entries = vec![
            entry("r", ts(2024, 3, 10, 1, 0, 0), "GET /a.html"),
            entry("r", ts(2024, 1, 10, 1, 0, 0), "GET /a.html"),
            entry("r", ts(2024, 2, 10, 1, 0, 0), "GET /a.html"),
            entry("r", ts(2024, 1, 20, 1, 0, 0), "GET /a.html"),
        ];
        let stats = Statistics::compute(&entries, now);
        let months: Vec<_> = stats
            .monthly_requests
            .iter()
            .map(|(m, n)| (m.to_string(), *n))
            .collect();
        assert_eq!(
            months,
            vec![
                ("2024-01".to_string(), 2),
                ("2024-02".to_string(), 1),
                ("2024-03".to_string(), 1),
            ]
        );
    }

    #[test]
    fn average_over_qualifying_months() {
        let now = now_ref();
        let mut entries = repeat(10, || entry("r", ts(2024, 1, 15, 1, 0, 0), "GET /a.html"));
        entries.extend(repeat(20, || entry("r", ts(2024, 2, 15, 1, 0, 0), "GET /a.html")));
        let stats = Statistics::compute(&entries, now);
        assert_that!(stats.average_monthly_loads).is_equal_to(15.0);
    }

    #[test]
    fn average_is_zero_without_qualifying_months() {
        let now = now_ref();
        let entries = vec![entry("r", ts(2010, 1, 1, 0, 0, 0), "GET /a.html")];
        let stats = Statistics::compute(&entries, now);
        assert_that!(stats.average_monthly_loads).is_equal_to(0.0);
        assert_that!(stats.monthly_requests).is_empty();
    }

    #[test]
    fn popular_hour_uses_full_entry_set() {
        let now = now_ref();
        // Entries far outside the monthly window still vote for their hour.
        let mut entries = repeat(3, || entry("r", ts(2010, 1, 1, 22, 0, 0), "GET /a.html"));
        entries.push(entry("r", ts(2024, 5, 1, 9, 0, 0), "GET /a.html"));
        let stats = Statistics::compute(&entries, now);
        assert_eq!(stats.most_popular_hour, Some(22));
    }

    #[test]
    fn popular_hour_none_when_empty() {
        let stats = Statistics::compute(&[], now_ref());
        assert_that!(stats.most_popular_hour).is_none();
        assert_that!(stats.total_html_requests).is_equal_to(0);
    }

    #[test]
    fn compute_is_deterministic() {
        let when = ts(2024, 5, 1, 10, 0, 0);
        let entries = vec![
            entry("a", when, "GET /x.html"),
            entry("b", when, "GET /y.html"),
            entry("a", when, "GET /x.html"),
        ];
        let first = Statistics::compute(&entries, now_ref());
        let second = Statistics::compute(&entries, now_ref());
        assert_that!(first).is_equal_to(second);
    }

    #[test]
    fn generated_at_formats_clock_reference() {
        let stats = Statistics::compute(&[], ts(2024, 6, 1, 12, 0, 0));
        assert_that!(stats.generated_at).is_equal_to("01/Jun/2024 12:00:00".to_string());
    }
}
