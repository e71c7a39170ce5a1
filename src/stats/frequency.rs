use crate::model::{Commit, FrequencyMap, Granularity};
use crate::util::{diff_days_inclusive, month_key, week_key};
use std::collections::BTreeMap;

/// Bucket commits by calendar date at the requested granularity.
/// Weekly keys use the day-of-year approximation from `util::week_key`;
/// commits whose date fails to parse are skipped there.
pub fn frequency(commits: &[Commit], granularity: Granularity) -> FrequencyMap {
    let mut buckets = FrequencyMap::new();
    for c in commits {
        let key = match granularity {
            Granularity::Daily => c.date.clone(),
            Granularity::Monthly => month_key(&c.date).to_string(),
            Granularity::Weekly => match week_key(&c.date) {
                Some(key) => key,
                None => continue,
            },
        };
        *buckets.entry(key).or_insert(0) += 1;
    }
    buckets
}

/// Author name -> per-date commit counts, both levels ascending.
pub fn frequency_by_author(commits: &[Commit]) -> BTreeMap<String, FrequencyMap> {
    let mut map: BTreeMap<String, FrequencyMap> = BTreeMap::new();
    for c in commits {
        *map.entry(c.author_name.clone())
            .or_default()
            .entry(c.date.clone())
            .or_insert(0) += 1;
    }
    map
}

/// Average commits per day over an inclusive date range, rounded to
/// two decimals. Zero when there are no commits or the range is empty
/// or unparseable.
pub fn average_per_day(total: u64, since: &str, until: &str) -> f64 {
    if total == 0 {
        return 0.0;
    }
    match diff_days_inclusive(since, until) {
        Some(days) if days > 0 => ((total as f64 / days as f64) * 100.0).round() / 100.0,
        _ => 0.0,
    }
}
