//! Popularity ranking applied to catalog results before mapping.
use std::cmp::Ordering;

use crate::services::catalog::types::RawCatalogRecord;

/// Maximum number of records returned to the client.
pub const MAX_RESULTS: usize = 20;

/// Records below this rating count are dropped from the latest-releases listing.
pub const LATEST_MIN_RATING_COUNT: u64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankPolicy {
    Search,
    /// Same ordering, after removing records with fewer than `LATEST_MIN_RATING_COUNT` ratings.
    /// The upstream query filters too, but its filter is not relied on.
    LatestReleases,
}

fn rating_count(record: &RawCatalogRecord) -> u64 {
    record.total_rating_count.unwrap_or(0)
}

fn rating(record: &RawCatalogRecord) -> f64 {
    record.total_rating.unwrap_or(0.0)
}

/// Rating count descending, then rating descending.
fn by_popularity(a: &RawCatalogRecord, b: &RawCatalogRecord) -> Ordering {
    rating_count(b)
        .cmp(&rating_count(a))
        .then_with(|| rating(b).total_cmp(&rating(a)))
}

/// Sort by popularity (stable, so ties keep input order) and keep the first `MAX_RESULTS`.
pub fn rank(mut records: Vec<RawCatalogRecord>, policy: RankPolicy) -> Vec<RawCatalogRecord> {
    if policy == RankPolicy::LatestReleases {
        records.retain(|r| rating_count(r) >= LATEST_MIN_RATING_COUNT);
    }
    records.sort_by(by_popularity);
    records.truncate(MAX_RESULTS);
    records
}
