/*
 * Responsibility
 * - RawCatalogRecord -> GameSummary
 * - Pure and total: every field degrades to None/empty instead of failing
 */
use chrono::DateTime;

use crate::services::catalog::types::{GameSummary, NamedRef, RawCatalogRecord};

const COVER_URL_PREFIX: &str = "https://images.igdb.com/igdb/image/upload/t_cover_big/";

pub fn to_summary(record: RawCatalogRecord) -> GameSummary {
    GameSummary {
        id: record.id,
        released: record.first_release_date.and_then(release_date),
        rating: record.total_rating.map(five_point_rating),
        background_image: record
            .cover
            .and_then(|c| c.image_id)
            .as_deref()
            .and_then(cover_url),
        platforms: names(record.platforms),
        genres: names(record.genres),
        name: record.name,
        summary: record.summary,
    }
}

/// Epoch seconds -> `YYYY-MM-DD` in UTC.
fn release_date(seconds: f64) -> Option<String> {
    if !seconds.is_finite() {
        return None;
    }
    let secs = seconds.floor();
    if secs < i64::MIN as f64 || secs > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(secs as i64, 0).map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// 0-100 -> 0-5, clamped, rounded half away from zero to one decimal.
fn five_point_rating(rating: f64) -> f64 {
    // round(r / 20, 1) == round(r / 2) / 10
    let tenths = (rating / 2.0).clamp(0.0, 50.0).round();
    tenths / 10.0
}

fn cover_url(image_id: &str) -> Option<String> {
    if image_id.is_empty() {
        return None;
    }
    Some(format!("{COVER_URL_PREFIX}{image_id}.jpg"))
}

fn names(refs: Vec<Option<NamedRef>>) -> Vec<String> {
    refs.into_iter()
        .filter_map(|r| r.and_then(|r| r.name))
        .filter(|name| !name.is_empty())
        .collect()
}
