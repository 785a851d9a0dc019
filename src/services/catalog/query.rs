/*
 * Responsibility
 * - Build IGDB query-language (APIcalypse) bodies for `/games`
 * - Search terms are untrusted: only `"` is escaped so the term stays inside its string literal
 */
use chrono::{DateTime, Months, Utc};

/// Raw records requested per query (ranking trims further).
pub const QUERY_LIMIT: usize = 50;

const FIELDS: &str = "id,name,summary,first_release_date,total_rating,total_rating_count,\
cover.image_id,genres.name,platforms.name";

/// How far back the latest-releases window reaches.
const RECENT_WINDOW_MONTHS: u32 = 6;

/// Minimum `total_rating_count` enforced upstream for latest releases.
const RECENT_MIN_RATING_COUNT: u64 = 5;

pub fn search_query(term: &str) -> String {
    format!(
        "search \"{}\";\nfields {FIELDS};\nlimit {QUERY_LIMIT};\n",
        escape_quotes(term)
    )
}

/// Games released in `[now - 6 months, now]` with more than 5 ratings, most rated first.
pub fn recent_releases_query(now: DateTime<Utc>) -> String {
    let from = now
        .checked_sub_months(Months::new(RECENT_WINDOW_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    format!(
        "fields {FIELDS};\n\
         where first_release_date >= {from} & first_release_date <= {to} \
         & total_rating_count > {RECENT_MIN_RATING_COUNT};\n\
         sort total_rating_count desc;\n\
         limit {QUERY_LIMIT};\n",
        from = from.timestamp(),
        to = now.timestamp(),
    )
}

fn escape_quotes(term: &str) -> String {
    term.replace('"', "\\\"")
}
