//! Catalog record shapes: the raw IGDB payload and the summary returned to clients.
use serde::{Deserialize, Deserializer, Serialize};

/// A game as returned by `POST /v4/games`.
///
/// Every field except `id` is optional upstream; absent or null values deserialize to
/// `None`/empty so a partial record never fails the whole response.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawCatalogRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_none")]
    pub summary: Option<String>,
    /// Seconds since the Unix epoch.
    #[serde(default, deserialize_with = "number_or_none")]
    pub first_release_date: Option<f64>,
    /// 0-100 scale.
    #[serde(default, deserialize_with = "number_or_none")]
    pub total_rating: Option<f64>,
    #[serde(default, deserialize_with = "count_or_none")]
    pub total_rating_count: Option<u64>,
    #[serde(default)]
    pub cover: Option<Cover>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub platforms: Vec<Option<NamedRef>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<Option<NamedRef>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Cover {
    #[serde(default)]
    pub image_id: Option<String>,
}

/// Expanded relation (`platforms.name`, `genres.name`).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// The simplified game record exposed by this API.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct GameSummary {
    pub id: u64,
    pub name: String,
    pub summary: Option<String>,
    /// `YYYY-MM-DD` (UTC).
    pub released: Option<String>,
    /// 0-5 scale, one decimal.
    pub rating: Option<f64>,
    pub background_image: Option<String>,
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
}

// Anything that is not a JSON number (strings, objects, null) is treated as absent.
fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

// Negative, fractional or non-numeric counts are treated as absent.
fn count_or_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn null_as_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_none(deserializer)?.unwrap_or_default())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_record() {
        let raw: RawCatalogRecord = serde_json::from_str(
            r#"{
                "id": 1942,
                "name": "The Witcher 3: Wild Hunt",
                "summary": "RPG",
                "first_release_date": 1431993600,
                "total_rating": 93.4,
                "total_rating_count": 3100,
                "cover": {"id": 89386, "image_id": "coaarl"},
                "genres": [{"id": 12, "name": "Role-playing (RPG)"}],
                "platforms": [{"id": 6, "name": "PC (Microsoft Windows)"}, {"id": 48, "name": "PlayStation 4"}]
            }"#,
        )
        .unwrap();

        assert_eq!(raw.id, 1942);
        assert_eq!(raw.first_release_date, Some(1_431_993_600.0));
        assert_eq!(raw.total_rating_count, Some(3100));
        assert_eq!(raw.cover.unwrap().image_id.as_deref(), Some("coaarl"));
        assert_eq!(raw.platforms.len(), 2);
    }

    #[test]
    fn tolerates_missing_null_and_odd_fields() {
        let raw: RawCatalogRecord = serde_json::from_str(
            r#"{
                "id": 7,
                "name": null,
                "total_rating_count": -3,
                "first_release_date": "soon",
                "total_rating": null,
                "platforms": null,
                "genres": [null, {"id": 3}]
            }"#,
        )
        .unwrap();

        assert_eq!(raw.name, "");
        assert_eq!(raw.total_rating_count, None);
        assert_eq!(raw.first_release_date, None);
        assert_eq!(raw.total_rating, None);
        assert!(raw.platforms.is_empty());
        assert_eq!(raw.genres, vec![None, Some(NamedRef { name: None })]);
    }

    #[test]
    fn one_odd_record_does_not_fail_the_listing() {
        let records: Vec<RawCatalogRecord> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "ok", "total_rating_count": 12},
                {"id": 2, "name": null, "total_rating_count": 4.5},
                {"id": 3, "name": 42, "summary": false, "total_rating_count": "many"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].total_rating_count, Some(12));
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].total_rating_count, None);
        assert_eq!(records[2].name, "");
        assert_eq!(records[2].summary, None);
        assert_eq!(records[2].total_rating_count, None);
    }
}
