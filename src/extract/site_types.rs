/// Raw JSON shapes served by the site.
///
/// These structures mirror the site's own field names; the extractors map
/// them onto the crate's model records.
use serde::{Deserialize, Deserializer};

/// The site is inconsistent about quoting numeric fields.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Integer(i) => i.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

/// One element of the array passed to `.temporadasBrowser(...)`.
#[derive(Debug, Deserialize)]
pub(super) struct RawSeason {
    #[serde(rename = "ID", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub post_title: Option<String>,
    /// Display order of the season
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub orden: Option<String>,
}

/// Body of `temporadasbrowser/getCapitulos/<season>/<page>`.
#[derive(Debug, Deserialize)]
pub(super) struct RawEpisodePage {
    pub episodes: Vec<RawEpisode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawEpisode {
    #[serde(rename = "ID", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub post_title: Option<String>,
    #[serde(default)]
    pub post_subtitle: Option<String>,
    /// Long description, HTML
    #[serde(default)]
    pub post_content: Option<String>,
    #[serde(default)]
    pub post_date: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Site-relative URL of the episode page
    pub url: String,
}
