use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

const KITSU_API: &str = "https://kitsu.io/api/edge";

#[derive(Debug, Deserialize)]
struct KitsuResponse {
    data: Vec<KitsuAnime>,
}

#[derive(Debug, Deserialize)]
pub struct KitsuAnime {
    pub id: String,
    pub attributes: KitsuAttributes,
}

#[derive(Debug, Deserialize)]
pub struct KitsuAttributes {
    #[serde(rename = "canonicalTitle")]
    pub canonical_title: Option<String>,
    #[serde(default)]
    pub titles: KitsuTitles,
    pub synopsis: Option<String>,
    #[serde(rename = "posterImage")]
    pub poster_image: Option<KitsuImage>,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<KitsuImage>,
    pub status: Option<String>,
    /// 0-100 scale, string-encoded by the API.
    #[serde(rename = "averageRating")]
    pub average_rating: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KitsuTitles {
    pub en: Option<String>,
    pub en_jp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KitsuImage {
    pub small: Option<String>,
    pub original: Option<String>,
}

#[derive(Clone)]
pub struct KitsuClient {
    client: Client,
    page_limit: u32,
}

impl KitsuClient {
    #[must_use]
    pub fn new(page_limit: u32) -> Self {
        Self {
            client: Client::new(),
            page_limit,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<KitsuAnime>> {
        let url = format!(
            "{KITSU_API}/anime?filter[text]={}&page[limit]={}",
            urlencoding::encode(query),
            self.page_limit
        );

        let response: KitsuResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.data)
    }
}
