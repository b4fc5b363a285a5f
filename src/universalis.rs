use reqwest::{Client, Url};
use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, MapAccess, Visitor}
};
use std::{fmt, time::Duration};

const DEFAULT_BASE_URL: &str = "https://universalis.app";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct World {
    name: String
}

/// Tax percentages per market city, in the order the API reports them.
#[derive(Debug, Default)]
pub struct TaxRates {
    entries: Vec<(String, u8)>
}

impl TaxRates {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, u8)> {
        self.entries.iter()
    }

    /// The lowest rate on record, or `None` for an empty report.
    pub fn minimum_rate(&self) -> Option<u8> {
        self.entries.iter().map(|(_, rate)| *rate).min()
    }
}

impl FromIterator<(String, u8)> for TaxRates {
    fn from_iter<I: IntoIterator<Item = (String, u8)>>(entries: I) -> Self {
        Self {
            entries: entries.into_iter().collect()
        }
    }
}

// The payload is a bare JSON object of city -> rate. Deserializing by hand
// keeps the source ordering that a map type would throw away.
impl<'de> Deserialize<'de> for TaxRates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RatesVisitor;

        impl<'de> Visitor<'de> for RatesVisitor {
            type Value = TaxRates;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of city names to tax percentages")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));

                while let Some(entry) = map.next_entry::<String, u8>()? {
                    entries.push(entry);
                }

                Ok(TaxRates { entries })
            }
        }

        deserializer.deserialize_map(RatesVisitor)
    }
}

pub struct Universalis {
    client: Client,
    base_url: Url
}

impl Universalis {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build().unwrap(),
            base_url: Url::parse(base_url).unwrap()
        }
    }

    /// Fetches the full list of world names, lowercased, in API order.
    /// Degrades to an empty list on any failure.
    pub async fn worlds(&self) -> Vec<String> {
        let mut url = self.base_url.clone();
        url.set_path("api/v2/worlds");

        let worlds = match self.request::<Vec<World>>(url).await {
            Ok(worlds) => worlds,
            Err(error) => {
                log::warn!("Failed to fetch the world list: {error}");

                return vec![];
            }
        };

        worlds.into_iter().map(|world| world.name.to_lowercase()).collect()
    }

    /// Fetches the current tax rates for one world. Degrades to an empty
    /// report on any failure.
    pub async fn tax_rates(&self, world: &str) -> TaxRates {
        let mut url = self.base_url.clone();
        url.set_path("api/tax-rates");
        url.query_pairs_mut().append_pair("world", world);

        match self.request::<TaxRates>(url).await {
            Ok(rates) => rates,
            Err(error) => {
                log::warn!("Failed to fetch tax rates for '{world}': {error}");

                TaxRates::default()
            }
        }
    }

    async fn request<T: DeserializeOwned>(&self, url: Url) -> Result<T, reqwest::Error> {
        self.client.get(url).send().await?.error_for_status()?.json::<T>().await
    }
}
