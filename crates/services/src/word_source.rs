use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::Deserialize;

use vocab_core::model::{Word, WordId};

use crate::error::WordSourceError;

/// Path of the active word list, relative to the configured base URL.
pub const ACTIVE_WORDS_PATH: &str = "/api/active-words";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Supplies the words for a study run.
///
/// Implementations never fail: transport or decode problems are absorbed and
/// reported through logging. An empty list means the source genuinely has no
/// words.
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn fetch_words(&self) -> Vec<Word>;
}

/// Built-in word list used when the remote list cannot be loaded.
#[must_use]
pub fn fallback_words() -> Vec<Word> {
    const PAIRS: [(u64, &str, &str); 8] = [
        (1, "apple", "elma"),
        (2, "book", "kitap"),
        (3, "house", "ev"),
        (4, "water", "su"),
        (5, "friend", "arkadaş"),
        (6, "school", "okul"),
        (7, "time", "zaman"),
        (8, "city", "şehir"),
    ];
    PAIRS
        .iter()
        .map(|(id, source, target)| Word {
            id: WordId::new(*id),
            source_text: (*source).to_string(),
            target_text: (*target).to_string(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ActiveWordsResponse {
    #[serde(default)]
    words: Option<Vec<Word>>,
}

/// Reads the active word list from the remote HTTP endpoint.
#[derive(Clone)]
pub struct HttpWordSource {
    client: Client,
    endpoint: Url,
    fallback: Vec<Word>,
}

impl HttpWordSource {
    /// Build a source for `{base_url}/api/active-words`.
    ///
    /// # Errors
    ///
    /// Returns `WordSourceError::InvalidUrl` if `base_url` is not an absolute
    /// URL, or `WordSourceError::Http` if the client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, WordSourceError> {
        let base = Url::parse(base_url.trim())
            .map_err(|_| WordSourceError::InvalidUrl(base_url.to_string()))?;
        let endpoint = base
            .join(ACTIVE_WORDS_PATH)
            .map_err(|_| WordSourceError::InvalidUrl(base_url.to_string()))?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            fallback: fallback_words(),
        })
    }

    /// Replace the list returned when the endpoint cannot be used.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Vec<Word>) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Issue the request and decode the payload, surfacing every failure.
    ///
    /// A successful response without a `words` field decodes as an empty list.
    /// Entries with blank text are dropped.
    ///
    /// # Errors
    ///
    /// Returns `WordSourceError` for transport failures, non-success statuses,
    /// and undecodable bodies.
    pub async fn fetch_active_words(&self) -> Result<Vec<Word>, WordSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WordSourceError::HttpStatus(status));
        }

        let body = response.bytes().await?;
        let payload: ActiveWordsResponse = serde_json::from_slice(&body)?;
        let words = payload
            .words
            .unwrap_or_default()
            .into_iter()
            .filter_map(|word| match word.validate() {
                Ok(word) => Some(word),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping invalid word");
                    None
                }
            })
            .collect();
        Ok(words)
    }
}

#[async_trait]
impl WordSource for HttpWordSource {
    async fn fetch_words(&self) -> Vec<Word> {
        match self.fetch_active_words().await {
            Ok(words) => {
                tracing::debug!(count = words.len(), "fetched active words");
                words
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    endpoint = %self.endpoint,
                    "word list unavailable, using fallback"
                );
                self.fallback.clone()
            }
        }
    }
}

/// Fixed in-memory word list, for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    words: Vec<Word>,
}

impl StaticWordSource {
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    #[must_use]
    pub fn fallback() -> Self {
        Self::new(fallback_words())
    }
}

#[async_trait]
impl WordSource for StaticWordSource {
    async fn fetch_words(&self) -> Vec<Word> {
        self.words.clone()
    }
}
