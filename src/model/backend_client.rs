//! HTTP transport to the artist backend

use std::future::Future;
use std::time::Duration;

use anyhow::Result;

use crate::error::FetchError;

/// One GET endpoint of the backend, with its single query parameter
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Artist { name: String },
    Tracks { artist_id: String },
    Albums { artist_name: String },
    AlbumTracks { album_id: String },
    RelatedArtists { artist_id: String },
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Artist { .. } => "/artist",
            Endpoint::Tracks { .. } => "/tracks",
            Endpoint::Albums { .. } => "/albums",
            Endpoint::AlbumTracks { .. } => "/albumTracks",
            Endpoint::RelatedArtists { .. } => "/relatedArtists",
        }
    }

    pub fn query(&self) -> (&'static str, &str) {
        match self {
            Endpoint::Artist { name } => ("artist", name),
            Endpoint::Tracks { artist_id } => ("artistId", artist_id),
            Endpoint::Albums { artist_name } => ("artistName", artist_name),
            Endpoint::AlbumTracks { album_id } => ("albumId", album_id),
            Endpoint::RelatedArtists { artist_id } => ("artistId", artist_id),
        }
    }
}

/// Source of raw response bodies.
///
/// The body is returned as text; decoding belongs to the caller.
pub trait Transport: Send + Sync + 'static {
    fn get(&self, endpoint: &Endpoint) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// reqwest-backed transport against a backend base url
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl BackendClient {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<String, FetchError> {
        let path = endpoint.path();
        let (key, value) = endpoint.query();

        let response = self
            .http
            .get(self.url_for(endpoint))
            .query(&[(key, value)])
            .send()
            .await
            .map_err(|e| FetchError::Transport { endpoint: path, source: Box::new(e) })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint: path, status: status.as_u16() });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport { endpoint: path, source: Box::new(e) })
    }
}

impl Transport for BackendClient {
    async fn get(&self, endpoint: &Endpoint) -> Result<String, FetchError> {
        let (key, value) = endpoint.query();
        crate::log_fetch_request!(endpoint.path(), key, value = %value);

        let result = self.fetch(endpoint).await;
        crate::log_fetch_result!(endpoint.path(), result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_backend_routes() {
        let cases = [
            (Endpoint::Artist { name: "Kanye West".into() }, "/artist", "artist", "Kanye West"),
            (Endpoint::Tracks { artist_id: "a1".into() }, "/tracks", "artistId", "a1"),
            (Endpoint::Albums { artist_name: "Kanye West".into() }, "/albums", "artistName", "Kanye West"),
            (Endpoint::AlbumTracks { album_id: "b2".into() }, "/albumTracks", "albumId", "b2"),
            (Endpoint::RelatedArtists { artist_id: "a1".into() }, "/relatedArtists", "artistId", "a1"),
        ];
        for (endpoint, path, key, value) in cases {
            assert_eq!(endpoint.path(), path);
            assert_eq!(endpoint.query(), (key, value));
        }
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let client = BackendClient::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url_for(&Endpoint::Tracks { artist_id: "x".into() }),
            "http://localhost:3000/tracks"
        );
    }
}
