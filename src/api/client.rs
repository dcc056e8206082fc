use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use super::models::{
    BrowseResponse, CreatedPlaylistResponse, ErrorBody, MediaItem, Permissions,
    PermissionsResponse, Playlist, PlaylistPlayResponse, PlaylistSummary, PlaylistsResponse,
    SearchKind, SearchResponse, SortKey, SortOrder, SubtitleTrack, SubtitlesResponse,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Non-OK status; the message comes from the server's `{"error": ...}` body.
    #[error("{message}")]
    Server { status: u16, message: String },
}

/// Thin session-holding wrapper over the server's JSON API. One instance is
/// shared by every fetch task; the cookie jar carries the login session.
pub struct ServerClient {
    http: Client,
    base: String,
}

impl ServerClient {
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("kino/", env!("CARGO_PKG_VERSION")))
            .cookie_store(true)
            .build()?;
        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Resolve a server-relative URL (as found in item/subtitle payloads).
    pub fn absolute(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            self.url(url)
        }
    }

    /// URL the playback surface streams an item from.
    pub fn stream_url(&self, item: &MediaItem) -> String {
        match &item.url {
            Some(url) => self.absolute(url),
            None => self.url(&format!("/static/videos/{}", encode_path(&item.path))),
        }
    }

    pub fn download_url(&self, path: &str) -> String {
        self.url(&format!("/api/download/{}", encode_path(path)))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.url("/api/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        expect::<serde_json::Value>(resp).await?;
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let resp = self.http.post(self.url("/api/logout")).send().await?;
        expect::<serde_json::Value>(resp).await?;
        Ok(())
    }

    pub async fn permissions(&self) -> Result<Permissions, ApiError> {
        let resp = self
            .http
            .get(self.url("/api/user/permissions"))
            .send()
            .await?;
        Ok(expect::<PermissionsResponse>(resp).await?.permissions)
    }

    pub async fn browse(
        &self,
        path: &str,
        sort: SortKey,
        order: SortOrder,
    ) -> Result<BrowseResponse, ApiError> {
        let resp = self
            .http
            .get(self.url("/api/browse"))
            .query(&[("path", path), ("sort", sort.as_str()), ("order", order.as_str())])
            .send()
            .await?;
        expect(resp).await
    }

    pub async fn search(&self, query: &str, kind: SearchKind) -> Result<SearchResponse, ApiError> {
        let resp = self
            .http
            .get(self.url("/api/search"))
            .query(&[("q", query), ("type", kind.as_str())])
            .send()
            .await?;
        expect(resp).await
    }

    pub async fn playlists(&self) -> Result<Vec<PlaylistSummary>, ApiError> {
        let resp = self.http.get(self.url("/api/playlists")).send().await?;
        Ok(expect::<PlaylistsResponse>(resp).await?.playlists)
    }

    pub async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> Result<i64, ApiError> {
        let resp = self
            .http
            .post(self.url("/api/playlists"))
            .json(&json!({ "name": name, "description": description }))
            .send()
            .await?;
        Ok(expect::<CreatedPlaylistResponse>(resp).await?.playlist_id)
    }

    /// Replace a playlist's video paths (insertion order is playback order).
    pub async fn set_playlist_videos(
        &self,
        playlist_id: i64,
        videos: &[String],
    ) -> Result<(), ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/api/playlists/{playlist_id}")))
            .json(&json!({ "videos": videos }))
            .send()
            .await?;
        expect::<serde_json::Value>(resp).await?;
        Ok(())
    }

    pub async fn delete_playlist(&self, playlist_id: i64) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/playlists/{playlist_id}")))
            .send()
            .await?;
        expect::<serde_json::Value>(resp).await?;
        Ok(())
    }

    /// Playlist with resolved video objects, ready for playback.
    pub async fn playlist_for_playing(&self, playlist_id: i64) -> Result<Playlist, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/api/playlists/{playlist_id}/play")))
            .send()
            .await?;
        Ok(expect::<PlaylistPlayResponse>(resp).await?.playlist)
    }

    pub async fn subtitles(&self, path: &str) -> Result<Vec<SubtitleTrack>, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/api/subtitles/{}", encode_path(path))))
            .send()
            .await?;
        Ok(expect::<SubtitlesResponse>(resp).await?.subtitles)
    }
}

/// Percent-encode each segment of a server path, keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|seg| urlencoding::encode(seg).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

async fn expect<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp.json().await?)
    } else {
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
