use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, multipart};
use serde::Deserialize;

use crate::{
    api::blogs,
    client::ApiClient,
    config::ClientConfig,
    error::{ApiError, ApiResult},
    models::{BlogStatus, NewBlog},
    session::Session,
};

pub const IMGBB_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// ImageFile
///
/// An image picked by the user, held in memory until upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// ImageHost
///
/// Third-party image hosting. Returns the public URL of the stored image.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: &ImageFile) -> ApiResult<String>;
}

#[derive(Deserialize)]
struct ImgbbResponse {
    #[serde(default)]
    success: bool,
    data: Option<ImgbbData>,
}

#[derive(Deserialize)]
struct ImgbbData {
    url: String,
}

/// ImgbbClient
///
/// Multipart upload of an `image` field to imgbb, keyed by the configured API key.
#[derive(Clone, Debug)]
pub struct ImgbbClient {
    http: Client,
    upload_url: String,
    api_key: String,
}

impl ImgbbClient {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            upload_url: IMGBB_UPLOAD_URL.to_string(),
            api_key: config.imgbb_api_key.clone(),
        })
    }

    /// Points the client at a different upload endpoint.
    pub fn with_upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.upload_url = upload_url.into();
        self
    }
}

#[async_trait]
impl ImageHost for ImgbbClient {
    async fn upload(&self, image: &ImageFile) -> ApiResult<String> {
        let part = multipart::Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        let form = multipart::Form::new().part("image", part);

        tracing::debug!(file = %image.file_name, size = image.bytes.len(), "uploading image");
        let response = self
            .http
            .post(&self.upload_url)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body: ImgbbResponse = response.json().await.map_err(|e| {
            tracing::error!("image host returned {}: {}", status, e);
            ApiError::Upload(format!("unreadable response ({status})"))
        })?;

        match body.data {
            Some(data) if body.success => {
                tracing::info!(url = %data.url, "image uploaded");
                Ok(data.url)
            }
            _ => {
                tracing::warn!(%status, "image host rejected the upload");
                Err(ApiError::Upload("Image upload failed. Please try again.".to_string()))
            }
        }
    }
}

/// MockImageHost
///
/// Returns a fixed URL (or failure) and counts uploads.
#[derive(Clone)]
pub struct MockImageHost {
    result: ApiResult<String>,
    uploads: Arc<Mutex<Vec<String>>>,
}

impl MockImageHost {
    pub fn hosting_at(url: impl Into<String>) -> Self {
        Self {
            result: Ok(url.into()),
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(ApiError::Upload("Image upload failed. Please try again.".to_string())),
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        self.uploads
            .lock()
            .map(|uploads| uploads.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ImageHost for MockImageHost {
    async fn upload(&self, image: &ImageFile) -> ApiResult<String> {
        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push(image.file_name.clone());
        }
        self.result.clone()
    }
}

/// BlogDraft
///
/// What the add-blog form collects.
#[derive(Debug, Clone, Default)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub thumbnail: Option<ImageFile>,
}

/// author_blog
///
/// Uploads the thumbnail (if any), then creates the post as a draft attributed to
/// the session's identity. An upload failure aborts before the blog is created.
pub async fn author_blog(
    client: &ApiClient,
    host: &dyn ImageHost,
    session: &Session,
    draft: BlogDraft,
) -> ApiResult<NewBlog> {
    let thumbnail = match &draft.thumbnail {
        Some(image) => host.upload(image).await?,
        None => String::new(),
    };

    let identity = session.identity();
    let blog = NewBlog {
        title: draft.title,
        thumbnail,
        content: draft.content,
        author: session.author_name().to_string(),
        author_email: identity.email.clone(),
        author_photo: identity.photo_url.clone().unwrap_or_default(),
        status: BlogStatus::Draft,
        created_at: Utc::now(),
    };

    blogs::create_blog(client, &blog).await?;
    tracing::info!(title = %blog.title, "blog draft created");
    Ok(blog)
}
