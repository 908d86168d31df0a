// src/api/client.rs
//! HTTP client wrapper for the WeRead API.
//!
//! This module provides a thin wrapper around reqwest that carries the
//! reader's session cookies. It handles authentication and basic
//! request/response operations without parsing or business logic.

use super::responses::ChapterInfosRequest;
use crate::constants::{HTTP_REQUEST_TIMEOUT_SECS, WEREAD_API_BASE_URL, WEREAD_WEB_URL};
use crate::error::AppError;
use crate::model::{Book, ChapterIndex, Highlight, ReviewList};
use crate::types::{BookId, SessionCookie, ValidatedUrl};
use reqwest::cookie::Jar;
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("weread2discord/", env!("CARGO_PKG_VERSION"));

/// Where the WeRead service lives. Overridable so tests can point the
/// client at a local server.
#[derive(Debug, Clone)]
pub struct WereadEndpoints {
    /// Web front page visited once to refresh session cookies.
    pub web_url: ValidatedUrl,
    /// Base of the JSON API.
    pub api_base: ValidatedUrl,
}

impl WereadEndpoints {
    /// Serves both the front page and the API from one base URL.
    pub fn single_host(base: &str) -> Result<Self, AppError> {
        let url = ValidatedUrl::parse(base)?;
        Ok(Self {
            web_url: url.clone(),
            api_base: url,
        })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.as_str().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl Default for WereadEndpoints {
    fn default() -> Self {
        Self {
            web_url: ValidatedUrl::parse(WEREAD_WEB_URL)
                .unwrap_or_else(|_| unreachable!("WEREAD_WEB_URL is a valid URL")),
            api_base: ValidatedUrl::parse(WEREAD_API_BASE_URL)
                .unwrap_or_else(|_| unreachable!("WEREAD_API_BASE_URL is a valid URL")),
        }
    }
}

/// A thin wrapper around reqwest Client for authenticated WeRead requests.
#[derive(Clone)]
pub struct WereadHttpClient {
    client: Client,
    endpoints: WereadEndpoints,
}

impl WereadHttpClient {
    /// Creates a new HTTP client presenting the given session cookies.
    pub fn new(cookie: &SessionCookie) -> Result<Self, AppError> {
        Self::with_endpoints(cookie, WereadEndpoints::default())
    }

    /// Creates a client against explicit endpoints.
    pub fn with_endpoints(
        cookie: &SessionCookie,
        endpoints: WereadEndpoints,
    ) -> Result<Self, AppError> {
        let jar = Self::create_cookie_jar(cookie, &endpoints);
        let client = Client::builder()
            .cookie_provider(Arc::new(jar))
            .default_headers(Self::create_headers())
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()?;

        log::debug!("Session established with {}", cookie);
        Ok(Self { client, endpoints })
    }

    /// Installs every cookie pair for both WeRead hosts.
    fn create_cookie_jar(cookie: &SessionCookie, endpoints: &WereadEndpoints) -> Jar {
        let jar = Jar::default();
        for url in [endpoints.web_url.as_url(), endpoints.api_base.as_url()] {
            for pair in cookie.pairs() {
                jar.add_cookie_str(&pair.to_header_fragment(), url);
            }
        }
        jar
    }

    /// Creates the default headers for WeRead requests.
    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Visits the web front page so cookies it sets land in the jar.
    pub async fn warm_up(&self) -> Result<(), AppError> {
        let url = self.endpoints.web_url.as_str();
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        log::debug!("Warm-up response: {}", response.status());
        Ok(())
    }

    /// Makes a GET request to the specified endpoint.
    pub async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response, AppError> {
        let url = self.endpoints.api_url(endpoint);
        log::debug!("GET {} {:?}", url, query);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = self.endpoints.api_url(endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl super::ReadingRepository for WereadHttpClient {
    async fn list_notebooks(&self) -> Result<Vec<Book>, AppError> {
        let response = self.get("user/notebooks", &[]).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_notebooks(result)
    }

    async fn fetch_chapter_info(&self, book: &BookId) -> Result<Option<ChapterIndex>, AppError> {
        let body = ChapterInfosRequest::for_book(book);
        let response = self.post("book/chapterInfos", &body).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_chapter_infos(result)
    }

    async fn fetch_bookmark_list(&self, book: &BookId) -> Result<Vec<Highlight>, AppError> {
        let response = self
            .get("book/bookmarklist", &[("bookId", book.as_str())])
            .await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_bookmark_list(result)
    }

    async fn fetch_review_list(&self, book: &BookId) -> Result<ReviewList, AppError> {
        let query = [
            ("bookId", book.as_str()),
            ("listType", "11"),
            ("mine", "1"),
            ("syncKey", "0"),
        ];
        let response = self.get("review/list", &query).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_review_list(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_cleanly() {
        let endpoints = WereadEndpoints::single_host("http://127.0.0.1:9000/").unwrap();
        assert_eq!(
            endpoints.api_url("/user/notebooks"),
            "http://127.0.0.1:9000/user/notebooks"
        );
        assert_eq!(
            WereadEndpoints::default().api_url("book/bookmarklist"),
            "https://i.weread.qq.com/book/bookmarklist"
        );
    }
}
