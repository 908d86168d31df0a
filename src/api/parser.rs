// src/api/parser.rs
//! Turns raw WeRead responses into domain values.
//!
//! Every function here is pure: it takes the captured response text and
//! status and never touches the network, which keeps the shapes testable
//! against fixture payloads.

use super::client::ApiResponse;
use super::responses::{
    BookmarkListResponse, ChapterInfosResponse, ErrorEnvelope, NotebooksResponse,
    ReviewListResponse, ToDomain,
};
use crate::constants::{REVIEW_TYPE_NOTE, REVIEW_TYPE_SUMMARY};
use crate::error::{preview_body, AppError};
use crate::model::{sort_by_position, Book, Chapter, ChapterIndex, Highlight, ReviewList};

/// Parse any WeRead API response into `T`.
///
/// Non-success statuses and `errCode` envelopes become errors before the
/// body is interpreted as `T`.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if !result.status.is_success() {
        return Err(AppError::WereadService {
            status: result.status,
            url: result.url,
            body: preview_body(&result.data),
        });
    }

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&result.data) {
        if envelope.is_error() {
            return Err(AppError::WereadRejected {
                code: envelope.err_code.unwrap_or_default(),
                message: envelope.err_msg.unwrap_or_default(),
            });
        }
    }

    serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        AppError::MalformedResponse(format!(
            "{} from {} (body: {})",
            e,
            result.url,
            preview_body(&result.data)
        ))
    })
}

/// Parse the notebook list, ordered by the service-provided sort key.
pub fn parse_notebooks(result: ApiResponse<String>) -> Result<Vec<Book>, AppError> {
    let response: NotebooksResponse = parse_api_response(result)?;
    let mut books: Vec<Book> = response
        .books
        .into_iter()
        .map(ToDomain::<Book>::to_domain)
        .collect();
    books.sort_by_key(|book| book.sort);
    Ok(books)
}

/// Parse chapter metadata.
///
/// Returns `Ok(None)` unless the payload holds exactly one book entry with
/// an `updated` list.
pub fn parse_chapter_infos(result: ApiResponse<String>) -> Result<Option<ChapterIndex>, AppError> {
    let response: ChapterInfosResponse = parse_api_response(result)?;
    let Some(mut data) = response.data else {
        return Ok(None);
    };
    if data.len() != 1 {
        return Ok(None);
    }
    let Some(updated) = data.remove(0).updated else {
        return Ok(None);
    };
    Ok(Some(
        updated
            .into_iter()
            .map(ToDomain::<Chapter>::to_domain)
            .collect(),
    ))
}

/// Parse the bookmark list, sorted into reading order.
pub fn parse_bookmark_list(result: ApiResponse<String>) -> Result<Vec<Highlight>, AppError> {
    let response: BookmarkListResponse = parse_api_response(result)?;
    let mut highlights: Vec<Highlight> = response
        .updated
        .into_iter()
        .map(ToDomain::<Highlight>::to_domain)
        .collect();
    sort_by_position(&mut highlights);
    Ok(highlights)
}

/// Parse the review list, splitting summaries from notes.
///
/// Review types other than summary and note are dropped.
pub fn parse_review_list(result: ApiResponse<String>) -> Result<ReviewList, AppError> {
    let response: ReviewListResponse = parse_api_response(result)?;
    let mut list = ReviewList::default();
    for entry in response.reviews {
        match entry.review.review_type {
            REVIEW_TYPE_SUMMARY => list.summaries.push(entry.to_domain()),
            REVIEW_TYPE_NOTE => list.notes.push(entry.review.to_domain()),
            other => log::debug!("Ignoring review of type {}", other),
        }
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChapterUid;
    use reqwest::StatusCode;

    fn ok(body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status: StatusCode::OK,
            url: "https://i.weread.qq.com/test".to_string(),
        }
    }

    #[test]
    fn test_notebooks_are_sorted_by_sort_key() {
        let body = r#"{"books": [
            {"book": {"bookId": "b2", "title": "Second", "author": "B"}, "sort": 20},
            {"book": {"bookId": "b1", "title": "First", "author": "A"}, "sort": 10}
        ]}"#;
        let books = parse_notebooks(ok(body)).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "First");
        assert_eq!(books[1].id.as_str(), "b2");
    }

    #[test]
    fn test_non_success_status_is_an_error() {
        let result = ApiResponse {
            data: "nope".to_string(),
            status: StatusCode::UNAUTHORIZED,
            url: "https://i.weread.qq.com/user/notebooks".to_string(),
        };
        let err = parse_notebooks(result).unwrap_err();
        assert!(matches!(err, AppError::WereadService { status, .. } if status == StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn test_err_code_envelope_is_an_error() {
        let err = parse_notebooks(ok(r#"{"errCode": -2012, "errMsg": "登录超时"}"#)).unwrap_err();
        match err {
            AppError::WereadRejected { code, message } => {
                assert_eq!(code, -2012);
                assert_eq!(message, "登录超时");
            }
            other => panic!("Expected WereadRejected, got {:?}", other),
        }
    }

    #[test]
    fn test_chapter_infos_single_book_shape() {
        let body = r#"{"data": [{"bookId": "b1", "updated": [
            {"chapterUid": 1, "level": 1, "title": "Part One"},
            {"chapterUid": 2, "level": 2, "title": "Chapter 1"}
        ]}]}"#;
        let index = parse_chapter_infos(ok(body)).unwrap().unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(ChapterUid::new(2)).unwrap().title, "Chapter 1");
    }

    #[test]
    fn test_chapter_infos_unexpected_shape_is_absent() {
        assert!(parse_chapter_infos(ok(r#"{}"#)).unwrap().is_none());
        assert!(parse_chapter_infos(ok(r#"{"data": []}"#)).unwrap().is_none());
        assert!(parse_chapter_infos(ok(r#"{"data": [{"updated": []}, {"updated": []}]}"#))
            .unwrap()
            .is_none());
        assert!(parse_chapter_infos(ok(r#"{"data": [{"bookId": "b1"}]}"#))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_bookmarks_default_chapter_and_sort() {
        let body = r#"{"updated": [
            {"chapterUid": 3, "range": "10-20", "markText": "late", "style": 1, "colorStyle": 4},
            {"range": "500-510", "markText": "no chapter", "style": 0, "colorStyle": 1},
            {"chapterUid": 1, "range": "5-9", "markText": "early", "abstract": "ctx"}
        ]}"#;
        let highlights = parse_bookmark_list(ok(body)).unwrap();
        let texts: Vec<&str> = highlights.iter().map(|h| h.mark_text.as_str()).collect();
        assert_eq!(texts, vec!["early", "no chapter", "late"]);
        assert_eq!(highlights[1].chapter_uid, ChapterUid::new(1));
        assert_eq!(highlights[0].non_empty_abstract(), Some("ctx"));
    }

    #[test]
    fn test_review_list_is_split_by_type() {
        let body = r#"{"reviews": [
            {"review": {"type": 4, "content": "Great book", "reviewId": "r-sum"}, "colorStyle": 2},
            {"review": {"type": 1, "content": "My note", "reviewId": "r-note",
                        "chapterUid": 2, "range": "40-50", "abstract": "quoted"}},
            {"review": {"type": 9, "content": "ignored"}}
        ]}"#;
        let list = parse_review_list(ok(body)).unwrap();

        assert_eq!(list.summaries.len(), 1);
        assert_eq!(list.summaries[0].content, "Great book");
        assert_eq!(list.summaries[0].review_id.as_deref(), Some("r-sum"));
        assert_eq!(list.summaries[0].color_style, Some(2));

        assert_eq!(list.notes.len(), 1);
        let note = &list.notes[0];
        assert_eq!(note.mark_text, "My note");
        assert!(note.is_note());
        assert_eq!(note.offset(), 40);
        assert_eq!(note.non_empty_abstract(), Some("quoted"));
    }

    #[test]
    fn test_null_text_reads_as_empty() {
        let body = r#"{"updated": [
            {"chapterUid": 1, "range": "1-2", "markText": null},
            {"chapterUid": 1, "range": "3-4", "markText": "kept"}
        ]}"#;
        let highlights = parse_bookmark_list(ok(body)).unwrap();
        let texts: Vec<&str> = highlights.iter().map(|h| h.mark_text.as_str()).collect();
        assert_eq!(texts, vec!["", "kept"]);

        let body = r#"{"reviews": [
            {"review": {"type": 4, "content": null, "reviewId": "s"}},
            {"review": {"type": 1, "content": null, "reviewId": "n"}}
        ]}"#;
        let list = parse_review_list(ok(body)).unwrap();
        assert_eq!(list.summaries[0].content, "");
        assert_eq!(list.notes[0].mark_text, "");
    }

    #[test]
    fn test_garbage_body_is_malformed() {
        let err = parse_bookmark_list(ok("<html>")).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }
}
