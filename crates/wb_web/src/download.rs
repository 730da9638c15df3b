use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use wb_core::Article;

use crate::error::ApiResult;

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[^\w\s-]").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
}

/// Plain-text rendering of a stored article.
pub fn render_document(article: &Article) -> String {
    format!(
        "Title: {}\nDate: {}\nSource: {}\n\n{}",
        article.title,
        article.created_at.format("%Y-%m-%d"),
        article.link,
        article.content_or_empty()
    )
}

/// `<title>_<YYYYMMDD>.txt`, with the title stripped of anything but word
/// characters, whitespace and dashes, and whitespace runs turned into `_`.
pub fn download_filename(article: &Article) -> String {
    let title = UNSAFE_FILENAME_CHARS.replace_all(&article.title, "");
    let title = WHITESPACE.replace_all(&title, "_");
    format!("{}_{}.txt", title, article.created_at.format("%Y%m%d"))
}

/// `Content-Disposition` for an attachment. Non-ASCII names get an RFC 5987
/// `filename*` next to an ASCII fallback, which is the NFKD form with
/// combining marks and other non-ASCII characters dropped.
pub fn content_disposition(filename: &str) -> ApiResult<HeaderValue> {
    let value = if filename.is_ascii() {
        format!("attachment; filename=\"{}\"", filename)
    } else {
        let fallback: String = filename.nfkd().filter(char::is_ascii).collect();
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(filename)
        )
    };
    Ok(HeaderValue::from_str(&value)?)
}

pub fn attachment_headers(article: &Article) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        CONTENT_DISPOSITION,
        content_disposition(&download_filename(article))?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn article(title: &str, content: Option<&str>) -> Article {
        Article {
            id: 1,
            title: title.to_string(),
            link: "https://www.whitehouse.gov/briefing-room/statements/one/".to_string(),
            content: content.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2024, 5, 17, 9, 45, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_document() {
        let doc = render_document(&article("Statement on Roads", Some("Roads are good.")));
        assert_eq!(
            doc,
            "Title: Statement on Roads\n\
             Date: 2024-05-17\n\
             Source: https://www.whitehouse.gov/briefing-room/statements/one/\n\
             \n\
             Roads are good."
        );
    }

    #[test]
    fn test_render_document_without_content() {
        let doc = render_document(&article("Empty", None));
        assert!(doc.ends_with("statements/one/\n\n"));
    }

    #[test]
    fn test_download_filename() {
        let a = article("Remarks by the President: On \"Roads\" & Bridges!", None);
        assert_eq!(
            download_filename(&a),
            "Remarks_by_the_President_On_Roads_Bridges_20240517.txt"
        );

        let a = article("Self-Reliance   Act\tof 2024", None);
        assert_eq!(download_filename(&a), "Self-Reliance_Act_of_2024_20240517.txt");
    }

    #[test]
    fn test_content_disposition_ascii() {
        let value = content_disposition("Statement_20240517.txt").unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "attachment; filename=\"Statement_20240517.txt\""
        );
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        let value = content_disposition("Déclaration_20240517.txt").unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "attachment; filename=\"Declaration_20240517.txt\"; \
             filename*=UTF-8''D%C3%A9claration_20240517.txt"
        );
    }

    #[test]
    fn test_content_disposition_fallback_folds_compatibility_forms() {
        let value = content_disposition("Naïve_ﬁscal_20240517.txt").unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("attachment; filename=\"Naive_fiscal_20240517.txt\"; filename*=UTF-8''"));
    }
}
