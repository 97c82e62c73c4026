//! Form body parsing
//!
//! Accepts `application/x-www-form-urlencoded` and `multipart/form-data`
//! bodies and extracts a single text field from them. The first field with
//! the requested name wins; a multipart file upload under that name is not
//! text and reads as absent.

use crate::error::FormError;
use futures::stream;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::Request;
use std::convert::Infallible;

/// Supported form encodings
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormKind {
    UrlEncoded,
    Multipart { boundary: String },
}

/// Read the request body as a form and return the text value of `field`.
///
/// `Ok(None)` means the form parsed but carried no text value under that
/// name; every `Err` is a parse failure.
pub async fn read_text_field<B>(
    req: Request<B>,
    field: &str,
    max_body_size: u64,
) -> Result<Option<String>, FormError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let kind = form_kind(content_type.as_deref())?;

    let body = read_body(req.into_body(), max_body_size).await?;

    match kind {
        FormKind::UrlEncoded => Ok(urlencoded_field(&body, field)),
        FormKind::Multipart { boundary } => multipart_field(body, boundary, field).await,
    }
}

fn form_kind(content_type: Option<&str>) -> Result<FormKind, FormError> {
    let unsupported = || FormError::UnsupportedContentType(content_type.map(ToString::to_string));

    let value = content_type.ok_or_else(unsupported)?;
    let essence = value.split(';').next().unwrap_or_default().trim();

    if essence.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        Ok(FormKind::UrlEncoded)
    } else if essence.eq_ignore_ascii_case("multipart/form-data") {
        let boundary = multer::parse_boundary(value)?;
        Ok(FormKind::Multipart { boundary })
    } else {
        Err(unsupported())
    }
}

async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, FormError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(FormError::TooLarge {
            limit: max_body_size,
        }),
        Err(e) => Err(FormError::Body(e.to_string())),
    }
}

fn urlencoded_field(body: &[u8], field: &str) -> Option<String> {
    url::form_urlencoded::parse(body)
        .find(|(key, _)| key == field)
        .map(|(_, value)| value.into_owned())
}

async fn multipart_field(
    body: Bytes,
    boundary: String,
    field: &str,
) -> Result<Option<String>, FormError> {
    let chunks = stream::once(async move { Ok::<_, Infallible>(body) });
    let mut multipart = multer::Multipart::new(chunks, boundary);

    while let Some(part) = multipart.next_field().await? {
        if part.name() != Some(field) {
            continue;
        }
        if part.file_name().is_some() {
            return Ok(None);
        }
        return Ok(Some(part.text().await?));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;

    fn form_request(content_type: Option<&str>, body: &str) -> Request<Full<Bytes>> {
        let mut builder = Request::builder().method("POST").uri("/add/mission");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder.body(Full::new(Bytes::from(body.to_string()))).unwrap()
    }

    fn multipart_body(boundary: &str, parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, file_name, value) in parts {
            body.push_str(&format!("--{boundary}\r\n"));
            match file_name {
                Some(file) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file}\"\r\nContent-Type: text/plain\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{boundary}--\r\n"));
        body
    }

    #[tokio::test]
    async fn test_urlencoded_decodes_value() {
        let req = form_request(
            Some("application/x-www-form-urlencoded;charset=UTF-8"),
            "other=1&name=%E4%BC%B8%E4%B8%AA+%E6%87%92%E8%85%B0&name=second",
        );
        let name = read_text_field(req, "name", 1024).await.unwrap();
        assert_eq!(name.as_deref(), Some("伸个 懒腰"));
    }

    #[tokio::test]
    async fn test_urlencoded_missing_and_empty() {
        let req = form_request(Some("application/x-www-form-urlencoded"), "title=x");
        assert_eq!(read_text_field(req, "name", 1024).await.unwrap(), None);

        let req = form_request(Some("application/x-www-form-urlencoded"), "name=");
        assert_eq!(
            read_text_field(req, "name", 1024).await.unwrap().as_deref(),
            Some("")
        );
    }

    #[tokio::test]
    async fn test_multipart_text_field() {
        let boundary = "X-MISSION-BOUNDARY";
        let body = multipart_body(boundary, &[("note", None, "ignored"), ("name", None, "read a book")]);
        let req = form_request(
            Some(&format!("multipart/form-data; boundary={boundary}")),
            &body,
        );
        let name = read_text_field(req, "name", 4096).await.unwrap();
        assert_eq!(name.as_deref(), Some("read a book"));
    }

    #[tokio::test]
    async fn test_multipart_file_is_not_text() {
        let boundary = "X-MISSION-BOUNDARY";
        let body = multipart_body(boundary, &[("name", Some("name.txt"), "read a book")]);
        let req = form_request(
            Some(&format!("multipart/form-data; boundary={boundary}")),
            &body,
        );
        assert_eq!(read_text_field(req, "name", 4096).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_multipart_without_boundary_fails() {
        let req = form_request(Some("multipart/form-data"), "name=x");
        let err = read_text_field(req, "name", 4096).await.unwrap_err();
        assert!(matches!(err, FormError::Multipart(_)));
    }

    #[tokio::test]
    async fn test_non_form_content_types_fail() {
        let req = form_request(Some("application/json"), r#"{"name":"x"}"#);
        let err = read_text_field(req, "name", 1024).await.unwrap_err();
        assert!(matches!(err, FormError::UnsupportedContentType(Some(_))));

        let req = form_request(None, "name=x");
        let err = read_text_field(req, "name", 1024).await.unwrap_err();
        assert!(matches!(err, FormError::UnsupportedContentType(None)));
    }

    #[tokio::test]
    async fn test_body_over_limit_fails() {
        let req = form_request(
            Some("application/x-www-form-urlencoded"),
            &format!("name={}", "a".repeat(64)),
        );
        let err = read_text_field(req, "name", 16).await.unwrap_err();
        assert!(matches!(err, FormError::TooLarge { limit: 16 }));
    }
}
