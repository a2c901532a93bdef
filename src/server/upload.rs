use crate::server::Error;
use futures::stream;
use multer::Multipart;
use url::form_urlencoded;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

fn form_field(data: &[u8], field: &str) -> Option<String> {
    form_urlencoded::parse(data)
        .find(|(name, _)| name == field)
        .map(|(_, value)| value.into_owned())
}

/// Text of the first part named `field`, file parts included.
async fn multipart_field(content_type: &str, body: &[u8], field: &str) -> Result<String, Error> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| Error::BadRequest(format!("malformed multipart upload: {}", e)))?;
    let data = body.to_vec();
    let source = stream::once(async move { Ok::<_, std::io::Error>(data) });
    let mut multipart = Multipart::new(source, boundary);
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("malformed multipart upload: {}", e)))?
    {
        if part.name() == Some(field) {
            return part
                .text()
                .await
                .map_err(|e| Error::BadRequest(format!("unreadable multipart field '{}': {}", field, e)));
        }
    }
    Err(Error::BadRequest(format!("missing form field '{}'", field)))
}

/// Finds the uploaded JSON document. A `field` parameter in the query string
/// wins, then the same field of a urlencoded or multipart form body,
/// otherwise the whole body is the document.
pub async fn extract_document(
    query: Option<&str>,
    content_type: Option<&str>,
    body: &[u8],
    field: &str,
) -> Result<String, Error> {
    if let Some(document) = query.and_then(|q| form_field(q.as_bytes(), field)) {
        return Ok(document);
    }
    let content_type = content_type.map(str::trim).unwrap_or("");
    let media_type = content_type.to_ascii_lowercase();
    if media_type.starts_with(FORM_CONTENT_TYPE) {
        return form_field(body, field)
            .ok_or_else(|| Error::BadRequest(format!("missing form field '{}'", field)));
    }
    if media_type.starts_with(MULTIPART_CONTENT_TYPE) {
        return multipart_field(content_type, body, field).await;
    }
    String::from_utf8(body.to_vec())
        .map_err(|e| Error::BadRequest(format!("upload is not valid UTF-8: {}", e)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{"time":"2013-05-02T20:30:42","revision":"a b&c","tests":[]}"#;

    fn encoded(field: &str) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("other", "ignored")
            .append_pair(field, DOCUMENT)
            .finish()
    }

    #[tokio::test]
    async fn test_form_field_is_decoded() {
        let body = encoded("fileupload");
        let document = extract_document(
            None,
            Some("application/x-www-form-urlencoded; charset=UTF-8"),
            body.as_bytes(),
            "fileupload",
        )
        .await
        .unwrap();
        assert_eq!(document, DOCUMENT);
    }

    #[tokio::test]
    async fn test_missing_form_field() {
        let body = encoded("something_else");
        let result = extract_document(
            None,
            Some("application/x-www-form-urlencoded"),
            body.as_bytes(),
            "fileupload",
        )
        .await;
        assert!(matches!(result, Err(Error::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_raw_body() {
        let document =
            extract_document(None, Some("application/json"), DOCUMENT.as_bytes(), "fileupload").await.unwrap();
        assert_eq!(document, DOCUMENT);
        let document = extract_document(None, None, DOCUMENT.as_bytes(), "fileupload").await.unwrap();
        assert_eq!(document, DOCUMENT);
    }

    #[tokio::test]
    async fn test_query_parameter() {
        let query = encoded("fileupload");
        let document = extract_document(Some(query.as_str()), None, b"", "fileupload").await.unwrap();
        assert_eq!(document, DOCUMENT);
    }

    #[tokio::test]
    async fn test_binary_body_is_rejected() {
        let result = extract_document(None, None, &[0xff, 0xfe, 0x00], "fileupload").await;
        assert!(matches!(result, Err(Error::BadRequest(_))));
    }

    pub(crate) fn multipart_body(boundary: &str, field: &str, document: &str) -> String {
        format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"comment\"\r\n\r\n\
             nightly run\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"{f}\"; filename=\"report.json\"\r\n\
             Content-Type: application/json\r\n\r\n\
             {d}\r\n\
             --{b}--\r\n",
            b = boundary,
            f = field,
            d = document
        )
    }

    #[tokio::test]
    async fn test_multipart_file_part_is_decoded() {
        let body = multipart_body("XyZ", "fileupload", DOCUMENT);
        let document = extract_document(
            None,
            Some("multipart/form-data; boundary=XyZ"),
            body.as_bytes(),
            "fileupload",
        )
        .await
        .unwrap();
        assert_eq!(document, DOCUMENT);
    }

    #[tokio::test]
    async fn test_multipart_without_field() {
        let body = multipart_body("XyZ", "attachment", DOCUMENT);
        let result = extract_document(
            None,
            Some("multipart/form-data; boundary=XyZ"),
            body.as_bytes(),
            "fileupload",
        )
        .await;
        match result {
            Err(Error::BadRequest(message)) => assert!(message.contains("missing form field")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_multipart_without_boundary() {
        let result = extract_document(None, Some("multipart/form-data"), b"", "fileupload").await;
        assert!(matches!(result, Err(Error::BadRequest(_))));
    }
}
