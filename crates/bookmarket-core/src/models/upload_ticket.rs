use serde::{Deserialize, Serialize};

/// Request for a pre-signed upload URL (`POST /books/upload-url`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicketRequest {
    /// Content type (MIME type) the object will be written with
    pub file_type: String,
}

/// Single-use, time-limited permission to write one object to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    /// Pre-signed URL accepting one HTTP PUT
    pub upload_url: String,
    /// Storage key the object will be written under
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_uses_camel_case_wire_names() {
        let ticket: UploadTicket = serde_json::from_str(
            r#"{"uploadUrl":"https://bucket.s3.amazonaws.com/books/a.png?X-Amz-Signature=abc","key":"books/a.png"}"#,
        )
        .unwrap();
        assert_eq!(ticket.key, "books/a.png");

        let body = serde_json::to_value(UploadTicketRequest {
            file_type: "image/png".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "fileType": "image/png" }));
    }
}
