//! `contentEncoding` / `contentMediaType` keywords (assertions in drafts 6
//! and 7 only; annotations afterwards). Unknown encodings and media types
//! pass.
use crate::{content, error::ValidationError, validator::Evaluator};
use serde_json::{Map, Value};

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_content(&mut self, map: &'s Map<String, Value>, instance: &Value) -> bool {
        if !self.draft.asserts_content() {
            return true;
        }
        let encoding = map
            .get("contentEncoding")
            .and_then(Value::as_str)
            .filter(|_| self.keyword_enabled("contentEncoding"));
        let media_type = map
            .get("contentMediaType")
            .and_then(Value::as_str)
            .filter(|_| self.keyword_enabled("contentMediaType"));
        let Value::String(item) = instance else {
            return true;
        };

        if let Some(encoding) = encoding {
            if encoding == "base64" {
                if !content::is_base64(item) {
                    self.push_schema("contentEncoding");
                    let result = self.record(ValidationError::content_encoding(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                        encoding,
                    ));
                    self.pop_schema();
                    return result;
                }
                if media_type == Some("application/json") {
                    // Check the decoded payload.
                    let valid = content::decode_base64(item)
                        .as_deref()
                        .map_or(false, content::is_json);
                    if !valid {
                        self.push_schema("contentMediaType");
                        let result = self.record(ValidationError::content_media_type(
                            self.schema_path.clone(),
                            self.instance_path.clone(),
                            instance,
                            "application/json",
                        ));
                        self.pop_schema();
                        return result;
                    }
                    return true;
                }
            }
            return true;
        }
        if media_type == Some("application/json") && !content::is_json(item) {
            self.push_schema("contentMediaType");
            let result = self.record(ValidationError::content_media_type(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "application/json",
            ));
            self.pop_schema();
            return result;
        }
        true
    }
}
