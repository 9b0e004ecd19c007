use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Body payload of a request. The variant determines the content type the
/// dispatcher puts on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No payload.
    Empty,
    /// JSON object (`application/json`).
    Json(Value),
    /// URL-encoded key/value pairs (`application/x-www-form-urlencoded`).
    Form(Vec<(String, String)>),
    /// Multipart form, used for file-bearing uploads.
    Multipart(Vec<BodyPart>),
}

/// One field of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl BodyPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        BodyPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        BodyPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// Immutable description of a single HTTP request: target URL, verb,
/// optional query pairs, body, and header overrides.
///
/// Built once by a domain service through the consuming builder methods and
/// then handed to the dispatcher; nothing mutates a descriptor after
/// construction. Header overrides take precedence over the defaults derived
/// from the body kind, with one exception: the bearer header is always
/// applied by the dispatcher when a credential exists.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    body: RequestBody,
    headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Append a query string pair.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    ///
    /// # Panics
    ///
    /// Panics when `body` cannot be serialized to JSON; an unserializable
    /// payload is a programmer error, not a dispatch outcome.
    pub fn json<B: Serialize>(self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body(RequestBody::Json(value)),
            Err(e) => panic!("unserializable request body: {e}"),
        }
    }

    /// Attach a URL-encoded form body.
    pub fn form(self, fields: Vec<(String, String)>) -> Self {
        self.body(RequestBody::Form(fields))
    }

    /// Attach a multipart body.
    pub fn multipart(self, parts: Vec<BodyPart>) -> Self {
        self.body(RequestBody::Multipart(parts))
    }

    fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Override a header. Later overrides of the same name win.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn request_body(&self) -> &RequestBody {
        &self.body
    }

    pub fn header_overrides(&self) -> &[(String, String)] {
        &self.headers
    }
}
