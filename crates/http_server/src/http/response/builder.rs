use bytes::Bytes;
use smallvec::SmallVec;

use crate::http::{
    HttpVersion,
    header::{ContentLength, ContentType, HeaderField, HeaderValueTrait},
    response::{Response, StatusCode},
};

pub struct ResponseBuilder {
    version: HttpVersion,
    status: StatusCode,
    message: Option<Bytes>,
    headers: SmallVec<[String; 4]>,
    body: Bytes,
}

impl ResponseBuilder {
    pub fn new(version: HttpVersion, status: StatusCode) -> Self {
        Self {
            version,
            status,
            message: None,
            headers: SmallVec::new(),
            body: Bytes::new(),
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Overrides the reason phrase
    pub fn message(mut self, message: &'static str) -> Self {
        self.message = Some(Bytes::from_static(message.as_bytes()));
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(format!("{name}: {value}"));
        self
    }

    pub fn set_header<NAME>(self, val: NAME::Output) -> Self
    where
        NAME: HeaderField,
    {
        let value = val.to_header_value();
        self.header(NAME::NAME, &value)
    }

    /// Sets the body along with the `Content-Type` and `Content-Length` headers describing it
    pub fn body(mut self, content_type: &str, bytes: Bytes) -> Self {
        let len = bytes.len() as u64;
        self.body = bytes;
        self.set_header::<ContentType>(content_type.to_string())
            .set_header::<ContentLength>(len)
    }

    pub fn build(self) -> Response {
        let ResponseBuilder {
            version,
            status,
            message,
            headers,
            body,
        } = self;

        let message = message.unwrap_or_else(|| {
            Bytes::from_static(
                status
                    .canonical_reason()
                    .unwrap_or("Unknown Reason")
                    .as_bytes(),
            )
        });

        Response {
            version,
            status,
            message,
            headers,
            body,
        }
    }
}
