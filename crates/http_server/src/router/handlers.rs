use bytes::Bytes;

use crate::{
    HttpServerError,
    http::{
        header::UserAgent,
        request::Request,
        response::{Response, StatusCode},
    },
    router::Router,
    storage::{Storage, is_valid_name},
};

const TEXT_PLAIN: &str = "text/plain";
const OCTET_STREAM: &str = "application/octet-stream";

impl<S: Storage> Router<S> {
    pub(super) fn echo(&self, args: &[&str]) -> Response {
        let Some(msg) = args.first() else {
            return self.bad_request();
        };
        self.respond(StatusCode::OK)
            .body(TEXT_PLAIN, Bytes::copy_from_slice(msg.as_bytes()))
            .build()
    }

    pub(super) fn user_agent(&self, req: &Request) -> Response {
        match req.headers.get_header::<UserAgent>() {
            Ok(Some(agent)) => self
                .respond(StatusCode::OK)
                .body(TEXT_PLAIN, Bytes::from(agent))
                .build(),
            _ => self.ok(),
        }
    }

    pub(super) async fn read_file(&self, args: &[&str]) -> Result<Response, HttpServerError> {
        let Some(&name) = args.first() else {
            return Ok(self.bad_request());
        };
        if !is_valid_name(name) {
            return Ok(self.bad_request());
        }

        match self.storage.read(name).await {
            Ok(Some(contents)) => Ok(self
                .respond(StatusCode::OK)
                .body(OCTET_STREAM, contents)
                .build()),
            Ok(None) => Ok(self.not_found()),
            Err(source) => Err(HttpServerError::Storage {
                name: name.to_string(),
                source,
            }),
        }
    }

    pub(super) async fn write_file(
        &self,
        args: &[&str],
        req: &Request,
    ) -> Result<Response, HttpServerError> {
        let Some(&name) = args.first() else {
            return Ok(self.bad_request());
        };
        if !is_valid_name(name) {
            return Ok(self.bad_request());
        }

        self.storage
            .write(name, req.body.clone().into_bytes())
            .await
            .map_err(|source| HttpServerError::Storage {
                name: name.to_string(),
                source,
            })?;
        log::debug!("stored {} bytes in {:?}", req.body.len(), name);
        Ok(self.respond(StatusCode::CREATED).build())
    }
}
