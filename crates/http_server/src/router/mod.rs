//! Dispatch of requests to the built-in routes.
//!
//! The target is split on `/`: the first segment names the route and the rest are its
//! positional arguments. Only GET and POST are routed.
//!
//! | Method | Route             | Response                                   |
//! |--------|-------------------|--------------------------------------------|
//! | GET    | `/`               | `200 OK`, empty                            |
//! | GET    | `/echo/<msg>`     | `msg` as `text/plain`                      |
//! | GET    | `/user-agent`     | the `User-Agent` header as `text/plain`    |
//! | GET    | `/files/<name>`   | the file as `application/octet-stream`     |
//! | POST   | `/files/<name>`   | stores the body, `201 Created`             |

mod handlers;

use std::future::Future;

use crate::{
    HttpServerError,
    config::StatusPolicy,
    http::{
        HttpVersion,
        header::Allow,
        method::Method,
        request::Request,
        response::{Response, ResponseBuilder, StatusCode},
    },
    service::Service,
    storage::{DirectoryStorage, Storage},
};

static_assertions::assert_impl_all!(Router<DirectoryStorage>: Send, Sync);

pub struct Router<S> {
    storage: S,
    version: HttpVersion,
    policy: StatusPolicy,
}

impl<S: Storage> Router<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            version: HttpVersion::HTTP_1_1,
            policy: StatusPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    fn respond(&self, status: StatusCode) -> ResponseBuilder {
        ResponseBuilder::new(self.version, status)
    }

    fn ok(&self) -> Response {
        self.respond(StatusCode::OK).build()
    }

    fn bad_request(&self) -> Response {
        self.respond(StatusCode::BAD_REQUEST).build()
    }

    fn not_found(&self) -> Response {
        match self.policy {
            StatusPolicy::Corrected => self.respond(StatusCode::NOT_FOUND).build(),
            StatusPolicy::Legacy => self
                .respond(StatusCode::BAD_REQUEST)
                .message("Not Found")
                .build(),
        }
    }

    fn method_not_allowed(&self) -> Response {
        match self.policy {
            StatusPolicy::Corrected => self
                .respond(StatusCode::METHOD_NOT_ALLOWED)
                .set_header::<Allow>("GET, POST".to_string())
                .build(),
            StatusPolicy::Legacy => self.ok(),
        }
    }

    pub async fn route(&self, req: &Request) -> Result<Response, HttpServerError> {
        let (name, args) = req.route();
        log::debug!("route {:?} args {:?} for {}", name, args.as_slice(), req.method);

        if req.method == Method::GET {
            if req.target == "/" {
                return Ok(self.ok());
            }
            match name {
                "echo" => Ok(self.echo(&args)),
                "user-agent" => Ok(self.user_agent(req)),
                "files" => self.read_file(&args).await,
                _ => Ok(self.not_found()),
            }
        } else if req.method == Method::POST {
            match name {
                "files" => self.write_file(&args, req).await,
                _ => Ok(self.not_found()),
            }
        } else {
            Ok(self.method_not_allowed())
        }
    }
}

impl<S: Storage> Service<Request> for Router<S> {
    type Response = Response;
    type Error = HttpServerError;

    fn call(
        &self,
        req: Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send {
        async move { self.route(&req).await }
    }
}
