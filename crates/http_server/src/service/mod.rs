use std::future::Future;

/// Something that turns a request into a response.
///
/// The connection loop holds one service behind an `Arc` and calls it from every connection
/// task, so implementations must be shareable and their futures `Send`.
pub trait Service<Request>: Send + Sync + 'static {
    type Response;
    type Error;

    fn call(
        &self,
        req: Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}
