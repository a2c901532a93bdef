use crate::app::App;
use crate::server::upload::extract_document;
use crate::server::{Error, Reply};
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    Chart,
    Ingest,
    Dump,
}

#[derive(Debug, Clone, Copy)]
struct Route {
    method: &'static str,
    path: &'static str,
    endpoint: Endpoint,
}

const ROUTES: &[Route] = &[
    Route {
        method: "GET",
        path: "/",
        endpoint: Endpoint::Chart,
    },
    Route {
        method: "POST",
        path: "/",
        endpoint: Endpoint::Ingest,
    },
    Route {
        method: "GET",
        path: "/dump",
        endpoint: Endpoint::Dump,
    },
];

/// Looks up the endpoint for a request line. A known path with another
/// method yields the methods it does accept.
pub fn resolve(method: &str, path: &str) -> Result<Endpoint, Error> {
    let candidates: Vec<&Route> = ROUTES.iter().filter(|r| r.path == path).collect();
    if candidates.is_empty() {
        return Err(Error::NotFound);
    }
    candidates
        .iter()
        .find(|r| r.method == method)
        .map(|r| r.endpoint)
        .ok_or_else(|| {
            let allowed: Vec<&str> = candidates.iter().map(|r| r.method).collect();
            Error::MethodNotAllowed(allowed.join(", "))
        })
}

/// Runs a storage-bound handler off the reactor.
async fn blocking<F>(app: Arc<App>, handler: F) -> Result<Reply, Error>
where
    F: FnOnce(&App) -> Result<Reply, Error> + Send + 'static,
{
    tokio::task::spawn_blocking(move || handler(&app))
        .await
        .map_err(|e| Error::Internal(e.to_string()))?
}

async fn ingest(req: Request<Body>, app: Arc<App>) -> Result<Reply, Error> {
    let query = req.uri().query().map(str::to_owned);
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = hyper::body::to_bytes(req.into_body())
        .await
        .map_err(|e| Error::BadRequest(format!("failed to read upload: {}", e)))?;
    let document = extract_document(
        query.as_deref(),
        content_type.as_deref(),
        &body,
        app.upload_field(),
    )
    .await?;
    blocking(app, move |app| {
        app.ingest(&document)?;
        Ok(Reply::text("Thanks!"))
    })
    .await
}

async fn dispatch(req: Request<Body>, app: Arc<App>, endpoint: Endpoint) -> Result<Reply, Error> {
    match endpoint {
        Endpoint::Chart => blocking(app, |app| Ok(Reply::html(app.chart()?))).await,
        Endpoint::Ingest => ingest(req, app).await,
        Endpoint::Dump => blocking(app, |app| Ok(Reply::csv(app.dump()?))).await,
    }
}

pub async fn route(req: Request<Body>, app: Arc<App>) -> Result<Response<Body>, Infallible> {
    let now = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    let result = match resolve(&method, &path) {
        Ok(endpoint) => dispatch(req, app, endpoint).await,
        Err(e) => Err(e),
    };
    let response = match result {
        Ok(reply) => reply.into_response(StatusCode::OK),
        Err(e) => {
            if e.status().is_server_error() {
                error!("{} {} failed: {}", method, path, e);
            } else {
                warn!("{} {} rejected: {}", method, path, e);
            }
            e.into_response()
        }
    };
    info!(
        "{} {} {} in {} ms",
        method,
        path,
        response.status().as_u16(),
        now.elapsed().as_millis()
    );
    Ok(response)
}
