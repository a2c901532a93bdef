pub mod error;
pub mod reply;
pub mod router;
pub mod upload;

pub use self::error::Error;
pub use self::reply::Reply;

use crate::app::App;
use futures::Future;
use hyper::service::{make_service_fn, service_fn};
use hyper::Server;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Serves `app` on `bind` until `shutdown` resolves, then lets in-flight
/// requests finish.
pub async fn serve<F>(bind: SocketAddr, app: Arc<App>, shutdown: F) -> Result<(), hyper::Error>
where
    F: Future<Output = ()>,
{
    let make_svc = make_service_fn(move |_conn| {
        let app = Arc::clone(&app);
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let app = Arc::clone(&app);
                router::route(req, app)
            }))
        }
    });

    let server = Server::try_bind(&bind)?.serve(make_svc);
    info!("Listening on http://{}", server.local_addr());
    server.with_graceful_shutdown(shutdown).await
}
