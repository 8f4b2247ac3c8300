pub mod handlers;
pub mod models;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::types::{GeoConfig, ServerConfig};
use crate::geo::GeoDb;

use handlers::AppState;

/// 请求开始时间，由计时中间件写入请求扩展
#[derive(Clone, Copy)]
pub struct RequestStart(pub Instant);

/// 组装路由：端点 + 计时中间件 + 宽松 CORS
pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", post(handlers::echo_post).get(handlers::echo_get))
        .route("/ip-info/{ip}", get(handlers::ip_info))
        .route("/status", get(handlers::status))
        .route("/reload", post(handlers::reload))
        .layer(middleware::from_fn(timing_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 启动 HTTP 服务器
pub fn start(server: &ServerConfig, geo: &GeoConfig, db: Arc<GeoDb>) -> Result<JoinHandle<()>> {
    let state = AppState {
        db: Arc::new(RwLock::new(db)),
        database_path: geo.database.clone(),
        port: server.port,
        trust_proxy: server.trust_proxy,
    };

    let app = router(state);

    let bind_addr = format!("{}:{}", server.listen, server.port);
    info!(addr = bind_addr, "HTTP server starting");

    let handle = tokio::spawn(async move {
        let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(addr = bind_addr, error = %e, "HTTP server bind failed");
                return;
            }
        };
        info!(addr = bind_addr, "HTTP server listening");
        if let Err(e) = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        {
            tracing::error!(error = %e, "HTTP server error");
        }
    });

    Ok(handle)
}

async fn timing_middleware(mut req: Request, next: Next) -> Response {
    req.extensions_mut().insert(RequestStart(Instant::now()));
    next.run(req).await
}
