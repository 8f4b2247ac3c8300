use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use tokio::sync::RwLock;
use tracing::info;

use crate::geo::GeoDb;

use super::models::*;
use super::RequestStart;

/// 共享应用状态
#[derive(Clone)]
pub struct AppState {
    /// 整体替换式更新：reload 构建新索引后换掉 Arc，读侧无锁争用
    pub db: Arc<RwLock<Arc<GeoDb>>>,
    pub database_path: String,
    pub port: u16,
    pub trust_proxy: bool,
}

impl AppState {
    async fn db(&self) -> Arc<GeoDb> {
        self.db.read().await.clone()
    }
}

/// 取客户端地址；开启 trust_proxy 时优先代理头
fn client_ip(state: &AppState, headers: &HeaderMap, peer: SocketAddr) -> String {
    if state.trust_proxy {
        // X-Forwarded-For 取最左一跳（原始客户端）
        if let Some(forwarded) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
        {
            return forwarded.to_string();
        }
        if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
            return real_ip.trim().to_string();
        }
    }
    peer.ip().to_string()
}

/// 回显端点的地址来自连接本身，解析失败一律降级为 Unknown
async fn country_for(state: &AppState, ip: &str) -> String {
    match state.db().await.resolve(ip) {
        Ok(lookup) => lookup.as_str().to_string(),
        Err(_) => "Unknown".to_string(),
    }
}

/// POST / - 回显消息并附带来源国家与耗时
pub async fn echo_post(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Extension(RequestStart(start)): Extension<RequestStart>,
    headers: HeaderMap,
    body: Option<Json<EchoRequest>>,
) -> Json<EchoResponse> {
    let message = body.and_then(|Json(b)| b.message);
    let ip = client_ip(&state, &headers, peer);
    let country = country_for(&state, &ip).await;
    let elapsed = start.elapsed().as_millis();

    info!(method = "POST", ip = %ip, country = %country, elapsed_ms = %elapsed, "echo");

    Json(EchoResponse {
        echo: message,
        ip,
        country,
        response_time: format!("{}ms", elapsed),
    })
}

/// GET / - 同 POST /，消息来自查询参数
pub async fn echo_get(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Extension(RequestStart(start)): Extension<RequestStart>,
    headers: HeaderMap,
    Query(query): Query<EchoQuery>,
) -> Json<EchoResponse> {
    let message = query.message.map(serde_json::Value::String);
    let ip = client_ip(&state, &headers, peer);
    let country = country_for(&state, &ip).await;
    let elapsed = start.elapsed().as_millis();

    info!(method = "GET", ip = %ip, country = %country, elapsed_ms = %elapsed, "echo");

    Json(EchoResponse {
        echo: message,
        ip,
        country,
        response_time: format!("{}ms", elapsed),
    })
}

/// GET /ip-info/{ip} - 查询指定地址的国家；地址非法返回 400
pub async fn ip_info(
    State(state): State<AppState>,
    Extension(RequestStart(start)): Extension<RequestStart>,
    Path(ip): Path<String>,
) -> impl IntoResponse {
    match state.db().await.resolve(&ip) {
        Ok(lookup) => {
            let elapsed = start.elapsed().as_millis();
            info!(query = %ip, country = lookup.as_str(), elapsed_ms = %elapsed, "ip-info");
            (
                StatusCode::OK,
                Json(IpInfoResponse {
                    query: ip,
                    country: lookup.as_str().to_string(),
                    response_time: format!("{}ms", elapsed),
                }),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"message": e.to_string()})),
        )
            .into_response(),
    }
}

/// GET /status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let db = state.db().await;
    Json(StatusResponse {
        status: "running".to_string(),
        port: state.port,
        ip_ranges_loaded: db.len(),
    })
}

/// POST /reload - 重新读取数据文件，构建新索引后整体替换。
/// 构建发生在写锁之外，读侧只在指针交换的瞬间等待
pub async fn reload(State(state): State<AppState>) -> Json<ReloadResponse> {
    let fresh = Arc::new(GeoDb::load(&state.database_path));
    let count = fresh.len();
    *state.db.write().await = fresh;

    info!(ranges = count, "registry database reloaded");

    Json(ReloadResponse {
        ip_ranges_loaded: count,
    })
}
