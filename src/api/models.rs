use serde::{Deserialize, Serialize};

/// POST / 请求体
#[derive(Debug, Default, Deserialize)]
pub struct EchoRequest {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

/// GET / 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct EchoQuery {
    pub message: Option<String>,
}

/// POST / 与 GET / 响应
#[derive(Serialize)]
pub struct EchoResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub echo: Option<serde_json::Value>,
    pub ip: String,
    pub country: String,
    #[serde(rename = "responseTime")]
    pub response_time: String,
}

/// GET /ip-info/{ip} 响应
#[derive(Serialize)]
pub struct IpInfoResponse {
    pub query: String,
    pub country: String,
    #[serde(rename = "responseTime")]
    pub response_time: String,
}

/// GET /status 响应
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub port: u16,
    #[serde(rename = "ipRangesLoaded")]
    pub ip_ranges_loaded: usize,
}

/// POST /reload 响应
#[derive(Serialize)]
pub struct ReloadResponse {
    #[serde(rename = "ipRangesLoaded")]
    pub ip_ranges_loaded: usize,
}
