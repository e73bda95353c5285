//! 请求日志中间件

use std::time::Instant;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn, Level};

/// 5xx 记为 warn，其余为 info
pub fn log_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;
    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    // tracing 的事件宏要求级别是常量，只能在这里分派
    macro_rules! log_request {
        ($mac:ident) => {
            $mac!(
                method = %method,
                uri = %uri,
                status = status.as_u16(),
                elapsed_ms,
                user_agent = %user_agent,
                "request handled"
            )
        };
    }
    if log_level(status) == Level::WARN {
        log_request!(warn);
    } else {
        log_request!(info);
    }

    response
}
