//! 调用截止时间处理
//!
//! 读取调用方的 `grpc-timeout` 元数据，把存储操作限制在截止时间内。
//! 超时后存储 future 被丢弃，进行中的数据库操作随之放弃。

use std::future::Future;
use std::time::Duration;

use tonic::metadata::MetadataMap;

use crate::errors::{GradesError, Result};

const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// 解析 gRPC 超时头，格式为最多 8 位数字加单位 (H/M/S/m/u/n)
pub fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || !value.is_ascii() {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    let duration = match unit {
        "H" => Duration::from_secs(amount * 60 * 60),
        "M" => Duration::from_secs(amount * 60),
        "S" => Duration::from_secs(amount),
        "m" => Duration::from_millis(amount),
        "u" => Duration::from_micros(amount),
        "n" => Duration::from_nanos(amount),
        _ => return None,
    };
    Some(duration)
}

/// 计算本次调用的截止时长：调用方超时优先，否则使用服务端默认值
pub fn request_deadline(metadata: &MetadataMap, fallback: Option<Duration>) -> Option<Duration> {
    metadata
        .get(GRPC_TIMEOUT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_grpc_timeout)
        .or(fallback)
}

/// 在截止时间内执行存储操作
pub async fn run_with_deadline<T, F>(deadline: Option<Duration>, operation: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match deadline {
        Some(limit) if limit.is_zero() => Err(GradesError::cancelled(
            "call deadline already expired before the operation started",
        )),
        Some(limit) => tokio::time::timeout(limit, operation)
            .await
            .map_err(|_| {
                GradesError::deadline_exceeded(format!(
                    "storage operation abandoned after {} ms",
                    limit.as_millis()
                ))
            })?,
        None => operation.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::metadata::MetadataValue;

    #[test]
    fn test_parse_grpc_timeout_units() {
        assert_eq!(parse_grpc_timeout("1H"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_grpc_timeout("2M"), Some(Duration::from_secs(120)));
        assert_eq!(parse_grpc_timeout("5S"), Some(Duration::from_secs(5)));
        assert_eq!(parse_grpc_timeout("250m"), Some(Duration::from_millis(250)));
        assert_eq!(parse_grpc_timeout("10u"), Some(Duration::from_micros(10)));
        assert_eq!(parse_grpc_timeout("99n"), Some(Duration::from_nanos(99)));
    }

    #[test]
    fn test_parse_grpc_timeout_rejects_malformed() {
        assert_eq!(parse_grpc_timeout(""), None);
        assert_eq!(parse_grpc_timeout("m"), None);
        assert_eq!(parse_grpc_timeout("10x"), None);
        assert_eq!(parse_grpc_timeout("-1S"), None);
        assert_eq!(parse_grpc_timeout("123456789S"), None);
        // 多字节结尾不能 panic
        assert_eq!(parse_grpc_timeout("1é"), None);
        assert_eq!(parse_grpc_timeout("é"), None);
    }

    #[test]
    fn test_request_deadline_prefers_caller_timeout() {
        let mut metadata = MetadataMap::new();
        let fallback = Some(Duration::from_secs(30));
        assert_eq!(request_deadline(&metadata, fallback), fallback);

        metadata.insert(GRPC_TIMEOUT_HEADER, MetadataValue::from_static("100m"));
        assert_eq!(
            request_deadline(&metadata, fallback),
            Some(Duration::from_millis(100))
        );
    }

    #[tokio::test]
    async fn test_run_with_deadline_times_out_slow_operation() {
        let result: Result<()> = run_with_deadline(Some(Duration::from_millis(10)), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(GradesError::DeadlineExceeded(_))));
    }

    #[tokio::test]
    async fn test_run_with_deadline_passes_through_result() {
        let ok = run_with_deadline(Some(Duration::from_secs(1)), async { Ok(7) }).await;
        assert_eq!(ok, Ok(7));

        let err: Result<()> =
            run_with_deadline(None, async { Err(GradesError::not_found("missing")) }).await;
        assert_eq!(err, Err(GradesError::not_found("missing")));
    }

    #[tokio::test]
    async fn test_zero_deadline_is_cancelled() {
        let result = run_with_deadline(Some(Duration::ZERO), async { Ok(1) }).await;
        assert!(matches!(result, Err(GradesError::Cancelled(_))));
    }
}
