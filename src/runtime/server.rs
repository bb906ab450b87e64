use std::future::Future;
use std::net::SocketAddr;

use tonic::transport::Server;
use tracing::warn;

use crate::errors::{GradesError, Result};
use crate::proto::grades_service_server::GradesServiceServer;
use crate::services::GradeService;

/// 解析监听地址，host 可以是域名
pub async fn resolve_bind_address(bind_address: &str) -> Result<SocketAddr> {
    tokio::net::lookup_host(bind_address)
        .await?
        .next()
        .ok_or_else(|| {
            GradesError::configuration(format!("cannot resolve bind address: {bind_address}"))
        })
}

/// 启动 gRPC 服务，收到关闭信号后等待进行中的调用完成
pub async fn serve_with_shutdown<F>(
    addr: SocketAddr,
    service: GradesServiceServer<GradeService>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    warn!("Starting gRPC server at {}", addr);

    Server::builder()
        .add_service(service)
        .serve_with_shutdown(addr, shutdown)
        .await?;

    warn!("Graceful shutdown: all in-flight calls completed");
    Ok(())
}
