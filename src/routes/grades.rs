use std::sync::Arc;
use std::time::Duration;

use crate::proto::grades_service_server::GradesServiceServer;
use crate::services::GradeService;
use crate::storage::Storage;
use crate::utils::TokenVerifier;

// 组装成绩服务，供 tonic Server 挂载
pub fn configure_grades_routes(
    storage: Arc<dyn Storage>,
    verifier: Arc<dyn TokenVerifier>,
    default_timeout: Option<Duration>,
) -> GradesServiceServer<GradeService> {
    GradesServiceServer::new(
        GradeService::new(storage, verifier).with_default_timeout(default_timeout),
    )
}
