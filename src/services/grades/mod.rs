pub mod add;
pub mod convert;
pub mod delete;
pub mod list;
pub mod update;

use std::sync::Arc;
use std::time::Duration;

use tonic::metadata::MetadataMap;
use tonic::{Request, Response, Status};
use tracing::{error, warn};

use crate::errors::{GradesError, Result};
use crate::proto::grades_service_server::GradesService;
use crate::proto::{
    AddSingleGradeRequest, AddSingleGradeResponse, GetCourseGradesRequest,
    GetCourseGradesResponse, GetStudentCourseGradesRequest, GetStudentCourseGradesResponse,
    GetStudentSemesterGradesRequest, GetStudentSemesterGradesResponse, RemoveSingleGradeRequest,
    RemoveSingleGradeResponse, UpdateSingleGradeRequest, UpdateSingleGradeResponse,
};
use crate::storage::Storage;
use crate::utils::deadline::request_deadline;
use crate::utils::{Claims, TokenVerifier};

const AUTHORIZATION_HEADER: &str = "authorization";
const BEARER_PREFIX: &str = "Bearer ";

/// 成绩 gRPC 服务
///
/// 存储与认证协作方由构造方注入，服务本身不持有任何全局状态。
pub struct GradeService {
    storage: Arc<dyn Storage>,
    verifier: Arc<dyn TokenVerifier>,
    default_timeout: Option<Duration>,
}

impl GradeService {
    pub fn new(storage: Arc<dyn Storage>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            storage,
            verifier,
            default_timeout: None,
        }
    }

    /// 调用方未携带 grpc-timeout 时使用的截止时长
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn deadline(&self, metadata: &MetadataMap) -> Option<Duration> {
        request_deadline(metadata, self.default_timeout)
    }

    /// 校验调用方 token
    ///
    /// 请求体中的 token 优先，为空时读取 `authorization: Bearer` 元数据。
    pub(crate) fn authenticate(&self, token: &str, metadata: &MetadataMap) -> Result<Claims> {
        let token = match token.trim() {
            "" => bearer_token(metadata)
                .ok_or_else(|| GradesError::unauthenticated("missing token"))?,
            t => t,
        };

        self.verifier.verify(token).map_err(|e| match e {
            GradesError::Unauthenticated(_) => e,
            other => {
                warn!("Token verifier failed: {}", other);
                GradesError::unauthenticated("invalid token")
            }
        })
    }
}

fn bearer_token(metadata: &MetadataMap) -> Option<&str> {
    metadata
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// 记录失败并转换为 gRPC 状态
pub(crate) fn to_status(operation: &str, err: GradesError) -> Status {
    if err.is_client_facing() {
        warn!(operation, code = err.code(), "{}", err.format_simple());
    } else {
        error!(operation, code = err.code(), "{}", err.format_simple());
    }
    Status::from(err)
}

#[tonic::async_trait]
impl GradesService for GradeService {
    async fn get_course_grades(
        &self,
        request: Request<GetCourseGradesRequest>,
    ) -> std::result::Result<Response<GetCourseGradesResponse>, Status> {
        list::get_course_grades(self, request).await
    }

    async fn get_student_course_grades(
        &self,
        request: Request<GetStudentCourseGradesRequest>,
    ) -> std::result::Result<Response<GetStudentCourseGradesResponse>, Status> {
        list::get_student_course_grades(self, request).await
    }

    async fn get_student_semester_grades(
        &self,
        request: Request<GetStudentSemesterGradesRequest>,
    ) -> std::result::Result<Response<GetStudentSemesterGradesResponse>, Status> {
        list::get_student_semester_grades(self, request).await
    }

    async fn add_single_grade(
        &self,
        request: Request<AddSingleGradeRequest>,
    ) -> std::result::Result<Response<AddSingleGradeResponse>, Status> {
        add::add_single_grade(self, request).await
    }

    async fn update_single_grade(
        &self,
        request: Request<UpdateSingleGradeRequest>,
    ) -> std::result::Result<Response<UpdateSingleGradeResponse>, Status> {
        update::update_single_grade(self, request).await
    }

    async fn remove_single_grade(
        &self,
        request: Request<RemoveSingleGradeRequest>,
    ) -> std::result::Result<Response<RemoveSingleGradeResponse>, Status> {
        delete::remove_single_grade(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_storage::MemoryStorage;
    use crate::utils::StaticTokenVerifier;
    use tonic::metadata::MetadataValue;

    fn service() -> GradeService {
        GradeService::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(StaticTokenVerifier::new().with_token("good", "tester", "staff")),
        )
    }

    #[test]
    fn test_body_token_wins() {
        let mut metadata = MetadataMap::new();
        metadata.insert("authorization", MetadataValue::from_static("Bearer bad"));

        let claims = service().authenticate("good", &metadata).unwrap();
        assert_eq!(claims.sub, "tester");
    }

    #[test]
    fn test_bearer_fallback() {
        let mut metadata = MetadataMap::new();
        metadata.insert("authorization", MetadataValue::from_static("Bearer good"));

        assert!(service().authenticate("", &metadata).is_ok());
    }

    #[test]
    fn test_missing_or_bad_token() {
        let svc = service();
        let empty = MetadataMap::new();
        assert!(matches!(
            svc.authenticate("", &empty),
            Err(GradesError::Unauthenticated(_))
        ));
        assert!(matches!(
            svc.authenticate("nope", &empty),
            Err(GradesError::Unauthenticated(_))
        ));

        let mut basic = MetadataMap::new();
        basic.insert("authorization", MetadataValue::from_static("Basic good"));
        assert!(svc.authenticate("", &basic).is_err());
    }

    #[test]
    fn test_to_status_sanitizes_internal_errors() {
        let status = to_status(
            "Test",
            GradesError::database_operation("connection reset by peer"),
        );
        assert_eq!(status.code(), tonic::Code::Internal);
        assert!(!status.message().contains("connection reset"));
    }
}
