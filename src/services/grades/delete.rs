use tonic::{Request, Response, Status};
use tracing::info;

use super::{GradeService, to_status};
use crate::proto::{RemoveSingleGradeRequest, RemoveSingleGradeResponse};
use crate::utils::run_with_deadline;

pub async fn remove_single_grade(
    service: &GradeService,
    request: Request<RemoveSingleGradeRequest>,
) -> Result<Response<RemoveSingleGradeResponse>, Status> {
    const OP: &str = "RemoveSingleGrade";

    let deadline = service.deadline(request.metadata());
    let claims = service
        .authenticate(&request.get_ref().token, request.metadata())
        .map_err(|e| to_status(OP, e))?;
    let req = request.into_inner();

    // 重复删除返回 NotFound
    run_with_deadline(deadline, service.storage().delete_grade(&req.grade_id))
        .await
        .map_err(|e| to_status(OP, e))?;

    info!(
        operation = OP,
        subject = %claims.sub,
        grade_id = %req.grade_id,
        "grade removed"
    );

    Ok(Response::new(RemoveSingleGradeResponse {
        grade_id: req.grade_id,
    }))
}
