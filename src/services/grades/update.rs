use tonic::{Request, Response, Status};
use tracing::info;

use super::{GradeService, to_status};
use crate::errors::GradesError;
use crate::models::grades::requests::UpdateGradeRequest;
use crate::proto::{SingleGrade, UpdateSingleGradeRequest, UpdateSingleGradeResponse};
use crate::utils::run_with_deadline;

pub async fn update_single_grade(
    service: &GradeService,
    request: Request<UpdateSingleGradeRequest>,
) -> Result<Response<UpdateSingleGradeResponse>, Status> {
    const OP: &str = "UpdateSingleGrade";

    let deadline = service.deadline(request.metadata());
    let claims = service
        .authenticate(&request.get_ref().token, request.metadata())
        .map_err(|e| to_status(OP, e))?;

    let grade = request
        .into_inner()
        .grade
        .ok_or_else(|| to_status(OP, GradesError::invalid_argument("grade is required")))?;

    // 非空字段覆盖，空字段保持原值
    let updated = run_with_deadline(
        deadline,
        service
            .storage()
            .update_grade(UpdateGradeRequest::from(grade)),
    )
    .await
    .map_err(|e| to_status(OP, e))?;

    info!(
        operation = OP,
        subject = %claims.sub,
        grade_id = %updated.grade_id,
        "grade updated"
    );

    Ok(Response::new(UpdateSingleGradeResponse {
        grade: Some(SingleGrade::from(updated)),
    }))
}
