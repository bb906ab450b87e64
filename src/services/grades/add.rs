use tonic::{Request, Response, Status};
use tracing::info;

use super::{GradeService, to_status};
use crate::errors::GradesError;
use crate::models::grades::requests::CreateGradeRequest;
use crate::proto::{AddSingleGradeRequest, AddSingleGradeResponse, SingleGrade};
use crate::utils::run_with_deadline;

pub async fn add_single_grade(
    service: &GradeService,
    request: Request<AddSingleGradeRequest>,
) -> Result<Response<AddSingleGradeResponse>, Status> {
    const OP: &str = "AddSingleGrade";

    let deadline = service.deadline(request.metadata());
    let claims = service
        .authenticate(&request.get_ref().token, request.metadata())
        .map_err(|e| to_status(OP, e))?;

    let grade = request
        .into_inner()
        .grade
        .ok_or_else(|| to_status(OP, GradesError::invalid_argument("grade is required")))?;

    let created = run_with_deadline(
        deadline,
        service
            .storage()
            .create_grade(CreateGradeRequest::from(grade)),
    )
    .await
    .map_err(|e| to_status(OP, e))?;

    info!(
        operation = OP,
        subject = %claims.sub,
        grade_id = %created.grade_id,
        course_id = %created.course_id,
        student_id = %created.student_id,
        "grade added"
    );

    Ok(Response::new(AddSingleGradeResponse {
        grade: Some(SingleGrade::from(created)),
    }))
}
