use tonic::{Request, Response, Status};
use tracing::debug;

use super::{GradeService, to_status};
use crate::models::grades::entities::Grade;
use crate::proto::{
    GetCourseGradesRequest, GetCourseGradesResponse, GetStudentCourseGradesRequest,
    GetStudentCourseGradesResponse, GetStudentSemesterGradesRequest,
    GetStudentSemesterGradesResponse, SingleGrade,
};
use crate::utils::run_with_deadline;

fn to_wire(grades: Vec<Grade>) -> Vec<SingleGrade> {
    grades.into_iter().map(SingleGrade::from).collect()
}

pub async fn get_course_grades(
    service: &GradeService,
    request: Request<GetCourseGradesRequest>,
) -> Result<Response<GetCourseGradesResponse>, Status> {
    const OP: &str = "GetCourseGrades";

    let deadline = service.deadline(request.metadata());
    let claims = service
        .authenticate(&request.get_ref().token, request.metadata())
        .map_err(|e| to_status(OP, e))?;
    let req = request.into_inner();

    let grades = run_with_deadline(
        deadline,
        service
            .storage()
            .get_course_grades(&req.course_id, &req.semester),
    )
    .await
    .map_err(|e| to_status(OP, e))?;

    debug!(
        operation = OP,
        subject = %claims.sub,
        course_id = %req.course_id,
        semester = %req.semester,
        count = grades.len(),
        "course grades fetched"
    );

    Ok(Response::new(GetCourseGradesResponse {
        grades: to_wire(grades),
    }))
}

pub async fn get_student_course_grades(
    service: &GradeService,
    request: Request<GetStudentCourseGradesRequest>,
) -> Result<Response<GetStudentCourseGradesResponse>, Status> {
    const OP: &str = "GetStudentCourseGrades";

    let deadline = service.deadline(request.metadata());
    let claims = service
        .authenticate(&request.get_ref().token, request.metadata())
        .map_err(|e| to_status(OP, e))?;
    let req = request.into_inner();

    let grades = run_with_deadline(
        deadline,
        service.storage().get_student_course_grades(
            &req.course_id,
            &req.semester,
            &req.student_id,
        ),
    )
    .await
    .map_err(|e| to_status(OP, e))?;

    debug!(
        operation = OP,
        subject = %claims.sub,
        course_id = %req.course_id,
        semester = %req.semester,
        student_id = %req.student_id,
        count = grades.len(),
        "student course grades fetched"
    );

    Ok(Response::new(GetStudentCourseGradesResponse {
        grades: to_wire(grades),
    }))
}

pub async fn get_student_semester_grades(
    service: &GradeService,
    request: Request<GetStudentSemesterGradesRequest>,
) -> Result<Response<GetStudentSemesterGradesResponse>, Status> {
    const OP: &str = "GetStudentSemesterGrades";

    let deadline = service.deadline(request.metadata());
    let claims = service
        .authenticate(&request.get_ref().token, request.metadata())
        .map_err(|e| to_status(OP, e))?;
    let req = request.into_inner();

    let grades = run_with_deadline(
        deadline,
        service
            .storage()
            .get_student_semester_grades(&req.student_id, &req.semester),
    )
    .await
    .map_err(|e| to_status(OP, e))?;

    debug!(
        operation = OP,
        subject = %claims.sub,
        student_id = %req.student_id,
        semester = %req.semester,
        count = grades.len(),
        "student semester grades fetched"
    );

    Ok(Response::new(GetStudentSemesterGradesResponse {
        grades: to_wire(grades),
    }))
}
