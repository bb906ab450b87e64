use crate::errors::{GradesError, Result};
use crate::models::grades::requests::{CreateGradeRequest, UpdateGradeRequest};

/// 校验必填字段非空
pub fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GradesError::invalid_argument(format!("{field} is required")));
    }
    Ok(())
}

/// 创建成绩：student_id 和 course_id 必填
pub fn validate_create_grade(req: &CreateGradeRequest) -> Result<()> {
    require_non_empty("student_id", &req.student_id)?;
    require_non_empty("course_id", &req.course_id)?;
    Ok(())
}

/// 更新成绩：grade_id 必填
pub fn validate_update_grade(req: &UpdateGradeRequest) -> Result<()> {
    require_non_empty("grade_id", &req.grade_id)
}
