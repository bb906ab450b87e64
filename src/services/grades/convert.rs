//! 线上消息与领域模型之间的转换

use crate::models::grades::{
    entities::Grade,
    requests::{CreateGradeRequest, UpdateGradeRequest},
};
use crate::proto::SingleGrade;

impl From<Grade> for SingleGrade {
    fn from(grade: Grade) -> Self {
        Self {
            grade_id: grade.grade_id,
            student_id: grade.student_id,
            course_id: grade.course_id,
            semester: grade.semester,
            grade_type: grade.grade_type,
            item_id: grade.item_id,
            grade_value: grade.grade_value,
            graded_by: grade.graded_by,
            graded_at: grade.graded_at.timestamp_millis(),
            updated_at: grade.updated_at.timestamp_millis(),
            comments: grade.comments,
        }
    }
}

// 时间戳由服务端决定，忽略调用方传入的值
impl From<SingleGrade> for CreateGradeRequest {
    fn from(grade: SingleGrade) -> Self {
        Self {
            grade_id: Some(grade.grade_id).filter(|id| !id.trim().is_empty()),
            student_id: grade.student_id,
            course_id: grade.course_id,
            semester: grade.semester,
            grade_type: grade.grade_type,
            item_id: grade.item_id,
            grade_value: grade.grade_value,
            graded_by: grade.graded_by,
            comments: grade.comments,
        }
    }
}

impl From<SingleGrade> for UpdateGradeRequest {
    fn from(grade: SingleGrade) -> Self {
        Self {
            grade_id: grade.grade_id,
            student_id: grade.student_id,
            course_id: grade.course_id,
            semester: grade.semester,
            grade_type: grade.grade_type,
            item_id: grade.item_id,
            grade_value: grade.grade_value,
            graded_by: grade.graded_by,
            comments: grade.comments,
        }
    }
}
