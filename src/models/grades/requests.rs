use super::entities::Grade;

// 创建成绩请求（用于存储层）
//
// # grade_id 字段说明
// - 为空时由存储层生成 UUID
// - 非空时按调用方指定的值写入，已存在则返回 AlreadyExists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateGradeRequest {
    pub grade_id: Option<String>,
    pub student_id: String,
    pub course_id: String,
    pub semester: String,
    pub grade_type: String,
    pub item_id: String,
    pub grade_value: String,
    pub graded_by: String,
    pub comments: String,
}

// 更新成绩请求（用于存储层）
//
// 部分更新：非空字段覆盖已存储的值，空字段保持不变。
// 因此无法把字段清空为空字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateGradeRequest {
    pub grade_id: String,
    pub student_id: String,
    pub course_id: String,
    pub semester: String,
    pub grade_type: String,
    pub item_id: String,
    pub grade_value: String,
    pub graded_by: String,
    pub comments: String,
}

impl CreateGradeRequest {
    /// 调用方是否指定了 grade_id（纯空白视为未指定）
    pub fn has_caller_grade_id(&self) -> bool {
        self.grade_id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }

    /// 调用方指定的 grade_id，未指定时生成 UUID
    pub fn resolve_grade_id(&self) -> String {
        match self.grade_id.as_deref() {
            Some(id) if self.has_caller_grade_id() => id.to_string(),
            _ => uuid::Uuid::new_v4().to_string(),
        }
    }

    /// 生成待持久化的完整记录
    pub fn into_grade(self, grade_id: String, now: chrono::DateTime<chrono::Utc>) -> Grade {
        Grade {
            grade_id,
            student_id: self.student_id,
            course_id: self.course_id,
            semester: self.semester,
            grade_type: self.grade_type,
            item_id: self.item_id,
            grade_value: self.grade_value,
            graded_by: self.graded_by,
            graded_at: now,
            updated_at: now,
            comments: self.comments,
        }
    }
}

impl UpdateGradeRequest {
    /// 将非空字段合并到已有记录，并推进 updated_at
    pub fn apply_to(&self, grade: &mut Grade, now: chrono::DateTime<chrono::Utc>) {
        fn merge(target: &mut String, value: &str) {
            if !value.is_empty() {
                *target = value.to_string();
            }
        }

        merge(&mut grade.student_id, &self.student_id);
        merge(&mut grade.course_id, &self.course_id);
        merge(&mut grade.semester, &self.semester);
        merge(&mut grade.grade_type, &self.grade_type);
        merge(&mut grade.item_id, &self.item_id);
        merge(&mut grade.grade_value, &self.grade_value);
        merge(&mut grade.graded_by, &self.graded_by);
        merge(&mut grade.comments, &self.comments);
        grade.updated_at = now;
    }
}
