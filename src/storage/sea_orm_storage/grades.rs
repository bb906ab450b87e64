//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column};
use crate::entity::prelude::Grades;
use crate::errors::{GradesError, Result};
use crate::models::grades::{
    entities::{Grade, now_millis},
    requests::{CreateGradeRequest, UpdateGradeRequest},
};
use crate::utils::validate::{require_non_empty, validate_create_grade, validate_update_grade};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Select, Set, SqlErr,
};
use tracing::debug;

fn to_active_model(grade: &Grade) -> ActiveModel {
    ActiveModel {
        grade_id: Set(grade.grade_id.clone()),
        student_id: Set(grade.student_id.clone()),
        course_id: Set(grade.course_id.clone()),
        semester: Set(grade.semester.clone()),
        grade_type: Set(grade.grade_type.clone()),
        item_id: Set(grade.item_id.clone()),
        grade_value: Set(grade.grade_value.clone()),
        graded_by: Set(grade.graded_by.clone()),
        graded_at: Set(grade.graded_at.timestamp_millis()),
        updated_at: Set(grade.updated_at.timestamp_millis()),
        comments: Set(grade.comments.clone()),
    }
}

impl SeaOrmStorage {
    /// 创建成绩
    pub async fn create_grade_impl(&self, req: CreateGradeRequest) -> Result<Grade> {
        validate_create_grade(&req)?;

        let caller_supplied_id = req.has_caller_grade_id();
        let grade_id = req.resolve_grade_id();
        let grade = req.into_grade(grade_id, now_millis());

        if let Err(e) = Grades::insert(to_active_model(&grade)).exec(&self.db).await {
            let duplicate = match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => true,
                // 部分驱动不区分主键冲突，回查一次确认
                _ => {
                    caller_supplied_id
                        && self.get_grade_by_id_impl(&grade.grade_id).await?.is_some()
                }
            };
            return Err(if duplicate {
                GradesError::already_exists(format!("grade {} already exists", grade.grade_id))
            } else {
                GradesError::database_operation(format!("failed to add grade: {e}"))
            });
        }

        debug!(grade_id = %grade.grade_id, "grade row inserted");
        Ok(grade)
    }

    /// 通过 ID 获取成绩
    pub async fn get_grade_by_id_impl(&self, grade_id: &str) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| GradesError::database_operation(format!("failed to find grade: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 课程某学期的全部成绩
    pub async fn get_course_grades_impl(
        &self,
        course_id: &str,
        semester: &str,
    ) -> Result<Vec<Grade>> {
        let select = Grades::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Semester.eq(semester));

        self.fetch_ordered(select, "course grades").await
    }

    /// 学生在某课程某学期的成绩
    pub async fn get_student_course_grades_impl(
        &self,
        course_id: &str,
        semester: &str,
        student_id: &str,
    ) -> Result<Vec<Grade>> {
        let select = Grades::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Semester.eq(semester))
            .filter(Column::StudentId.eq(student_id));

        self.fetch_ordered(select, "student course grades").await
    }

    /// 学生某学期的全部成绩
    pub async fn get_student_semester_grades_impl(
        &self,
        student_id: &str,
        semester: &str,
    ) -> Result<Vec<Grade>> {
        let select = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Semester.eq(semester));

        self.fetch_ordered(select, "student semester grades").await
    }

    /// 部分更新成绩
    pub async fn update_grade_impl(&self, update: UpdateGradeRequest) -> Result<Grade> {
        validate_update_grade(&update)?;

        // 先检查成绩是否存在
        let mut grade = self
            .get_grade_by_id_impl(&update.grade_id)
            .await?
            .ok_or_else(|| GradesError::not_found(format!("grade {} not found", update.grade_id)))?;

        update.apply_to(&mut grade, now_millis());

        // graded_at 创建后不再写入
        let model = ActiveModel {
            graded_at: NotSet,
            ..to_active_model(&grade)
        };

        let updated = model.update(&self.db).await.map_err(|e| match e {
            // 读取与写入之间记录被删除
            DbErr::RecordNotUpdated => {
                GradesError::not_found(format!("grade {} not found", update.grade_id))
            }
            e => GradesError::database_operation(format!("failed to update grade: {e}")),
        })?;

        Ok(updated.into_grade())
    }

    /// 删除成绩
    pub async fn delete_grade_impl(&self, grade_id: &str) -> Result<()> {
        require_non_empty("grade_id", grade_id)?;

        let result = Grades::delete_by_id(grade_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| GradesError::database_operation(format!("failed to delete grade: {e}")))?;

        if result.rows_affected == 0 {
            return Err(GradesError::not_found(format!("grade {grade_id} not found")));
        }

        Ok(())
    }

    async fn fetch_ordered(&self, select: Select<Grades>, what: &str) -> Result<Vec<Grade>> {
        let models = select
            .order_by_asc(Column::GradedAt)
            .order_by_asc(Column::GradeId)
            .all(&self.db)
            .await
            .map_err(|e| GradesError::database_operation(format!("failed to get {what}: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_grade()).collect())
    }
}
