//! 成绩实体

use sea_orm::entity::prelude::*;

use crate::models::grades::entities::{Grade, millis_to_datetime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub grade_id: String,
    pub student_id: String,
    pub course_id: String,
    pub semester: String,
    pub grade_type: String,
    pub item_id: String,
    pub grade_value: String,
    pub graded_by: String,
    // Unix 毫秒时间戳
    pub graded_at: i64,
    pub updated_at: i64,
    #[sea_orm(column_type = "Text")]
    pub comments: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> Grade {
        Grade {
            grade_id: self.grade_id,
            student_id: self.student_id,
            course_id: self.course_id,
            semester: self.semester,
            grade_type: self.grade_type,
            item_id: self.item_id,
            grade_value: self.grade_value,
            graded_by: self.graded_by,
            graded_at: millis_to_datetime(self.graded_at),
            updated_at: millis_to_datetime(self.updated_at),
            comments: self.comments,
        }
    }
}
