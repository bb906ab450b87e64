use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::grades::{
    entities::Grade,
    requests::{CreateGradeRequest, UpdateGradeRequest},
};

pub mod memory_storage;
pub mod sea_orm_storage;

/// 内存存储的数据库 URL
pub const MEMORY_STORAGE_URL: &str = "memory://";

/// 成绩数据访问层
///
/// 所有实现共享同一套契约：
/// - 创建时 student_id / course_id 必填，grade_id 缺省时生成
/// - 更新与删除只按 grade_id 定位，不存在时返回 NotFound
/// - 查询结果为空时返回空列表而非错误
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // 创建成绩
    async fn create_grade(&self, grade: CreateGradeRequest) -> Result<Grade>;
    // 通过ID获取成绩
    async fn get_grade_by_id(&self, grade_id: &str) -> Result<Option<Grade>>;
    // 获取课程在某学期的全部成绩
    async fn get_course_grades(&self, course_id: &str, semester: &str) -> Result<Vec<Grade>>;
    // 获取学生在某课程某学期的成绩
    async fn get_student_course_grades(
        &self,
        course_id: &str,
        semester: &str,
        student_id: &str,
    ) -> Result<Vec<Grade>>;
    // 获取学生在某学期的全部成绩
    async fn get_student_semester_grades(
        &self,
        student_id: &str,
        semester: &str,
    ) -> Result<Vec<Grade>>;
    // 部分更新成绩
    async fn update_grade(&self, update: UpdateGradeRequest) -> Result<Grade>;
    // 删除成绩
    async fn delete_grade(&self, grade_id: &str) -> Result<()>;
}

/// 按配置选择存储后端
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    if config.url == MEMORY_STORAGE_URL {
        return Ok(Arc::new(memory_storage::MemoryStorage::new()));
    }

    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}

/// 结果排序：按评分时间，再按 grade_id，保证输出稳定
pub(crate) fn sort_grades(grades: &mut [Grade]) {
    grades.sort_by(|a, b| {
        a.graded_at
            .cmp(&b.graded_at)
            .then_with(|| a.grade_id.cmp(&b.grade_id))
    });
}
