use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// 成绩记录
///
/// 存储层拥有记录的权威状态，调用方持有的只是按值传递的副本。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    // 成绩ID（唯一标识，创建后不可变）
    pub grade_id: String,
    // 学生ID
    pub student_id: String,
    // 课程ID
    pub course_id: String,
    // 学期
    pub semester: String,
    // 成绩类型，如 Exam、Homework
    pub grade_type: String,
    // 子项ID
    pub item_id: String,
    // 分数或等级，对存储层不透明
    pub grade_value: String,
    // 评分人
    pub graded_by: String,
    // 评分时间
    pub graded_at: DateTime<Utc>,
    // 更新时间
    pub updated_at: DateTime<Utc>,
    // 评语
    pub comments: String,
}

/// 当前时间，截断到毫秒以与持久化精度一致
pub fn now_millis() -> DateTime<Utc> {
    millis_to_datetime(Utc::now().timestamp_millis())
}

/// Unix 毫秒时间戳转换为 UTC 时间，越界时回退到纪元起点
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_default()
}
