//! 内存存储实现
//!
//! 基于 DashMap，语义与 SeaORM 实现一致，用于测试和 `memory://` 模式。

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use super::{Storage, sort_grades};
use crate::errors::{GradesError, Result};
use crate::models::grades::{
    entities::{Grade, now_millis},
    requests::{CreateGradeRequest, UpdateGradeRequest},
};
use crate::utils::validate::{require_non_empty, validate_create_grade, validate_update_grade};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    grades: DashMap<String, Grade>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    fn collect_where<F>(&self, predicate: F) -> Vec<Grade>
    where
        F: Fn(&Grade) -> bool,
    {
        let mut grades: Vec<Grade> = self
            .grades
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        sort_grades(&mut grades);
        grades
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_grade(&self, req: CreateGradeRequest) -> Result<Grade> {
        validate_create_grade(&req)?;

        let grade_id = req.resolve_grade_id();
        let grade = req.into_grade(grade_id, now_millis());

        // entry API 保证检查与插入的原子性
        match self.grades.entry(grade.grade_id.clone()) {
            Entry::Occupied(_) => Err(GradesError::already_exists(format!(
                "grade {} already exists",
                grade.grade_id
            ))),
            Entry::Vacant(entry) => {
                entry.insert(grade.clone());
                debug!(grade_id = %grade.grade_id, "grade inserted into memory storage");
                Ok(grade)
            }
        }
    }

    async fn get_grade_by_id(&self, grade_id: &str) -> Result<Option<Grade>> {
        Ok(self.grades.get(grade_id).map(|g| g.value().clone()))
    }

    async fn get_course_grades(&self, course_id: &str, semester: &str) -> Result<Vec<Grade>> {
        Ok(self.collect_where(|g| g.course_id == course_id && g.semester == semester))
    }

    async fn get_student_course_grades(
        &self,
        course_id: &str,
        semester: &str,
        student_id: &str,
    ) -> Result<Vec<Grade>> {
        Ok(self.collect_where(|g| {
            g.course_id == course_id && g.semester == semester && g.student_id == student_id
        }))
    }

    async fn get_student_semester_grades(
        &self,
        student_id: &str,
        semester: &str,
    ) -> Result<Vec<Grade>> {
        Ok(self.collect_where(|g| g.student_id == student_id && g.semester == semester))
    }

    async fn update_grade(&self, update: UpdateGradeRequest) -> Result<Grade> {
        validate_update_grade(&update)?;

        let mut existing = self
            .grades
            .get_mut(&update.grade_id)
            .ok_or_else(|| GradesError::not_found(format!("grade {} not found", update.grade_id)))?;

        update.apply_to(existing.value_mut(), now_millis());
        Ok(existing.value().clone())
    }

    async fn delete_grade(&self, grade_id: &str) -> Result<()> {
        require_non_empty("grade_id", grade_id)?;

        self.grades
            .remove(grade_id)
            .map(|_| ())
            .ok_or_else(|| GradesError::not_found(format!("grade {grade_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn math_grade(student_id: &str, semester: &str) -> CreateGradeRequest {
        CreateGradeRequest {
            grade_id: None,
            student_id: student_id.to_string(),
            course_id: "MATH101".to_string(),
            semester: semester.to_string(),
            grade_type: "Exam".to_string(),
            item_id: "FINAL_EXAM".to_string(),
            grade_value: "A".to_string(),
            graded_by: "Prof. Smith".to_string(),
            comments: "Excellent work".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids_for_identical_records() {
        let storage = MemoryStorage::new();

        let first = storage.create_grade(math_grade("s1", "2025A")).await.unwrap();
        let second = storage.create_grade(math_grade("s1", "2025A")).await.unwrap();

        assert!(!first.grade_id.is_empty());
        assert!(!second.grade_id.is_empty());
        assert_ne!(first.grade_id, second.grade_id);
        assert_eq!(first.graded_at, first.updated_at);
        assert_eq!(storage.len(), 2);
    }

    #[tokio::test]
    async fn test_create_keeps_caller_supplied_id() {
        let storage = MemoryStorage::new();
        let req = CreateGradeRequest {
            grade_id: Some("fixed-id".to_string()),
            ..math_grade("s1", "2025A")
        };

        let grade = storage.create_grade(req.clone()).await.unwrap();
        assert_eq!(grade.grade_id, "fixed-id");

        let duplicate = storage.create_grade(req).await;
        assert!(matches!(duplicate, Err(GradesError::AlreadyExists(_))));
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_grade_id_is_replaced_and_row_stays_reachable() {
        let storage = MemoryStorage::new();
        let req = CreateGradeRequest {
            grade_id: Some("   ".to_string()),
            ..math_grade("s1", "2025A")
        };

        let grade = storage.create_grade(req).await.unwrap();
        assert!(!grade.grade_id.trim().is_empty());
        assert_ne!(grade.grade_id, "   ");

        let updated = storage
            .update_grade(UpdateGradeRequest {
                grade_id: grade.grade_id.clone(),
                grade_value: "C".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.grade_value, "C");

        storage.delete_grade(&grade.grade_id).await.unwrap();
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_create_validation_persists_nothing() {
        let storage = MemoryStorage::new();

        let no_student = CreateGradeRequest {
            student_id: String::new(),
            ..math_grade("s1", "2025A")
        };
        let no_course = CreateGradeRequest {
            course_id: String::new(),
            ..math_grade("s1", "2025A")
        };

        assert!(matches!(
            storage.create_grade(no_student).await,
            Err(GradesError::InvalidArgument(_))
        ));
        assert!(matches!(
            storage.create_grade(no_course).await,
            Err(GradesError::InvalidArgument(_))
        ));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let storage = MemoryStorage::new();
        let stored = storage.create_grade(math_grade("s1", "2025A")).await.unwrap();

        let updated = storage
            .update_grade(UpdateGradeRequest {
                grade_id: stored.grade_id.clone(),
                grade_value: "B".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.grade_value, "B");
        assert!(updated.updated_at >= stored.updated_at);
        assert_eq!(
            Grade {
                grade_value: stored.grade_value.clone(),
                updated_at: stored.updated_at,
                ..updated.clone()
            },
            stored
        );

        let persisted = storage.get_grade_by_id(&stored.grade_id).await.unwrap();
        assert_eq!(persisted, Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_grade_is_not_found() {
        let storage = MemoryStorage::new();
        storage.create_grade(math_grade("s1", "2025A")).await.unwrap();

        let result = storage
            .update_grade(UpdateGradeRequest {
                grade_id: "missing".to_string(),
                grade_value: "F".to_string(),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(GradesError::NotFound(_))));
        assert_eq!(storage.len(), 1);
        let all = storage.get_course_grades("MATH101", "2025A").await.unwrap();
        assert_eq!(all[0].grade_value, "A");
    }

    #[tokio::test]
    async fn test_update_requires_grade_id() {
        let storage = MemoryStorage::new();
        let result = storage.update_grade(UpdateGradeRequest::default()).await;
        assert!(matches!(result, Err(GradesError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let storage = MemoryStorage::new();
        let stored = storage.create_grade(math_grade("s1", "2025A")).await.unwrap();

        storage.delete_grade(&stored.grade_id).await.unwrap();
        assert!(matches!(
            storage.delete_grade(&stored.grade_id).await,
            Err(GradesError::NotFound(_))
        ));
        assert!(matches!(
            storage.delete_grade("").await,
            Err(GradesError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_filters() {
        let storage = MemoryStorage::new();
        let a1 = storage.create_grade(math_grade("s1", "2025A")).await.unwrap();
        let a2 = storage.create_grade(math_grade("s2", "2025A")).await.unwrap();
        let b1 = storage.create_grade(math_grade("s1", "2025B")).await.unwrap();

        let course = storage.get_course_grades("MATH101", "2025A").await.unwrap();
        let mut ids: Vec<_> = course.iter().map(|g| g.grade_id.clone()).collect();
        ids.sort();
        let mut expected = vec![a1.grade_id.clone(), a2.grade_id.clone()];
        expected.sort();
        assert_eq!(ids, expected);

        let student_course = storage
            .get_student_course_grades("MATH101", "2025B", "s1")
            .await
            .unwrap();
        assert_eq!(student_course, vec![b1.clone()]);

        let semester = storage.get_student_semester_grades("s1", "2025A").await.unwrap();
        assert_eq!(semester, vec![a1]);

        assert!(storage.get_course_grades("PHYS101", "2025A").await.unwrap().is_empty());
    }
}
