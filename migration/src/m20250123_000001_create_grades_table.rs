use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 成绩表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::GradeId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::StudentId).string().not_null())
                    .col(ColumnDef::new(Grades::CourseId).string().not_null())
                    .col(ColumnDef::new(Grades::Semester).string().not_null())
                    .col(ColumnDef::new(Grades::GradeType).string().not_null())
                    .col(ColumnDef::new(Grades::ItemId).string().not_null())
                    .col(ColumnDef::new(Grades::GradeValue).string().not_null())
                    .col(ColumnDef::new(Grades::GradedBy).string().not_null())
                    .col(ColumnDef::new(Grades::GradedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Grades::Comments).text().not_null())
                    .to_owned(),
            )
            .await?;

        // 课程成绩查询：course_id + semester
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_course_semester")
                    .table(Grades::Table)
                    .col(Grades::CourseId)
                    .col(Grades::Semester)
                    .to_owned(),
            )
            .await?;

        // 学生学期成绩查询：student_id + semester
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_student_semester")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .col(Grades::Semester)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    GradeId,
    StudentId,
    CourseId,
    Semester,
    GradeType,
    ItemId,
    GradeValue,
    GradedBy,
    GradedAt,
    UpdatedAt,
    Comments,
}
