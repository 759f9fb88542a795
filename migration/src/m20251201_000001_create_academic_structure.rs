use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Department::DepartmentId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Department::Name).string().not_null())
                    .col(
                        ColumnDef::new(Department::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Department::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Department::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::CourseId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Course::Name).string().not_null())
                    .col(ColumnDef::new(Course::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(Course::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Course::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Course::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_department")
                            .from_tbl(Course::Table)
                            .from_col(Course::DepartmentId)
                            .to_tbl(Department::Table)
                            .to_col(Department::DepartmentId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Batch::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batch::BatchId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Batch::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Batch::StartYear).integer().not_null())
                    .col(ColumnDef::new(Batch::EndYear).integer().not_null())
                    .col(ColumnDef::new(Batch::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Batch::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_batch_course")
                            .from_tbl(Batch::Table)
                            .from_col(Batch::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::CourseId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A batch is identified by its course and year range
        manager
            .create_index(
                Index::create()
                    .name("unique_batch_course_years")
                    .table(Batch::Table)
                    .col(Batch::CourseId)
                    .col(Batch::StartYear)
                    .col(Batch::EndYear)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Semester::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Semester::SemesterId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Semester::BatchId).uuid().not_null())
                    .col(ColumnDef::new(Semester::SemesterNumber).integer().not_null())
                    .col(ColumnDef::new(Semester::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Semester::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_semester_batch")
                            .from_tbl(Semester::Table)
                            .from_col(Semester::BatchId)
                            .to_tbl(Batch::Table)
                            .to_col(Batch::BatchId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("unique_semester_batch_number")
                    .table(Semester::Table)
                    .col(Semester::BatchId)
                    .col(Semester::SemesterNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Section::SectionId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Section::SemesterId).uuid().not_null())
                    .col(ColumnDef::new(Section::Name).string().not_null())
                    .col(ColumnDef::new(Section::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Section::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_semester")
                            .from_tbl(Section::Table)
                            .from_col(Section::SemesterId)
                            .to_tbl(Semester::Table)
                            .to_col(Semester::SemesterId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("unique_section_semester_name")
                    .table(Section::Table)
                    .col(Section::SemesterId)
                    .col(Section::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subject::SubjectId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subject::Name).string().not_null())
                    .col(ColumnDef::new(Subject::Code).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Subject::Credits)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Subject::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Subject::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Subject::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_department")
                            .from_tbl(Subject::Table)
                            .from_col(Subject::DepartmentId)
                            .to_tbl(Department::Table)
                            .to_col(Department::DepartmentId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subject_department_id")
                    .table(Subject::Table)
                    .col(Subject::DepartmentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Section::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Semester::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Batch::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Department::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Department {
    Table,
    DepartmentId,
    Name,
    Code,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    CourseId,
    Name,
    Code,
    DepartmentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Batch {
    Table,
    BatchId,
    CourseId,
    StartYear,
    EndYear,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Semester {
    Table,
    SemesterId,
    BatchId,
    SemesterNumber,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Section {
    Table,
    SectionId,
    SemesterId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subject {
    Table,
    SubjectId,
    Name,
    Code,
    Credits,
    DepartmentId,
    CreatedAt,
    UpdatedAt,
}
