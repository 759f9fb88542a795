use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Role-specific columns stay nullable: teachers use department_id,
        // students use batch_id / section_id / roll_number.
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::UserId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(User::Name).string().not_null())
                    .col(ColumnDef::new(User::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(User::PasswordHash).string().not_null())
                    .col(ColumnDef::new(User::Role).string_len(16).not_null())
                    .col(ColumnDef::new(User::DepartmentId).uuid().null())
                    .col(ColumnDef::new(User::BatchId).uuid().null())
                    .col(ColumnDef::new(User::SectionId).uuid().null())
                    .col(ColumnDef::new(User::RollNumber).string().null())
                    .col(ColumnDef::new(User::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(User::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_department")
                            .from_tbl(User::Table)
                            .from_col(User::DepartmentId)
                            .to_tbl(Department::Table)
                            .to_col(Department::DepartmentId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_batch")
                            .from_tbl(User::Table)
                            .from_col(User::BatchId)
                            .to_tbl(Batch::Table)
                            .to_col(Batch::BatchId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_section")
                            .from_tbl(User::Table)
                            .from_col(User::SectionId)
                            .to_tbl(Section::Table)
                            .to_col(Section::SectionId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_role")
                    .table(User::Table)
                    .col(User::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubjectMapping::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubjectMapping::SubjectMappingId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubjectMapping::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(SubjectMapping::SectionId).uuid().not_null())
                    .col(ColumnDef::new(SubjectMapping::TeacherId).uuid().not_null())
                    .col(ColumnDef::new(SubjectMapping::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(SubjectMapping::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_mapping_subject")
                            .from_tbl(SubjectMapping::Table)
                            .from_col(SubjectMapping::SubjectId)
                            .to_tbl(Subject::Table)
                            .to_col(Subject::SubjectId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_mapping_section")
                            .from_tbl(SubjectMapping::Table)
                            .from_col(SubjectMapping::SectionId)
                            .to_tbl(Section::Table)
                            .to_col(Section::SectionId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_mapping_teacher")
                            .from_tbl(SubjectMapping::Table)
                            .from_col(SubjectMapping::TeacherId)
                            .to_tbl(User::Table)
                            .to_col(User::UserId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One teacher per subject per section
        manager
            .create_index(
                Index::create()
                    .name("unique_subject_mapping_section_subject")
                    .table(SubjectMapping::Table)
                    .col(SubjectMapping::SectionId)
                    .col(SubjectMapping::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subject_mapping_teacher_id")
                    .table(SubjectMapping::Table)
                    .col(SubjectMapping::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TimeTable::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeTable::TimeTableId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeTable::SubjectMappingId).uuid().not_null())
                    .col(ColumnDef::new(TimeTable::DayOfWeek).integer().not_null())
                    .col(ColumnDef::new(TimeTable::StartTime).string_len(5).not_null())
                    .col(ColumnDef::new(TimeTable::EndTime).string_len(5).not_null())
                    .col(ColumnDef::new(TimeTable::RoomNumber).string().null())
                    .col(ColumnDef::new(TimeTable::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(TimeTable::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_table_subject_mapping")
                            .from_tbl(TimeTable::Table)
                            .from_col(TimeTable::SubjectMappingId)
                            .to_tbl(SubjectMapping::Table)
                            .to_col(SubjectMapping::SubjectMappingId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_time_table_mapping_day")
                    .table(TimeTable::Table)
                    .col(TimeTable::SubjectMappingId)
                    .col(TimeTable::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimeTable::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectMapping::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    UserId,
    Name,
    Email,
    PasswordHash,
    Role,
    DepartmentId,
    BatchId,
    SectionId,
    RollNumber,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubjectMapping {
    Table,
    SubjectMappingId,
    SubjectId,
    SectionId,
    TeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TimeTable {
    Table,
    TimeTableId,
    SubjectMappingId,
    DayOfWeek,
    StartTime,
    EndTime,
    RoomNumber,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Department {
    Table,
    DepartmentId,
}

#[derive(DeriveIden)]
enum Batch {
    Table,
    BatchId,
}

#[derive(DeriveIden)]
enum Section {
    Table,
    SectionId,
}

#[derive(DeriveIden)]
enum Subject {
    Table,
    SubjectId,
}
