use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建教师表
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Teachers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Teachers::FullName).string().not_null())
                    .col(ColumnDef::new(Teachers::SchoolName).string().null())
                    .col(ColumnDef::new(Teachers::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Teachers::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Teachers::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Students::Nisn).string().null())
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::Class).string().not_null())
                    .col(ColumnDef::new(Students::Gender).string_len(1).not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考勤表
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Attendance::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::Notes).text().null())
                    .col(
                        ColumnDef::new(Attendance::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::Subject).string().not_null())
                    .col(ColumnDef::new(Grades::AssessmentDate).date().not_null())
                    .col(
                        ColumnDef::new(Grades::AssessmentName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Grades::Score).double().not_null())
                    .col(ColumnDef::new(Grades::Remarks).text().null())
                    .col(ColumnDef::new(Grades::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建行为记录表
        manager
            .create_table(
                Table::create()
                    .table(BehaviorLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BehaviorLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BehaviorLogs::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BehaviorLogs::Kind).string().not_null())
                    .col(ColumnDef::new(BehaviorLogs::Description).text().not_null())
                    .col(ColumnDef::new(BehaviorLogs::Date).date().not_null())
                    .col(
                        ColumnDef::new(BehaviorLogs::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BehaviorLogs::Table, BehaviorLogs::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Schedules::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Schedules::DayOfWeek).integer().not_null())
                    .col(ColumnDef::new(Schedules::Subject).string().not_null())
                    .col(ColumnDef::new(Schedules::Class).string().not_null())
                    .col(ColumnDef::new(Schedules::StartTime).string().not_null())
                    .col(ColumnDef::new(Schedules::EndTime).string().not_null())
                    .col(ColumnDef::new(Schedules::Room).string().null())
                    .col(
                        ColumnDef::new(Schedules::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schedules::Table, Schedules::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subjects::Table, Subjects::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 唯一约束（自然键） ====================

        // 同一教师名下 NISN 唯一（NULL 不参与比较）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_students_teacher_nisn")
                    .table(Students::Table)
                    .col(Students::TeacherId)
                    .col(Students::Nisn)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 每名学生每天最多一条考勤
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attendance_student_date")
                    .table(Attendance::Table)
                    .col(Attendance::StudentId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 成绩自然键包含评估名称，同日同科目的不同评估互不覆盖
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_grades_student_subject_date_name")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .col(Grades::Subject)
                    .col(Grades::AssessmentDate)
                    .col(Grades::AssessmentName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_subjects_teacher_name")
                    .table(Subjects::Table)
                    .col(Subjects::TeacherId)
                    .col(Subjects::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 查询索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_teacher_class")
                    .table(Students::Table)
                    .col(Students::TeacherId)
                    .col(Students::Class)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_date")
                    .table(Attendance::Table)
                    .col(Attendance::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_behavior_logs_student_id")
                    .table(BehaviorLogs::Table)
                    .col(BehaviorLogs::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_schedules_teacher_day")
                    .table(Schedules::Table)
                    .col(Schedules::TeacherId)
                    .col(Schedules::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BehaviorLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Teachers {
    #[sea_orm(iden = "teachers")]
    Table,
    Id,
    Email,
    PasswordHash,
    FullName,
    SchoolName,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    TeacherId,
    Nisn,
    Name,
    Class,
    Gender,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    StudentId,
    Date,
    Status,
    Notes,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    StudentId,
    Subject,
    AssessmentDate,
    AssessmentName,
    Score,
    Remarks,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BehaviorLogs {
    #[sea_orm(iden = "behavior_logs")]
    Table,
    Id,
    StudentId,
    Kind,
    Description,
    Date,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Schedules {
    #[sea_orm(iden = "schedules")]
    Table,
    Id,
    TeacherId,
    DayOfWeek,
    Subject,
    Class,
    StartTime,
    EndTime,
    Room,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    TeacherId,
    Name,
    CreatedAt,
}
