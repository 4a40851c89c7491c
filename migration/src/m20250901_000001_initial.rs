use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
    Picture,
    IsCoach,
    SubscriptionTier,
    SubscriptionEndDate,
    TrialUsed,
    Points,
    WeeklyWorkoutCount,
    LastWorkoutDate,
    FullName,
    DateOfBirth,
    PlaceOfBirth,
    PhoneNumber,
    AssignedSpecialists,
    ActiveSectionIds,
    IsNewUser,
    CreatedAt,
    LastLogin,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
    Token,
    UserId,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DashboardPosts {
    Table,
    Id,
    Title,
    Content,
    MediaUrl,
    MediaType,
    UserId,
    SectionId,
    ButtonText,
    ButtonLink,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    Name,
    BackgroundImage,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FoodItems {
    Table,
    Id,
    Name,
    Description,
    Category,
    Nutrition,
    Details,
}

#[derive(DeriveIden)]
enum Exercises {
    Table,
    Id,
    Name,
    Description,
    MuscleGroup,
    Difficulty,
    Instructions,
    ImageUrl,
    VideoUrl,
    VideoDataUrl,
}

#[derive(DeriveIden)]
enum Coupons {
    Table,
    Id,
    Code,
    DiscountPercentage,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    SenderId,
    ReceiverId,
    ConversationId,
    Kind,
    Content,
    Channel,
    SentAt,
}

#[derive(DeriveIden)]
enum LoginActivities {
    Table,
    Id,
    UserId,
    Time,
    Ip,
    Device,
    Status,
    FailureReason,
}

#[derive(DeriveIden)]
enum Settings {
    Table,
    Id,
    Key,
    Value,
}

#[derive(DeriveIden)]
enum CustomCards {
    Table,
    Id,
    Title,
    Content,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Password).string())
                    .col(ColumnDef::new(Users::Picture).text())
                    .col(
                        ColumnDef::new(Users::IsCoach)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::SubscriptionTier)
                            .string()
                            .not_null()
                            .default("free"),
                    )
                    .col(ColumnDef::new(Users::SubscriptionEndDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Users::TrialUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::WeeklyWorkoutCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::LastWorkoutDate).date())
                    .col(ColumnDef::new(Users::FullName).string())
                    .col(ColumnDef::new(Users::DateOfBirth).date())
                    .col(ColumnDef::new(Users::PlaceOfBirth).string())
                    .col(ColumnDef::new(Users::PhoneNumber).string())
                    .col(ColumnDef::new(Users::AssignedSpecialists).json().not_null())
                    .col(ColumnDef::new(Users::ActiveSectionIds).json().not_null())
                    .col(
                        ColumnDef::new(Users::IsNewUser)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::LastLogin).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Emails are stored normalized (trimmed, lowercased); one account per address
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_email_unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sessions::Token).string().not_null())
                    .col(ColumnDef::new(Sessions::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Sessions::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Sessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sessions_token_unique")
                    .table(Sessions::Table)
                    .col(Sessions::Token)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DashboardPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DashboardPosts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DashboardPosts::Title).string().not_null())
                    .col(ColumnDef::new(DashboardPosts::Content).text().not_null())
                    .col(ColumnDef::new(DashboardPosts::MediaUrl).text())
                    .col(ColumnDef::new(DashboardPosts::MediaType).string())
                    .col(ColumnDef::new(DashboardPosts::UserId).big_integer())
                    .col(ColumnDef::new(DashboardPosts::SectionId).big_integer())
                    .col(ColumnDef::new(DashboardPosts::ButtonText).string())
                    .col(ColumnDef::new(DashboardPosts::ButtonLink).text())
                    .col(
                        ColumnDef::new(DashboardPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_dashboard_posts_section")
                    .table(DashboardPosts::Table)
                    .col(DashboardPosts::SectionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::Name).json().not_null())
                    .col(ColumnDef::new(Sections::BackgroundImage).text())
                    .col(
                        ColumnDef::new(Sections::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FoodItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FoodItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FoodItems::Name).json().not_null())
                    .col(ColumnDef::new(FoodItems::Description).json().not_null())
                    .col(ColumnDef::new(FoodItems::Category).string().not_null())
                    .col(ColumnDef::new(FoodItems::Nutrition).json().not_null())
                    .col(ColumnDef::new(FoodItems::Details).json().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Exercises::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exercises::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exercises::Name).json().not_null())
                    .col(ColumnDef::new(Exercises::Description).json().not_null())
                    .col(ColumnDef::new(Exercises::MuscleGroup).json().not_null())
                    .col(ColumnDef::new(Exercises::Difficulty).string().not_null())
                    .col(ColumnDef::new(Exercises::Instructions).json().not_null())
                    .col(ColumnDef::new(Exercises::ImageUrl).text().not_null())
                    .col(ColumnDef::new(Exercises::VideoUrl).text())
                    .col(ColumnDef::new(Exercises::VideoDataUrl).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Coupons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Coupons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Coupons::Code).string().not_null())
                    .col(
                        ColumnDef::new(Coupons::DiscountPercentage)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Coupons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::SenderId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::ReceiverId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::ConversationId).string().not_null())
                    .col(ColumnDef::new(Messages::Kind).string().not_null())
                    .col(ColumnDef::new(Messages::Content).text().not_null())
                    .col(ColumnDef::new(Messages::Channel).string())
                    .col(
                        ColumnDef::new(Messages::SentAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_messages_conversation")
                    .table(Messages::Table)
                    .col(Messages::ConversationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LoginActivities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LoginActivities::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LoginActivities::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LoginActivities::Time)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LoginActivities::Ip).string().not_null())
                    .col(ColumnDef::new(LoginActivities::Device).string().not_null())
                    .col(ColumnDef::new(LoginActivities::Status).string().not_null())
                    .col(ColumnDef::new(LoginActivities::FailureReason).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settings::Key).string().not_null())
                    .col(ColumnDef::new(Settings::Value).json().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_settings_key_unique")
                    .table(Settings::Table)
                    .col(Settings::Key)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CustomCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomCards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomCards::Title).string().not_null())
                    .col(ColumnDef::new(CustomCards::Content).text().not_null())
                    .col(
                        ColumnDef::new(CustomCards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomCards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LoginActivities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Coupons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exercises::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FoodItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DashboardPosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
