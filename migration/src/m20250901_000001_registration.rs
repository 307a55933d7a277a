use sea_orm_migration::{prelude::*, schema::*};

static IDX_REGISTRATION_EMAIL_TIER: &str = "idx_registration_email_tier";
static IDX_REGISTRATION_TIER_STATUS: &str = "idx_registration_tier_status";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registration::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Registration::Tier, 32))
                    .col(string(Registration::Name))
                    .col(string(Registration::IdentityNumber))
                    .col(string(Registration::Institution))
                    .col(string_null(Registration::Domicile))
                    .col(string(Registration::Email))
                    .col(string(Registration::Phone))
                    .col(string_null(Registration::MessagingHandle))
                    .col(string_null(Registration::SocialHandle))
                    .col(integer(Registration::TicketCount))
                    .col(big_integer(Registration::TotalPrice))
                    .col(string_uniq(Registration::OrderId))
                    .col(string_len(Registration::Status, 16))
                    .col(string_null(Registration::ImageProofUri))
                    .col(text_null(Registration::GatewayResponse))
                    .col(json(Registration::TicketNumbers))
                    .col(boolean(Registration::CheckinStatus))
                    .col(json(Registration::CheckedInNumbers))
                    .col(timestamp_with_time_zone(Registration::CreateTime))
                    .col(timestamp_with_time_zone_null(Registration::UpdateTime))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REGISTRATION_EMAIL_TIER)
                    .table(Registration::Table)
                    .col(Registration::Email)
                    .col(Registration::Tier)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REGISTRATION_TIER_STATUS)
                    .table(Registration::Table)
                    .col(Registration::Tier)
                    .col(Registration::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_REGISTRATION_TIER_STATUS)
                    .table(Registration::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_REGISTRATION_EMAIL_TIER)
                    .table(Registration::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Registration::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Registration {
    Table,
    Id,
    Tier,
    Name,
    IdentityNumber,
    Institution,
    Domicile,
    Email,
    Phone,
    MessagingHandle,
    SocialHandle,
    TicketCount,
    TotalPrice,
    OrderId,
    Status,
    ImageProofUri,
    GatewayResponse,
    TicketNumbers,
    CheckinStatus,
    CheckedInNumbers,
    CreateTime,
    UpdateTime,
}
