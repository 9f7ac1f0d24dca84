//! sites 表迁移
//!
//! 每个站点持有一个唯一的 API key，用于统计接口的认证。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sites::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Sites::Name).text().not_null())
                    .col(ColumnDef::new(Sites::Domain).text().not_null())
                    .col(ColumnDef::new(Sites::ApiKey).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Sites::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // API key 点查（认证中间件）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sites_api_key")
                    .table(Sites::Table)
                    .col(Sites::ApiKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_sites_api_key").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Sites::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sites {
    #[sea_orm(iden = "sites")]
    Table,
    Id,
    Name,
    Domain,
    ApiKey,
    CreatedAt,
}
