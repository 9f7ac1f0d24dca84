//! events 表迁移
//!
//! 每条记录是一次上报的事件（pageview 或自定义类型）。
//! site_id 只是引用，不建外键约束。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::SiteId).string().not_null())
                    .col(ColumnDef::new(Events::SessionHash).string_len(16).not_null())
                    .col(ColumnDef::new(Events::EventType).text().not_null())
                    .col(ColumnDef::new(Events::Path).text().not_null())
                    .col(ColumnDef::new(Events::ReferrerDomain).text().null())
                    .col(ColumnDef::new(Events::Country).string_len(2).null())
                    .col(ColumnDef::new(Events::Browser).string_len(32).not_null())
                    .col(ColumnDef::new(Events::DeviceType).string_len(16).not_null())
                    .col(ColumnDef::new(Events::ScreenBucket).string_len(16).null())
                    .col(
                        ColumnDef::new(Events::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 所有统计查询都按站点过滤
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_site_id")
                    .table(Events::Table)
                    .col(Events::SiteId)
                    .to_owned(),
            )
            .await?;

        // 时间序列查询
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_site_time")
                    .table(Events::Table)
                    .col(Events::SiteId)
                    .col(Events::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_events_site_time").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_events_site_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Events {
    #[sea_orm(iden = "events")]
    Table,
    Id,
    SiteId,
    SessionHash,
    EventType,
    Path,
    ReferrerDomain,
    Country,
    Browser,
    DeviceType,
    ScreenBucket,
    Timestamp,
}
