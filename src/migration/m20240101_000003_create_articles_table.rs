use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Articles {
    Table,
    ArticleId,
    Title,
    Topic,
    Author,
    Body,
    CreatedAt,
    Votes,
    ArticleImgUrl,
}

#[derive(DeriveIden)]
enum Topics {
    Table,
    Slug,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Username,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Articles::ArticleId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Articles::Title).string().not_null())
                    .col(ColumnDef::new(Articles::Topic).string_len(100).not_null())
                    .col(ColumnDef::new(Articles::Author).string_len(100).not_null())
                    .col(ColumnDef::new(Articles::Body).text().not_null())
                    .col(
                        ColumnDef::new(Articles::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Articles::Votes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Articles::ArticleImgUrl)
                            .string_len(1000)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_topic")
                            .from(Articles::Table, Articles::Topic)
                            .to(Topics::Table, Topics::Slug),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_articles_author")
                            .from(Articles::Table, Articles::Author)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_topic")
                    .table(Articles::Table)
                    .col(Articles::Topic)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_articles_author")
                    .table(Articles::Table)
                    .col(Articles::Author)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await
    }
}
