use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Articles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Articles::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Articles::Title).text().not_null())
                    .col(
                        ColumnDef::new(Articles::Excerpt)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Articles::Content).text().not_null())
                    .col(ColumnDef::new(Articles::ImageUrl).text())
                    .col(
                        ColumnDef::new(Articles::ReadTime)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Articles::Category).text().not_null())
                    // NULL until the first read backfills it from the title
                    .col(ColumnDef::new(Articles::Slug).text())
                    .col(
                        ColumnDef::new(Articles::Visible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Articles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Articles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE articles
                ADD CONSTRAINT chk_articles_category
                CHECK (category IN ('engineering', 'tutorial', 'career', 'personal'));
                "#,
            )
            .await?;

        // Case-insensitive slug uniqueness; NULL slugs never collide
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_articles_slug_unique
                ON articles (lower(slug));
                "#,
            )
            .await?;

        // Public list: visible only, optionally by category, newest first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_articles_created_at
                ON articles (created_at DESC);

                CREATE INDEX IF NOT EXISTS idx_articles_visible_category
                ON articles (visible, category, created_at DESC);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_articles_updated_at
                BEFORE UPDATE ON articles
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_articles_updated_at ON articles;
                DROP INDEX IF EXISTS idx_articles_visible_category;
                DROP INDEX IF EXISTS idx_articles_created_at;
                DROP INDEX IF EXISTS idx_articles_slug_unique;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Articles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Articles {
    Table,
    Id,
    Title,
    Excerpt,
    Content,
    ImageUrl,
    ReadTime,
    Category,
    Slug,
    Visible,
    CreatedAt,
    UpdatedAt,
}
