use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Education::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Education::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Education::Institution).text().not_null())
                    .col(ColumnDef::new(Education::Degree).text().not_null())
                    .col(ColumnDef::new(Education::Field).text().not_null())
                    // Display labels, not dates
                    .col(ColumnDef::new(Education::StartDate).text().not_null())
                    .col(ColumnDef::new(Education::EndDate).text().not_null())
                    .col(
                        ColumnDef::new(Education::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Education::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Education::UpdatedAt)
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
                CREATE INDEX IF NOT EXISTS idx_education_created_at
                ON education (created_at DESC);

                CREATE TRIGGER update_education_updated_at
                BEFORE UPDATE ON education
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
                DROP TRIGGER IF EXISTS update_education_updated_at ON education;
                DROP INDEX IF EXISTS idx_education_created_at;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Education::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Education {
    Table,
    Id,
    Institution,
    Degree,
    Field,
    StartDate,
    EndDate,
    Description,
    CreatedAt,
    UpdatedAt,
}
