mod article_repository_postgres;
pub mod sea_orm_entity;

pub use article_repository_postgres::ArticleRepositoryPostgres;
