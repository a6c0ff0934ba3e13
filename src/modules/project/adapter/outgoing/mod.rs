mod project_repository_postgres;
pub mod sea_orm_entity;

pub use project_repository_postgres::ProjectRepositoryPostgres;
