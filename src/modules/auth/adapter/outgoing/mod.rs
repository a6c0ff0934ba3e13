mod admin_query_postgres;
mod admin_repository_postgres;
pub mod jwt;
mod login_attempt_store_memory;
mod login_attempt_store_redis;
pub mod sea_orm_entity;
pub mod security;

pub use admin_query_postgres::AdminQueryPostgres;
pub use admin_repository_postgres::AdminRepositoryPostgres;
pub use login_attempt_store_memory::InMemoryLoginAttemptStore;
pub use login_attempt_store_redis::RedisLoginAttemptStore;
