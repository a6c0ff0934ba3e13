use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::article::adapter::outgoing::sea_orm_entity::articles::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::article::application::ports::outgoing::ArticleRepository;
use crate::modules::article::domain::{Article, ArticleFilter, ArticlePatch, NewArticle};
use crate::modules::content::adapter::outgoing::{map_db_err, map_write_err};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};
use crate::shared::patch_field::PatchField;

// ============================================================================
// Repository Implementation
// ============================================================================

#[derive(Clone)]
pub struct ArticleRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ArticleRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// `lower(slug) = lower($1)`, the same expression the unique index uses.
fn slug_matches_ci(slug: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(Column::Slug))).eq(slug.to_lowercase())
}

#[async_trait]
impl ContentRepository<Article> for ArticleRepositoryPostgres {
    async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>, ContentRepositoryError> {
        let mut query = Entity::find();

        if !filter.include_hidden {
            query = query.filter(Column::Visible.eq(true));
        }

        if let Some(category) = filter.category {
            query = query.filter(Column::Category.eq(category.as_str()));
        }

        query
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_article)
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Article, ContentRepositoryError> {
        let model = Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(ContentRepositoryError::NotFound)?;

        model_to_article(model)
    }

    async fn create(
        &self,
        id: Uuid,
        draft: NewArticle,
    ) -> Result<Article, ContentRepositoryError> {
        let now = Utc::now().fixed_offset();

        let model = ActiveModel {
            id: Set(id),
            title: Set(draft.title),
            excerpt: Set(draft.excerpt),
            content: Set(draft.content),
            image_url: Set(draft.image_url),
            read_time: Set(draft.read_time),
            category: Set(draft.category.as_str().to_string()),
            slug: Set(draft.slug),
            visible: Set(draft.visible),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&*self.db).await.map_err(map_write_err)?;

        model_to_article(result)
    }

    async fn patch(&self, id: Uuid, patch: ArticlePatch) -> Result<Article, ContentRepositoryError> {
        let mut model = <ActiveModel as Default>::default();

        if let PatchField::Value(title) = patch.title {
            model.title = Set(title.trim().to_string());
        }
        if let PatchField::Value(excerpt) = patch.excerpt {
            model.excerpt = Set(excerpt);
        }
        if let PatchField::Value(content) = patch.content {
            model.content = Set(content);
        }
        match patch.image_url {
            PatchField::Unset => {}
            PatchField::Null => model.image_url = Set(None),
            PatchField::Value(url) => model.image_url = Set(Some(url)),
        }
        if let PatchField::Value(read_time) = patch.read_time {
            model.read_time = Set(read_time);
        }
        if let PatchField::Value(category) = patch.category {
            model.category = Set(category.as_str().to_string());
        }
        match patch.slug {
            PatchField::Unset => {}
            PatchField::Null => model.slug = Set(None),
            PatchField::Value(slug) => model.slug = Set(Some(slug)),
        }
        if let PatchField::Value(visible) = patch.visible {
            model.visible = Set(visible);
        }

        let has_changes = model.title.is_set()
            || model.excerpt.is_set()
            || model.content.is_set()
            || model.image_url.is_set()
            || model.read_time.is_set()
            || model.category.is_set()
            || model.slug.is_set()
            || model.visible.is_set();

        if !has_changes {
            return self.get_by_id(id).await;
        }

        model.updated_at = Set(Utc::now().fixed_offset());

        let result = Entity::update_many()
            .set(model)
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_write_err)?
            .into_iter()
            .next()
            .ok_or(ContentRepositoryError::NotFound)?;

        model_to_article(result)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ContentRepositoryError> {
        Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for ArticleRepositoryPostgres {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, ContentRepositoryError> {
        Entity::find()
            .filter(Column::Slug.eq(slug))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(model_to_article)
            .transpose()
    }

    async fn find_by_slug_ci(
        &self,
        slug: &str,
    ) -> Result<Option<Article>, ContentRepositoryError> {
        Entity::find()
            .filter(slug_matches_ci(slug))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(model_to_article)
            .transpose()
    }

    async fn list_without_slug(&self) -> Result<Vec<Article>, ContentRepositoryError> {
        Entity::find()
            .filter(
                Condition::any()
                    .add(Column::Slug.is_null())
                    .add(Column::Slug.eq("")),
            )
            .order_by_asc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_article)
            .collect()
    }

    async fn set_slug(&self, id: Uuid, slug: &str) -> Result<(), ContentRepositoryError> {
        let result = Entity::update_many()
            .col_expr(Column::Slug, Expr::value(slug))
            .filter(Column::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(map_write_err)?;

        if result.rows_affected == 0 {
            return Err(ContentRepositoryError::NotFound);
        }

        Ok(())
    }

    async fn set_visibility(
        &self,
        id: Uuid,
        visible: bool,
    ) -> Result<Article, ContentRepositoryError> {
        let model = ActiveModel {
            visible: Set(visible),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };

        let result = Entity::update_many()
            .set(model)
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next()
            .ok_or(ContentRepositoryError::NotFound)?;

        model_to_article(result)
    }

    async fn slug_exists(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, ContentRepositoryError> {
        let mut query = Entity::find().filter(slug_matches_ci(slug));

        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }

        let count = query.count(&*self.db).await.map_err(map_db_err)?;

        Ok(count > 0)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn model_to_article(model: articles::Model) -> Result<Article, ContentRepositoryError> {
    let category = model
        .category
        .parse()
        .map_err(ContentRepositoryError::SerializationError)?;

    Ok(Article {
        id: model.id,
        title: model.title,
        excerpt: model.excerpt,
        content: model.content,
        image_url: model.image_url,
        read_time: model.read_time,
        category,
        slug: model.slug,
        visible: model.visible,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use crate::modules::article::domain::ArticleCategory;

    fn article_model(id: Uuid, title: &str, slug: Option<&str>) -> articles::Model {
        let now = Utc::now().fixed_offset();

        articles::Model {
            id,
            title: title.to_string(),
            excerpt: "excerpt".to_string(),
            content: "## Intro\nbody".to_string(),
            image_url: None,
            read_time: "4 min".to_string(),
            category: "engineering".to_string(),
            slug: slug.map(str::to_string),
            visible: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn repo(db: DatabaseConnection) -> ArticleRepositoryPostgres {
        ArticleRepositoryPostgres::new(Arc::new(db))
    }

    // ========================================================================
    // list
    // ========================================================================

    #[tokio::test]
    async fn public_list_filters_visible_and_category() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![article_model(Uuid::new_v4(), "A", Some("a"))]])
            .into_connection();

        let articles = repo(db)
            .list(ArticleFilter::public(Some(ArticleCategory::Engineering)))
            .await
            .unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].category, ArticleCategory::Engineering);
    }

    #[tokio::test]
    async fn public_list_query_excludes_hidden_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<articles::Model>::new()])
            .into_connection();

        let repository = repo(db);
        repository.list(ArticleFilter::public(None)).await.unwrap();

        let db = Arc::try_unwrap(repository.db).unwrap();
        let log = db.into_transaction_log();
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("\"visible\" = $1"), "unexpected query: {sql}");
        assert!(sql.contains("ORDER BY \"articles\".\"created_at\" DESC"));
    }

    #[tokio::test]
    async fn unknown_stored_category_is_serialization_error() {
        let mut row = article_model(Uuid::new_v4(), "A", Some("a"));
        row.category = "gossip".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let err = repo(db).list(ArticleFilter::admin(None)).await.unwrap_err();

        assert!(matches!(err, ContentRepositoryError::SerializationError(_)));
    }

    // ========================================================================
    // slug lookups
    // ========================================================================

    #[tokio::test]
    async fn find_by_slug_miss_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<articles::Model>::new()])
            .into_connection();

        let found = repo(db).find_by_slug("missing").await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn find_by_slug_ci_compares_lowercased() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![article_model(id, "Hello", Some("hello-world"))]])
            .into_connection();

        let repository = repo(db);
        let found = repository.find_by_slug_ci("Hello-World").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(id));

        let db = Arc::try_unwrap(repository.db).unwrap();
        let log = db.into_transaction_log();
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("LOWER(\"slug\") = $1"), "unexpected query: {sql}");
        assert!(sql.contains("hello-world"));
    }

    #[tokio::test]
    async fn list_without_slug_selects_null_or_empty_slugs() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![article_model(id, "Legacy Post", None)]])
            .into_connection();

        let repository = repo(db);
        let rows = repository.list_without_slug().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].slug, None);

        let db = Arc::try_unwrap(repository.db).unwrap();
        let log = db.into_transaction_log();
        let sql = format!("{:?}", log[0]);
        assert!(sql.contains("\"slug\" IS NULL"), "unexpected query: {sql}");
        assert!(sql.contains("ORDER BY \"articles\".\"created_at\" ASC"));
    }

    #[tokio::test]
    async fn slug_exists_counts_matches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![std::collections::BTreeMap::from([(
                "num_items",
                sea_orm::Value::BigInt(Some(1)),
            )])]])
            .into_connection();

        let taken = repo(db)
            .slug_exists("hello-world", Some(Uuid::new_v4()))
            .await
            .unwrap();

        assert!(taken);
    }

    // ========================================================================
    // writes
    // ========================================================================

    #[tokio::test]
    async fn set_slug_on_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = repo(db).set_slug(Uuid::new_v4(), "slug").await.unwrap_err();

        assert_eq!(err, ContentRepositoryError::NotFound);
    }

    #[tokio::test]
    async fn set_visibility_returns_updated_row() {
        let id = Uuid::new_v4();
        let mut row = article_model(id, "Hidden", Some("hidden"));
        row.visible = false;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let article = repo(db).set_visibility(id, false).await.unwrap();

        assert!(!article.visible);
    }

    #[tokio::test]
    async fn patch_clearing_slug_returns_row_without_slug() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![article_model(id, "Title", None)]])
            .into_connection();

        let article = repo(db)
            .patch(
                id,
                ArticlePatch {
                    slug: PatchField::Null,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(article.slug, None);
    }

    #[tokio::test]
    async fn create_maps_unique_violation_to_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![sea_orm::DbErr::Query(sea_orm::RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"idx_articles_slug_lower\""
                    .to_string(),
            ))])
            .into_connection();

        let err = repo(db)
            .create(Uuid::new_v4(), NewArticle {
                title: "Hello".to_string(),
                excerpt: String::new(),
                content: "body".to_string(),
                image_url: None,
                read_time: "1 min".to_string(),
                category: ArticleCategory::Personal,
                slug: Some("hello".to_string()),
                visible: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentRepositoryError::Conflict(_)));
    }
}
