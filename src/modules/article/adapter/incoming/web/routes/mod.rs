mod admin;
mod error_mapping;
mod public;

pub use admin::{
    __path_create_article_handler, __path_delete_article_handler,
    __path_get_admin_article_handler, __path_get_admin_articles_handler,
    __path_patch_article_handler, __path_set_article_visibility_handler, create_article_handler,
    delete_article_handler, get_admin_article_handler, get_admin_articles_handler,
    patch_article_handler, set_article_visibility_handler, CreateArticleRequest,
    PatchArticleRequest, VisibilityRequest,
};
pub use public::{
    __path_get_article_handler, __path_get_articles_handler, get_article_handler,
    get_articles_handler, ArticleDetail, ArticleListQuery,
};
