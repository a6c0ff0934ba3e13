mod article_use_cases;

pub use article_use_cases::{ArticleError, ArticleScope, ArticleUseCases};
