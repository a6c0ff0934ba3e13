mod article;
mod toc;

pub use article::{Article, ArticleCategory, ArticleFilter, ArticlePatch, NewArticle};
pub use toc::{extract_toc, TocHeading};
