mod article;
mod user;

pub use article::{Article, ArticleWithAuthor, NewArticle, UpdateArticle};
pub use user::{NewUser, UpdateUser, User};
