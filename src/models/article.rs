use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::models::User;

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone)]
#[diesel(table_name = crate::schema::articles)]
#[diesel(belongs_to(User, foreign_key = author_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub body: String,
    pub published: bool,
    pub author_id: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An article together with its author, when it has one
pub type ArticleWithAuthor = (Article, Option<User>);

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::articles)]
pub struct NewArticle {
    pub title: String,
    pub description: Option<String>,
    pub body: String,
    pub published: bool,
    pub author_id: Option<i32>,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::articles)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub published: Option<bool>,
    pub author_id: Option<i32>,
}
