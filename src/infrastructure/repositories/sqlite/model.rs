use chrono::NaiveDateTime;
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::links)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbLink {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub tags: String,
    pub created_at: NaiveDateTime,
}

/// New link row for insertion
#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::links)]
pub struct NewDbLink {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub tags: String,
    pub created_at: NaiveDateTime,
}

/// Changes for updating a link; `None` leaves the column untouched
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::links)]
pub struct DbLinkChanges {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<Option<String>>,
    pub tags: Option<String>,
}

impl DbLinkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.description.is_none() && self.tags.is_none()
    }
}

#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::users)]
pub struct NewDbUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}
