use chrono::NaiveDateTime;
use diesel::{insert_into, select, ExpressionMethods, QueryDsl, RunQueryDsl};

use crate::db_conn::Conn;
use crate::schema::*;

pub type MR<T> = Result<T, diesel::result::Error>;

pub const TITLE_MAX_LEN: usize = 200;
pub const AUTHOR_MAX_LEN: usize = 100;

no_arg_sql_function!(last_insert_rowid, diesel::sql_types::Integer);

macro_rules! get {
    ($table:ident) => {
        pub fn get(conn: &Conn, id: i32) -> MR<Self> {
            $table::table.find(id).first(conn)
        }
    };
}

macro_rules! create {
    ($table:ident, $new:ident) => {
        pub fn create(conn: &Conn, new: $new) -> MR<Self> {
            insert_into($table::table).values(&new).execute(conn)?;
            let id = select(last_insert_rowid).get_result::<i32>(conn)?;
            Self::get(conn, id)
        }
    };
}

#[derive(Queryable, Identifiable)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "posts"]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub author: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update; `None` fields are left untouched.
#[derive(AsChangeset)]
#[table_name = "posts"]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl Post {
    get!(posts);

    create!(posts, NewPost);

    pub fn count(conn: &Conn) -> MR<i64> {
        posts::table.count().get_result(conn)
    }

    pub fn gets_by_page(conn: &Conn, page: u32, page_size: u32) -> MR<Vec<Self>> {
        posts::table
            .order((posts::created_at.desc(), posts::id.desc()))
            .offset((i64::from(page) - 1) * i64::from(page_size))
            .limit(page_size.into())
            .load(conn)
    }

    pub fn update(&self, conn: &Conn, changes: &PostChanges) -> MR<Self> {
        diesel::update(self).set(changes).execute(conn)?;
        Self::get(conn, self.id)
    }

    // cascade: child rows first
    pub fn delete(&self, conn: &Conn) -> MR<()> {
        diesel::delete(comments::table.filter(comments::post_id.eq(self.id)))
            .execute(conn)?;
        diesel::delete(self).execute(conn)?;
        Ok(())
    }
}

#[derive(Queryable, Identifiable)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub content: String,
    pub author: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "comments"]
pub struct NewComment<'a> {
    pub post_id: i32,
    pub content: &'a str,
    pub author: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Comment {
    get!(comments);

    create!(comments, NewComment);

    pub fn gets_by_post_id(conn: &Conn, post_id: i32) -> MR<Vec<Self>> {
        comments::table
            .filter(comments::post_id.eq(post_id))
            .order((comments::created_at.asc(), comments::id.asc()))
            .load(conn)
    }

    pub fn delete(&self, conn: &Conn) -> MR<()> {
        diesel::delete(self).execute(conn)?;
        Ok(())
    }
}
