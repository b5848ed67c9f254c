use crate::api::{APIError, Page, Validator, API, PAGE_SIZE};
use crate::db_conn::Db;
use crate::models::*;
use chrono::{NaiveDateTime, Utc};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct PostInput {
    title: Option<String>,
    content: Option<String>,
    author: Option<String>,
}

impl PostInput {
    /// All writable fields present and valid, or a field-error map.
    fn validate(self) -> Result<(String, String, String), APIError> {
        let mut v = Validator::new();
        let title = v.required("title", self.title, Some(TITLE_MAX_LEN));
        let content = v.required("content", self.content, None);
        let author = v.required("author", self.author, Some(AUTHOR_MAX_LEN));
        match (title, content, author) {
            (Some(title), Some(content), Some(author)) => Ok((title, content, author)),
            _ => Err(v.into_error()),
        }
    }

    /// Only the fields present are validated; absent fields stay untouched.
    fn validate_partial(
        self,
    ) -> Result<(Option<String>, Option<String>, Option<String>), APIError> {
        let mut v = Validator::new();
        let title = v.optional("title", self.title, Some(TITLE_MAX_LEN));
        let content = v.optional("content", self.content, None);
        let author = v.optional("author", self.author, Some(AUTHOR_MAX_LEN));
        v.finish()?;
        Ok((title, content, author))
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct PostDetail {
    id: i32,
    title: String,
    content: String,
    author: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct PostSummary {
    id: i32,
    title: String,
    content: String,
    author: String,
}

fn p2detail(p: &Post) -> PostDetail {
    PostDetail {
        id: p.id,
        title: p.title.to_string(),
        content: p.content.to_string(),
        author: p.author.to_string(),
        created_at: p.created_at,
        updated_at: p.updated_at,
    }
}

fn p2summary(p: &Post) -> PostSummary {
    PostSummary {
        id: p.id,
        title: p.title.to_string(),
        content: p.content.to_string(),
        author: p.author.to_string(),
    }
}

#[post("/posts", data = "<input>")]
pub async fn create_post(
    input: Json<PostInput>,
    db: Db,
) -> API<status::Created<Json<PostDetail>>> {
    let (title, content, author) = input.into_inner().validate()?;
    let p = db
        .run(move |c| {
            let now = Utc::now().naive_utc();
            Post::create(
                c,
                NewPost {
                    title: &title,
                    content: &content,
                    author: &author,
                    created_at: now,
                    updated_at: now,
                },
            )
        })
        .await?;
    Ok(status::Created::new(format!("/api/posts/{}", p.id)).body(Json(p2detail(&p))))
}

#[get("/posts?<page>")]
pub async fn list_posts(page: Option<u32>, db: Db) -> API<Json<Page<PostSummary>>> {
    let page = page.unwrap_or(1).max(1);
    let (count, ps) = db
        .run(move |c| -> MR<(i64, Vec<Post>)> {
            Ok((Post::count(c)?, Post::gets_by_page(c, page, PAGE_SIZE)?))
        })
        .await?;
    // a page past the end is a 404; page 1 stays valid for an empty table
    if page > 1 && i64::from(page - 1) * i64::from(PAGE_SIZE) >= count {
        return Err(APIError::NotFound);
    }
    Ok(Json(Page::new(
        "/api/posts",
        page,
        PAGE_SIZE,
        count,
        ps.iter().map(p2summary).collect(),
    )))
}

#[get("/posts/<id>")]
pub async fn get_post(id: i32, db: Db) -> API<Json<PostDetail>> {
    let p = db.run(move |c| Post::get(c, id)).await?;
    Ok(Json(p2detail(&p)))
}

#[put("/posts/<id>", data = "<input>")]
pub async fn update_post(id: i32, input: Json<PostInput>, db: Db) -> API<Json<PostDetail>> {
    let input = input.into_inner();
    let p = db
        .run(move |c| -> API<Post> {
            // lookup first: a missing post is a 404 even when the body
            // would not validate either
            let p = Post::get(c, id)?;
            let (title, content, author) = input.validate()?;
            p.update(
                c,
                &PostChanges {
                    title: Some(title),
                    content: Some(content),
                    author: Some(author),
                    updated_at: Utc::now().naive_utc(),
                },
            )
            .map_err(APIError::from)
        })
        .await?;
    Ok(Json(p2detail(&p)))
}

#[patch("/posts/<id>", data = "<input>")]
pub async fn patch_post(id: i32, input: Json<PostInput>, db: Db) -> API<Json<PostDetail>> {
    let input = input.into_inner();
    let p = db
        .run(move |c| -> API<Post> {
            let p = Post::get(c, id)?;
            let (title, content, author) = input.validate_partial()?;
            p.update(
                c,
                &PostChanges {
                    title,
                    content,
                    author,
                    updated_at: Utc::now().naive_utc(),
                },
            )
            .map_err(APIError::from)
        })
        .await?;
    Ok(Json(p2detail(&p)))
}

#[delete("/posts/<id>")]
pub async fn delete_post(id: i32, db: Db) -> API<status::NoContent> {
    db.run(move |c| -> MR<()> {
        let p = Post::get(c, id)?;
        p.delete(c)
    })
    .await?;
    Ok(status::NoContent)
}
