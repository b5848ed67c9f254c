use crate::api::{APIError, Validator, API};
use crate::db_conn::Db;
use crate::models::*;
use chrono::{NaiveDateTime, Utc};
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct CommentInput {
    content: Option<String>,
    author: Option<String>,
}

impl CommentInput {
    fn validate(self) -> Result<(String, String), APIError> {
        let mut v = Validator::new();
        let content = v.required("content", self.content, None);
        let author = v.required("author", self.author, Some(AUTHOR_MAX_LEN));
        match (content, author) {
            (Some(content), Some(author)) => Ok((content, author)),
            _ => Err(v.into_error()),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CommentOutput {
    id: i32,
    content: String,
    author: String,
    created_at: NaiveDateTime,
}

pub fn c2output(c: &Comment) -> CommentOutput {
    CommentOutput {
        id: c.id,
        content: c.content.to_string(),
        author: c.author.to_string(),
        created_at: c.created_at,
    }
}

#[post("/posts/<post_id>/comments", data = "<input>")]
pub async fn create_comment(
    post_id: i32,
    input: Json<CommentInput>,
    db: Db,
) -> API<status::Created<Json<CommentOutput>>> {
    let input = input.into_inner();
    let comment = db
        .run(move |c| -> API<Comment> {
            // parent lookup first: a missing post is a 404 even when the
            // body would not validate either
            let p = Post::get(c, post_id)?;
            let (content, author) = input.validate()?;
            let now = Utc::now().naive_utc();
            Comment::create(
                c,
                NewComment {
                    post_id: p.id,
                    content: &content,
                    author: &author,
                    created_at: now,
                    updated_at: now,
                },
            )
            .map_err(APIError::from)
        })
        .await?;
    Ok(
        status::Created::new(format!("/api/posts/{}/comments/{}", post_id, comment.id))
            .body(Json(c2output(&comment))),
    )
}

#[get("/posts/<post_id>/comments")]
pub async fn list_comments(post_id: i32, db: Db) -> API<Json<Vec<CommentOutput>>> {
    let cs = db
        .run(move |c| -> MR<Vec<Comment>> {
            let p = Post::get(c, post_id)?;
            Comment::gets_by_post_id(c, p.id)
        })
        .await?;
    Ok(Json(cs.iter().map(c2output).collect()))
}

#[get("/posts/<post_id>/comments/<id>")]
pub async fn get_comment(post_id: i32, id: i32, db: Db) -> API<Json<CommentOutput>> {
    let comment = db.run(move |c| find_in_post(c, post_id, id)).await?;
    Ok(Json(c2output(&comment)))
}

#[delete("/posts/<post_id>/comments/<id>")]
pub async fn delete_comment(post_id: i32, id: i32, db: Db) -> API<status::NoContent> {
    db.run(move |c| -> API<()> {
        let comment = find_in_post(c, post_id, id)?;
        comment.delete(c).map_err(APIError::from)
    })
    .await?;
    Ok(status::NoContent)
}

// a comment id that exists under a different post must look absent here
fn find_in_post(conn: &crate::db_conn::Conn, post_id: i32, id: i32) -> API<Comment> {
    let comment = Comment::get(conn, id)?;
    if comment.post_id != post_id {
        return Err(APIError::NotFound);
    }
    Ok(comment)
}
