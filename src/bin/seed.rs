//! Populates the development database with sample posts and comments.
//!
//! How to run: `cargo run --bin seed`

use chrono::Utc;
use diesel::{Connection, SqliteConnection};

use blog_api::models::{Comment, NewComment, NewPost, Post};

const SAMPLE_POSTS: &[(&str, &str, &str)] = &[
    (
        "Getting Started with Rust",
        "Rust is a systems programming language focused on safety and speed. \
         The borrow checker takes some getting used to, but it pays for itself \
         the first time a refactor compiles and just works.",
        "Alice Johnson",
    ),
    (
        "REST API Design Basics",
        "A well-behaved REST API keeps its resources predictable: plural nouns \
         for collections, proper status codes, and pagination on anything that \
         can grow without bound.",
        "Bob Smith",
    ),
    (
        "Why SQLite Is Enough",
        "For a single-writer application, SQLite removes a whole class of \
         operational work. One file, no server, and transactions that just \
         behave.",
        "Carol Lee",
    ),
];

const SAMPLE_COMMENTS: &[(&str, &str)] = &[
    ("Great write-up, thanks for sharing!", "Dave"),
    ("This helped me get unstuck, much appreciated.", "Erin"),
];

fn main() {
    if let Err(e) = run() {
        eprintln!("seed failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let url = blog_api::database_url();
    let conn = SqliteConnection::establish(&url)?;
    blog_api::run_db_migrations(&conn)?;

    let mut n_comments = 0;
    for (title, content, author) in SAMPLE_POSTS {
        let now = Utc::now().naive_utc();
        let post = Post::create(
            &conn,
            NewPost {
                title,
                content,
                author,
                created_at: now,
                updated_at: now,
            },
        )?;
        println!("Created post: {}", post.title);

        for (content, author) in SAMPLE_COMMENTS {
            let now = Utc::now().naive_utc();
            Comment::create(
                &conn,
                NewComment {
                    post_id: post.id,
                    content,
                    author,
                    created_at: now,
                    updated_at: now,
                },
            )?;
            n_comments += 1;
        }
    }

    println!(
        "Done: {} posts, {} comments in {}",
        SAMPLE_POSTS.len(),
        n_comments,
        url
    );
    Ok(())
}
