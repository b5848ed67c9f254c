#[macro_use]
extern crate rocket;

#[macro_use]
extern crate diesel;

#[macro_use]
extern crate diesel_migrations;

pub mod api;
pub mod db_conn;
pub mod models;
pub mod schema;


use log::error;
use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::{Build, Rocket};

use db_conn::Db;

embed_migrations!();

pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "blog.sqlite".to_string())
}

pub fn run_db_migrations(conn: &db_conn::Conn) -> Result<(), diesel_migrations::RunMigrationsError> {
    embedded_migrations::run(conn)
}

pub fn rocket() -> Rocket<Build> {
    load_env();
    let figment = rocket::Config::figment().merge(("databases.blog_db.url", database_url()));
    rocket_from(figment)
}

pub fn rocket_from(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .mount(
            "/api",
            routes![
                api::post::create_post,
                api::post::list_posts,
                api::post::get_post,
                api::post::update_post,
                api::post::patch_post,
                api::post::delete_post,
                api::comment::create_comment,
                api::comment::list_comments,
                api::comment::get_comment,
                api::comment::delete_comment,
            ],
        )
        .register(
            "/api",
            catchers![
                api::catch_400_error,
                api::catch_404_error,
                api::catch_422_error,
            ],
        )
        .attach(Db::fairing())
        .attach(AdHoc::try_on_ignite("Database Migrations", run_migrations))
}

async fn run_migrations(rocket: Rocket<Build>) -> Result<Rocket<Build>, Rocket<Build>> {
    let db = match Db::get_one(&rocket).await {
        Some(db) => db,
        None => {
            error!("no database connection available for migrations");
            return Err(rocket);
        }
    };
    match db.run(|c| embedded_migrations::run(&*c)).await {
        Ok(()) => Ok(rocket),
        Err(e) => {
            error!("failed to run database migrations: {}", e);
            Err(rocket)
        }
    }
}

fn load_env() {
    match dotenv::dotenv() {
        Ok(path) => eprintln!("Configuration read from {}", path.display()),
        Err(ref e) if e.not_found() => eprintln!("Warning: no .env was found"),
        e => e.map(|_| ()).unwrap(),
    }
}
