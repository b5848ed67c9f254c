#[rocket::launch]
fn rocket() -> _ {
    env_logger::init();
    blog_api::rocket()
}
