use std::collections::BTreeMap;

use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::{json, Value};
use rocket::serde::Serialize;

#[catch(404)]
pub fn catch_404_error() -> Value {
    json!({
        "detail": "Not found."
    })
}

#[catch(400)]
pub fn catch_400_error() -> Value {
    json!({
        "detail": "JSON parse error."
    })
}

#[catch(422)]
pub fn catch_422_error() -> Value {
    json!({
        "detail": "JSON parse error."
    })
}

pub enum APIError {
    NotFound,
    Validation(Vec<(&'static str, String)>),
    DbError(diesel::result::Error),
}

impl From<diesel::result::Error> for APIError {
    fn from(err: diesel::result::Error) -> APIError {
        match err {
            diesel::result::Error::NotFound => APIError::NotFound,
            e => APIError::DbError(e),
        }
    }
}

impl<'r> Responder<'r, 'static> for APIError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (status, body) = match self {
            APIError::NotFound => (
                Status::NotFound,
                json!({
                    "detail": "Not found."
                }),
            ),
            APIError::Validation(errors) => {
                let mut fields: BTreeMap<&str, Vec<String>> = BTreeMap::new();
                for (field, msg) in errors {
                    fields.entry(field).or_default().push(msg);
                }
                (Status::BadRequest, json!(fields))
            }
            APIError::DbError(e) => (
                Status::InternalServerError,
                json!({
                    "detail": e.to_string()
                }),
            ),
        };
        response::Response::build_from(body.respond_to(req)?)
            .status(status)
            .ok()
    }
}

pub type API<T> = Result<T, APIError>;

/// Collects field-level validation failures in request order.
pub struct Validator {
    errors: Vec<(&'static str, String)>,
}

impl Validator {
    pub fn new() -> Validator {
        Validator { errors: vec![] }
    }

    pub fn required(
        &mut self,
        name: &'static str,
        value: Option<String>,
        max_len: Option<usize>,
    ) -> Option<String> {
        match value {
            None => {
                self.errors.push((name, "This field is required.".to_string()));
                None
            }
            Some(v) => self.bounded(name, v, max_len),
        }
    }

    pub fn optional(
        &mut self,
        name: &'static str,
        value: Option<String>,
        max_len: Option<usize>,
    ) -> Option<String> {
        value.and_then(|v| self.bounded(name, v, max_len))
    }

    fn bounded(&mut self, name: &'static str, v: String, max_len: Option<usize>) -> Option<String> {
        if v.is_empty() {
            self.errors
                .push((name, "This field may not be blank.".to_string()));
            return None;
        }
        if let Some(max) = max_len {
            if v.chars().count() > max {
                self.errors.push((
                    name,
                    format!("Ensure this field has no more than {} characters.", max),
                ));
                return None;
            }
        }
        Some(v)
    }

    pub fn finish(self) -> Result<(), APIError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(APIError::Validation(self.errors))
        }
    }

    pub fn into_error(self) -> APIError {
        APIError::Validation(self.errors)
    }
}

pub const PAGE_SIZE: u32 = 10;

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(base: &str, page: u32, page_size: u32, count: i64, results: Vec<T>) -> Page<T> {
        Page {
            count,
            next: if i64::from(page) * i64::from(page_size) < count {
                Some(format!("{}?page={}", base, page + 1))
            } else {
                None
            },
            previous: if page > 1 {
                Some(format!("{}?page={}", base, page - 1))
            } else {
                None
            },
            results,
        }
    }
}

pub mod comment;
pub mod post;
