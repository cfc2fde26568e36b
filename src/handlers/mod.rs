pub mod quiz_handler;

use actix_web::web;

pub use quiz_handler::{generate_quiz, health_check};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check).service(generate_quiz);
}
