use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use serde::Deserialize;

use crate::services::ServiceError;

pub mod allocations;
pub mod clients;

/// Query string carried by modal form posts so the redirect lands back on
/// the page the user was viewing.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }
}

/// Maps a flash message level to the alert CSS class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// 303 redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Renders `template` or logs and returns a 500 on template failure.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template {template}: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context shared by every page: pending flash alerts and the active
/// navigation entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

/// Flashes a service failure: one message per invalid field for validation
/// errors, otherwise a single error line prefixed with `action`.
pub(crate) fn flash_service_error(err: &ServiceError, action: &str) {
    match err {
        ServiceError::Validation(messages) => {
            for message in messages {
                FlashMessage::error(message.clone()).send();
            }
        }
        ServiceError::NotFound => {
            FlashMessage::error(format!("{action}: registro não encontrado.")).send();
        }
        ServiceError::Repository(e) => {
            log::error!("{action}: {e}");
            FlashMessage::error(format!("{action}: {e}")).send();
        }
    }
}
