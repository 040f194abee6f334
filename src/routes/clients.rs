use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::clients::{AddClientForm, SaveClientForm};
use crate::repository::ApiRepository;
use crate::routes::{PageQuery, base_context, flash_service_error, redirect, render_template};
use crate::services::ServiceError;
use crate::services::clients::{self, ClientsQuery};

#[derive(Deserialize)]
struct ClientsQueryParams {
    page: Option<usize>,
    edit: Option<i32>,
    modal: Option<String>,
}

impl From<&ClientsQueryParams> for ClientsQuery {
    fn from(params: &ClientsQueryParams) -> Self {
        ClientsQuery {
            page: params.page,
            edit: params.edit,
            modal_new: params.modal.as_deref() == Some("new"),
        }
    }
}

#[get("/")]
pub async fn index() -> impl Responder {
    redirect("/clients")
}

#[get("/clients")]
pub async fn show_clients(
    params: web::Query<ClientsQueryParams>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "clients");

    match clients::load_clients_page(repo.get_ref(), ClientsQuery::from(&*params)).await {
        Ok(data) => {
            context.insert("clients", &data.clients);
            context.insert("edit_target", &data.edit_target);
            context.insert("modal_open", &data.modal_open);
            context.insert("load_error", &false);
        }
        Err(e) => {
            log::error!("Failed to load clients: {e}");
            context.insert("load_error", &true);
        }
    }

    render_template(&tera, "clients/index.html", &context)
}

#[post("/clients/add")]
pub async fn add_client(
    query: web::Query<PageQuery>,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    let page = query.page();
    match clients::add_client(repo.get_ref(), &form).await {
        Ok(_) => {
            FlashMessage::success("Cliente adicionado.").send();
            redirect(&format!("/clients?page={page}"))
        }
        Err(e) => {
            flash_service_error(&e, "Erro ao adicionar cliente");
            // Validation failures re-open the modal so the user can retry.
            if matches!(e, ServiceError::Validation(_)) {
                redirect(&format!("/clients?page={page}&modal=new"))
            } else {
                redirect(&format!("/clients?page={page}"))
            }
        }
    }
}

#[post("/clients/save")]
pub async fn save_client(
    query: web::Query<PageQuery>,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<SaveClientForm>,
) -> impl Responder {
    let page = query.page();
    let client_id = form.id;
    match clients::save_client(repo.get_ref(), &form).await {
        Ok(_) => {
            FlashMessage::success("Cliente atualizado.").send();
            redirect(&format!("/clients?page={page}"))
        }
        Err(e) => {
            flash_service_error(&e, "Erro ao atualizar cliente");
            // Keep the page so the edited row is still in the rendered rows
            // and the modal re-opens on it.
            if matches!(e, ServiceError::Validation(_)) {
                redirect(&format!("/clients?page={page}&edit={client_id}"))
            } else {
                redirect(&format!("/clients?page={page}"))
            }
        }
    }
}

#[post("/clients/{client_id}/delete")]
pub async fn delete_client(
    client_id: web::Path<i32>,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match clients::delete_client(repo.get_ref(), client_id.into_inner()).await {
        Ok(()) => FlashMessage::success("Cliente removido.").send(),
        Err(e) => flash_service_error(&e, "Erro ao remover cliente"),
    }
    redirect("/clients")
}
