use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::forms::allocations::{AddAllocationForm, SaveAllocationForm};
use crate::repository::ApiRepository;
use crate::routes::{PageQuery, base_context, flash_service_error, redirect, render_template};
use crate::services::ServiceError;
use crate::services::allocations::{self, AllocationsQuery};

#[derive(Deserialize)]
struct AllocationsQueryParams {
    page: Option<usize>,
    /// Asset identifier of the allocation being edited.
    edit: Option<i32>,
    modal: Option<String>,
}

#[get("/clients/{client_id}")]
pub async fn show_allocations(
    client_id: web::Path<i32>,
    params: web::Query<AllocationsQueryParams>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    let query = AllocationsQuery {
        client_id,
        page: params.page,
        edit: params.edit,
        modal_new: params.modal.as_deref() == Some("new"),
    };

    let mut context = base_context(&flash_messages, "clients");
    context.insert("client_id", &client_id);

    match allocations::load_allocations_page(repo.get_ref(), query).await {
        Ok(data) => {
            context.insert("allocations", &data.allocations);
            context.insert("assets", &data.assets);
            context.insert("edit_target", &data.edit_target);
            context.insert("modal_open", &data.modal_open);
            context.insert("load_error", &false);
        }
        Err(e) => {
            log::error!("Failed to load allocations for client {client_id}: {e}");
            context.insert("load_error", &true);
        }
    }

    render_template(&tera, "clients/detail.html", &context)
}

#[post("/clients/{client_id}/allocations/add")]
pub async fn add_allocation(
    client_id: web::Path<i32>,
    query: web::Query<PageQuery>,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<AddAllocationForm>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    let page = query.page();
    match allocations::add_allocation(repo.get_ref(), client_id, &form).await {
        Ok(_) => {
            FlashMessage::success("Alocação adicionada.").send();
            redirect(&format!("/clients/{client_id}?page={page}"))
        }
        Err(e) => {
            flash_service_error(&e, "Erro ao adicionar alocação");
            if matches!(e, ServiceError::Validation(_)) {
                redirect(&format!("/clients/{client_id}?page={page}&modal=new"))
            } else {
                redirect(&format!("/clients/{client_id}?page={page}"))
            }
        }
    }
}

#[post("/clients/{client_id}/allocations/{asset_id}/save")]
pub async fn save_allocation(
    path: web::Path<(i32, i32)>,
    query: web::Query<PageQuery>,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<SaveAllocationForm>,
) -> impl Responder {
    let (client_id, asset_id) = path.into_inner();
    let page = query.page();
    match allocations::save_allocation(repo.get_ref(), client_id, asset_id, &form).await {
        Ok(_) => {
            FlashMessage::success("Alocação atualizada.").send();
            redirect(&format!("/clients/{client_id}?page={page}"))
        }
        Err(e) => {
            flash_service_error(&e, "Erro ao atualizar alocação");
            // Keep the page so the edited row is still in the rendered rows
            // and the modal re-opens on it.
            if matches!(e, ServiceError::Validation(_)) {
                redirect(&format!("/clients/{client_id}?page={page}&edit={asset_id}"))
            } else {
                redirect(&format!("/clients/{client_id}?page={page}"))
            }
        }
    }
}

#[post("/clients/{client_id}/allocations/{asset_id}/delete")]
pub async fn delete_allocation(
    path: web::Path<(i32, i32)>,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    let (client_id, asset_id) = path.into_inner();
    match allocations::delete_allocation(repo.get_ref(), client_id, asset_id).await {
        Ok(()) => FlashMessage::success("Alocação removida.").send(),
        Err(e) => flash_service_error(&e, "Erro ao remover alocação"),
    }
    redirect(&format!("/clients/{client_id}"))
}
