use validator::Validate;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::dto::clients::ClientsPageData;
use crate::forms::clients::{AddClientForm, SaveClientForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter};
use crate::services::ServiceResult;

/// Parsed query string of the clients page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientsQuery {
    pub page: Option<usize>,
    /// Identifier of the client being edited, if any.
    pub edit: Option<i32>,
    /// Whether the create modal was requested.
    pub modal_new: bool,
}

/// Loads one page of clients plus the modal state for the list template.
///
/// There is no single-client endpoint, so the edit target is resolved from
/// the rows of the fetched page; an identifier not on the current page is
/// ignored.
pub async fn load_clients_page<R>(repo: &R, query: ClientsQuery) -> ServiceResult<ClientsPageData>
where
    R: ClientReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let result = repo
        .list_clients(ClientListQuery::new(page, DEFAULT_ITEMS_PER_PAGE))
        .await?;

    let edit_target = query
        .edit
        .and_then(|id| result.data.iter().find(|client| client.id == id).cloned());
    let modal_open = query.modal_new || edit_target.is_some();

    let total_pages = result.meta.total_pages();
    let clients = Paginated::new(result.data, result.meta.page, total_pages);

    Ok(ClientsPageData {
        clients,
        edit_target,
        modal_open,
    })
}

/// Validates the add-client form and creates the record. No request is
/// issued when validation fails.
pub async fn add_client<R>(repo: &R, form: &AddClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    form.validate()?;
    Ok(repo.create_client(&NewClient::from(form)).await?)
}

/// Validates the save-client form and applies the update.
pub async fn save_client<R>(repo: &R, form: &SaveClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    form.validate()?;
    Ok(repo.update_client(form.id, &UpdateClient::from(form)).await?)
}

pub async fn delete_client<R>(repo: &R, client_id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    Ok(repo.delete_client(client_id).await?)
}
