//! View models for the clients list page.

use serde::Serialize;

use crate::domain::client::Client;
use crate::pagination::Paginated;

/// Everything the clients template renders: the current page of rows and
/// the modal state. `edit_target` is the single optional record being
/// edited; when set, the modal opens prefilled with it.
#[derive(Serialize)]
pub struct ClientsPageData {
    pub clients: Paginated<Client>,
    pub edit_target: Option<Client>,
    pub modal_open: bool,
}
