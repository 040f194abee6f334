use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::ApiRepository;
use crate::repository::http::HttpApi;
use crate::routes::allocations::{
    add_allocation, delete_allocation, save_allocation, show_allocations,
};
use crate::routes::clients::{add_client, delete_client, index, save_client, show_clients};

pub mod cache;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let http = HttpApi::new(&server_config.api_base_url)
        .map_err(|e| std::io::Error::other(format!("Failed to configure backend API: {e}")))?;
    let repo = ApiRepository::new(http);

    let secret_key = Key::from(server_config.secret.as_bytes());
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(index)
            .service(show_clients)
            .service(add_client)
            .service(save_client)
            .service(delete_client)
            .service(show_allocations)
            .service(add_allocation)
            .service(save_allocation)
            .service(delete_allocation)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
