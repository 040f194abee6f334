use broker_crm::models::config::ServerConfig;
use broker_crm::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let server_config: ServerConfig = config::Config::builder()
        .add_source(config::File::with_name("config"))
        .add_source(config::Environment::default())
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to load configuration: {e}")))?
        .try_deserialize()
        .map_err(|e| std::io::Error::other(format!("Invalid configuration: {e}")))?;

    run(server_config).await
}
