pub mod calculation;
pub mod config;
pub mod crawler;
pub mod declare;
pub mod logging;
pub mod util;
pub mod web;

use std::sync::Arc;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let settings = config::App::get()?;
    let addr = settings.system.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    logging::info_console(format!("Listening on http://{}", addr));

    if let Err(why) = axum::serve(listener, web::router(Arc::new(settings))).await {
        logging::error_console(format!("Server stopped because {:?}", why));
        return Err(why.into());
    }

    Ok(())
}
