mod cli;
mod demo;
mod infra;
mod render;
mod routes;
mod score;
mod server;

use tender_curation::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
