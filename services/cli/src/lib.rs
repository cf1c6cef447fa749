mod cli;
mod commands;
mod demo;
mod infra;

use noride::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
