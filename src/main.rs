mod models;
mod utils;

use std::io;

use dotenv::dotenv;
use log::error;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::utils::page;
use crate::utils::portal;
use crate::utils::render::TerminalNotify;
use crate::utils::session::call_with_session;

// Entry point for the async main function, powered by tokio runtime.
#[tokio::main]
async fn main() {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    // Logging goes to the terminal with mixed output and automatic color support.
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();

    let client = match portal::build_client() {
        Ok(client) => client,
        Err(e) => {
            error!("Error building the portal client: {}", e);
            return;
        }
    };

    let base = match portal::webservice_url() {
        Ok(url) => url,
        Err(e) => {
            error!("Error resolving the webservice URL: {}", e);
            return;
        }
    };

    // One run is one page visit: fetch the grade sheet through an
    // authenticated session and print the classified lists.
    let mut stdout = io::stdout();
    let mut notify = TerminalNotify;
    page::show(
        call_with_session(&client, &base, || portal::retrieve_grades(&client, &base)),
        &mut stdout,
        &mut notify,
    )
    .await;
}
