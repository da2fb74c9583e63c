//! Demo entry point.
//!
//! # Responsibility
//! - Print a constructed seller to show the model shape.
//! - List stored sellers through the repository factory, using the property
//!   file given as the first argument (default `db.properties`).

use chrono::NaiveDate;
use log::error;
use sellerdb_core::{
    create_seller_repository, default_log_level, init_logging, ConnectionProvider, Department,
    LogTarget, RepoResult, Seller, DEFAULT_PROPERTIES_FILE,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = init_logging(default_log_level(), LogTarget::Stderr) {
        eprintln!("logging disabled: {err}");
    }

    println!("sellerdb_core version={}", sellerdb_core::core_version());

    let department = Department::new(1, "Books");
    if let Some(birth_date) = NaiveDate::from_ymd_opt(2020, 1, 1) {
        let seller = Seller::with_id(21, "Bob", "bob@gmail.com", birth_date, 3000.0, department);
        println!("{seller}");
    }

    let properties = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PROPERTIES_FILE.to_string());
    let mut provider = ConnectionProvider::from_properties_file(properties);

    let listed = list_sellers(&provider);
    let closed = provider.close_connection();

    match (listed, closed) {
        (Ok(()), Ok(())) => ExitCode::SUCCESS,
        (Err(err), _) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
        (Ok(()), Err(err)) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn list_sellers(provider: &ConnectionProvider) -> RepoResult<()> {
    for line in seller_lines(provider)? {
        println!("{line}");
    }
    Ok(())
}

fn seller_lines(provider: &ConnectionProvider) -> RepoResult<Vec<String>> {
    let repo = create_seller_repository(provider)?;
    Ok(repo.find_all()?.iter().map(ToString::to_string).collect())
}
