extern crate clap;
#[macro_use]
extern crate version;

use clap::{Arg, ArgAction, ArgMatches, Command};
use cosmoseed::connector::cosmos::{Cosmos, DEFAULT_COLLECTION, DEFAULT_DATABASE};
use cosmoseed::connector::ConnectorType;
use std::env;
use std::io::{stderr, Error, ErrorKind, Result};
use tracing::*;
use tracing_subscriber::EnvFilter;

const ARG_COUNT: &str = "count";
const ARG_ACCOUNT: &str = "account";
const ARG_KEY: &str = "key";
const ARG_DATABASE: &str = "database";
const ARG_COLLECTION: &str = "collection";
const ARG_UPSERT: &str = "upsert";
const ENV_ACCOUNT: &str = "COSMOS_ACCOUNT";
const ENV_KEY: &str = "COSMOS_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout only carries the telemetry lines.
    let (non_blocking, _guard) = tracing_appender::non_blocking(stderr());
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        // filter spans/events with level TRACE or higher.
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    trace!("Cosmoseed start...");
    let args = application().get_matches();

    let count = match args.get_one::<String>(ARG_COUNT) {
        Some(count) => count
            .parse::<usize>()
            .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?,
        None => {
            println!(
                "Please provide the number of documents to insert as a command line argument."
            );
            return Ok(());
        }
    };

    let account = setting(&args, ARG_ACCOUNT, ENV_ACCOUNT).ok_or_else(|| {
        Error::new(
            ErrorKind::NotFound,
            "The Cosmos DB account is not set. Use --account or the COSMOS_ACCOUNT environment variable.",
        )
    })?;
    let key = setting(&args, ARG_KEY, ENV_KEY).ok_or_else(|| {
        Error::new(
            ErrorKind::NotFound,
            "The Cosmos DB primary key is not set. Use --key or the COSMOS_KEY environment variable.",
        )
    })?;

    let mut connector_type = ConnectorType::Cosmos(Cosmos {
        account,
        key,
        database: args
            .get_one::<String>(ARG_DATABASE)
            .cloned()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        collection: args
            .get_one::<String>(ARG_COLLECTION)
            .cloned()
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
        is_upsert: args.get_flag(ARG_UPSERT),
    });

    let summary = cosmoseed::exec(count, &mut connector_type).await?;

    trace!(
        writes = summary.writes,
        total_charge = summary.total_charge,
        "Cosmoseed ends."
    );
    Ok(())
}

/// Get a setting from the command line, or fall back on the environment.
fn setting(args: &ArgMatches, arg: &str, env_var: &str) -> Option<String> {
    args.get_one::<String>(arg)
        .cloned()
        .or_else(|| env::var(env_var).ok())
}

fn application() -> Command {
    Command::new("cosmoseed")
        .version(version!())
        .about("Generate fake JSON documents and load them one-by-one into an Azure Cosmos DB container")
        .arg(
            Arg::new(ARG_COUNT)
                .value_name("COUNT")
                .help("Number of documents to generate and insert")
                .num_args(1)
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new(ARG_ACCOUNT)
                .short('a')
                .long("account")
                .value_name("ACCOUNT")
                .help("Cosmos DB account name. Defaults to the COSMOS_ACCOUNT environment variable")
                .num_args(1)
                .required(false),
        )
        .arg(
            Arg::new(ARG_KEY)
                .short('k')
                .long("key")
                .value_name("KEY")
                .help("Cosmos DB primary key. Defaults to the COSMOS_KEY environment variable")
                .num_args(1)
                .required(false),
        )
        .arg(
            Arg::new(ARG_DATABASE)
                .short('d')
                .long("database")
                .value_name("DATABASE")
                .help("Database that holds the collection")
                .num_args(1)
                .required(false)
                .default_value(DEFAULT_DATABASE),
        )
        .arg(
            Arg::new(ARG_COLLECTION)
                .short('c')
                .long("collection")
                .value_name("COLLECTION")
                .help("Collection that receives the documents")
                .num_args(1)
                .required(false)
                .default_value(DEFAULT_COLLECTION),
        )
        .arg(
            Arg::new(ARG_UPSERT)
                .long("upsert")
                .help("Replace a document that already carries the same id instead of failing")
                .action(ArgAction::SetTrue),
        )
}
