use clap::Parser;

use vacstat::cli::{Cli, Commands};
use vacstat::config::Lookups;
use vacstat::data::loader;
use vacstat::output::{report, table};
use vacstat::query::TableQuery;
use vacstat::stats;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let lookups = Lookups::new();
    let catalog = loader::load_catalog(&cli.input)?;
    match cli.command {
        Commands::Table {
            filter,
            sort,
            reverse,
            range,
            columns,
        } => {
            let query = TableQuery::parse(&filter, &sort, &reverse, &range, &columns)?;
            match table::build_view(&catalog, &query, &lookups)? {
                Some(view) => print!("{}", table::render_text(&view)),
                None => println!("Ничего не найдено"),
            }
        }
        Commands::Stats {
            profession,
            parallel,
            out,
        } => {
            let bundle = stats::build_stats(&catalog, &profession, parallel, &lookups)?;
            print!("{}", report::summary(&bundle));
            if let Some(path) = out {
                report::write_json(&bundle, &path)?;
            }
        }
    }
    Ok(())
}
