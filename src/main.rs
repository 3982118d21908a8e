use calc_table::{evaluate_with_table, OperatorTable};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Evaluate expressions with a runtime operator table")]
struct Args {
    /// File of `symbol action priority associativity` records, the standard table when omitted
    operators: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn })
        .init();

    let operators = match &args.operators {
        Some(path) => OperatorTable::from_reader(BufReader::new(File::open(path)?))?,
        None => OperatorTable::standard(),
    };

    print!("> ");
    std::io::stdout().flush()?;

    for line in std::io::stdin().lines() {
        let line = line?;

        if line.is_empty() {
            break;
        }

        match evaluate_with_table(&line, &operators) {
            Ok(value) => println!("{}", value),
            Err(e) => println!("Error, {}", e),
        }

        print!("> ");
        std::io::stdout().flush()?;
    }
    Ok(())
}
