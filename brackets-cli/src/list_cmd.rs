//! List and delete commands - manage the saved brackets

use anyhow::{bail, Result};
use clap::Args;

use brackets_session::{BracketId, BracketRecord, BracketStore, Session, SessionConfig};

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Store id shown by `list`
    #[arg(long)]
    pub id: BracketId,
}

pub fn run_list(args: ListArgs, config: SessionConfig) -> Result<()> {
    let store = crate::open_store(&config)?;
    let records = store.list()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No saved brackets in {}", store.path().display());
    } else {
        print!("{}", format_table(&records));
    }
    Ok(())
}

pub fn run_delete(args: DeleteArgs, config: SessionConfig) -> Result<()> {
    let mut store = crate::open_store(&config)?;
    let mut session = Session::new(config);
    if !session.delete(&mut store, args.id)? {
        bail!("No bracket with id {}", args.id);
    }
    println!("Deleted bracket #{}", args.id);
    Ok(())
}

fn format_table(records: &[BracketRecord]) -> String {
    let width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = format!("{:>4}  {:<width$}  {:>7}  {}\n", "Id", "Name", "Players", "Created");
    for r in records {
        out.push_str(&format!(
            "{:>4}  {:<width$}  {:>7}  {}\n",
            r.bracket_id, r.name, r.num_players, r.date_created
        ));
    }
    out
}
