use anyhow::Result;
use valuelens::cli;

fn main() -> Result<()> {
    let result = cli::process_cli();
    if let Err(ref e) = result {
        log::error!("valuelens failed: {e:#}");
    }
    result
}
