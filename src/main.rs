//! histsearch CLI: rank a directory of images by color similarity to a query image.

use anyhow::Result;
use histsearch::engine::arg_parser::{ParsedArgs, USAGE_EXIT_CODE, parse_args_from};
use histsearch::engine::handle_run;
use histsearch::utils::PackagePaths;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = match parse_args_from(std::env::args_os()) {
        ParsedArgs::Run(cli) => cli,
        ParsedArgs::Exit(e) => e.exit(),
        ParsedArgs::Usage(e) => {
            println!("{}", PackagePaths::get().usage());
            eprintln!("{}", e.kind().as_str().unwrap_or("invalid arguments"));
            std::process::exit(USAGE_EXIT_CODE);
        }
    };
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
