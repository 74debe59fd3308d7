use std::path::PathBuf;
use std::process;

use clap::Args;

use jsx_conditionals::adapter::{HostAdapter, JsonAdapter};
use jsx_conditionals::transform::transform_unit;

use super::{read_source, report};

#[derive(Args)]
pub struct TreeArgs {
    /// Input source file
    pub input: PathBuf,
    /// Print the tree after the transform instead of before
    #[arg(long)]
    pub transformed: bool,
    /// One line instead of indented output
    #[arg(long)]
    pub compact: bool,
}

pub fn cmd_tree(args: TreeArgs) {
    let TreeArgs {
        input,
        transformed,
        compact,
    } = args;
    let source = read_source(&input);
    let filename = input.to_string_lossy().to_string();

    let Ok(mut unit) = jsx_conditionals::parse_source(&source, &filename) else {
        process::exit(1);
    };
    if transformed {
        unit = match transform_unit(unit) {
            Ok((unit, _)) => unit,
            Err(e) => {
                report(&input, &source, &[e.in_file(&filename).into_diagnostic()]);
                process::exit(1);
            }
        };
    }

    let adapter = JsonAdapter { pretty: !compact };
    match adapter.raise(&unit) {
        Ok(json) => println!("{}", json),
        Err(diagnostics) => {
            report(&input, &source, &diagnostics);
            process::exit(1);
        }
    }
}
