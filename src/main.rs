mod cli;

use clap::{Parser, Subcommand};

use cli::check::CheckArgs;
use cli::init::InitArgs;
use cli::transform::TransformArgs;
use cli::tree::TreeArgs;

#[derive(Parser)]
#[command(
    name = "jsx-conditionals",
    version,
    about = "Compile <If>/<ElseIf>/<Else> markup into plain conditionals"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a new project with a conditionals.toml
    Init(InitArgs),
    /// Rewrite a file (or every file of a project)
    Transform(TransformArgs),
    /// Validate without writing anything
    Check(CheckArgs),
    /// Print the parsed tree as JSON
    Tree(TreeArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Init(args) => cli::init::cmd_init(args),
        Command::Transform(args) => cli::transform::cmd_transform(args),
        Command::Check(args) => cli::check::cmd_check(args),
        Command::Tree(args) => cli::tree::cmd_tree(args),
    }
}
