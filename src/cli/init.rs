use std::path::PathBuf;
use std::process;

use clap::Args;

use jsx_conditionals::project::{default_config, sample_component, CONFIG_FILE};

#[derive(Args)]
pub struct InitArgs {
    /// Project name (defaults to current directory name)
    pub name: Option<String>,
}

pub fn cmd_init(args: InitArgs) {
    let InitArgs { name } = args;
    let (project_dir, project_name) = if let Some(ref name) = name {
        (PathBuf::from(name), name.clone())
    } else {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app")
            .to_string();
        (dir, name)
    };

    let toml_path = project_dir.join(CONFIG_FILE);
    if toml_path.exists() {
        eprintln!("error: '{}' already exists", toml_path.display());
        process::exit(1);
    }

    let src_dir = project_dir.join("src");
    if let Err(e) = std::fs::create_dir_all(&src_dir) {
        eprintln!("error: cannot create directory '{}': {}", src_dir.display(), e);
        process::exit(1);
    }

    if let Err(e) = std::fs::write(&toml_path, default_config(&project_name)) {
        eprintln!("error: cannot write '{}': {}", toml_path.display(), e);
        process::exit(1);
    }

    let app_path = src_dir.join("App.jsx");
    if !app_path.exists() {
        if let Err(e) = std::fs::write(&app_path, sample_component()) {
            eprintln!("error: cannot write '{}': {}", app_path.display(), e);
            process::exit(1);
        }
    }

    eprintln!(
        "Created project '{}' in {}",
        project_name,
        project_dir.display()
    );
    eprintln!("  {}", toml_path.display());
    eprintln!("  {}", app_path.display());
}
