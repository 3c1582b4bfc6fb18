use std::fs;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::Shell;

// cli.rs only needs clap + clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR not set by Cargo");
    let out_dir = Path::new(&out_dir);

    let man_dir = out_dir.join("man");
    let completion_dir = out_dir.join("completions");
    fs::create_dir_all(&man_dir).expect("failed to create man output directory");
    fs::create_dir_all(&completion_dir).expect("failed to create completion output directory");

    let mut cmd = cli::Cli::command();
    write_manpages(&cmd, &man_dir);

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        clap_complete::generate_to(shell, &mut cmd, "speedctl", &completion_dir)
            .unwrap_or_else(|e| panic!("failed to write {shell} completions: {e}"));
    }
}

/// One page for the binary plus one per visible subcommand (`speedctl-log.1`).
fn write_manpages(cmd: &clap::Command, dir: &Path) {
    let name = cmd.get_name().to_owned();

    let mut page = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut page)
        .unwrap_or_else(|e| panic!("failed to render man page for `{name}`: {e}"));
    let path = dir.join(format!("{name}.1"));
    fs::write(&path, page).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        write_manpages(&sub, dir);
    }
}
