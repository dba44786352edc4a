use clap_complete::generate_to;
use std::env;
use std::io::Error;

include!("src/cli.rs");

// Writes shell completion scripts for the main binary into OUT_DIR.
fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        generate_to(shell, &mut cmd, "sortbench_data", &outdir)?;
    }
    Ok(())
}
