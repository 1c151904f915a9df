// src/cli/completion.rs
use crate::cli::args::Cli;
use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::io::{self, Write};
use tracing::{debug, instrument};

/// Writes the completion script for `shell` ("bash", "zsh" or "fish") to `out`.
///
/// ```bash
/// eval "$(linklocker completion bash)"
/// ```
#[instrument(level = "debug", skip(out))]
pub fn generate_completion<W: Write>(shell: &str, out: &mut W) -> io::Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    match shell.to_lowercase().as_str() {
        "bash" => {
            debug!("Generating bash completion");
            generate(Bash, &mut cmd, bin_name, out);
        }
        "zsh" => {
            debug!("Generating zsh completion");
            generate(Zsh, &mut cmd, bin_name, out);
        }
        "fish" => {
            debug!("Generating fish completion");
            generate(Fish, &mut cmd, bin_name, out);
        }
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Unsupported shell: {}. Supported shells: bash, zsh, fish",
                    shell
                ),
            ))
        }
    }
    Ok(())
}

/// Short install hint printed to stderr next to the script
pub fn usage_hint(shell: &str) -> Option<&'static str> {
    match shell.to_lowercase().as_str() {
        "bash" => Some("# To use: eval \"$(linklocker completion bash)\" or append it to ~/.bashrc"),
        "zsh" => Some("# To use: linklocker completion zsh > ~/.zfunc/_linklocker (with ~/.zfunc in fpath)"),
        "fish" => Some("# To use: linklocker completion fish > ~/.config/fish/completions/linklocker.fish"),
        _ => None,
    }
}
