// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion generation for the gwf CLI.
//!
//! ```bash
//! # Bash
//! gwf completions bash > ~/.local/share/bash-completion/completions/gwf
//!
//! # Zsh
//! gwf completions zsh > ~/.zfunc/_gwf
//!
//! # Fish
//! gwf completions fish > ~/.config/fish/completions/gwf.fish
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Generate shell completions and write to stdout.
pub fn generate_completions<C: CommandFactory>(shell: Shell) {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "gwf", &mut io::stdout());
}

/// Arguments for the completions command.
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
