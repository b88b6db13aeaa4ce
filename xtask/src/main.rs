//! xtask - Build tasks for HVP
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man pages, COMMANDS.md)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, Command, CommandFactory, Parser, Subcommand};

use hover_preview::cli::Cli;

const BIN: &str = "hvp";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for HVP")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate man pages
        #[arg(long)]
        man: bool,

        /// Generate COMMANDS.md
        #[arg(long)]
        markdown: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
        } => {
            // No format flag means everything
            let gen_all = !man && !markdown;

            if gen_all || man {
                generate_man_pages(&output)?;
            }
            if gen_all || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

/// Visible subcommands of `cmd`
fn visible(cmd: &Command) -> impl Iterator<Item = &Command> {
    cmd.get_subcommands().filter(|c| !c.is_hide_set())
}

fn is_builtin(arg: &Arg) -> bool {
    matches!(arg.get_id().as_str(), "help" | "version")
}

fn render_man(cmd: &Command, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Generate man pages using clap_mangen
fn generate_man_pages(output: &Path) -> Result<()> {
    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();
    render_man(&cmd, &man_dir.join(format!("{}.1", BIN)))?;

    for subcommand in visible(&cmd) {
        let name = subcommand.get_name();
        render_man(subcommand, &man_dir.join(format!("{}-{}.1", BIN, name)))?;

        for nested in visible(subcommand) {
            let file = format!("{}-{}-{}.1", BIN, name, nested.get_name());
            render_man(nested, &man_dir.join(file))?;
        }
    }

    println!("Man pages generated in {}", man_dir.display());
    Ok(())
}

/// Markdown bullet list of a command's arguments, positional first.
fn argument_list(cmd: &Command) -> String {
    let mut out = String::new();
    let args: Vec<&Arg> = cmd.get_arguments().filter(|a| !is_builtin(a)).collect();

    for arg in args.iter().filter(|a| a.is_positional()) {
        out.push_str(&format!("- `<{}>`", arg.get_id().as_str().to_uppercase()));
        if let Some(help) = arg.get_help() {
            out.push_str(&format!(": {}", help));
        }
        out.push('\n');
    }

    for arg in args.iter().filter(|a| !a.is_positional()) {
        let flag = match (arg.get_short(), arg.get_long()) {
            (Some(s), Some(l)) => format!("-{}, --{}", s, l),
            (None, Some(l)) => format!("--{}", l),
            (Some(s), None) => format!("-{}", s),
            (None, None) => continue,
        };
        out.push_str(&format!("- `{}`", flag));
        if let Some(help) = arg.get_help() {
            out.push_str(&format!(": {}", help));
        }
        out.push('\n');
    }
    out
}

fn fenced(text: &str) -> String {
    format!("```\n{}\n```\n\n", text)
}

/// Generate COMMANDS.md markdown documentation
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let cmd = Cli::command();
    let mut markdown = String::new();

    markdown.push_str("# HVP Command Reference\n\n");
    markdown.push_str("This document is auto-generated from the CLI definitions.\n\n");
    markdown.push_str("## Table of Contents\n\n");
    for subcommand in visible(&cmd) {
        let name = subcommand.get_name();
        markdown.push_str(&format!("- [{}](#{}-{})\n", name, BIN, name));
    }
    markdown.push_str("\n---\n\n");

    markdown.push_str(&format!("## {}\n\n", BIN));
    if let Some(about) = cmd.get_about() {
        markdown.push_str(&format!("{}\n\n", about));
    }
    if let Some(long_about) = cmd.get_long_about() {
        markdown.push_str(&fenced(&long_about.to_string()));
    }

    for subcommand in visible(&cmd) {
        let name = subcommand.get_name();
        markdown.push_str(&format!("## {} {}\n\n", BIN, name));

        if let Some(about) = subcommand.get_about() {
            markdown.push_str(&format!("{}\n\n", about));
        }

        let args = argument_list(subcommand);
        if !args.is_empty() {
            markdown.push_str("### Arguments\n\n");
            markdown.push_str(&args);
            markdown.push('\n');
        }

        if let Some(long_about) = subcommand.get_long_about() {
            markdown.push_str("### Description\n\n");
            markdown.push_str(&fenced(&long_about.to_string()));
        }

        let nested: Vec<&Command> = visible(subcommand).collect();
        if !nested.is_empty() {
            markdown.push_str("### Subcommands\n\n");
            for nested_cmd in nested {
                markdown.push_str(&format!(
                    "#### {} {} {}\n\n",
                    BIN,
                    name,
                    nested_cmd.get_name()
                ));
                if let Some(about) = nested_cmd.get_about() {
                    markdown.push_str(&format!("{}\n\n", about));
                }
                let args = argument_list(nested_cmd);
                if !args.is_empty() {
                    markdown.push_str(&args);
                    markdown.push('\n');
                }
                if let Some(long_about) = nested_cmd.get_long_about() {
                    markdown.push_str(&fenced(&long_about.to_string()));
                }
            }
        }

        markdown.push_str("---\n\n");
    }

    markdown.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("COMMANDS.md");
    fs::write(&output_path, markdown)?;
    println!("Generated: {}", output_path.display());

    Ok(())
}
