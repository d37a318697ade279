//! CLI module
//!
//! This module provides the command-line interface functionality for the cachereport tool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use colored::Colorize;

use crate::{
    api::{serve, ServerConfig},
    html::render_page,
    input::{LoadError, ReportInput},
    problem::ProblemNode,
    report::{GroupingAxis, ReportPage},
    tree::Tree,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Path to the JSON problem model
    #[arg(env = "CACHEREPORT_INPUT")]
    input: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the report as a standalone HTML page
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Write the page to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print one of the report trees to the terminal
    Tree {
        #[command(flatten)]
        input: InputArgs,

        /// Which grouping to print
        #[arg(long, value_enum, default_value_t = Grouping::Message)]
        by: Grouping,

        /// Show collapsed branches too
        #[arg(long)]
        expand_all: bool,
    },

    /// Print the report page model as JSON
    Json {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Serve the report over HTTP
    Serve {
        #[command(flatten)]
        input: InputArgs,

        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Grouping {
    Message,
    Task,
}

impl From<Grouping> for GroupingAxis {
    fn from(grouping: Grouping) -> Self {
        match grouping {
            Grouping::Message => GroupingAxis::Message,
            Grouping::Task => GroupingAxis::Task,
        }
    }
}

/// Run the CLI application
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Render { input, output } => {
            let page = load_page(&input.input)?;
            let html = render_page(&page);

            match output {
                Some(path) => {
                    fs::write(path, html)?;
                    tracing::info!(
                        "Wrote report for {} problems to {}",
                        page.total_problems,
                        path.display()
                    );
                }
                None => println!("{}", html),
            }
            Ok(())
        }

        Commands::Tree {
            input,
            by,
            expand_all,
        } => {
            let page = load_page(&input.input)?;
            let tree = page.tree((*by).into());

            print_summary(&page);
            if *expand_all {
                print_tree(&tree.with_all_expanded(), 0);
            } else {
                print_tree(tree, 0);
            }
            Ok(())
        }

        Commands::Json { input, pretty } => {
            let page = load_page(&input.input)?;
            let json = if *pretty {
                serde_json::to_string_pretty(&page)?
            } else {
                serde_json::to_string(&page)?
            };
            println!("{}", json);
            Ok(())
        }

        Commands::Serve { input, port } => {
            let page = load_page(&input.input)?;
            println!(
                "Serving report for {} problems on port {}...",
                page.total_problems, port
            );

            let config = ServerConfig {
                address: ([127, 0, 0, 1], *port).into(),
            };

            serve(page, config).await?;
            Ok(())
        }

        Commands::Completions { shell } => {
            // Generate completions for the specified shell
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Reads the problem model at `path` and materializes its report
pub fn load_page(path: &Path) -> Result<ReportPage, LoadError> {
    let json = fs::read_to_string(path)?;
    let input = ReportInput::from_json(&json)?;
    tracing::debug!(
        "Loaded {} problems from {}",
        input.problems.len(),
        path.display()
    );
    Ok(ReportPage::from_input(&input))
}

fn print_summary(page: &ReportPage) {
    println!(
        "{} {} found {} the configuration cache.",
        page.total_problems.to_string().bold(),
        if page.total_problems == 1 {
            "problem was"
        } else {
            "problems were"
        },
        page.cache_action
    );
    if !page.documentation_link.is_empty() {
        println!("See {}", page.documentation_link.underline());
    }
    println!();
}

/// Recursively prints a tree node, hiding the children of collapsed nodes
fn print_tree(tree: &Tree<ProblemNode>, indent: usize) {
    let indent_str = "  ".repeat(indent);

    let marker = if tree.is_leaf() {
        "•"
    } else if tree.view_state.is_expanded() {
        "▾"
    } else {
        "▸"
    };

    let hidden = if !tree.is_leaf() && !tree.view_state.is_expanded() {
        format!(" ({} more)", tree.leaf_count()).dimmed().to_string()
    } else {
        String::new()
    };

    println!("{}{} {}{}", indent_str, marker, styled_label(&tree.label), hidden);

    if tree.view_state.is_expanded() {
        for child in &tree.children {
            print_tree(child, indent + 1);
        }
    }
}

fn styled_label(node: &ProblemNode) -> String {
    match node {
        ProblemNode::Error { .. } => node.to_string().red().to_string(),
        ProblemNode::Warning { .. } => node.to_string().yellow().to_string(),
        ProblemNode::Label { .. } => node.to_string().blue().bold().to_string(),
        ProblemNode::Exception { raw_text } => {
            // stack traces can be long; only the first line is printed
            let first_line = raw_text.lines().next().unwrap_or_default();
            format!("exception: {}", first_line).dimmed().to_string()
        }
        ProblemNode::Task { .. }
        | ProblemNode::Bean { .. }
        | ProblemNode::Property { .. }
        | ProblemNode::Message { .. }
        | ProblemNode::Link { .. } => node.to_string(),
    }
}
