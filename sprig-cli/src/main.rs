//! Sprig CLI
//!
//! Parses an HTML file or string and prints it back as canonical HTML, as
//! an indented tree, or as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use sprig_dom::DomTree;
use sprig_html::{HtmlParser, ParseIssue, dump_tree};

/// Sprig: parse an HTML fragment and re-emit it
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Normalize a file
    sprig ./snippet.html

    # Parse inline HTML and show the node tree
    sprig --tree --html '<ul><li>one</li><li>two</li></ul>'

    # JSON view of a fragment
    sprig --json --html '<p>A</p><span>B</span>'

    # Fail on unterminated tags instead of absorbing them
    sprig --strict ./snippet.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the indented node tree instead of HTML
    #[arg(long, conflicts_with = "json")]
    tree: bool,

    /// Print the tree as JSON instead of HTML
    #[arg(long)]
    json: bool,

    /// Treat recoverable markup problems as errors
    #[arg(long)]
    strict: bool,

    /// List the markup problems that were recovered from
    #[arg(long)]
    issues: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let source = load_source(&cli)?;

    let mut parser = HtmlParser::new(&source);
    if cli.strict {
        parser = parser.with_strict_mode();
    }
    let (tree, issues) = parser.run_with_issues()?;

    if cli.issues {
        print_issues(&issues);
    }
    print_tree(&cli, &tree)
}

/// Load the HTML text from CLI arguments
fn load_source(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
        String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
    } else {
        anyhow::bail!("expected a file path or --html")
    }
}

/// Print the tree in the selected output format
fn print_tree(cli: &Cli, tree: &DomTree) -> anyhow::Result<()> {
    let root = tree.root();
    if cli.json {
        let snapshot = tree
            .snapshot(root)
            .context("root node missing from tree")?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else if cli.tree {
        print!("{}", dump_tree(tree, root));
    } else {
        println!("{tree}");
    }
    Ok(())
}

fn print_issues(issues: &[ParseIssue]) {
    if issues.is_empty() {
        eprintln!("{}", "no issues".green());
        return;
    }
    for issue in issues {
        eprintln!(
            "{} byte {}: {}",
            "⚠".yellow(),
            issue.offset,
            issue.message
        );
    }
}
