use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use slang::config::load_from_path;
use slang::edit;
use slang::kind::{Kind, NAMESPACE};
use slang::query::{Predicate, RegexOptions};
use slang::source::{Digest, File, Node, Slice};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "slang")]
#[command(about = "Query Rust sources by fragment, token and tree; apply edit plans", long_about = None)]
#[command(version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the classified tokens of a file
    Tokens {
        file: PathBuf,

        /// Only tokens of this kind (e.g. `syntaxtype.keyword`)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Print the syntax tree of a file
    Tree {
        file: PathBuf,

        /// List descendants of this kind instead of the whole tree
        #[arg(short, long)]
        kind: Option<String>,

        /// Maximum depth below the root
        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Search files with a regex; capture groups select sub-matches
    Grep {
        pattern: String,

        /// Files or directories (directories are searched for `.rs` files)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(short = 's', long)]
        case_sensitive: bool,

        /// One JSON object per match
        #[arg(long)]
        json: bool,
    },

    /// Apply an edit plan to a file
    Apply {
        file: PathBuf,

        /// TOML or JSON edit plan
        #[arg(short, long)]
        plan: PathBuf,

        /// Show what would change without writing
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// List every known kind identifier
    Kinds,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Tokens { file, kind } => cmd_tokens(&file, kind.as_deref()),
        Commands::Tree { file, kind, depth } => cmd_tree(&file, kind.as_deref(), depth),
        Commands::Grep {
            pattern,
            paths,
            case_sensitive,
            json,
        } => cmd_grep(&pattern, &paths, case_sensitive, json),
        Commands::Apply {
            file,
            plan,
            dry_run,
            diff,
        } => cmd_apply(&file, &plan, dry_run, diff),
        Commands::Kinds => cmd_kinds(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("slang={level}")));
    // A subscriber installed twice (tests) is not an error worth failing on.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Accept identifiers with or without the `source.lang.rust.` prefix.
fn resolve_kind(raw: &str) -> Kind {
    let kind = if raw.starts_with("source.") {
        Kind::decode(raw)
    } else {
        Kind::decode(&format!("{NAMESPACE}{raw}"))
    };
    if kind.is_unknown() {
        eprintln!(
            "{}",
            format!("Warning: unknown kind '{raw}', nothing will match it (see `slang kinds`)")
                .yellow()
        );
    }
    kind
}

fn short(kind: &Kind) -> &str {
    let id = kind.encode();
    id.strip_prefix(NAMESPACE).unwrap_or(id)
}

fn parse(path: &Path) -> Result<Digest> {
    Digest::parse_path(path).with_context(|| format!("failed to parse {}", path.display()))
}

fn cmd_tokens(path: &Path, kind: Option<&str>) -> Result<()> {
    let digest = parse(path)?;
    let mut tokens = digest.query().tokens();
    if let Some(kind) = kind {
        tokens = tokens.select(resolve_kind(kind));
    }

    for token in &tokens {
        let range = token.range();
        println!(
            "{:>5}  {:<28} {}",
            token.sequence_index().to_string().dimmed(),
            short(token.kind()).cyan(),
            format!("{}..{} {:?}", range.start, range.end, token.contents())
        );
    }
    println!("{}", format!("{} tokens", tokens.len()).dimmed());
    Ok(())
}

fn cmd_tree(path: &Path, kind: Option<&str>, depth: Option<usize>) -> Result<()> {
    let digest = parse(path)?;
    let tree = digest.query().tree();

    if let Some(kind) = kind {
        let found = tree.descendants_within(resolve_kind(kind), depth);
        for node in &found {
            print_node(node, 0);
        }
        println!("{}", format!("{} nodes", found.len()).dimmed());
        return Ok(());
    }

    for root in &tree {
        print_node(root, 0);
        print_subtree(*root, 1, depth);
    }
    Ok(())
}

fn print_subtree(node: Node<'_>, level: usize, depth: Option<usize>) {
    if depth.is_some_and(|limit| level > limit) {
        return;
    }
    for child in node.children() {
        print_node(&child, level);
        print_subtree(child, level + 1, depth);
    }
}

fn print_node(node: &Node<'_>, level: usize) {
    let range = node.range();
    let line = node.lines().first().map(|l| l.index() + 1).unwrap_or(0);
    println!(
        "{}{} {} {}",
        "  ".repeat(level),
        short(node.kind()).cyan(),
        node.name().unwrap_or("").bold(),
        format!("[{}..{}] line {line}", range.start, range.end).dimmed()
    );
}

#[derive(Serialize)]
struct GrepMatch<'a> {
    path: String,
    line: usize,
    column: usize,
    start: usize,
    end: usize,
    text: &'a str,
}

fn cmd_grep(pattern: &str, paths: &[PathBuf], case_sensitive: bool, json: bool) -> Result<()> {
    let options = if case_sensitive {
        RegexOptions::case_sensitive()
    } else {
        RegexOptions::default()
    };
    // Compile once up front so a bad pattern fails before any file is read.
    let regex = options.compile(pattern).context("invalid pattern")?;

    let mut total = 0;
    for path in collect_files(paths)? {
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable file");
                continue;
            }
        };
        let digest = Digest::plain(File::with_path(&path, contents));
        let found = digest
            .query()
            .fragment()
            .subfragments_by(&regex, Predicate::any());

        for fragment in &found {
            let (line, column) = position(&digest, fragment.start());
            total += 1;
            if json {
                let record = GrepMatch {
                    path: path.display().to_string(),
                    line,
                    column,
                    start: fragment.start(),
                    end: fragment.end(),
                    text: fragment.contents(),
                };
                println!("{}", serde_json::to_string(&record)?);
            } else {
                println!(
                    "{}:{}:{}: {}",
                    path.display().to_string().magenta(),
                    line.to_string().green(),
                    column,
                    fragment.contents().red().bold()
                );
            }
        }
    }

    if !json {
        println!("{}", format!("{total} matches").dimmed());
    }
    Ok(())
}

/// One-based line and byte column of `offset`.
fn position(digest: &Digest, offset: usize) -> (usize, usize) {
    let text = digest.text();
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line = text[..line_start].matches('\n').count() + 1;
    (line, offset - line_start + 1)
}

fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path) {
                let entry = entry?;
                if entry.file_type().is_file()
                    && entry.path().extension().and_then(|s| s.to_str()) == Some("rs")
                {
                    found.push(entry.path().to_path_buf());
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (edited)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
    }
}

fn cmd_apply(file: &Path, plan_path: &Path, dry_run: bool, show_diff: bool) -> Result<()> {
    let plan = load_from_path(plan_path)?;
    let label = if plan.meta.name.is_empty() {
        plan_path.display().to_string()
    } else {
        plan.meta.name.clone()
    };
    println!("Applying {} ({} edits) to {}", label.bold(), plan.edits.len(), file.display());

    let original = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let modified = plan.apply_to(&original)?;

    if show_diff {
        display_diff(file, &original, &modified);
    }

    if modified == original {
        println!("{}", "  Already applied, nothing to do".yellow());
    } else if dry_run {
        println!("{}", "  [DRY RUN] file not written".cyan());
    } else {
        edit::write_file(file, &modified)?;
        println!(
            "{}",
            format!("  Applied: {} -> {} bytes", original.len(), modified.len()).green()
        );
    }
    Ok(())
}

fn cmd_kinds() -> Result<()> {
    for kind in Kind::known() {
        println!("{}", kind.encode());
    }
    Ok(())
}
