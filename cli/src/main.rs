//! blockdoc CLI - article body normalization tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use blockdoc::article::{ArticleAssembler, ArticleRequest};
use blockdoc::render::{
    body_to_text, extract_excerpt_from_body, normalize_parsed_body, to_json, ExcerptOptions,
};
use blockdoc::{
    slugify, ArticleBody, BlockRegistry, DocumentParser, JsonFormat, ParseOptions, ParseReport,
    ParsedBody,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "blockdoc")]
#[command(version)]
#[command(about = "Parse, normalize and summarize rich-content article bodies", long_about = None)]
struct Cli {
    /// Log parser decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Maximum block nesting depth
    #[arg(long, global = true, default_value_t = blockdoc::parser::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Parse pages one after another instead of in parallel
    #[arg(long, global = true, env = "BLOCKDOC_SEQUENTIAL")]
    sequential: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a body into its canonical stored form
    Normalize {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the excerpt of a body
    Excerpt {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Maximum excerpt length in characters
        #[arg(long, default_value_t = blockdoc::render::DEFAULT_EXCERPT_LENGTH)]
        max_length: usize,
    },

    /// Print the URL slug for a title
    Slug {
        /// Article title
        #[arg(value_name = "TITLE")]
        title: String,
    },

    /// Assemble a storable article record from a create request
    Article {
        /// Request JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Convert a body to plain text
    Text {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show block statistics and the parse report
    Inspect {
        /// Input JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let options = ParseOptions::new()
        .with_max_depth(cli.max_depth)
        .with_parallel(!cli.sequential);

    let result = match cli.command {
        Commands::Normalize {
            input,
            output,
            compact,
        } => cmd_normalize(&input, output.as_deref(), compact, options),
        Commands::Excerpt { input, max_length } => cmd_excerpt(&input, max_length, options),
        Commands::Slug { title } => {
            println!("{}", slugify(&title));
            Ok(())
        }
        Commands::Article {
            input,
            output,
            compact,
        } => cmd_article(&input, output.as_deref(), compact, options),
        Commands::Text { input, output } => cmd_text(&input, output.as_deref(), options),
        Commands::Inspect { input } => cmd_inspect(&input, options),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Read a file, or stdin for "-".
fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

/// Interpret input text as a body: a JSON array of blocks, or an object
/// holding `currentPageBody` or `pages`.
fn load_body(text: &str) -> CliResult<ArticleBody> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(nodes) => Ok(ArticleBody::Single(nodes)),
        other => Ok(ArticleBody::from_value(&other)?),
    }
}

fn parse_input(input: &Path, options: ParseOptions) -> CliResult<(ParsedBody, ParseReport)> {
    let body = load_body(&read_input(input)?)?;
    let parser = DocumentParser::new(BlockRegistry::standard(), options);
    Ok(parser.parse_article_body_with_report(&body))
}

fn write_output(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_normalize(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: ParseOptions,
) -> CliResult<()> {
    let (parsed, report) = parse_input(input, options)?;
    if report.is_lossy() {
        log::info!(
            "{} fallback block(s), {} depth truncation(s)",
            report.fallbacks,
            report.depth_truncations
        );
    }

    let json = to_json(&normalize_parsed_body(&parsed), json_format(compact))?;
    write_output(output, &json)
}

fn cmd_excerpt(input: &Path, max_length: usize, options: ParseOptions) -> CliResult<()> {
    let (parsed, _) = parse_input(input, options)?;
    let excerpt_options = ExcerptOptions::new().with_max_length(max_length);

    let excerpt = extract_excerpt_from_body(&parsed, &excerpt_options);
    if excerpt.is_empty() {
        eprintln!("{}", "No paragraph or heading text found".yellow());
    }
    println!("{}", excerpt.into_string(&excerpt_options));
    Ok(())
}

fn cmd_article(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: ParseOptions,
) -> CliResult<()> {
    let request: ArticleRequest = serde_json::from_str(&read_input(input)?)?;
    let assembler = ArticleAssembler::new(BlockRegistry::standard(), options, ExcerptOptions::new());
    let record = assembler.create(request)?;

    let json = to_json(&record.to_json(), json_format(compact))?;
    write_output(output, &json)
}

fn cmd_text(input: &Path, output: Option<&Path>, options: ParseOptions) -> CliResult<()> {
    let (parsed, _) = parse_input(input, options)?;
    write_output(output, &body_to_text(&parsed))
}

fn cmd_inspect(input: &Path, options: ParseOptions) -> CliResult<()> {
    let (parsed, report) = parse_input(input, options)?;

    println!("{}", "Body Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    match &parsed {
        ParsedBody::Single(doc) => {
            println!("{}: 1 (currentPageBody)", "Pages".bold());
            println!("{}: {}", "Top-level blocks".bold(), doc.len());
            println!("{}: {}", "Depth".bold(), doc.depth());
        }
        ParsedBody::Paged(pages) => {
            println!("{}: {}", "Pages".bold(), pages.len());
            for page in pages {
                println!(
                    "  {} page {}: {} block(s), depth {}",
                    "├─".dimmed(),
                    page.page_number,
                    page.document.block_count(),
                    page.document.depth()
                );
            }
        }
    }

    println!();
    println!("{}", "Parse Report".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), report.blocks);
    let fallbacks = report.fallbacks.to_string();
    println!(
        "{}: {}",
        "Fallback blocks".bold(),
        if report.fallbacks > 0 {
            fallbacks.yellow()
        } else {
            fallbacks.normal()
        }
    );
    let truncations = report.depth_truncations.to_string();
    println!(
        "{}: {}",
        "Depth truncations".bold(),
        if report.depth_truncations > 0 {
            truncations.red()
        } else {
            truncations.normal()
        }
    );

    let text = body_to_text(&parsed);
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "blockdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Rich-content article body tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn temp_json(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    #[test]
    fn test_load_body_shapes() {
        assert!(matches!(
            load_body(r#"[{"type": "divider"}]"#).unwrap(),
            ArticleBody::Single(ref nodes) if nodes.len() == 1
        ));
        assert!(load_body(r#"{"pages": [{"pageNumber": 1, "pageBody": []}]}"#)
            .unwrap()
            .is_paged());
        assert!(load_body(r#"{"pages": [], "currentPageBody": []}"#).is_err());
        assert!(load_body("42").is_err());
        assert!(load_body("not json").is_err());
    }

    #[test]
    fn test_normalize_to_file() {
        let input = temp_json(&serde_json::json!([
            {"type": "paragraph", "content": "Hello", "children": []},
            {"type": "mystery", "payload": 42}
        ]));
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.json");

        cmd_normalize(input.path(), Some(&output), true, ParseOptions::default()).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            r#"[{"type":"paragraph","content":[{"type":"text","text":"Hello"}]},{"type":"mystery","payload":42}]"#
        );
    }

    #[test]
    fn test_article_to_file() {
        let input = temp_json(&serde_json::json!({
            "title": "Hello, World! 2025",
            "currentPageBody": [{"type": "paragraph", "content": "Intro"}]
        }));
        let dir = tempdir().unwrap();
        let output = dir.path().join("article.json");

        cmd_article(input.path(), Some(&output), false, ParseOptions::default()).unwrap();

        let record: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(record["slug"], "hello-world-2025");
        assert_eq!(record["excerpt"], "Intro");
        assert_eq!(record["status"], "draft");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(cmd_inspect(&missing, ParseOptions::default()).is_err());
    }
}
