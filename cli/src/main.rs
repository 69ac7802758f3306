//! docxtract CLI - text record extraction to DOCX

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use docxtract::render::{inspect_file, to_json, to_text};
use docxtract::{
    extract_file_with_options, BorderPosition, Docxtract, ExtractOptions, JsonFormat, RecordSet,
    WriteOptions, DEFAULT_INPUT, DEFAULT_OUTPUT,
};

#[derive(Parser)]
#[command(name = "docxtract")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract Name/Age/Email records from text into a bordered DOCX table", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Input text file [default: sample_data.txt]
    #[arg(value_name = "INPUT", env = "DOCXTRACT_INPUT")]
    input: Option<PathBuf>,

    /// Output DOCX file [default: extracted_data_with_borders.docx]
    #[arg(value_name = "OUTPUT", env = "DOCXTRACT_OUTPUT")]
    output: Option<PathBuf>,

    /// Heading text above the table
    #[arg(long)]
    heading: Option<String>,

    #[command(flatten)]
    extract: ExtractArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Copy, Default)]
struct ExtractArgs {
    /// Fail if Name, Age and Email matched a different number of times
    #[arg(long)]
    strict: bool,

    /// Only accept labels at the start of a line
    #[arg(long)]
    anchored: bool,
}

impl From<ExtractArgs> for ExtractOptions {
    fn from(args: ExtractArgs) -> Self {
        let mut options = ExtractOptions::new();
        if args.strict {
            options = options.strict();
        }
        if args.anchored {
            options = options.anchored();
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print extracted records as JSON
    Json {
        /// Input text file
        #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Print extracted records as tab-separated text
    Text {
        /// Input text file
        #[arg(value_name = "FILE", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show the heading, rows and borders of a generated document
    Info {
        /// DOCX file written by docxtract
        #[arg(value_name = "FILE", default_value = DEFAULT_OUTPUT)]
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Json {
            input,
            output,
            compact,
            extract,
        }) => cmd_json(&input, output.as_deref(), compact, extract),
        Some(Commands::Text {
            input,
            output,
            extract,
        }) => cmd_text(&input, output.as_deref(), extract),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            let input = cli.input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
            let output = cli.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
            cmd_convert(&input, &output, cli.heading, cli.extract).map(|_| ())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    heading: Option<String>,
    extract: ExtractArgs,
) -> Result<RecordSet, Box<dyn std::error::Error>> {
    let mut write_options = WriteOptions::new();
    if let Some(heading) = heading {
        write_options = write_options.with_heading(heading);
    }

    let records = Docxtract::new()
        .with_extract_options(extract.into())
        .with_write_options(write_options)
        .convert(input, output)?;
    report_truncation(&records);

    println!(
        "{} {}",
        "Data extracted and written to".green(),
        output.display()
    );

    Ok(records)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    extract: ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = extract_file_with_options(input, extract.into())?;
    report_truncation(&records);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&records, format)?;

    emit(output, &json)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    extract: ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = extract_file_with_options(input, extract.into())?;
    report_truncation(&records);

    emit(output, &to_text(&records))
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let summary = inspect_file(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());

    for heading in &summary.headings {
        println!("{}: {}", "Heading".bold(), heading);
    }

    for (index, table) in summary.tables.iter().enumerate() {
        println!();
        println!("{} {}", "Table".cyan().bold(), index + 1);
        println!("{}", "─".repeat(40).dimmed());

        let body_rows = table.row_count().saturating_sub(1);
        println!("{}: {} (+1 header)", "Rows".bold(), body_rows);

        if let Some(header) = table.rows.first() {
            println!("{}: {}", "Columns".bold(), header.join(", "));
        }

        for position in BorderPosition::ALL {
            let value = match table.borders.get(position) {
                Some(b) => format!("{} sz={} space={} color={}", b.style.as_str(), b.size, b.space, b.color),
                None => "none".dimmed().to_string(),
            };
            println!("  {:<8} {}", position.element_name(), value);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docxtract".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Text record extraction to DOCX");
    println!();
    println!("License: MIT");
}

fn emit(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn report_truncation(records: &RecordSet) {
    if records.is_truncated() {
        let counts = records.counts;
        eprintln!(
            "{} field counts differ ({} names, {} ages, {} emails); kept {} records",
            "Warning:".yellow().bold(),
            counts.names,
            counts.ages,
            counts.emails,
            counts.paired()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_positional_paths() {
        let cli = Cli::try_parse_from(["docxtract", "in.txt", "out.docx", "--strict"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("in.txt")));
        assert_eq!(cli.output, Some(PathBuf::from("out.docx")));
        assert!(cli.extract.strict);
        assert!(!cli.extract.anchored);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_json_subcommand() {
        let cli = Cli::try_parse_from(["docxtract", "json", "people.txt", "--compact"]).unwrap();
        match cli.command {
            Some(Commands::Json { input, compact, .. }) => {
                assert_eq!(input, PathBuf::from("people.txt"));
                assert!(compact);
            }
            _ => panic!("expected json subcommand"),
        }
    }

    #[test]
    fn test_extract_args_to_options() {
        let options: ExtractOptions = ExtractArgs {
            strict: true,
            anchored: true,
        }
        .into();
        assert_eq!(options.pairing, docxtract::PairingMode::Strict);
        assert_eq!(options.patterns, docxtract::FieldPatterns::anchored());
    }

    #[test]
    fn test_cmd_convert_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sample_data.txt");
        let output = dir.path().join("out.docx");
        fs::write(
            &input,
            "Name: Ada Lovelace\nAge: 36\nEmail: ada@example.com\n",
        )
        .unwrap();

        let records = cmd_convert(&input, &output, None, ExtractArgs::default()).unwrap();
        assert_eq!(records.len(), 1);

        let summary = inspect_file(&output).unwrap();
        assert_eq!(summary.tables[0].row_count(), 2);
    }

    #[test]
    fn test_cmd_convert_strict_rejects_uneven_counts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("uneven.txt");
        let output = dir.path().join("out.docx");
        fs::write(&input, "Name: A\nName: B\nAge: 1\nEmail: a@b.co\n").unwrap();

        let strict = ExtractArgs {
            strict: true,
            anchored: false,
        };
        assert!(cmd_convert(&input, &output, None, strict).is_err());
        assert!(!output.exists());

        let records = cmd_convert(&input, &output, None, ExtractArgs::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records.is_truncated());
    }

    #[test]
    fn test_cmd_convert_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = cmd_convert(
            &dir.path().join("missing.txt"),
            &dir.path().join("out.docx"),
            None,
            ExtractArgs::default(),
        );
        assert!(result.is_err());
        assert!(!dir.path().join("out.docx").exists());
    }
}
