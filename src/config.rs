// src/config.rs
use crate::error::AppError;
use crate::traversal::TraversalOptions;
use crate::types::{ApiKey, ValidationError};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Environment variable holding the integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// How the finished tree is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Box-drawing tree for the terminal
    Console,
    /// Nested Markdown list
    Markdown,
    /// ASCII tree in a Markdown code block, URLs as footnotes
    Ascii,
    /// Pretty-printed JSON
    Json,
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Maximum depth to expand (0 = workspace roots only; unbounded when omitted)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Include Notion URLs for every page and database
    #[arg(long, default_value_t = false)]
    pub urls: bool,

    /// Output format (inferred from --output when omitted)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the rendered tree to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Hide the progress spinner
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Disable colours in console output
    #[arg(long = "no-color", default_value_t = false)]
    pub no_color: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved configuration, validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    pub api_key: ApiKey,
    pub max_depth: Option<usize>,
    pub include_urls: bool,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
    pub color: bool,
    pub verbose: bool,
}

impl TreeConfig {
    /// Resolves the configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::from_parts(cli, std::env::var(API_KEY_ENV).ok())
    }

    /// Resolves the configuration with an explicitly supplied credential.
    pub fn from_parts(cli: CommandLineInput, api_key: Option<String>) -> Result<Self, AppError> {
        let api_key_str = api_key.filter(|key| !key.trim().is_empty()).ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", API_KEY_ENV))
        })?;
        let api_key = ApiKey::new(api_key_str.trim())?;

        let output_file = cli.output.map(PathBuf::from);
        if let Some(path) = &output_file {
            validate_output_path(path)?;
        }

        let format = cli
            .format
            .unwrap_or_else(|| infer_format(output_file.as_deref()));
        let color = !cli.no_color && output_file.is_none() && format == OutputFormat::Console;

        Ok(TreeConfig {
            api_key,
            max_depth: cli.depth,
            include_urls: cli.urls,
            format,
            output_file,
            quiet: cli.quiet,
            color,
            verbose: cli.verbose,
        })
    }

    pub fn traversal_options(&self) -> TraversalOptions {
        TraversalOptions {
            max_depth: self.max_depth,
            include_urls: self.include_urls,
        }
    }

    /// Whether the rendered document itself goes to stdout.
    pub fn writes_document_to_stdout(&self) -> bool {
        self.output_file.is_none() && self.format != OutputFormat::Console
    }
}

/// `.json` files get JSON, any other file gets Markdown, and no file means
/// the console tree.
pub fn infer_format(output: Option<&Path>) -> OutputFormat {
    match output {
        None => OutputFormat::Console,
        Some(path) => {
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json {
                OutputFormat::Json
            } else {
                OutputFormat::Markdown
            }
        }
    }
}

fn validate_output_path(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::InvalidFilePath {
            path: String::new(),
            reason: "path is empty".to_string(),
        });
    }
    if path.is_dir() {
        return Err(ValidationError::InvalidFilePath {
            path: path.display().to_string(),
            reason: "path is a directory".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "secret_abcdefghijklmnopqrstuvwxyz";

    fn parse(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["notion-tree"];
        argv.extend_from_slice(args);
        CommandLineInput::parse_from(argv)
    }

    #[test]
    fn test_format_inference() {
        assert_eq!(infer_format(None), OutputFormat::Console);
        assert_eq!(infer_format(Some(Path::new("tree.json"))), OutputFormat::Json);
        assert_eq!(infer_format(Some(Path::new("TREE.JSON"))), OutputFormat::Json);
        assert_eq!(infer_format(Some(Path::new("tree.md"))), OutputFormat::Markdown);
        assert_eq!(infer_format(Some(Path::new("tree"))), OutputFormat::Markdown);
    }

    #[test]
    fn test_defaults_are_unbounded_console() {
        let config = TreeConfig::from_parts(parse(&[]), Some(KEY.to_string())).unwrap();
        assert_eq!(config.format, OutputFormat::Console);
        assert_eq!(
            config.traversal_options(),
            TraversalOptions {
                max_depth: None,
                include_urls: false
            }
        );
        assert!(config.color);
        assert!(!config.writes_document_to_stdout());
    }

    #[test]
    fn test_explicit_flags() {
        let cli = parse(&["--depth", "2", "--urls", "--format", "ascii", "--no-color", "-q"]);
        let config = TreeConfig::from_parts(cli, Some(KEY.to_string())).unwrap();
        assert_eq!(config.max_depth, Some(2));
        assert!(config.include_urls);
        assert_eq!(config.format, OutputFormat::Ascii);
        assert!(config.quiet);
        assert!(!config.color);
        assert!(config.writes_document_to_stdout());
    }

    #[test]
    fn test_output_file_drives_format() {
        let cli = parse(&["-o", "workspace.json"]);
        let config = TreeConfig::from_parts(cli, Some(KEY.to_string())).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.output_file, Some(PathBuf::from("workspace.json")));
        assert!(!config.color);
    }

    #[test]
    fn test_missing_key() {
        let result = TreeConfig::from_parts(parse(&[]), None);
        assert!(matches!(result, Err(AppError::MissingConfiguration(_))));

        let result = TreeConfig::from_parts(parse(&[]), Some("   ".to_string()));
        assert!(matches!(result, Err(AppError::MissingConfiguration(_))));
    }

    #[test]
    fn test_malformed_key() {
        let result = TreeConfig::from_parts(parse(&[]), Some("not-a-token".to_string()));
        assert!(matches!(
            result,
            Err(AppError::ValidationError(ValidationError::InvalidApiKey { .. }))
        ));
    }

    #[test]
    fn test_directory_output_rejected() {
        let dir = std::env::temp_dir();
        let cli = parse(&["-o", dir.to_str().unwrap()]);
        let result = TreeConfig::from_parts(cli, Some(KEY.to_string()));
        assert!(matches!(
            result,
            Err(AppError::ValidationError(ValidationError::InvalidFilePath { .. }))
        ));
    }
}
