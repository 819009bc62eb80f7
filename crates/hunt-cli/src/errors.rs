use console::style;
use hunt_core::HuntError;
use std::fmt;

/// User-facing error with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!(
            "{} {}\n",
            style("✗").red().bold(),
            style(&self.message).red().bold()
        );

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!(
                "{} {}",
                style("Need help?").cyan(),
                style(help_cmd).cyan().bold()
            );
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// `--pick` does not name one of the search results
pub fn pick_out_of_range(query: &str, pick: usize, available: usize) -> CliError {
    let context = if available == 0 {
        format!("The search for '{}' returned no locations.", query)
    } else {
        format!(
            "The search for '{}' returned {} locations; result {} does not exist.",
            query, available, pick
        )
    };
    CliError::new("No such search result")
        .with_context(context)
        .with_suggestion(format!("List the results: hunt search \"{}\"", query))
        .with_suggestion("Pass a number from that list with --pick")
        .with_help("Run: hunt search --help")
}

/// Stock photos need an Unsplash access key
pub fn stock_photos_unavailable() -> CliError {
    CliError::new("Stock photos are not configured")
        .with_context("No Unsplash access key is set, so no stock photo can be fetched.")
        .with_suggestion("Set it for this shell: export HUNT_UNSPLASH_ACCESS_KEY=<key>")
        .with_suggestion(
            "Or add to hunt.toml in the data directory:\n  unsplash_access_key = \"<key>\"",
        )
        .with_help("Run: hunt status")
}

/// The photo file to attach could not be read
pub fn photo_file_unreadable(path: &str, reason: &str) -> CliError {
    CliError::new("Cannot read photo file")
        .with_context(format!("Path: {}\n\nError: {}", path, reason))
        .with_suggestion("Check the file path and try again")
        .with_help("Run: hunt attach --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check hunt.toml in the data directory for syntax errors")
        .with_suggestion("Check HUNT_* environment variables")
        .with_help("Run: hunt status")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let error = match error.downcast::<CliError>() {
        Ok(cli_error) => return cli_error,
        Err(error) => error,
    };

    if let Some(hunt_error) = error.downcast_ref::<HuntError>() {
        match hunt_error {
            HuntError::ConfigInvalid { key, reason } => return invalid_config(key, reason),
            HuntError::ServiceUnavailable {
                service,
                reason,
                remediation,
            } => {
                return CliError::new(format!("{} is unavailable", service))
                    .with_context(format!("Error: {}", reason))
                    .with_suggestion(remediation.clone());
            }
            _ => {}
        }
    }

    let message = format!("{:#}", error);
    if message.contains("Permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check permissions of the data directory")
            .with_suggestion("Or choose another one with --data-dir")
    } else {
        CliError::new(message)
    }
}
