use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetSplitError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("No Excel files found in {path}")]
    NoWorkbooksFound {
        path: String,
        searched_extensions: Vec<String>,
    },

    #[error("No matching sheets found in {file}")]
    NoMatchingSheets { file: String },

    #[error("Failed to decode workbook {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid sheet pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SheetSplitError {
    fn user_message(&self) -> String {
        match self {
            SheetSplitError::NoWorkbooksFound { .. } => "No Excel files found.".to_string(),
            SheetSplitError::NoMatchingSheets { file } => {
                format!("No matching sheets found in {}.", file)
            }
            SheetSplitError::Decode { path, message } => {
                format!("Failed to process {}: {}", path, message)
            }
            SheetSplitError::Write { path, source } => {
                format!("Failed to write {}: {}", path, source)
            }
            SheetSplitError::InvalidPattern { pattern, message } => {
                format!("Invalid sheet pattern '{}': {}", pattern, message)
            }
            SheetSplitError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            SheetSplitError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            SheetSplitError::Cancelled => "Operation was cancelled by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SheetSplitError::NoWorkbooksFound { searched_extensions, .. } => Some(format!(
                "Check the input folder. Only files ending in {} are picked up.",
                searched_extensions
                    .iter()
                    .map(|ext| format!(".{}", ext))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            SheetSplitError::NoMatchingSheets { .. } => Some(
                "Quote glob patterns so the shell does not expand them (e.g., --sheets 'Q*'). Matching is case-sensitive.".to_string()
            ),
            SheetSplitError::Decode { .. } => Some(
                "The file may be corrupt, password-protected or not a spreadsheet. Try opening and re-saving it.".to_string()
            ),
            SheetSplitError::Write { .. } => Some(
                "Ensure the output folder is writable and has free space.".to_string()
            ),
            SheetSplitError::InvalidPattern { .. } => Some(
                "Patterns support *, ? and [...] character classes (e.g., --sheets 'Q[1-4]' 'Summary*').".to_string()
            ),
            SheetSplitError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            SheetSplitError::InvalidPath { .. } => Some(
                "Make sure the input folder exists and is a directory.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for SheetSplitError {
    fn from(error: toml::de::Error) -> Self {
        SheetSplitError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetSplitError>;
