use std::fmt;

#[derive(Debug)]
pub enum AuditError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Required column absent from the source header row.
    MissingColumn { column: String, found: Vec<String> },
    /// No charge lines to audit.
    EmptyInput,
    /// IO error (file read, CSV write, etc.).
    Io(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::MissingColumn { column, found } => {
                write!(f, "missing column '{column}' (found: {})", found.join(", "))
            }
            Self::EmptyInput => write!(f, "no charge lines in input"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AuditError {}
