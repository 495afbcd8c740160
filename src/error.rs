use thiserror::Error;

/// Every way a conversion run can fail. All variants are fatal for the run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Error opening input file '{path}': {source}")]
    OpenInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error creating output file '{path}': {source}")]
    CreateOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading from '{path}': {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing to '{path}': {source}")]
    WriteOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed line {line} in '{path}': expected {expected} fields, found {found}")]
    MalformedLine {
        path: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid value '{value}' for field '{field}' on line {line} of '{path}'")]
    InvalidField {
        path: String,
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Line {line} of '{path}' exceeds the maximum length of {max} bytes")]
    LineTooLong {
        path: String,
        line: usize,
        max: usize,
    },

    #[error("Line {line} of '{path}' is not valid UTF-8")]
    InvalidUtf8 { path: String, line: usize },
}

impl AppError {
    /// Process exit status for this error.
    ///
    /// Open failures carry the OS error code; everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::OpenInput { source, .. } | AppError::CreateOutput { source, .. } => source
                .raw_os_error()
                .filter(|&code| code != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }
}
