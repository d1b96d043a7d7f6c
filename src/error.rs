use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("no rows with at least 3 columns found; expected format: Day<TAB>Planned<TAB>Made")]
    NoRows,

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
