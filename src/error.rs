use thiserror::Error;

/// Errors produced while building or writing a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Style '{0}' is not defined")]
    UnknownStyle(String),

    #[error("Table style '{0}' is not defined")]
    UnknownTableStyle(String),

    #[error("Invalid table data: {0}")]
    InvalidTable(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl From<lopdf::Error> for DocumentError {
    fn from(err: lopdf::Error) -> Self {
        DocumentError::Pdf(err.to_string())
    }
}
