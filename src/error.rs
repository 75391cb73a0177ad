use thiserror::Error;

/// Errors raised while allocating or drawing into the canvas raster
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Errors that can occur while rendering or spooling a print job
#[derive(Error, Debug)]
pub enum PrintError {
    #[error("Nothing to print: the page has no pixels")]
    EmptyPage,

    #[error("Failed to encode page image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error while printing: {0}")]
    Io(#[from] std::io::Error),

    #[error("Print command `{command}` exited with {status}: {stderr}")]
    Spooler {
        command: String,
        status: String,
        stderr: String,
    },
}

pub type PrintResult<T> = Result<T, PrintError>;
