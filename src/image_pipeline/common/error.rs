use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

fn at(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(": {}", path.display()),
        None => String::new(),
    }
}

fn in_filter(filter: &Option<String>) -> String {
    match filter {
        Some(filter) => format!(": {}", filter),
        None => String::new(),
    }
}

/// Failures of the BMP codec and of the file handling around it.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Cannot open file{}", at(.path))]
    OpenFileError {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read from file{}", at(.path))]
    ReadFileError {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write to file{}", at(.path))]
    WriteFileError {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    #[error("File not in an acceptable format ({reason}){}", at(.path))]
    WrongFileFormat {
        path: Option<PathBuf>,
        reason: String,
    },

    #[error("File is damaged ({reason}){}", at(.path))]
    DamagedFile {
        path: Option<PathBuf>,
        reason: String,
    },
}

impl FileError {
    pub fn read(source: io::Error) -> Self {
        FileError::ReadFileError { path: None, source }
    }

    pub fn write(source: io::Error) -> Self {
        FileError::WriteFileError { path: None, source }
    }

    pub fn wrong_format(reason: impl Into<String>) -> Self {
        FileError::WrongFileFormat { path: None, reason: reason.into() }
    }

    pub fn damaged(reason: impl Into<String>) -> Self {
        FileError::DamagedFile { path: None, reason: reason.into() }
    }

    /// Attaches the file name, keeping one that is already set.
    pub fn with_path(mut self, file: &Path) -> Self {
        let slot = match &mut self {
            FileError::OpenFileError { path, .. }
            | FileError::ReadFileError { path, .. }
            | FileError::WriteFileError { path, .. }
            | FileError::WrongFileFormat { path, .. }
            | FileError::DamagedFile { path, .. } => path,
        };
        if slot.is_none() {
            *slot = Some(file.to_path_buf());
        }
        self
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            FileError::OpenFileError { path, .. }
            | FileError::ReadFileError { path, .. }
            | FileError::WriteFileError { path, .. }
            | FileError::WrongFileFormat { path, .. }
            | FileError::DamagedFile { path, .. } => path.as_deref(),
        }
    }
}

/// Errors a filter reports on its own behalf.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Value {value} is prohibited in argument {argument}{}", in_filter(.filter))]
    ProhibitedValue {
        value: String,
        argument: &'static str,
        filter: Option<String>,
    },

    #[error("Filter crashed unexpectedly: {filter}")]
    BrokenFilter {
        filter: String,
        #[source]
        source: Box<ImageError>,
    },
}

impl FilterError {
    pub fn prohibited(value: impl ToString, argument: &'static str) -> Self {
        FilterError::ProhibitedValue {
            value: value.to_string(),
            argument,
            filter: None,
        }
    }

    /// Records which filter raised the error, keeping one that is already set.
    pub fn with_filter(mut self, name: &str) -> Self {
        if let FilterError::ProhibitedValue { filter, .. } = &mut self {
            if filter.is_none() {
                *filter = Some(name.to_string());
            }
        }
        self
    }
}

/// Everything that can go wrong while a filter touches an [`Image`](crate::image_pipeline::Image).
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Trying to access the pixel ({col}, {row}) in an image of size {width}x{height}")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("Trying to construct an image with incorrect argument(s)")]
    InvalidConstructor,

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    File(#[from] FileError),
}

/// Command line option errors of the `bmp-filter` binary.
#[derive(Error, Debug)]
pub enum OptionError {
    #[error("Output file not specified")]
    NoOutput,

    #[error("Expected option name: '-'")]
    NoOptionName,

    #[error("Unknown option: '{0}'")]
    UnknownOption(String),

    #[error("Too many arguments given (expected {expected}): '{option}'")]
    TooManyArguments { option: String, expected: usize },

    #[error("Too few arguments given (expected {expected}): '{option}'")]
    TooFewArguments { option: String, expected: usize },

    #[error("Argument '{argument}' in option '{option}' is not of type {expected_type}")]
    WrongType {
        argument: String,
        option: String,
        expected_type: &'static str,
    },

    #[error("Argument '{argument}' in option '{option}' is out of range of type {expected_type}")]
    ArgOutOfRange {
        argument: String,
        option: String,
        expected_type: &'static str,
    },
}

/// What a pipeline run surfaces to its caller.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File: {0}")]
    File(#[from] FileError),

    #[error("Filter: {0}")]
    Filter(#[from] FilterError),

    #[error("Option: {0}")]
    Option(#[from] OptionError),

    #[error("Invalid image dimensions: width={width}, height={height}")]
    InvalidDimensions { width: usize, height: usize },
}

pub type Result<T, E = ImageError> = std::result::Result<T, E>;
