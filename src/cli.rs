//! Command line surface of the `bmp-filter` binary.
//!
//! clap handles the input and output paths; the filter list keeps the
//! single-dash `-name value...` grammar and is parsed here.

use std::num::IntErrorKind;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use tracing::debug;

use crate::image_pipeline::{
    BmpReader, ChalkFilter, ColorBurnFilter, ColorDodgeFilter, CropFilter, EdgeDetectionFilter,
    Filter, GaussianFilter, GrayscaleFilter, ImageReader, NegativeFilter, OptionError,
    PipelineError, SharpeningFilter, SketchFilter,
};

const FILTERS_HELP: &str = "\
Filters (applied left to right):
  -crop <width> <height>    Keep the top left width x height part of the image
  -gs                       Convert to grayscale
  -neg                      Convert to negative
  -sharp                    Sharpen
  -edge <threshold>         Detect edges; pixels brighter than threshold become white
  -blur <sigma>             Gaussian blur with standard deviation sigma
  -burn <path to image>     Color burn with the image at path; white leaves the image unchanged
  -dodge <path to image>    Color dodge with the image at path; black leaves the image unchanged
  -chalk <sigma>            Make the image look drawn on a chalk board
  -sketch <sigma>           Make the image look drawn with a pencil";

const SIZE_TYPE: &str = "size_t";
const FLOAT_TYPE: &str = "long double";

#[derive(Parser, Debug)]
#[command(
    name = "bmp-filter",
    version,
    about = "Applies filters to a 24-bit BMP image and saves the result",
    arg_required_else_help = true,
    after_help = FILTERS_HELP
)]
pub struct Cli {
    /// Log at debug level and print per-stage timings (RUST_LOG overrides)
    #[arg(long)]
    pub verbose: bool,

    /// Path to the input image
    pub input: PathBuf,

    /// Path to the output image
    pub output: Option<PathBuf>,

    /// Filter options, see below
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FILTERS")]
    pub filters: Vec<String>,
}

impl Cli {
    pub fn output(&self) -> Result<&PathBuf, OptionError> {
        self.output.as_ref().ok_or(OptionError::NoOutput)
    }
}

/// Takes the `expected` values following the option at `*i`.
fn values<'a>(
    tokens: &'a [String],
    i: &mut usize,
    expected: usize,
) -> Result<&'a [String], OptionError> {
    let option = *i;
    if option + expected >= tokens.len() {
        return Err(OptionError::TooFewArguments {
            option: tokens[option].clone(),
            expected,
        });
    }
    *i += expected;
    Ok(&tokens[option + 1..=option + expected])
}

fn parse_size(argument: &str, option: &str, expected: usize) -> Result<usize, OptionError> {
    let wrong_type = || OptionError::WrongType {
        argument: argument.to_string(),
        option: option.to_string(),
        expected_type: SIZE_TYPE,
    };
    let out_of_range = || OptionError::ArgOutOfRange {
        argument: argument.to_string(),
        option: option.to_string(),
        expected_type: SIZE_TYPE,
    };

    // A negative number is a value of the wrong type, any other dash token is
    // the next option.
    if let Some(magnitude) = argument.strip_prefix('-') {
        return Err(match magnitude.parse::<usize>() {
            Ok(_) => wrong_type(),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => out_of_range(),
            Err(_) => OptionError::TooFewArguments {
                option: option.to_string(),
                expected,
            },
        });
    }

    argument.parse::<usize>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => out_of_range(),
        _ => wrong_type(),
    })
}

fn parse_float(argument: &str, option: &str, expected: usize) -> Result<f64, OptionError> {
    match argument.parse::<f64>() {
        Ok(value) if value.is_infinite() => Err(OptionError::ArgOutOfRange {
            argument: argument.to_string(),
            option: option.to_string(),
            expected_type: FLOAT_TYPE,
        }),
        Ok(value) => Ok(value),
        Err(_) if argument.starts_with('-') => Err(OptionError::TooFewArguments {
            option: option.to_string(),
            expected,
        }),
        Err(_) => Err(OptionError::WrongType {
            argument: argument.to_string(),
            option: option.to_string(),
            expected_type: FLOAT_TYPE,
        }),
    }
}

fn single_float(tokens: &[String], i: &mut usize) -> Result<f64, OptionError> {
    let option = tokens[*i].as_str();
    let args = values(tokens, i, 1)?;
    parse_float(&args[0], option, 1)
}

/// Parses the filter options into filters, in command line order.
///
/// `-burn` and `-dodge` read their second image right away, so a missing or
/// broken blend file is reported here as a [`PipelineError::File`].
pub fn parse_filters(tokens: &[String]) -> Result<Vec<Box<dyn Filter>>, PipelineError> {
    parse_filters_with(&BmpReader, tokens)
}

pub fn parse_filters_with<R: ImageReader>(
    reader: &R,
    tokens: &[String],
) -> Result<Vec<Box<dyn Filter>>, PipelineError> {
    let mut filters: Vec<Box<dyn Filter>> = Vec::new();
    let mut option = 0;
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let last = option;
        option = i;
        match token {
            "-crop" => {
                let args = values(tokens, &mut i, 2)?;
                let width = parse_size(&args[0], token, 2)?;
                let height = parse_size(&args[1], token, 2)?;
                filters.push(Box::new(CropFilter::new(width, height)));
            }
            "-gs" => filters.push(Box::new(GrayscaleFilter)),
            "-neg" => filters.push(Box::new(NegativeFilter)),
            "-sharp" => filters.push(Box::new(SharpeningFilter::new())),
            "-edge" => {
                let threshold = single_float(tokens, &mut i)?;
                filters.push(Box::new(EdgeDetectionFilter::new(threshold)));
            }
            "-blur" => {
                let sigma = single_float(tokens, &mut i)?;
                filters.push(Box::new(GaussianFilter::new(sigma)));
            }
            "-burn" | "-dodge" => {
                let path = &values(tokens, &mut i, 1)?[0];
                let second = Rc::new(reader.read_file(path.as_ref())?);
                if token == "-burn" {
                    filters.push(Box::new(ColorBurnFilter::new(second)));
                } else {
                    filters.push(Box::new(ColorDodgeFilter::new(second)));
                }
            }
            "-chalk" => {
                let sigma = single_float(tokens, &mut i)?;
                filters.push(Box::new(ChalkFilter::new(sigma)));
            }
            "-sketch" => {
                let sigma = single_float(tokens, &mut i)?;
                filters.push(Box::new(SketchFilter::new(sigma)));
            }
            "-" => return Err(OptionError::NoOptionName.into()),
            "" => {}
            _ if token.starts_with('-') || i == 0 => {
                return Err(OptionError::UnknownOption(token.to_string()).into());
            }
            _ => {
                return Err(OptionError::TooManyArguments {
                    option: tokens[last].clone(),
                    expected: i - last - 1,
                }
                .into());
            }
        }
        i += 1;
    }

    debug!(
        "Parsed filters: {:?}",
        filters.iter().map(|f| f.name()).collect::<Vec<_>>()
    );
    Ok(filters)
}
