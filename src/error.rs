use std::io::Write;
use strum_macros::Display;
use thiserror::Error;

#[derive(Debug, Display)]
pub enum ConfigType {
    #[strum(serialize = "Main config")]
    MAIN,
    #[strum(serialize = "Template")]
    TEMPLATE,
    #[strum(serialize = "Recent templates")]
    RECENT,
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("error processing args. Cause : {0}")]
    ArgsProcessingError(String),
    #[error("unable to create default configuration file in {0}")]
    ConfigError(String),
    #[error("unable to read configuration file {file:?}. Cause : {cause}")]
    ConfigReadError { file: String, cause: String },
    #[error("Error executing command. Cause : {0}")]
    CommandError(String),
    #[error("Invalid regex pattern: {pattern}")]
    InvalidRegex { pattern: String, cause: String },
    #[error("unable to parse {location} file {file:?}. Cause : {cause}")]
    SerdeTomlError {
        location: ConfigType,
        file: String,
        cause: String,
    },
    #[error("JSON parsing error: {0}")]
    JsonError(String),
    #[error(transparent)]
    Io(#[from] ::std::io::Error),
    #[error("template \"{0}\" not found")]
    TemplateNotFound(String),
    #[error("unable to read template file {file:?}. Cause : {cause}")]
    TemplateReadError { file: String, cause: String },
    #[error("unable to interpolate variable. Cause : {cause}")]
    InterpolationError { location: ConfigType, cause: String },
    #[error("error writing template. Cause : {0}")]
    TemplateWriteError(String),
    #[error("{0}")]
    Msg(String),
}

impl From<&'static str> for Error {
    fn from(s: &'static str) -> Self {
        Error::Msg(s.to_owned())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Msg(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::JsonError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn default_error_handler(error: &Error, output: &mut dyn Write) {
    use nu_ansi_term::Color::Red;

    match error {
        Error::Io(io_error) if io_error.kind() == ::std::io::ErrorKind::BrokenPipe => {
            ::std::process::exit(0);
        }
        Error::ConfigReadError { .. }
        | Error::SerdeTomlError { .. }
        | Error::InterpolationError { .. } => {
            writeln!(output, "{}: {}", Red.paint("[config error]"), error).ok();
        }
        Error::InvalidRegex { .. } => {
            writeln!(output, "{}: {}", Red.paint("[transform error]"), error).ok();
        }
        Error::TemplateNotFound(_)
        | Error::TemplateReadError { .. }
        | Error::TemplateWriteError(_) => {
            writeln!(output, "{}: {}", Red.paint("[template error]"), error).ok();
        }
        _ => {
            writeln!(output, "{}: {}", Red.paint("[clipform error]"), error).ok();
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_regex_message_names_pattern() {
        let error = Error::InvalidRegex {
            pattern: "[".to_string(),
            cause: "unclosed character class".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid regex pattern: [");
    }

    #[test]
    fn test_default_error_handler_prefixes() {
        let mut output = Vec::new();
        default_error_handler(&Error::TemplateNotFound("logs".to_string()), &mut output);
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("[template error]"));
        assert!(printed.contains("template \"logs\" not found"));
    }
}
