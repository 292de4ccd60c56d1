//! Error adapter for converting IsogridError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Scene parse
//! errors keep their source text and are rendered with a labelled span.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use isogrid::{GridError, IsogridError};

/// Adapter for a TOML parse error with its source.
pub struct ParseAdapter<'a> {
    err: &'a toml::de::Error,
    src: &'a str,
}

impl<'a> ParseAdapter<'a> {
    pub fn new(err: &'a toml::de::Error, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid scene: {}", self.err.message())
    }
}

impl std::error::Error for ParseAdapter<'_> {}

impl MietteDiagnostic for ParseAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("isogrid::parse"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(self.err.message().to_string()),
            span,
        ))))
    }
}

/// Adapter for non-parse [`IsogridError`] variants.
pub struct ErrorAdapter<'a>(pub &'a IsogridError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            IsogridError::Io(_) => "isogrid::io",
            IsogridError::Parse { .. } => "isogrid::parse",
            IsogridError::Scene(_) => "isogrid::scene",
            IsogridError::Grid(err) => match err {
                GridError::OutOfBounds { .. } => "isogrid::out_of_bounds",
                GridError::AreaTaken { .. } => "isogrid::area_taken",
                GridError::InvalidOrientation { .. } => "isogrid::invalid_orientation",
                GridError::UnknownEntityKind(_) => "isogrid::unknown_entity_kind",
                GridError::UnknownEntity(_) => "isogrid::unknown_entity",
                GridError::AlreadyPlaced(_) => "isogrid::already_placed",
                GridError::InvalidConfig(_) => "isogrid::invalid_config",
            },
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            IsogridError::Grid(GridError::AreaTaken { .. }) => {
                "entities may not overlap; move one of them or remove it first"
            }
            IsogridError::Grid(GridError::InvalidOrientation { .. }) => {
                "add a sprite for this orientation to the kind, or pick another"
            }
            IsogridError::Grid(GridError::UnknownEntityKind(_)) => {
                "declare the kind under [kinds.<name>] in the scene"
            }
            IsogridError::Grid(GridError::InvalidConfig(_)) => {
                "grid dimensions and `depth.step` must be positive"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse error with source location information.
    Parse(ParseAdapter<'a>),
    /// Any other error, without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`IsogridError`] into the list of diagnostics to render.
pub fn to_reportables(err: &IsogridError) -> Vec<Reportable<'_>> {
    match err {
        IsogridError::Parse { err: parse_err, src } => {
            vec![Reportable::Parse(ParseAdapter::new(parse_err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
