//! Rich diagnostic error types for the sema-tawy engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the sema-tawy engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum SemaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ident(#[from] IdentError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Identifier errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum IdentError {
    #[error("cannot canonicalize {raw:?}: no legal identifier characters")]
    #[diagnostic(
        code(sema::ident::invalid_input),
        help(
            "Identifiers keep ASCII alphanumerics plus '_', '-' and '.'; every \
             other character is substituted away. Provide a raw value containing \
             at least one legal character, or prepend a disambiguating field \
             (e.g. a sequence counter) before canonicalizing."
        )
    )]
    InvalidInput { raw: String },

    #[error("invalid namespace prefix {prefix:?}")]
    #[diagnostic(
        code(sema::ident::invalid_namespace),
        help(
            "Namespace prefixes must be non-empty and restricted to ASCII \
             alphanumerics plus '-' and '.'. They scope identifiers to one \
             source domain (e.g. \"fda\", \"chem\", \"sensor\")."
        )
    )]
    InvalidNamespace { prefix: String },

    #[error("local name {local:?} is not canonical")]
    #[diagnostic(
        code(sema::ident::invalid_local),
        help(
            "Local names assembled from parts must already be canonical. \
             Run the raw value through `canonicalize` instead of building the \
             identifier by hand."
        )
    )]
    InvalidLocal { local: String },
}

// ---------------------------------------------------------------------------
// Triple builder errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("record is missing key field {field:?}")]
    #[diagnostic(
        code(sema::build::missing_key_field),
        help(
            "The field map names this field as (part of) the subject identifier, \
             so no triples can be built without it. Either supply the field in \
             the record or change the field map's subject fields."
        )
    )]
    MissingKeyField { field: String },

    #[error("field {field:?} holds a nested {kind} value, which cannot become a literal")]
    #[diagnostic(
        code(sema::build::unsupported_value),
        help(
            "Literal objects must be scalars (string, number, boolean) or flat \
             arrays of scalars. Flatten the record before handing it to the \
             builder."
        )
    )]
    UnsupportedValue { field: String, kind: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ident(#[from] IdentError),
}

// ---------------------------------------------------------------------------
// Serialization codec errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CodecError {
    #[error("malformed graph serialization: {message}")]
    #[diagnostic(
        code(sema::codec::malformed),
        help(
            "The input could not be parsed back into well-formed triples. It \
             must be Turtle produced by this engine, with every term under the \
             engine's identifier namespace scheme. Re-serialize the source \
             store, or check the file for truncation."
        )
    )]
    MalformedSerialization { message: String },

    #[error("failed to serialize graph: {message}")]
    #[diagnostic(
        code(sema::codec::serialize),
        help("The Turtle writer failed mid-stream. This usually indicates an I/O problem.")
    )]
    Serialize { message: String },
}

// ---------------------------------------------------------------------------
// Source adapter errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    #[error("fetch failed for {url}: {message}")]
    #[diagnostic(
        code(sema::source::fetch),
        help(
            "The HTTP request did not succeed after the configured retries. \
             Check network connectivity and the endpoint URL; public APIs may \
             also be rate-limiting."
        )
    )]
    Fetch { url: String, message: String },

    #[error("unexpected response shape in {context}: {message}")]
    #[diagnostic(
        code(sema::source::unexpected_shape),
        help(
            "The response parsed as JSON but did not contain the fields this \
             adapter expects. The upstream API schema may have changed."
        )
    )]
    UnexpectedShape { context: String, message: String },

    #[error("invalid series parameters: {message}")]
    #[diagnostic(
        code(sema::source::series),
        help("Check the sensor series settings (start timestamp, reading count) in the config.")
    )]
    Series { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ident(#[from] IdentError),
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    #[diagnostic(
        code(sema::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    #[diagnostic(
        code(sema::config::parse),
        help("Check the TOML syntax and field names against the documented config schema.")
    )]
    Parse { path: String, message: String },
}

/// Convenience alias for functions returning sema-tawy results.
pub type SemaResult<T> = std::result::Result<T, SemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_error_converts_to_sema_error() {
        let err = IdentError::InvalidInput { raw: "  ".into() };
        let sema: SemaError = err.into();
        assert!(matches!(sema, SemaError::Ident(IdentError::InvalidInput { .. })));
    }

    #[test]
    fn build_error_wraps_ident_error() {
        let ident = IdentError::InvalidNamespace { prefix: "".into() };
        let build: BuildError = ident.into();
        assert!(matches!(build, BuildError::Ident(IdentError::InvalidNamespace { .. })));
    }

    #[test]
    fn source_error_wraps_build_error() {
        let build = BuildError::MissingKeyField {
            field: "product_description".into(),
        };
        let source: SourceError = build.into();
        assert!(matches!(
            source,
            SourceError::Build(BuildError::MissingKeyField { .. })
        ));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = BuildError::MissingKeyField {
            field: "timestamp".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("timestamp"));

        let err = CodecError::MalformedSerialization {
            message: "triple has only two positions".into(),
        };
        assert!(format!("{err}").contains("two positions"));
    }
}
