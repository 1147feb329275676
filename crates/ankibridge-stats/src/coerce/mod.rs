//! Validation helpers for tool parameters sent by lenient callers.
//!
//! MCP clients driven by language models often send arrays and objects
//! JSON-encoded inside strings. These helpers accept either form and report
//! failures per parameter, so a tool can reject bad input before doing any
//! work.

mod lenient;
mod params;

pub use lenient::{
    LenientOptions, ParseFailure, ParseOutcome, looks_like_json, normalize_smart_quotes,
    parse_json_leniently,
};
pub use params::{
    ArrayBounds, ValidationError, array_param, lenient_param, lenient_param_with, object_param,
    record_param,
};
