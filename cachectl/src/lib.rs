#![warn(missing_docs)]
//! # cachectl
//!
//! A small rule engine for the HTTP `Cache-Control` header, in both
//! directions.
//!
//! - **Parse** a raw value into ordered [`ParsedDirective`]s and validate it
//!   ([`parse`], [`parse_lenient`]).
//! - **Explain** directives in prose with an overall [`Summary`]
//!   ([`explain()`], [`explain_header`], [`CacheControl::explain`]).
//! - **Generate** a canonical value from caching intents
//!   ([`generate`], [`GenerationConfig`]).
//!
//! Both directions share one vocabulary, the closed set of directives in the
//! [`registry`]. Directives outside that set are preserved and described as
//! unknown rather than rejected.
//!
//! Every operation is a synchronous pure function of its input and is cheap
//! enough to run on each keystroke of an editor.
//!
//! ## Example
//!
//! ```
//! use cachectl::{Cacheability, GenerationConfig, TimeUnit, TimedDirective};
//!
//! let config = GenerationConfig::default()
//!     .cacheability(Cacheability::Public)
//!     .max_age(TimedDirective::new(2, TimeUnit::Hours));
//! let header = cachectl::generate(&config);
//! assert_eq!(header, "public, max-age=7200");
//!
//! let parsed = cachectl::parse(&header).unwrap();
//! assert!(parsed.explain().ends_with(
//!     "Summary: The response may be cached and reused without revalidation for 2 hours until it becomes stale."
//! ));
//! ```

pub mod directive;
pub mod duration;
pub mod error;
pub mod explain;
pub mod generator;
pub mod parser;
pub mod registry;

pub use directive::{DirectiveValue, ParsedDirective};
pub use duration::{HumanDuration, humanize_seconds};
pub use error::{ErrorKind, ValidationError, ValidationErrors};
pub use explain::{
    Summary, explain, explain_directive, explain_directives, explain_header, summarize,
};
pub use generator::{Cacheability, GenerationConfig, TimeUnit, TimedDirective, generate};
pub use parser::{CacheControl, parse, parse_lenient};
pub use registry::{Applicability, Category, DirectiveDefinition, DirectiveKind};
