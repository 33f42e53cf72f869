//! Graph-walking model validation for Verdict.
//!
//! Walks an arbitrary object graph through the `verdict-core` reflection
//! surface, evaluates the rules declared on its members, and aggregates the
//! failures into a structured report with a stable path per error. The
//! builder also ingests the host binding layer's conversion failures, so a
//! request pipeline can answer with the same envelope whether the body
//! failed to bind or failed to validate.
//!
//! # Examples
//!
//! ```
//! use once_cell::sync::Lazy;
//! use verdict_core::{IntoValue, MemberInfo, Reflect, Rule, TypeInfo, Value};
//! use verdict_validation::ValidationResponseBuilder;
//!
//! struct Profile {
//!     summary: Option<String>,
//! }
//!
//! impl Reflect for Profile {
//!     fn type_info(&self) -> &'static TypeInfo {
//!         static INFO: Lazy<TypeInfo> = Lazy::new(|| {
//!             TypeInfo::new([MemberInfo::scalar("Summary").with_rules([Rule::required()])])
//!         });
//!         &INFO
//!     }
//!
//!     fn member(&self, index: usize) -> Value<'_> {
//!         match index {
//!             0 => self.summary.as_value(),
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let mut builder = ValidationResponseBuilder::new();
//! builder.build_from_model(&Profile { summary: None })?;
//!
//! assert!(builder.invalid());
//! let report = builder.result().unwrap();
//! assert_eq!(report.title(), "Validation");
//! assert_eq!(report.errors()[0].error(), "required");
//! # Ok::<(), verdict_validation::BuildError>(())
//! ```

mod builder;
mod errors;
mod extractor;
mod navigator;
mod response;

pub use builder::*;
pub use errors::*;
pub use extractor::*;
pub use navigator::*;
pub use response::*;
