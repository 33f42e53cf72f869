//! Model surface for the Verdict validation engine.
//!
//! A model exposes itself through the [`Reflect`] capability trait: an
//! ordered, cached descriptor of its declared members ([`TypeInfo`]) plus
//! indexed access to their current values as type-erased [`Value`]s. Rules
//! ([`Rule`]) attach to members through the descriptor and carry both their
//! predicate and the configuration data that ends up in error metadata.
//!
//! # Examples
//!
//! ```
//! use once_cell::sync::Lazy;
//! use verdict_core::{IntoValue, MemberInfo, Reflect, Rule, TypeInfo, Value};
//!
//! struct Signup {
//!     name: Option<String>,
//!     age: i64,
//! }
//!
//! impl Reflect for Signup {
//!     fn type_info(&self) -> &'static TypeInfo {
//!         static INFO: Lazy<TypeInfo> = Lazy::new(|| {
//!             TypeInfo::new([
//!                 MemberInfo::scalar("Name").with_rules([Rule::required()]),
//!                 MemberInfo::scalar("Age").with_rules([Rule::range(18, 130)]),
//!             ])
//!         });
//!         &INFO
//!     }
//!
//!     fn member(&self, index: usize) -> Value<'_> {
//!         match index {
//!             0 => self.name.as_value(),
//!             1 => self.age.as_value(),
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let model = Signup { name: None, age: 44 };
//! let info = model.type_info();
//! assert_eq!(info.members().len(), 2);
//! assert!(!info.members()[0].rules()[0].is_valid(&model.member(0), &model));
//! assert!(info.members()[1].rules()[0].is_valid(&model.member(1), &model));
//! ```

mod reflect;
mod rules;
mod value;

pub use reflect::*;
pub use rules::*;
pub use value::*;
