// Verdict - structured model validation with stable error paths
//
// Walks a model's object graph through a reflection capability trait,
// evaluates the rules declared on its members, and aggregates every failure
// into one machine-readable report a request pipeline can serialize as-is.

// Re-export the model surface
pub use verdict_core::*;

// Re-export the traversal and aggregation engine
pub use verdict_validation::*;

// Prelude for common imports
pub mod prelude {
    pub use verdict_core::{
        camel_case, Check, IntoValue, MemberInfo, MemberKind, MetaValue, Predicate, Reflect,
        ReflectList, Rule, TypeInfo, Value,
    };
    pub use verdict_validation::{
        extract, BuildError, ModelStateEntry, PathSegment, Property, PropertyNavigator,
        ValidationError, ValidationResponse, ValidationResponseBuilder,
    };
}
