// Depth-first traversal over a model's declared members

use verdict_core::{camel_case, MemberKind, Reflect, ReflectList, Rule, TypeInfo, Value};

use crate::PathSegment;

/// One rule-bearing member surfaced by the navigator: the rules attached to
/// it, its current value, and a snapshot of its path from the root.
pub struct Property<'a> {
    rules: &'a [Rule],
    value: Value<'a>,
    path: Vec<PathSegment>,
    owner: &'a dyn Reflect,
}

impl<'a> Property<'a> {
    pub fn rules(&self) -> &'a [Rule] {
        self.rules
    }

    pub fn value(&self) -> Value<'a> {
        self.value
    }

    /// Root-to-leaf path of the member, segments already camel-cased.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// The object this member was read from. Sibling-comparing rules resolve
    /// their other operand through it.
    pub fn owner(&self) -> &'a dyn Reflect {
        self.owner
    }
}

/// One level of the traversal: a cursor into an object's declared member
/// list, or into a collection's elements. The collection cursor doubles as
/// the zero-based element index, so index state is scoped to its frame.
enum Frame<'a> {
    Object {
        owner: &'a dyn Reflect,
        info: &'static TypeInfo,
        cursor: usize,
        pushed_segment: bool,
    },
    Collection {
        list: &'a dyn ReflectList,
        cursor: usize,
    },
}

/// Walks every declared member reachable from a root object, depth-first,
/// yielding a [`Property`] for each member that carries rules.
///
/// Members without rules are not yielded but are still descended into, so
/// annotated descendants behind them keep their full path. Null nested
/// objects and null collections are never descended. The walk is lazy and
/// non-restartable; there is no cycle detection, so a self-referential model
/// will not terminate.
pub struct PropertyNavigator<'a> {
    frames: Vec<Frame<'a>>,
    path: Vec<PathSegment>,
}

impl<'a> PropertyNavigator<'a> {
    pub fn new(model: &'a dyn Reflect) -> Self {
        Self {
            frames: vec![Frame::Object {
                owner: model,
                info: model.type_info(),
                cursor: 0,
                pushed_segment: false,
            }],
            path: Vec::new(),
        }
    }

    /// Advances to the next rule-bearing member. Returns `None` once every
    /// frame is exhausted.
    pub fn read(&mut self) -> Option<Property<'a>> {
        loop {
            let top = self.frames.len().checked_sub(1)?;
            match &mut self.frames[top] {
                Frame::Object {
                    owner,
                    info,
                    cursor,
                    ..
                } => {
                    if *cursor == info.members().len() {
                        self.pop_frame();
                        continue;
                    }
                    let index = *cursor;
                    *cursor += 1;
                    let (owner, info) = (*owner, *info);

                    let member = &info.members()[index];
                    let value = owner.member(index);
                    let surfaced = if member.rules().is_empty() {
                        None
                    } else {
                        let mut path = self.path.clone();
                        path.push(PathSegment::Key(camel_case(member.name())));
                        Some(Property {
                            rules: member.rules(),
                            value,
                            path,
                            owner,
                        })
                    };

                    // The descent decision applies whether or not the member
                    // was surfaced.
                    self.descend(member.kind(), member.name(), value);

                    if let Some(property) = surfaced {
                        tracing::trace!(path = ?property.path, "property surfaced");
                        return Some(property);
                    }
                }
                Frame::Collection { list, cursor } => {
                    if *cursor == list.len() {
                        self.pop_frame();
                        continue;
                    }
                    let index = *cursor;
                    *cursor += 1;
                    let list = *list;

                    // Elements are never surfaced themselves; object elements
                    // are entered as a fresh root under their index.
                    if let Value::Object(element) = list.get(index) {
                        self.path.push(PathSegment::Index(index));
                        self.frames.push(Frame::Object {
                            owner: element,
                            info: element.type_info(),
                            cursor: 0,
                            pushed_segment: true,
                        });
                    }
                }
            }
        }
    }

    fn descend(&mut self, kind: MemberKind, name: &str, value: Value<'a>) {
        match (kind, value) {
            (MemberKind::Scalar, _) => {}
            (MemberKind::Collection, Value::List(list)) => {
                self.path.push(PathSegment::Key(camel_case(name)));
                self.frames.push(Frame::Collection { list, cursor: 0 });
            }
            (MemberKind::Object, Value::Object(object)) => {
                self.path.push(PathSegment::Key(camel_case(name)));
                self.frames.push(Frame::Object {
                    owner: object,
                    info: object.type_info(),
                    cursor: 0,
                    pushed_segment: true,
                });
            }
            // Null nested objects and null collections contribute nothing.
            _ => {}
        }
    }

    fn pop_frame(&mut self) {
        let pushed_segment = match self.frames.pop() {
            Some(Frame::Object { pushed_segment, .. }) => pushed_segment,
            Some(Frame::Collection { .. }) => true,
            None => false,
        };
        if pushed_segment {
            self.path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use verdict_core::{IntoValue, MemberInfo};

    fn key(name: &str) -> PathSegment {
        PathSegment::Key(name.to_string())
    }

    fn idx(index: usize) -> PathSegment {
        PathSegment::Index(index)
    }

    fn read(model: &dyn Reflect) -> Vec<Property<'_>> {
        let mut navigator = PropertyNavigator::new(model);
        let mut properties = Vec::new();
        while let Some(property) = navigator.read() {
            properties.push(property);
        }
        properties
    }

    struct Flat1 {
        first: i64,
    }

    impl Reflect for Flat1 {
        fn type_info(&self) -> &'static TypeInfo {
            static INFO: Lazy<TypeInfo> = Lazy::new(|| {
                TypeInfo::new([MemberInfo::scalar("First")
                    .with_rules([Rule::required(), Rule::max_length(3)])])
            });
            &INFO
        }

        fn member(&self, index: usize) -> Value<'_> {
            match index {
                0 => self.first.as_value(),
                _ => Value::Null,
            }
        }
    }

    struct Flat2 {
        first: i64,
        second: Option<String>,
    }

    impl Reflect for Flat2 {
        fn type_info(&self) -> &'static TypeInfo {
            static INFO: Lazy<TypeInfo> = Lazy::new(|| {
                TypeInfo::new([
                    MemberInfo::scalar("First").with_rules([Rule::required()]),
                    MemberInfo::scalar("Second"),
                ])
            });
            &INFO
        }

        fn member(&self, index: usize) -> Value<'_> {
            match index {
                0 => self.first.as_value(),
                1 => self.second.as_value(),
                _ => Value::Null,
            }
        }
    }

    struct Nested1 {
        zero: Option<String>,
        zero2: Option<String>,
        nested_model1: Flat2,
        third: Option<String>,
        nested_model2: Flat2,
    }

    impl Reflect for Nested1 {
        fn type_info(&self) -> &'static TypeInfo {
            static INFO: Lazy<TypeInfo> = Lazy::new(|| {
                TypeInfo::new([
                    MemberInfo::scalar("Zero").with_rules([Rule::required()]),
                    MemberInfo::scalar("Zero2"),
                    MemberInfo::object("NestedModel1"),
                    MemberInfo::scalar("Third").with_rules([Rule::required()]),
                    MemberInfo::object("NestedModel2").with_rules([Rule::required()]),
                ])
            });
            &INFO
        }

        fn member(&self, index: usize) -> Value<'_> {
            match index {
                0 => self.zero.as_value(),
                1 => self.zero2.as_value(),
                2 => Value::Object(&self.nested_model1),
                3 => self.third.as_value(),
                4 => Value::Object(&self.nested_model2),
                _ => Value::Null,
            }
        }
    }

    struct CamelCase {
        this_should_be_camel_case: Option<String>,
    }

    impl Reflect for CamelCase {
        fn type_info(&self) -> &'static TypeInfo {
            static INFO: Lazy<TypeInfo> = Lazy::new(|| {
                TypeInfo::new([
                    MemberInfo::scalar("ThisShouldBeCamelCase").with_rules([Rule::required()])
                ])
            });
            &INFO
        }

        fn member(&self, index: usize) -> Value<'_> {
            match index {
                0 => self.this_should_be_camel_case.as_value(),
                _ => Value::Null,
            }
        }
    }

    struct NullableModel {
        value: Option<i64>,
    }

    impl Reflect for NullableModel {
        fn type_info(&self) -> &'static TypeInfo {
            static INFO: Lazy<TypeInfo> = Lazy::new(|| {
                TypeInfo::new([MemberInfo::scalar("Value").with_rules([Rule::required()])])
            });
            &INFO
        }

        fn member(&self, index: usize) -> Value<'_> {
            match index {
                0 => self.value.as_value(),
                _ => Value::Null,
            }
        }
    }

    struct ClassProperty {
        nullable: NullableModel,
    }

    impl Reflect for ClassProperty {
        fn type_info(&self) -> &'static TypeInfo {
            static INFO: Lazy<TypeInfo> = Lazy::new(|| {
                TypeInfo::new([MemberInfo::object("Nullable").with_rules([Rule::required()])])
            });
            &INFO
        }

        fn member(&self, index: usize) -> Value<'_> {
            match index {
                0 => Value::Object(&self.nullable),
                _ => Value::Null,
            }
        }
    }

    struct CollectionProperty {
        flats: Option<Vec<Box<dyn Reflect>>>,
    }

    impl Reflect for CollectionProperty {
        fn type_info(&self) -> &'static TypeInfo {
            static INFO: Lazy<TypeInfo> = Lazy::new(|| {
                TypeInfo::new([MemberInfo::collection("Flats")])
            });
            &INFO
        }

        fn member(&self, index: usize) -> Value<'_> {
            match index {
                0 => match &self.flats {
                    Some(flats) => Value::List(flats),
                    None => Value::Null,
                },
                _ => Value::Null,
            }
        }
    }

    struct NullProperty {
        the_property: Option<Flat1>,
    }

    impl Reflect for NullProperty {
        fn type_info(&self) -> &'static TypeInfo {
            static INFO: Lazy<TypeInfo> = Lazy::new(|| {
                TypeInfo::new([MemberInfo::object("TheProperty")])
            });
            &INFO
        }

        fn member(&self, index: usize) -> Value<'_> {
            match index {
                0 => match &self.the_property {
                    Some(property) => Value::Object(property),
                    None => Value::Null,
                },
                _ => Value::Null,
            }
        }
    }

    #[test]
    fn reads_properties_from_a_flat_model() {
        let model = Flat1 { first: 12 };
        let result = read(&model);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].rules().len(), 2);
        assert_eq!(result[0].rules()[0].name(), "Required");
        assert_eq!(result[0].rules()[1].name(), "MaxLength");
        assert_eq!(result[0].value(), Value::Int(12));
        assert_eq!(result[0].path().to_vec(), vec![key("first")]);
    }

    #[test]
    fn reads_only_members_with_rules() {
        let model = Flat2 {
            first: 12,
            second: Some("Ali".to_string()),
        };
        let result = read(&model);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].rules().len(), 1);
        assert_eq!(result[0].value(), Value::Int(12));
        assert_eq!(result[0].path().to_vec(), vec![key("first")]);
    }

    #[test]
    fn makes_path_segments_camel_case() {
        let model = CamelCase {
            this_should_be_camel_case: None,
        };
        let result = read(&model);

        assert_eq!(
            result[0].path().to_vec(),
            vec![key("thisShouldBeCamelCase")]
        );
    }

    #[test]
    fn reads_members_of_nested_models() {
        let model = Nested1 {
            zero: Some("zero".to_string()),
            zero2: None,
            nested_model1: Flat2 {
                first: 11,
                second: Some("val-11".to_string()),
            },
            third: Some("third".to_string()),
            nested_model2: Flat2 {
                first: 22,
                second: Some("val-22".to_string()),
            },
        };
        let result = read(&model);

        assert_eq!(result.len(), 5);

        assert_eq!(result[0].value(), Value::Str("zero"));
        assert_eq!(result[0].path().to_vec(), vec![key("zero")]);

        assert_eq!(result[1].value(), Value::Int(11));
        assert_eq!(
            result[1].path().to_vec(),
            vec![key("nestedModel1"), key("first")]
        );

        assert_eq!(result[2].value(), Value::Str("third"));
        assert_eq!(result[2].path().to_vec(), vec![key("third")]);

        assert!(matches!(result[3].value(), Value::Object(_)));
        assert_eq!(result[3].path().to_vec(), vec![key("nestedModel2")]);

        assert_eq!(result[4].value(), Value::Int(22));
        assert_eq!(
            result[4].path().to_vec(),
            vec![key("nestedModel2"), key("first")]
        );
    }

    #[test]
    fn skips_null_nested_objects() {
        let model = NullProperty { the_property: None };
        assert!(read(&model).is_empty());
    }

    #[test]
    fn reads_nullable_scalars() {
        let model = NullableModel { value: None };
        let result = read(&model);

        assert_eq!(result.len(), 1);
        assert!(result[0].value().is_null());
        assert_eq!(result[0].path().to_vec(), vec![key("value")]);
    }

    #[test]
    fn reads_object_members_and_their_children() {
        let model = ClassProperty {
            nullable: NullableModel { value: Some(12) },
        };
        let result = read(&model);

        assert_eq!(result.len(), 2);

        assert!(matches!(result[0].value(), Value::Object(_)));
        assert_eq!(result[0].path().to_vec(), vec![key("nullable")]);

        assert_eq!(result[1].value(), Value::Int(12));
        assert_eq!(
            result[1].path().to_vec(),
            vec![key("nullable"), key("value")]
        );
    }

    #[test]
    fn reads_collections_with_indexed_paths() {
        let model = CollectionProperty {
            flats: Some(vec![
                Box::new(Flat2 {
                    first: 1,
                    second: Some("First".to_string()),
                }),
                Box::new(CamelCase {
                    this_should_be_camel_case: Some(String::new()),
                }),
            ]),
        };
        let result = read(&model);

        assert_eq!(result.len(), 2);

        assert_eq!(result[0].value(), Value::Int(1));
        assert_eq!(
            result[0].path().to_vec(),
            vec![key("flats"), idx(0), key("first")]
        );

        assert_eq!(result[1].value(), Value::Str(""));
        assert_eq!(
            result[1].path().to_vec(),
            vec![key("flats"), idx(1), key("thisShouldBeCamelCase")]
        );
    }

    #[test]
    fn skips_null_collections() {
        let model = CollectionProperty { flats: None };
        assert!(read(&model).is_empty());
    }

    #[test]
    fn sibling_collections_restart_their_indices() {
        struct TwoCollections {
            left: Vec<Box<dyn Reflect>>,
            right: Vec<Box<dyn Reflect>>,
        }

        impl Reflect for TwoCollections {
            fn type_info(&self) -> &'static TypeInfo {
                static INFO: Lazy<TypeInfo> = Lazy::new(|| {
                    TypeInfo::new([
                        MemberInfo::collection("Left"),
                        MemberInfo::collection("Right"),
                    ])
                });
                &INFO
            }

            fn member(&self, index: usize) -> Value<'_> {
                match index {
                    0 => Value::List(&self.left),
                    1 => Value::List(&self.right),
                    _ => Value::Null,
                }
            }
        }

        let model = TwoCollections {
            left: vec![Box::new(Flat1 { first: 1 })],
            right: vec![Box::new(Flat1 { first: 2 })],
        };
        let result = read(&model);

        assert_eq!(result.len(), 2);
        assert_eq!(
            result[0].path().to_vec(),
            vec![key("left"), idx(0), key("first")]
        );
        assert_eq!(
            result[1].path().to_vec(),
            vec![key("right"), idx(0), key("first")]
        );
    }

    #[test]
    fn scalar_collection_elements_are_not_surfaced() {
        struct Tags {
            tags: Vec<String>,
        }

        impl Reflect for Tags {
            fn type_info(&self) -> &'static TypeInfo {
                static INFO: Lazy<TypeInfo> = Lazy::new(|| {
                    TypeInfo::new([MemberInfo::collection("Tags")])
                });
                &INFO
            }

            fn member(&self, index: usize) -> Value<'_> {
                match index {
                    0 => Value::List(&self.tags),
                    _ => Value::Null,
                }
            }
        }

        let model = Tags {
            tags: vec!["a".to_string(), "b".to_string()],
        };
        assert!(read(&model).is_empty());
    }
}
