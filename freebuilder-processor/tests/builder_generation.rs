//! Behaviour tests for builder generation.
//!
//! Each test builds a small type model by hand, runs the pipeline and
//! checks characteristic lines of the generated source.

use freebuilder_core::{FeatureSet, GeneratedFile, SourceLevel};
use freebuilder_model::{
    Annotation, ClassName, ConstructorDecl, MethodDecl, ModelIndex, Modifiers, TypeDecl, TypeKind,
    TypeRef, Visibility,
};
use freebuilder_processor::{
    FREEBUILDER_ANNOTATION, GeneratedBuilder, PropertyCodeGenerator,
    pipeline::{Pipeline, Severity},
};

const PACKAGE: &str = "com.example";

fn datatype(name: &str, accessors: Vec<MethodDecl>) -> TypeDecl {
    let mut decl = TypeDecl::new(ClassName::new(PACKAGE, name), TypeKind::Interface);
    decl.annotations.push(Annotation::new(
        ClassName::parse(FREEBUILDER_ANNOTATION).expect("valid annotation name"),
    ));
    decl.member_types.push("Builder".to_string());
    decl.methods = accessors;
    decl
}

/// `public static class Builder extends <Name>_Builder {}`.
fn user_builder(name: &str) -> TypeDecl {
    let mut builder = TypeDecl::new(ClassName::new(PACKAGE, name).nested("Builder"), TypeKind::Class);
    builder.modifiers.is_static = true;
    builder.superclass = Some(TypeRef::class(ClassName::new(
        PACKAGE,
        format!("{}_Builder", name),
    )));
    builder
}

fn list_of(element: TypeRef) -> TypeRef {
    TypeRef::generic(ClassName::java_util("List"), vec![element])
}

fn set_of(element: TypeRef) -> TypeRef {
    TypeRef::generic(ClassName::java_util("Set"), vec![element])
}

fn integer() -> TypeRef {
    TypeRef::class(ClassName::java_lang("Integer"))
}

fn guava() -> FeatureSet {
    FeatureSet::new(SourceLevel::Java8, true)
}

/// A concrete public method on a user builder returning the builder.
fn builder_override(owner: &str, name: &str, params: Vec<TypeRef>) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        params,
        return_type: TypeRef::class(ClassName::new(PACKAGE, owner).nested("Builder")),
        modifiers: Modifiers::public(),
        annotations: Vec::new(),
    }
}

fn nullable(mut method: MethodDecl) -> MethodDecl {
    method
        .annotations
        .push(Annotation::new(ClassName::new("javax.annotation", "Nullable")));
    method
}

fn person() -> TypeDecl {
    datatype(
        "Person",
        vec![
            MethodDecl::accessor("getName", TypeRef::string()),
            MethodDecl::accessor("getAge", TypeRef::int()),
        ],
    )
}

fn run(model: &ModelIndex, features: FeatureSet) -> Vec<GeneratedBuilder> {
    let mut ctx = Pipeline::new()
        .run(model, features)
        .expect("pipeline should succeed");
    assert!(
        !ctx.has_errors(),
        "unexpected errors: {:?}",
        ctx.diagnostics
    );
    ctx.take_generated().expect("generated sources")
}

fn generate_one(model: &ModelIndex, features: FeatureSet) -> String {
    let mut files = run(model, features);
    assert_eq!(files.len(), 1);
    files.remove(0).source
}

fn has_line(source: &str, expected: &str) -> bool {
    source.lines().any(|line| line.trim() == expected)
}

#[track_caller]
fn assert_lines(source: &str, expected: &[&str]) {
    for line in expected {
        assert!(has_line(source, line), "missing line `{}` in:\n{}", line, source);
    }
}

#[track_caller]
fn assert_no_lines(source: &str, unexpected: &[&str]) {
    for line in unexpected {
        assert!(!has_line(source, line), "unexpected line `{}` in:\n{}", line, source);
    }
}

/// Trimmed lines of the method whose declaration line is `signature`, up to
/// its closing brace.
#[track_caller]
fn method_body<'a>(source: &'a str, signature: &str) -> Vec<&'a str> {
    let mut lines = source.lines().skip_while(|line| line.trim() != signature);
    let header = lines
        .next()
        .unwrap_or_else(|| panic!("missing method `{}` in:\n{}", signature, source));
    let indent = &header[..header.len() - header.trim_start().len()];
    let close = format!("{}}}", indent);
    lines
        .take_while(|line| *line != close)
        .map(str::trim)
        .collect()
}

#[test]
fn test_required_properties_with_user_builder() {
    let model = ModelIndex::new().with(person()).with(user_builder("Person"));
    let source = generate_one(&model, FeatureSet::default());

    assert_lines(
        &source,
        &[
            "package com.example;",
            "import java.util.EnumSet;",
            "import java.util.Objects;",
            "import javax.annotation.Generated;",
            "@Generated(\"org.inferred.freebuilder.processor.Processor\")",
            "abstract class Person_Builder {",
            "public static Person.Builder from(Person value) {",
            "Person.Builder builder = new Person.Builder();",
            "return builder.mergeFrom(value);",
            "private enum Property {",
            "NAME(\"name\"),",
            "AGE(\"age\");",
            "public Person.Builder setName(String name) {",
            "Objects.requireNonNull(name);",
            "this.name = name;",
            "_unsetProperties.remove(Property.NAME);",
            "return (Person.Builder) this;",
            "public Person.Builder setAge(int age) {",
            "public Person.Builder mapName(UnaryOperator<String> mapper) {",
            "public Person.Builder mapAge(UnaryOperator<Integer> mapper) {",
            "public Person.Builder mergeFrom(Person value) {",
            "public Person.Builder mergeFrom(Person.Builder template) {",
            "public Person.Builder clear() {",
            "public Person build() {",
            "throw new IllegalStateException(\"Not set: \" + _unsetProperties);",
            "return new Value(this);",
            "public Person buildPartial() {",
            "return new Partial(this);",
            "private static final class Value implements Person {",
            "private static final class Partial implements Person {",
        ],
    );
    // `age` is primitive: never null-checked.
    assert_no_lines(&source, &["Objects.requireNonNull(age);"]);
}

#[test]
fn test_unset_properties_listed_in_declaration_order() {
    let model = ModelIndex::new().with(person()).with(user_builder("Person"));
    let source = generate_one(&model, FeatureSet::default());

    let name = source.find("NAME(\"name\")").expect("NAME constant");
    let age = source.find("AGE(\"age\")").expect("AGE constant");
    assert!(name < age);
}

#[test]
fn test_value_standard_methods() {
    let model = ModelIndex::new().with(person()).with(user_builder("Person"));
    let source = generate_one(&model, FeatureSet::default());

    assert_lines(
        &source,
        &[
            "Value other = (Value) obj;",
            "return Objects.equals(this.name, other.name) && this.age == other.age;",
            "return Objects.hash(this.name, this.age);",
            "return \"Person{name=\" + this.name + \", age=\" + this.age + \"}\";",
            "StringBuilder result = new StringBuilder(\"partial Person{\");",
            "throw new UnsupportedOperationException(\"name not set\");",
        ],
    );
}

#[test]
fn test_nullable_properties_are_optional() {
    let model = ModelIndex::new()
        .with(datatype(
            "DataType",
            vec![nullable(MethodDecl::accessor("getItem", TypeRef::string()))],
        ))
        .with(user_builder("DataType"));
    let source = generate_one(&model, FeatureSet::default());

    assert_lines(
        &source,
        &[
            "if (value.getItem() != null) {",
            "if (base.item != null) {",
            "StringBuilder result = new StringBuilder(\"DataType{\");",
            "if (this.item != null) {",
            "result.append(separator).append(\"item=\").append(this.item);",
        ],
    );
    // Nothing is tracked, so no unset set and no build-time check.
    assert_no_lines(&source, &["private enum Property {", "Objects.requireNonNull(item);"]);
}

#[test]
fn test_missing_user_builder_generates_concrete_class() {
    let mut person = person();
    person.member_types.clear();
    let model = ModelIndex::new().with(person);

    let mut ctx = Pipeline::new()
        .run(&model, FeatureSet::default())
        .expect("pipeline should succeed");
    assert!(
        ctx.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Info && d.message.contains("Person_Builder"))
    );
    let source = ctx.take_generated().expect("generated")[0].source.clone();

    assert_lines(
        &source,
        &[
            "public class Person_Builder {",
            "public Person_Builder() {}",
            "public Person_Builder setName(String name) {",
            "return this;",
            "Person_Builder builder = new Person_Builder();",
        ],
    );
}

#[test]
fn test_list_property_api() {
    let model = ModelIndex::new()
        .with(datatype(
            "Team",
            vec![MethodDecl::accessor("getMembers", list_of(TypeRef::string()))],
        ))
        .with(user_builder("Team"));
    let source = generate_one(&model, FeatureSet::default());

    assert_lines(
        &source,
        &[
            "import java.util.ArrayList;",
            "import java.util.List;",
            "private final List<String> members = new ArrayList<>();",
            "public Team.Builder addMembers(String element) {",
            "public Team.Builder addMembers(String... elements) {",
            "public Team.Builder addAllMembers(Iterable<? extends String> elements) {",
            "public Team.Builder mutateMembers(Consumer<? super List<String>> mutator) {",
            "public Team.Builder clearMembers() {",
            "public List<String> getMembers() {",
            "return Collections.unmodifiableList(this.members);",
        ],
    );
    assert_no_lines(&source, &["private enum Property {"]);
}

#[test]
fn test_list_of_type_variable_has_no_varargs() {
    let mut decl = datatype(
        "Bag",
        vec![MethodDecl::accessor("getItems", list_of(TypeRef::variable("E")))],
    );
    decl.type_params
        .push(freebuilder_model::TypeParam::new("E"));
    let mut builder = user_builder("Bag");
    builder
        .type_params
        .push(freebuilder_model::TypeParam::new("E"));
    builder.superclass = Some(TypeRef::generic(
        ClassName::new(PACKAGE, "Bag_Builder"),
        vec![TypeRef::variable("E")],
    ));
    let model = ModelIndex::new().with(decl).with(builder);
    let source = generate_one(&model, FeatureSet::default());

    assert_lines(
        &source,
        &[
            "abstract class Bag_Builder<E> {",
            "public Bag.Builder<E> addItems(E element) {",
            "return new Value<>(this);",
        ],
    );
    assert_no_lines(&source, &["public Bag.Builder<E> addItems(E... elements) {"]);
}

#[test]
fn test_java6_skips_lambda_methods() {
    let model = ModelIndex::new()
        .with(datatype(
            "Team",
            vec![
                MethodDecl::accessor("getName", TypeRef::string()),
                MethodDecl::accessor("getMembers", list_of(TypeRef::string())),
            ],
        ))
        .with(user_builder("Team"));
    let source = generate_one(&model, FeatureSet::new(SourceLevel::Java6, false));

    assert!(!source.contains("mapName"));
    assert!(!source.contains("mutateMembers"));
    assert!(!source.contains("java.util.Objects"));
    assert_lines(
        &source,
        &["private final List<String> members = new ArrayList<String>();"],
    );
}

#[test]
fn test_defaulted_property_is_not_tracked() {
    let mut builder = user_builder("Counter");
    builder.constructors.push(ConstructorDecl {
        visibility: Visibility::Public,
        params: Vec::new(),
        calls: vec!["setStart".to_string()],
    });
    let model = ModelIndex::new()
        .with(datatype(
            "Counter",
            vec![
                MethodDecl::accessor("getStart", TypeRef::int()),
                MethodDecl::accessor("getLabel", TypeRef::string()),
            ],
        ))
        .with(builder);

    let mut ctx = Pipeline::new()
        .run(&model, FeatureSet::default())
        .expect("pipeline should succeed");
    let metadata = ctx.take_metadata().expect("metadata");
    assert!(matches!(
        metadata[0].properties[0].code_generator,
        PropertyCodeGenerator::Defaulted
    ));
    let source = ctx.take_generated().expect("generated")[0].source.clone();

    assert_lines(
        &source,
        &[
            "LABEL(\"label\");",
            "Counter_Builder _defaults = new Counter.Builder();",
            "if (value.getStart() != _defaults.start) {",
            "this.start = _defaults.start;",
            "_unsetProperties.addAll(_defaults._unsetProperties);",
        ],
    );
    assert!(!source.contains("START(\"start\")"));
}

#[test]
fn test_rejected_type_does_not_block_others() {
    let broken = datatype(
        "Broken",
        vec![MethodDecl::accessor("build", TypeRef::string())],
    );
    let model = ModelIndex::new()
        .with(broken)
        .with(person())
        .with(user_builder("Person"));

    let mut ctx = Pipeline::new()
        .run(&model, FeatureSet::default())
        .expect("pipeline should succeed");

    let errors: Vec<_> = ctx.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location.as_deref(), Some("com.example.Broken"));

    let files = ctx.take_generated().expect("generated");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name.simple_name(), "Person_Builder");
}

#[test]
fn test_generated_file_written_under_package_dirs() {
    let model = ModelIndex::new().with(person()).with(user_builder("Person"));
    let files = run(&model, FeatureSet::default());
    let dir = tempfile::tempdir().expect("temp dir");

    files[0].write(dir.path()).expect("write");

    let path = dir.path().join("com/example/Person_Builder.java");
    let written = std::fs::read_to_string(path).expect("read back");
    assert_eq!(written, files[0].source);
}

#[test]
fn test_generation_is_deterministic() {
    let model = ModelIndex::new().with(person()).with(user_builder("Person"));
    let first = run(&model, FeatureSet::default());
    let second = run(&model, FeatureSet::default());
    assert_eq!(first, second);
}

#[test]
fn test_nullable_primitive_is_never_null_checked() {
    let model = ModelIndex::new()
        .with(datatype(
            "Tally",
            vec![nullable(MethodDecl::accessor("getCount", TypeRef::int()))],
        ))
        .with(user_builder("Tally"));
    let source = generate_one(&model, FeatureSet::default());

    let null_checks: Vec<_> = source.lines().filter(|line| line.contains("!= null")).collect();
    assert!(null_checks.is_empty(), "null checks on a primitive: {:?}", null_checks);
    assert!(!source.contains("@Nullable"));
    // Falls through to a required property.
    assert_lines(
        &source,
        &[
            "COUNT(\"count\");",
            "public Tally.Builder setCount(int count) {",
            "if (!base._unsetProperties.contains(Property.COUNT)) {",
        ],
    );
}

#[test]
fn test_mapper_checked_before_reading_value() {
    let model = ModelIndex::new().with(person()).with(user_builder("Person"));
    let source = generate_one(&model, FeatureSet::default());

    assert_eq!(
        method_body(&source, "public Person.Builder mapName(UnaryOperator<String> mapper) {"),
        [
            "Objects.requireNonNull(mapper);",
            "return setName(mapper.apply(getName()));",
        ]
    );
    assert_eq!(
        method_body(&source, "public String getName() {"),
        [
            "if (_unsetProperties.contains(Property.NAME)) {",
            "throw new IllegalStateException(\"name not set\");",
            "}",
            "return name;",
        ]
    );
}

#[test]
fn test_nullable_mapper_skips_null_value() {
    let model = ModelIndex::new()
        .with(datatype(
            "DataType",
            vec![nullable(MethodDecl::accessor("getItem", TypeRef::string()))],
        ))
        .with(user_builder("DataType"));
    let source = generate_one(&model, FeatureSet::default());

    assert_eq!(
        method_body(&source, "public DataType.Builder mapItem(UnaryOperator<String> mapper) {"),
        [
            "Objects.requireNonNull(mapper);",
            "if (getItem() != null) {",
            "setItem(mapper.apply(getItem()));",
            "}",
            "return (DataType.Builder) this;",
        ]
    );
    assert_lines(&source, &["public DataType.Builder setItem(@Nullable String item) {"]);
}

#[test]
fn test_partial_equality_includes_unset_properties() {
    let model = ModelIndex::new().with(person()).with(user_builder("Person"));
    let source = generate_one(&model, FeatureSet::default());

    assert_lines(
        &source,
        &[
            "Partial other = (Partial) obj;",
            "return Objects.equals(this.name, other.name) && this.age == other.age && Objects.equals(this._unsetProperties, other._unsetProperties);",
            "return Objects.hash(this.name, this.age, this._unsetProperties);",
            "this._unsetProperties = builder._unsetProperties.clone();",
        ],
    );
    // Value never carries the unset set.
    assert_lines(&source, &["return Objects.hash(this.name, this.age);"]);
}

#[test]
fn test_merge_from_builder_skips_unset_properties() {
    let model = ModelIndex::new().with(person()).with(user_builder("Person"));
    let source = generate_one(&model, FeatureSet::default());

    assert_eq!(
        method_body(&source, "public Person.Builder mergeFrom(Person.Builder template) {"),
        [
            "Person_Builder base = template;",
            "if (!base._unsetProperties.contains(Property.NAME)) {",
            "setName(base.name);",
            "}",
            "if (!base._unsetProperties.contains(Property.AGE)) {",
            "setAge(base.age);",
            "}",
            "return (Person.Builder) this;",
        ]
    );
}

#[test]
fn test_add_all_iterates_source_once() {
    let model = ModelIndex::new()
        .with(datatype(
            "Team",
            vec![
                MethodDecl::accessor("getMembers", list_of(TypeRef::string())),
                MethodDecl::accessor("getTags", set_of(TypeRef::string())),
            ],
        ))
        .with(user_builder("Team"));
    let source = generate_one(&model, FeatureSet::default());

    for signature in [
        "public Team.Builder addAllMembers(Iterable<? extends String> elements) {",
        "public Team.Builder addAllTags(Iterable<? extends String> elements) {",
    ] {
        let body = method_body(&source, signature);
        let loops = body.iter().filter(|line| line.starts_with("for (")).count();
        assert_eq!(loops, 1, "{}: {:?}", signature, body);
        assert!(body.contains(&"for (String element : elements) {"));
    }
    // Lists size the backing array up front without iterating.
    assert_lines(
        &source,
        &["int elementsSize = ((Collection<?>) elements).size();"],
    );
}

#[test]
fn test_set_property_api() {
    let model = ModelIndex::new()
        .with(datatype(
            "Post",
            vec![MethodDecl::accessor("getTags", set_of(TypeRef::string()))],
        ))
        .with(user_builder("Post"));
    let source = generate_one(&model, FeatureSet::default());

    assert_lines(
        &source,
        &[
            "import java.util.LinkedHashSet;",
            "private final Set<String> tags = new LinkedHashSet<>();",
            "public Post.Builder addTags(String element) {",
            "public Post.Builder addTags(String... elements) {",
            "public Post.Builder addAllTags(Iterable<? extends String> elements) {",
            "public Post.Builder removeTags(String element) {",
            "public Post.Builder mutateTags(Consumer<? super Set<String>> mutator) {",
            "mutator.accept(this.tags);",
            "public Post.Builder clearTags() {",
            "public Set<String> getTags() {",
            "return Collections.unmodifiableSet(this.tags);",
            "this.tags = Collections.unmodifiableSet(new LinkedHashSet<String>(builder.tags));",
        ],
    );
    assert_no_lines(&source, &["private enum Property {"]);
}

#[test]
fn test_sorted_set_comparator_set_once() {
    let model = ModelIndex::new()
        .with(datatype(
            "Roster",
            vec![MethodDecl::accessor(
                "getNames",
                TypeRef::generic(ClassName::java_util("SortedSet"), vec![TypeRef::string()]),
            )],
        ))
        .with(user_builder("Roster"));
    let source = generate_one(&model, FeatureSet::default());

    assert_eq!(
        method_body(
            &source,
            "public Roster.Builder setComparatorForNames(Comparator<? super String> comparator) {"
        ),
        [
            "Objects.requireNonNull(comparator);",
            "if (!(this.comparatorForNames == null && this.names == null)) {",
            "throw new IllegalStateException(\"Comparator already set for names\");",
            "}",
            "this.comparatorForNames = comparator;",
            "return (Roster.Builder) this;",
        ]
    );
    assert_lines(
        &source,
        &[
            "if (this.names == null) {",
            "this.names = new TreeSet<>(this.comparatorForNames);",
            "return Collections.unmodifiableSortedSet(this.names);",
        ],
    );
}

#[test]
fn test_guava_sorted_set_merge_reuses_matching_comparator() {
    let model = ModelIndex::new()
        .with(datatype(
            "Roster",
            vec![MethodDecl::accessor(
                "getNames",
                TypeRef::generic(ClassName::java_util("SortedSet"), vec![TypeRef::string()]),
            )],
        ))
        .with(user_builder("Roster"));
    let source = generate_one(&model, guava());

    assert_lines(
        &source,
        &[
            "import com.google.common.collect.ImmutableSortedSet;",
            "import com.google.common.collect.Ordering;",
            "Preconditions.checkState(this.comparatorForNames == null && this.names == null, \"Comparator already set for names\");",
        ],
    );
    let merge = method_body(&source, "public Roster.Builder mergeFrom(Roster value) {");
    assert_eq!(
        merge,
        [
            "if (this.names == null && value.getNames() instanceof ImmutableSortedSet && (this.comparatorForNames == null ? Ordering.natural().equals(value.getNames().comparator()) : this.comparatorForNames.equals(value.getNames().comparator()))) {",
            "this.names = value.getNames();",
            "} else {",
            "addAllNames(value.getNames());",
            "}",
            "return (Roster.Builder) this;",
        ]
    );
    // A reused immutable set is copied into a TreeSet before any write.
    assert_lines(
        &source,
        &[
            "if (this.names instanceof ImmutableSortedSet) {",
            "this.names = new TreeSet<>(this.names);",
        ],
    );
}

#[test]
fn test_map_property_api() {
    let model = ModelIndex::new()
        .with(datatype(
            "Game",
            vec![MethodDecl::accessor(
                "getScores",
                TypeRef::generic(ClassName::java_util("Map"), vec![TypeRef::string(), integer()]),
            )],
        ))
        .with(user_builder("Game"));
    let source = generate_one(&model, FeatureSet::default());

    assert_lines(
        &source,
        &[
            "import java.util.LinkedHashMap;",
            "private final Map<String, Integer> scores = new LinkedHashMap<>();",
            "public Game.Builder putScores(String key, Integer value) {",
            "Objects.requireNonNull(key);",
            "Objects.requireNonNull(value);",
            "public Game.Builder putAllScores(Map<? extends String, ? extends Integer> map) {",
            "for (Map.Entry<? extends String, ? extends Integer> entry : map.entrySet()) {",
            "putScores(entry.getKey(), entry.getValue());",
            "public Game.Builder removeScores(String key) {",
            "public Game.Builder mutateScores(Consumer<? super Map<String, Integer>> mutator) {",
            "mutator.accept(this.scores);",
            "public Game.Builder clearScores() {",
            "public Map<String, Integer> getScores() {",
            "return Collections.unmodifiableMap(this.scores);",
            "this.scores = Collections.unmodifiableMap(new LinkedHashMap<String, Integer>(builder.scores));",
        ],
    );
    assert!(!source.contains("CheckedMap"));
}

#[test]
fn test_set_multimap_property_api() {
    let model = ModelIndex::new()
        .with(datatype(
            "Doc",
            vec![MethodDecl::accessor(
                "getTags",
                TypeRef::generic(
                    ClassName::guava_collect("SetMultimap"),
                    vec![TypeRef::string(), TypeRef::string()],
                ),
            )],
        ))
        .with(user_builder("Doc"));
    let source = generate_one(&model, guava());

    assert_lines(
        &source,
        &[
            "import com.google.common.collect.LinkedHashMultimap;",
            "private final SetMultimap<String, String> tags = LinkedHashMultimap.create();",
            "public Doc.Builder putTags(String key, String value) {",
            "public Doc.Builder putAllTags(String key, Iterable<? extends String> values) {",
            "public Doc.Builder putAllTags(Multimap<? extends String, ? extends String> multimap) {",
            "public Doc.Builder removeTags(String key, String value) {",
            "public Doc.Builder removeAllTags(String key) {",
            "public Doc.Builder mutateTags(Consumer<? super SetMultimap<String, String>> mutator) {",
            "public Doc.Builder clearTags() {",
            "public SetMultimap<String, String> getTags() {",
            "return Multimaps.unmodifiableSetMultimap(this.tags);",
            "putAllTags(value.getTags());",
            "putAllTags(base.tags);",
            "this.tags = ImmutableSetMultimap.copyOf(builder.tags);",
        ],
    );
}

#[test]
fn test_set_multimap_needs_guava() {
    let model = ModelIndex::new()
        .with(datatype(
            "Doc",
            vec![MethodDecl::accessor(
                "getTags",
                TypeRef::generic(
                    ClassName::guava_collect("SetMultimap"),
                    vec![TypeRef::string(), TypeRef::string()],
                ),
            )],
        ))
        .with(user_builder("Doc"));
    let source = generate_one(&model, FeatureSet::default());

    // Without Guava the multimap is an ordinary required value.
    assert_lines(&source, &["TAGS(\"tags\");"]);
    assert!(!source.contains("putTags"));
}

#[test]
fn test_mutate_routes_through_overridden_add() {
    let mut builder = user_builder("Team");
    builder
        .methods
        .push(builder_override("Team", "addMembers", vec![TypeRef::string()]));
    let model = ModelIndex::new()
        .with(datatype(
            "Team",
            vec![
                MethodDecl::accessor("getMembers", list_of(TypeRef::string())),
                MethodDecl::accessor("getTags", set_of(TypeRef::string())),
            ],
        ))
        .with(builder);
    let source = generate_one(&model, FeatureSet::default());

    assert_lines(
        &source,
        &[
            "mutator.accept(new CheckedList<>(this.members, this::addMembers));",
            "private static class CheckedList<E> extends AbstractList<E> {",
            // `addTags` is not overridden, so the set is handed over directly.
            "mutator.accept(this.tags);",
        ],
    );
    assert!(!source.contains("CheckedSet"));
}

#[test]
fn test_mutate_routes_through_overridden_put() {
    let mut builder = user_builder("Game");
    builder.methods.push(builder_override(
        "Game",
        "putScores",
        vec![TypeRef::string(), integer()],
    ));
    let model = ModelIndex::new()
        .with(datatype(
            "Game",
            vec![MethodDecl::accessor(
                "getScores",
                TypeRef::generic(ClassName::java_util("Map"), vec![TypeRef::string(), integer()]),
            )],
        ))
        .with(builder);
    let source = generate_one(&model, FeatureSet::default());

    assert_lines(
        &source,
        &[
            "mutator.accept(new CheckedMap<>(this.scores, this::putScores));",
            "private static class CheckedMap<K, V> extends AbstractMap<K, V> {",
            "private static class CheckedEntry<K, V> implements Map.Entry<K, V> {",
        ],
    );
}

#[test]
fn test_java7_has_no_checked_helpers() {
    let mut builder = user_builder("Team");
    builder
        .methods
        .push(builder_override("Team", "addMembers", vec![TypeRef::string()]));
    let model = ModelIndex::new()
        .with(datatype(
            "Team",
            vec![MethodDecl::accessor("getMembers", list_of(TypeRef::string()))],
        ))
        .with(builder);
    let source = generate_one(&model, FeatureSet::new(SourceLevel::Java7, false));

    assert!(!source.contains("CheckedList"));
    assert!(!source.contains("mutateMembers"));
}
