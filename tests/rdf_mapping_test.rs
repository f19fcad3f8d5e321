use chrono::DateTime;
use samyama_rdf_bridge::graph::{
    FixityResult, MemorySession, NodeTypeDefinition, PropertyDefinition, PropertyType, PropertyValue, Session,
};
use samyama_rdf_bridge::rdf::lexicon::{self, HAS_FIXITY_STATE, HAS_MESSAGE_DIGEST, HAS_SIZE};
use samyama_rdf_bridge::rdf::namespace::resolve_prefix;
use samyama_rdf_bridge::rdf::value::{infer_value, LiteralKind, INFERENCE_ORDER};
use samyama_rdf_bridge::rdf::{
    IdentifierConverter, Literal, MappingConfig, MappingError, NamedNode, PathConverter, RdfObject, RdfParser,
    RdfPredicate, RdfSubject, RdfTranslator, Triple,
};
use samyama_rdf_bridge::rdf::RdfFormat;
use std::collections::HashMap;

const EX: &str = "http://example.org/";

fn converter() -> PathConverter {
    PathConverter::new(&MappingConfig::new("http://localhost:8080/rest/"), "default")
}

fn ex_hints() -> HashMap<String, String> {
    let mut hints = HashMap::new();
    hints.insert("ex".to_string(), EX.to_string());
    hints
}

fn ex(local: &str) -> RdfPredicate {
    RdfPredicate::new(&format!("{}{}", EX, local)).unwrap()
}

#[test]
fn test_value_round_trip() {
    let mut session = MemorySession::new();
    let target = session.ensure_node("/target").unwrap();
    let converter = converter();
    let translator = RdfTranslator::new(&mut session, &converter);

    let values = vec![
        PropertyValue::Boolean(true),
        PropertyValue::Byte(-7),
        PropertyValue::Short(1200),
        PropertyValue::Integer(70_000),
        PropertyValue::Long(9_000_000_000),
        PropertyValue::Float(1.5),
        PropertyValue::Double(-2.25e10),
        PropertyValue::String("Hello".to_string()),
        PropertyValue::Uri("http://example.org/thing".to_string()),
        PropertyValue::Date(DateTime::parse_from_rfc3339("2024-01-02T03:04:05+02:00").unwrap()),
        PropertyValue::Reference(target),
        PropertyValue::WeakReference(target),
    ];

    for value in values {
        let term = translator.term_for_value(&value).unwrap();
        let back = translator.create_value(&term, value.property_type()).unwrap();
        assert_eq!(back, value, "round trip through {}", term);
    }
}

#[test]
fn test_namespace_resolution_is_idempotent() {
    let mut session = MemorySession::new();
    let registry = session.namespace_registry_mut();

    let first = resolve_prefix(registry, "http://example.org/vocab#", &HashMap::new()).unwrap();
    let size = registry.len();
    let second = resolve_prefix(registry, "http://example.org/vocab#", &HashMap::new()).unwrap();

    assert_eq!(first, second);
    assert_eq!(registry.len(), size);
}

#[test]
fn test_hint_takes_precedence_over_generated_prefix() {
    let mut session = MemorySession::new();
    let node = session.ensure_node("/a").unwrap();
    let converter = converter();
    let mut translator = RdfTranslator::new(&mut session, &converter);

    let name = translator.property_name_for_predicate(node, &ex("title"), &ex_hints()).unwrap();

    assert_eq!(name, "ex:title");
    assert_eq!(translator.session().namespace_registry().uri("ex").unwrap(), EX);
}

#[test]
fn test_hint_does_not_rebind_prefix_of_stored_names() {
    let mut session = MemorySession::new();
    session.namespace_registry_mut().register_namespace("ex", "http://a.example/").unwrap();
    let node = session.ensure_node("/n").unwrap();
    let converter = converter();
    let mut translator = RdfTranslator::new(&mut session, &converter);
    let mut hints = HashMap::new();
    hints.insert("ex".to_string(), "http://b.example/".to_string());

    translator
        .add_property(
            node,
            &RdfPredicate::new("http://a.example/title").unwrap(),
            &RdfObject::from(Literal::new_simple_literal("x")),
            &HashMap::new(),
        )
        .unwrap();
    translator
        .add_property(
            node,
            &RdfPredicate::new("http://b.example/title").unwrap(),
            &RdfObject::from(Literal::new_simple_literal("y")),
            &hints,
        )
        .unwrap();

    let stored = translator.session().node(node).unwrap();
    assert_eq!(stored.get_property_values("ex:title").unwrap(), &[PropertyValue::String("x".to_string())][..]);
    assert_eq!(stored.get_property_values("ns001:title").unwrap(), &[PropertyValue::String("y".to_string())][..]);

    let triples = translator.property_triples([node], None).into_triples().unwrap();
    let mut emitted: Vec<(String, String)> = triples
        .iter()
        .map(|t| (t.predicate.as_str().to_string(), t.object.as_literal().unwrap().value().to_string()))
        .collect();
    emitted.sort();
    assert_eq!(
        emitted,
        vec![
            ("http://a.example/title".to_string(), "x".to_string()),
            ("http://b.example/title".to_string(), "y".to_string()),
        ]
    );
}

#[test]
fn test_managed_predicates_are_rejected_without_mutation() {
    let mut session = MemorySession::new();
    let node = session.ensure_node("/a").unwrap();
    let converter = converter();
    let mut translator = RdfTranslator::new(&mut session, &converter);

    let registry_before = translator.session().namespace_registry().namespaces();
    let object = RdfObject::from(Literal::new_simple_literal("42"));
    let mut hints = HashMap::new();
    hints.insert("premis".to_string(), lexicon::PREMIS_NAMESPACE.to_string());
    hints.insert("fedora".to_string(), lexicon::REPOSITORY_NAMESPACE.to_string());

    let predicates = [
        RdfPredicate::new(HAS_SIZE).unwrap(),
        RdfPredicate::new(HAS_MESSAGE_DIGEST).unwrap(),
        RdfPredicate::new(lexicon::CONTAINS).unwrap(),
        RdfPredicate::new("http://fedora.info/definitions/v4/repository#lastModified").unwrap(),
    ];
    for predicate in &predicates {
        let added = translator.add_property(node, predicate, &object, &hints);
        assert!(matches!(added, Err(MappingError::ManagedPropertyViolation { .. })));

        let removed = translator.remove_property(node, predicate, &object, &hints);
        assert!(matches!(removed, Err(MappingError::ManagedPropertyViolation { .. })));
    }

    assert_eq!(translator.session().node(node).unwrap().property_count(), 0);
    assert_eq!(translator.session().namespace_registry().namespaces(), registry_before);
}

#[test]
fn test_type_tags_are_idempotent() {
    let mut session = MemorySession::new();
    let node = session.ensure_node("/a").unwrap();
    let converter = converter();
    let mut translator = RdfTranslator::new(&mut session, &converter);
    let hints = ex_hints();
    let class = NamedNode::new("http://example.org/Book").unwrap();

    let original: Vec<String> = translator.session().node(node).unwrap().mixins().map(String::from).collect();

    // Removing an absent tag changes nothing
    assert!(!translator.remove_mixin(node, &class, &hints).unwrap());

    translator.add_mixin(node, &class, &hints).unwrap();
    translator.add_mixin(node, &class, &hints).unwrap();
    let tagged: Vec<&str> = translator.session().node(node).unwrap().mixins().collect();
    assert_eq!(tagged, vec!["ex:Book"]);

    assert!(translator.remove_mixin(node, &class, &hints).unwrap());
    let restored: Vec<String> = translator.session().node(node).unwrap().mixins().map(String::from).collect();
    assert_eq!(restored, original);
}

#[test]
fn test_plain_literal_creates_and_removes_string_property() {
    let mut session = MemorySession::new();
    let node = session.ensure_node("/n").unwrap();
    let converter = converter();
    let mut translator = RdfTranslator::new(&mut session, &converter);
    let hints = ex_hints();
    let subject = converter.to_resource("/n");
    let hello = Literal::new_simple_literal("Hello");

    translator
        .apply_statement(&Triple::new(subject.clone(), ex("title"), hello.clone()), &hints)
        .unwrap();

    let stored = translator.session().node(node).unwrap().get_property_values("ex:title").unwrap();
    assert_eq!(stored, &[PropertyValue::String("Hello".to_string())][..]);
    assert_eq!(translator.property_type(node, "ex:title").unwrap(), PropertyType::Undefined);

    translator
        .retract_statement(&Triple::new(subject, ex("title"), hello), &hints)
        .unwrap();
    assert!(!translator.session().node(node).unwrap().has_property("ex:title"));
}

#[test]
fn test_declared_type_drives_conversion() {
    let mut session = MemorySession::new();
    session.namespace_registry_mut().register_namespace("ex", EX).unwrap();
    session
        .register_node_type(
            NodeTypeDefinition::mixin("ex:Counted").with_property(PropertyDefinition::new("ex:count", PropertyType::Long)),
            false,
        )
        .unwrap();
    let node = session.ensure_node("/n").unwrap();
    session.add_mixin(node, "ex:Counted").unwrap();

    let converter = converter();
    let mut translator = RdfTranslator::new(&mut session, &converter);
    let subject = converter.to_resource("/n");

    // A plain literal is parsed as the declared type
    translator
        .apply_statement(
            &Triple::new(subject.clone(), ex("count"), Literal::new_simple_literal("12")),
            &HashMap::new(),
        )
        .unwrap();
    assert_eq!(
        translator.session().node(node).unwrap().get_property_values("ex:count").unwrap(),
        &[PropertyValue::Long(12)][..]
    );

    let bad = translator.apply_statement(
        &Triple::new(subject, ex("count"), Literal::new_simple_literal("twelve")),
        &HashMap::new(),
    );
    assert!(matches!(bad, Err(MappingError::MalformedInput(_))));
}

#[test]
fn test_fixity_mismatch_triples() {
    let mut session = MemorySession::new();
    let node = session.ensure_node("/binary").unwrap();
    let converter = converter();
    let translator = RdfTranslator::new(&mut session, &converter);

    let result = FixityResult::new("file:///store/binary", "sha1:abc", 10);
    let triples = translator
        .fixity_triples(node, vec![result], "sha1:def", 20)
        .unwrap()
        .into_triples()
        .unwrap();

    let subject = converter.to_resource("/binary");
    let fixity = NamedNode::new(&format!("{}#fixity/0", subject.as_str())).unwrap();

    // Everything hangs off the node or its single fixity resource
    assert!(triples.iter().all(|t| t.subject == RdfSubject::from(subject.clone())
        || t.subject == RdfSubject::from(fixity.clone())));

    let states: Vec<&str> = triples
        .iter()
        .filter(|t| t.predicate.as_str() == HAS_FIXITY_STATE)
        .filter_map(|t| t.object.as_literal().map(Literal::value))
        .collect();
    assert_eq!(states, vec!["BAD_CHECKSUM", "BAD_SIZE"]);

    let digest = triples.iter().find(|t| t.predicate.as_str() == HAS_MESSAGE_DIGEST).unwrap();
    assert_eq!(digest.object, RdfObject::from(NamedNode::new("sha1:abc").unwrap()));

    let size = triples.iter().find(|t| t.predicate.as_str() == HAS_SIZE).unwrap();
    assert_eq!(size.object.as_literal().unwrap().value(), "10");
}

#[test]
fn test_inference_order() {
    assert_eq!(
        INFERENCE_ORDER,
        [
            LiteralKind::Boolean,
            LiteralKind::Byte,
            LiteralKind::Double,
            LiteralKind::Float,
            LiteralKind::Long,
            LiteralKind::Short,
            LiteralKind::Integer,
            LiteralKind::Timestamp,
            LiteralKind::Lexical,
        ]
    );

    let big = Literal::new_typed_literal("9000000000", oxrdf::vocab::xsd::INTEGER);
    assert_eq!(infer_value(&big), PropertyValue::Long(9_000_000_000));
    let small = Literal::new_typed_literal("7", oxrdf::vocab::xsd::INTEGER);
    assert_eq!(infer_value(&small), PropertyValue::Integer(7));
}

#[test]
fn test_turtle_document_through_translator() {
    let input = r#"
        @prefix dc: <http://purl.org/dc/elements/1.1/> .
        @prefix ex: <http://example.org/> .
        <http://localhost:8080/rest/books/one> a ex:Book ;
            dc:title "One" ;
            ex:pages 120 ;
            ex:related <http://localhost:8080/rest/books/two> .
        <http://localhost:8080/rest/books/two> dc:title "Two" .
    "#;
    let document = RdfParser::parse(input, RdfFormat::Turtle).unwrap();

    let mut session = MemorySession::new();
    session.ensure_node("/books/one").unwrap();
    let two = session.ensure_node("/books/two").unwrap();
    let converter = converter();
    let mut translator = RdfTranslator::new(&mut session, &converter);
    for triple in &document.triples {
        translator.apply_statement(triple, &document.prefixes).unwrap();
    }

    let one = translator.session().node_at("/books/one").unwrap();
    let node = translator.session().node(one).unwrap();
    assert!(node.has_mixin("ex:Book"));
    assert_eq!(node.get_property_values("dc:title").unwrap(), &[PropertyValue::String("One".to_string())][..]);
    assert_eq!(node.get_property_values("ex:pages").unwrap(), &[PropertyValue::Integer(120)][..]);
    // Undeclared resources stay URIs; only declared reference properties resolve to nodes
    assert_eq!(
        node.get_property_values("ex:related").unwrap(),
        &[PropertyValue::Uri("http://localhost:8080/rest/books/two".to_string())][..]
    );

    let triples = translator.property_triples([one, two], None).into_triples().unwrap();
    // dc:title, ex:pages, ex:related and rdf:type for one; dc:title for two
    assert_eq!(triples.len(), 5);
}
