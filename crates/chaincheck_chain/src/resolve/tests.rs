#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;

#[derive(Debug)]
struct LocalError;

impl std::fmt::Display for LocalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("local")
    }
}

impl Error for LocalError {}

fn short(raw: &'static str) -> String {
    let mut resolver = ShortTypeNames::new();
    resolver.resolve(&TypeTag::named(raw)).unwrap().to_owned()
}

#[test]
fn test_short_names_strip_paths() {
    assert_eq!(short("std::io::error::Error"), "Error");
    assert_eq!(short("plain"), "plain");
}

#[test]
fn test_short_names_strip_generic_arguments() {
    assert_eq!(
        short("core::result::Result<alloc::string::String, my::module::Failure>"),
        "Result<String, Failure>"
    );
    assert_eq!(short("dyn core::error::Error"), "dyn Error");
    assert_eq!(short("&[alloc::vec::Vec<u8>]"), "&[Vec<u8>]");
}

#[test]
fn test_short_names_reuse_buffer() {
    let mut resolver = ShortTypeNames::new();
    assert_eq!(
        resolver.resolve(&TypeTag::named("a::LongerName")),
        Some("LongerName")
    );
    assert_eq!(resolver.resolve(&TypeTag::named("b::X")), Some("X"));
}

#[test]
fn test_short_names_keep_full_name_on_collision() {
    let mut resolver = ShortTypeNames::new();
    let first = TypeTag::named("app::first::Error");
    let second = TypeTag::named("app::second::Error");

    assert_eq!(resolver.resolve(&first), Some("Error"));
    assert_eq!(resolver.resolve(&second), Some("app::second::Error"));
    // Names stay stable once given.
    assert_eq!(resolver.resolve(&first), Some("Error"));
    assert_eq!(resolver.resolve(&second), Some("app::second::Error"));
}

#[test]
fn test_short_names_same_type_resolves_once() {
    let mut resolver = ShortTypeNames::new();
    assert_eq!(resolver.resolve(&TypeTag::named("a::X")), Some("X"));
    assert_eq!(resolver.resolve(&TypeTag::named("a::X")), Some("X"));
    assert_eq!(resolver.resolve(&TypeTag::named("b::X")), Some("b::X"));
}

#[test]
fn test_empty_tag_is_unresolved() {
    assert_eq!(ShortTypeNames::new().resolve(&TypeTag::named("")), None);
    assert_eq!(FullTypeNames.resolve(&TypeTag::named("")), None);
}

#[test]
fn test_full_names_are_unchanged() {
    let tag = TypeTag::of::<LocalError>();
    assert_eq!(FullTypeNames.resolve(&tag), Some(tag.raw()));
    assert!(tag.raw().ends_with("LocalError"));
    assert!(tag.raw().contains("::"));
}

#[test]
fn test_display_name_falls_back_to_raw() {
    let mut resolver = FullTypeNames;
    assert_eq!(display_name(&mut resolver, &TypeTag::named("")), "");
    assert_eq!(display_name(&mut resolver, &TypeTag::named("x::Y")), "x::Y");
}

#[test]
fn test_registry_identifies_registered_types() {
    let mut registry = TypeRegistry::empty();
    registry.register::<LocalError>();
    let error: Box<dyn Error> = Box::new(LocalError);
    assert_eq!(registry.identify(error.as_ref()), TypeTag::of::<LocalError>());
}

#[test]
fn test_registry_unregistered_types() {
    let registry = TypeRegistry::empty();
    let error: Box<dyn Error> = Box::new(LocalError);
    assert_eq!(registry.identify(error.as_ref()), TypeTag::unregistered());
}

#[test]
fn test_registry_register_twice() {
    let mut registry = TypeRegistry::empty();
    registry.register::<LocalError>().register::<LocalError>();
    assert_eq!(registry.len(), 1);
    assert!(registry.contains::<LocalError>());
}

#[test]
fn test_default_registry_knows_std_errors() {
    let registry = TypeRegistry::default();
    let error = "x".parse::<i32>().unwrap_err();
    let tag = registry.identify(&error);
    assert_eq!(tag, TypeTag::of::<std::num::ParseIntError>());
    assert!(!registry.contains::<LocalError>());
}

#[test]
fn test_style_resolvers() {
    let tag = TypeTag::named("a::b::C");
    assert_eq!(TypeNameStyle::Short.resolver().resolve(&tag), Some("C"));
    assert_eq!(TypeNameStyle::Full.resolver().resolve(&tag), Some("a::b::C"));
}
