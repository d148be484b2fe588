//! Path parsing and naming tests

use propbox::{Path, path};

#[test]
fn test_parse_builds_parent_chain() {
    let path = Path::parse("a.b.c").unwrap();
    assert_eq!(path.name(), "c");
    assert_eq!(path.parent().map(Path::name), Some("b"));
    assert_eq!(path.components(), ["a", "b", "c"]);
    assert_eq!(path.to_string(), "a.b.c");
    assert_eq!("a.b.c".parse::<Path>().unwrap(), path);
}

#[test]
fn test_parse_normalizes_separators() {
    assert_eq!(Path::parse(".a..b.").unwrap(), Path::parse("a.b").unwrap());
    assert!(Path::parse("...").is_err());
    assert!(Path::parse("").is_err());
}

#[test]
fn test_root_paths_are_left_out_of_relative_names() {
    let city = Path::new("city").with_parent(Path::new("address").with_parent(Path::root("customer")));
    assert_eq!(city.relative_name(), "address.city");
    assert_eq!(city.full_name(), "customer.address.city");
    assert_eq!(city.len(), 3);
}

#[test]
fn test_path_macro() {
    assert_eq!(path!("a", "b"), Path::new("b").with_parent(Path::new("a")));
}

#[test]
fn test_path_serde_round_trip() {
    let path = Path::parse("a.b").unwrap();
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(serde_json::from_str::<Path>(&json).unwrap(), path);
}
