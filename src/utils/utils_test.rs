use super::path::ancestors;
use super::path::clean_path;
use super::path::is_under;

#[test]
fn test_clean_path_normalizes_separators() {
    assert_eq!(clean_path("/a/b/c"), "/a/b/c");
    assert_eq!(clean_path("a/b/c"), "/a/b/c");
    assert_eq!(clean_path("/a/b/c/"), "/a/b/c");
    assert_eq!(clean_path("//a//b///c"), "/a/b/c");
    assert_eq!(clean_path("/"), "/");
    assert_eq!(clean_path(""), "/");
}

#[test]
fn test_clean_path_resolves_dot_segments() {
    assert_eq!(clean_path("/a/./b"), "/a/b");
    assert_eq!(clean_path("/a/x/../b"), "/a/b");
    assert_eq!(clean_path("/../../a"), "/a");
    assert_eq!(clean_path("/a/.."), "/");
}

#[test]
fn test_ancestors_walks_from_root_to_key() {
    let walked: Vec<&str> = ancestors("/a/b/c").collect();
    assert_eq!(walked, vec!["/", "/a", "/a/b", "/a/b/c"]);

    let walked: Vec<&str> = ancestors("/a").collect();
    assert_eq!(walked, vec!["/", "/a"]);

    let walked: Vec<&str> = ancestors("/").collect();
    assert_eq!(walked, vec!["/"]);
}

#[test]
fn test_is_under_uses_path_containment() {
    assert!(is_under("/a", "/a"));
    assert!(is_under("/a/b/c", "/a"));
    assert!(is_under("/a/b", "/a/b"));
    assert!(is_under("/anything", "/"));
    assert!(is_under("/", "/"));

    assert!(!is_under("/ab", "/a"));
    assert!(!is_under("/a", "/a/b"));
    assert!(!is_under("/b/a", "/a"));
}
