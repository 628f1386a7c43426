use std::fs;
use std::path::PathBuf;

use cldr_codegen_generate::{
    GeneratedModule, NoFormatter, WriteError, ensure_directories, write_modules,
};

fn temp_root(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("cldr_codegen_dirs_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp root");
    dir
}

fn segments(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn creates_every_missing_level() {
    let root = temp_root("all_missing");

    let created = ensure_directories(&root, &segments(&["a", "b", "c"])).expect("create dirs");

    assert_eq!(
        created,
        vec![root.join("a"), root.join("a/b"), root.join("a/b/c")]
    );
    assert!(root.join("a/b/c").is_dir());
}

#[test]
fn creates_only_the_missing_tail() {
    let root = temp_root("tail_missing");
    fs::create_dir_all(root.join("a/b")).expect("pre-create a/b");
    fs::write(root.join("a/b/keep.txt"), "untouched").expect("write marker");

    let created = ensure_directories(&root, &segments(&["a", "b", "c"])).expect("create dirs");

    assert_eq!(created, vec![root.join("a/b/c")]);
    assert_eq!(
        fs::read_to_string(root.join("a/b/keep.txt")).expect("marker survives"),
        "untouched"
    );
}

#[test]
fn existing_tree_is_not_an_error() {
    let root = temp_root("existing");
    fs::create_dir_all(root.join("a/b/c")).expect("pre-create");

    let created = ensure_directories(&root, &segments(&["a", "b", "c"])).expect("no-op");
    assert!(created.is_empty());
}

#[test]
fn unsafe_module_aborts_before_any_write() {
    let root = temp_root("unsafe");
    let out_dir = root.join("out");
    let modules = vec![
        GeneratedModule::new(["Cldr"], "En.elm", "fine"),
        GeneratedModule::new(["Cldr", ".."], "Escape.elm", "bad"),
    ];

    let err = write_modules(&out_dir, &modules, &NoFormatter).expect_err("traversal rejected");

    assert!(matches!(err, WriteError::UnsafePath(_)));
    assert!(!out_dir.exists());
    assert!(!root.join("Escape.elm").exists());
}

#[test]
fn existing_files_are_overwritten() {
    let root = temp_root("overwrite");
    let module = GeneratedModule::new(Vec::<String>::new(), "En.elm", "new");
    fs::write(root.join("En.elm"), "old content that is longer").expect("seed file");

    write_modules(&root, &[module], &NoFormatter).expect("write");

    assert_eq!(fs::read_to_string(root.join("En.elm")).expect("read"), "new");
}
