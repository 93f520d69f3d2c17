use apexlog_engine::{ParseOptions, parse_log, parse_log_with};
use apexlog_testing::{LogBuilder, assert_tree_invariants, outline};

fn dml_with_package_query() -> String {
    LogBuilder::new()
        .code_unit_started(0, "execute_anonymous_apex")
        .dml_begin(10, 3, "Update", "Contact", 1)
        .package(20, "acme")
        .soql_begin(30, 5, "SELECT Id FROM Contact")
        .soql_end(40, 5, 3)
        .dml_end(50, 3)
        .code_unit_finished(60, "execute_anonymous_apex")
        .build()
}

#[test]
fn test_query_moves_under_package() {
    let log = parse_log(&dml_with_package_query()).unwrap();

    insta::assert_snapshot!(outline(&log.root), @r#"
    ROOT "Execution Root" 0..60 total=60 self=0
      CODE_UNIT_STARTED "execute_anonymous_apex" 0..60 total=60 self=20
        DML_BEGIN "DML Update Contact" 10..50 total=40 self=20
          ENTERING_MANAGED_PKG "acme" 20..40 total=20 self=10 ns=acme
            SOQL_EXECUTE_BEGIN "SELECT Id FROM Contact" 30..40 total=10 self=10
    "#);

    let pkg = &log.root.children[0].children[0].children[0];
    assert_eq!(pkg.totals.soql_count, 1);
    assert_eq!(pkg.totals.soql_rows, 3);
    assert_tree_invariants(&log.root).unwrap();
}

#[test]
fn test_wrappers_disabled_keeps_flat_list() {
    let options = ParseOptions {
        package_wrappers: false,
        ..ParseOptions::default()
    };
    let log = parse_log_with(&dml_with_package_query(), &options).unwrap();

    insta::assert_snapshot!(outline(&log.root), @r#"
    ROOT "Execution Root" 0..60 total=60 self=0
      CODE_UNIT_STARTED "execute_anonymous_apex" 0..60 total=60 self=20
        DML_BEGIN "DML Update Contact" 10..50 total=40 self=20
          ENTERING_MANAGED_PKG "acme" 20..30 total=10 self=10 ns=acme
          SOQL_EXECUTE_BEGIN "SELECT Id FROM Contact" 30..40 total=10 self=10
    "#);
}

#[test]
fn test_adjacent_packages_merge() {
    let log = LogBuilder::new()
        .code_unit_started(0, "execute_anonymous_apex")
        .package(10, "acme")
        .package(20, "acme")
        .statement(35, 4)
        .code_unit_finished(50, "execute_anonymous_apex")
        .build();

    let log = parse_log(&log).unwrap();

    let unit = &log.root.children[0];
    let packages = unit.find_all(|n| n.event_type == "ENTERING_MANAGED_PKG");
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].timestamp, 10);
    assert_eq!(packages[0].exit_stamp, Some(35));
    assert_eq!(unit.children.len(), 2);
    assert_tree_invariants(&log.root).unwrap();
}

#[test]
fn test_top_level_package_namespace() {
    let text = LogBuilder::new()
        .package(0, "acme")
        .method_entry(5, 1, "acme.Service.run()")
        .method_entry(8, 2, "Local.helper()")
        .method_exit(12, 2, "Local.helper()")
        .method_exit(20, 1, "acme.Service.run()")
        .build();

    let log = parse_log(&text).unwrap();
    insta::assert_snapshot!(outline(&log.root), @r#"
    ROOT "Execution Root" 0..20 total=20 self=0
      ENTERING_MANAGED_PKG "acme" 0..5 total=5 self=5 ns=acme
      METHOD_ENTRY "acme.Service.run()" 5..20 total=15 self=11 ns=acme
        METHOD_ENTRY "Local.helper()" 8..12 total=4 self=4
    "#);

    let options = ParseOptions {
        resolve_namespaces: false,
        ..ParseOptions::default()
    };
    let log = parse_log_with(&text, &options).unwrap();
    assert_eq!(log.root.children[1].namespace, None);
}
