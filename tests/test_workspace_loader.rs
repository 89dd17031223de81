//! Loading a directory of sources from disk and fixing it in one batch.

use std::fs;

use namecheck::LoadError;
use namecheck::ide::AnalysisHost;
use namecheck::project::WorkspaceLoader;

#[test]
fn test_load_directory_then_fix_all_across_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("Api")).unwrap();
    fs::write(
        dir.path().join("Api/Shape.cs"),
        "namespace Geometry { public interface Shape { double Area(); } }\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("Circle.cs"),
        "using Geometry;\nnamespace Geometry.Impl { class Circle : Shape { public double Area() => 0; } }\n",
    )
    .unwrap();
    fs::write(dir.path().join("README.md"), "interface NotCode {}").unwrap();

    let mut host = AnalysisHost::new();
    let loaded = WorkspaceLoader::new()
        .load_directory_into_host(dir.path(), &mut host)
        .unwrap();
    assert_eq!(loaded, 2);
    assert_eq!(host.analysis().naming_findings().len(), 1);

    let report = host.fix_all();
    assert!(report.is_clean());
    assert_eq!(report.applied.len(), 1);
    assert_eq!(report.applied[0].new_name, "IShape");

    let shape = host.file_id(dir.path().join("Api/Shape.cs")).unwrap();
    let circle = host.file_id(dir.path().join("Circle.cs")).unwrap();
    assert_eq!(
        host.file_text(shape).as_deref(),
        Some("namespace Geometry { public interface IShape { double Area(); } }\n")
    );
    assert_eq!(
        host.file_text(circle).as_deref(),
        Some("using Geometry;\nnamespace Geometry.Impl { class Circle : IShape { public double Area() => 0; } }\n")
    );
    assert!(host.analysis().naming_findings().is_empty());
}

#[test]
fn test_load_file_into_host() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Foo.cs");
    fs::write(&path, "interface Foo {}").unwrap();

    let mut host = AnalysisHost::new();
    WorkspaceLoader::new().load_file_into_host(&path, &mut host).unwrap();

    assert_eq!(host.file_count(), 1);
    assert_eq!(host.analysis().naming_findings().len(), 1);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut host = AnalysisHost::new();

    let err = WorkspaceLoader::new()
        .load_file_into_host(dir.path().join("Missing.cs"), &mut host)
        .unwrap_err();

    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(host.file_count(), 0);
}
