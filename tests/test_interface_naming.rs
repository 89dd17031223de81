//! End-to-end tests for the interface naming rule and its fix.
//!
//! Each case feeds C# source through an `AnalysisHost`, checks where the
//! findings land, applies the fix for the first finding and compares the
//! resulting text.

use namecheck::hir::{ExternalSymbols, SymbolKind};
use namecheck::ide::{AnalysisConfig, AnalysisHost, UnresolvedReason};
use namecheck::{FileId, FixError};
use rstest::rstest;

fn host_with(text: &str) -> (AnalysisHost, FileId) {
    let mut host = AnalysisHost::new();
    let file = host.set_file_content("Test0.cs", text);
    (host, file)
}

fn locations(host: &AnalysisHost) -> Vec<(u32, u32)> {
    host.analysis()
        .naming_findings()
        .iter()
        .map(|f| (f.line(), f.column()))
        .collect()
}

/// Apply the fix for the first finding and return the new text.
fn fix_first(host: &mut AnalysisHost, file: FileId) -> String {
    let analysis = host.analysis();
    let finding = analysis.naming_findings().remove(0);
    let outcome = analysis.fix(&finding).unwrap();
    assert!(!outcome.is_partial(), "unexpected unresolved references: {:?}", outcome.unresolved);
    host.apply_change(&outcome.change).unwrap();
    host.file_text(file).unwrap().to_string()
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

#[rstest]
#[case::top_level("\npublic interface Foo\n{\n}", vec![(2, 18)])]
#[case::lowercase_i("\npublic interface iFoo\n{\n}", vec![(2, 18)])]
#[case::nested("\npublic class Bar\n{\n    public interface Foo\n    {\n    }\n}", vec![(4, 22)])]
#[case::conforming("public interface IFoo\n{\n}", vec![])]
#[case::nested_conforming("\npublic class Bar\n{\n    public interface IFoo\n    {\n    }\n}", vec![])]
#[case::classes_ignored("public class Foo {}\npublic struct Bar {}", vec![])]
#[case::two("interface A {}\ninterface B {}", vec![(1, 11), (2, 11)])]
#[case::comment_before_name("interface /* c */ Foo {}", vec![(1, 19)])]
#[case::column_counts_bytes("/* é */ interface Foo {}", vec![(1, 20)])]
#[case::doc_comment_before_declaration("/** Docs */\ninterface Foo {}", vec![(2, 11)])]
fn test_findings_location(#[case] text: &str, #[case] expected: Vec<(u32, u32)>) {
    let (host, _) = host_with(text);
    assert_eq!(locations(&host), expected);
}

#[test]
fn test_finding_metadata() {
    let (host, file) = host_with("\npublic interface Foo\n{\n}");
    let findings = host.analysis().naming_findings();

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].file, file);
    assert_eq!(&*findings[0].code, "SA1302");
    assert_eq!(&*findings[0].message, "Interface names must begin with 'I'");
}

const COM_IN_NATIVE_METHODS: &str = r#"
using System.Runtime.InteropServices;
public class NativeMethods
{
    [ComImport, Guid("C8123315-D374-4DB8-9E7A-CB3499E46F2C")]
    public interface FileOpenDialog
    {
    }
}"#;

const COM_IN_NESTED_NATIVE_METHODS: &str = r#"
using System.Runtime.InteropServices;
public class MyNativeMethods
{
    public class FileOperations
    {
        [ComImport, Guid("C8123315-D374-4DB8-9E7A-CB3499E46F2C")]
        public interface FileOpenDialog111
        {
        }
    }
}"#;

const COM_IN_NATIVE_METHODS_CLASS: &str = r#"
using System.Runtime.InteropServices;
public class NativeMethodsClass
{
    [ComImport, Guid("C8123315-D374-4DB8-9E7A-CB3499E46F2C")]
    public interface FileOpenDialog
    {
    }
}"#;

#[rstest]
#[case::native_methods(COM_IN_NATIVE_METHODS, vec![])]
#[case::ancestor_suffix(COM_IN_NESTED_NATIVE_METHODS, vec![])]
#[case::not_a_suffix(COM_IN_NATIVE_METHODS_CLASS, vec![(6, 22)])]
#[case::comment_after_attribute(
    "class NativeMethods { [ComImport] /* c */ interface FileOpenDialog {} }",
    vec![]
)]
fn test_native_methods_exemption(#[case] text: &str, #[case] expected: Vec<(u32, u32)>) {
    let (host, _) = host_with(text);
    assert_eq!(locations(&host), expected);
}

#[test]
fn test_malformed_declaration_does_not_block_others() {
    let (host, _) = host_with("interface { }\ninterface Foo { }");
    assert_eq!(locations(&host), vec![(2, 11)]);
}

// ============================================================================
// FIXES
// ============================================================================

#[rstest]
#[case::simple(
    "\npublic interface Foo\n{\n}",
    "\npublic interface IFoo\n{\n}"
)]
#[case::base_list_reference(
    "\npublic interface Foo\n{\n}\npublic class Bar : Foo\n{\n}",
    "\npublic interface IFoo\n{\n}\npublic class Bar : IFoo\n{\n}"
)]
#[case::lowercase_i(
    "\npublic interface iFoo\n{\n}",
    "\npublic interface IiFoo\n{\n}"
)]
#[case::native_methods_class(
    COM_IN_NATIVE_METHODS_CLASS,
    &COM_IN_NATIVE_METHODS_CLASS.replace("FileOpenDialog", "IFileOpenDialog")
)]
#[case::sibling_conflict(
    "\npublic interface Foo\n{\n}\npublic interface IFoo { }",
    "\npublic interface IFoo1\n{\n}\npublic interface IFoo { }"
)]
#[case::member_conflict(
    "\npublic interface Foo\n{\n    int IFoo { get; }\n}",
    "\npublic interface IFoo1\n{\n    int IFoo { get; }\n}"
)]
#[case::member_conflict_after_comment(
    "interface Foo { int /* c */ IFoo { get; } }",
    "interface IFoo1 { int /* c */ IFoo { get; } }"
)]
#[case::nested_conflict(
    "\npublic class Outer\n{\n    public interface Foo\n    {\n    }\n\n    public interface IFoo { }\n}",
    "\npublic class Outer\n{\n    public interface IFoo1\n    {\n    }\n\n    public interface IFoo { }\n}"
)]
#[case::containing_type_conflict(
    "\npublic class IFoo\n{\n    public interface Foo\n    {\n    }\n}",
    "\npublic class IFoo\n{\n    public interface IFoo1\n    {\n    }\n}"
)]
#[case::non_interface_conflict(
    "\npublic class Outer\n{\n    public interface Foo\n    {\n    }\n\n    private int IFoo => 0;\n}",
    "\npublic class Outer\n{\n    public interface IFoo1\n    {\n    }\n\n    private int IFoo => 0;\n}"
)]
#[case::qualified_reference(
    "namespace N { interface Foo {} }\nclass C : N.Foo { N.Foo field; }",
    "namespace N { interface IFoo {} }\nclass C : N.IFoo { N.IFoo field; }"
)]
#[case::generic_and_global(
    "namespace N { interface Foo<T> {} class C : global::N.Foo<int> { Foo<string> x; } }",
    "namespace N { interface IFoo<T> {} class C : global::N.IFoo<int> { IFoo<string> x; } }"
)]
#[case::partial_parts(
    "partial interface Foo {}\npartial interface Foo { void M(); }",
    "partial interface IFoo {}\npartial interface IFoo { void M(); }"
)]
#[case::verbatim_identifier(
    "interface @Foo {}\nclass C : @Foo {}",
    "interface @IFoo {}\nclass C : @IFoo {}"
)]
#[case::same_name_elsewhere_untouched(
    "namespace A { interface Foo {} class X : Foo {} }\nnamespace B { class Foo {} class Y : Foo {} }",
    "namespace A { interface IFoo {} class X : IFoo {} }\nnamespace B { class Foo {} class Y : Foo {} }"
)]
#[case::trivia_preserved(
    "interface /* keep */ Foo // trailing\n{\n}\nclass Bar :\n    Foo\n{\n}",
    "interface /* keep */ IFoo // trailing\n{\n}\nclass Bar :\n    IFoo\n{\n}"
)]
fn test_fix(#[case] before: &str, #[case] after: &str) {
    let (mut host, file) = host_with(before);
    assert_eq!(fix_first(&mut host, file), after);
}

#[rstest]
#[case::sibling("interface Foo {} interface IFoo {}")]
#[case::member("interface Foo { int IFoo { get; } }")]
#[case::member_after_comment("interface Foo { int /* c */ IFoo { get; } }")]
#[case::containing("class IFoo { interface Foo {} }")]
#[case::plain("interface Foo {} class Bar : Foo {}")]
fn test_fix_then_recheck_is_clean(#[case] before: &str) {
    let (mut host, file) = host_with(before);
    fix_first(&mut host, file);
    assert!(locations(&host).is_empty());
}

#[test]
fn test_conflict_in_external_assembly() {
    let (mut host, file) = host_with("\nnamespace System\n{\n    public interface Disposable\n    {\n    }\n}\n");
    host.set_external_symbols(
        ExternalSymbols::new().with_type("System.IDisposable", SymbolKind::INTERFACE),
    );

    assert_eq!(locations(&host), vec![(4, 22)]);
    assert_eq!(
        fix_first(&mut host, file),
        "\nnamespace System\n{\n    public interface IDisposable1\n    {\n    }\n}\n"
    );
    assert!(locations(&host).is_empty());
}

#[test]
fn test_fix_spans_files() {
    let mut host = AnalysisHost::new();
    let decl = host.set_file_content("Foo.cs", "namespace Lib { public interface Foo {} }");
    let user = host.set_file_content(
        "User.cs",
        "using Lib;\nnamespace App { class Impl : Foo { } class Other : Lib.Foo { } }",
    );

    let analysis = host.analysis();
    let findings = analysis.naming_findings();
    assert_eq!(findings.len(), 1);
    let outcome = analysis.fix(&findings[0]).unwrap();
    assert_eq!(outcome.change.edit_count(), 3);
    host.apply_change(&outcome.change).unwrap();

    assert_eq!(
        host.file_text(decl).as_deref(),
        Some("namespace Lib { public interface IFoo {} }")
    );
    assert_eq!(
        host.file_text(user).as_deref(),
        Some("using Lib;\nnamespace App { class Impl : IFoo { } class Other : Lib.IFoo { } }")
    );
}

#[test]
fn test_unbound_reference_is_reported_not_edited() {
    let text = "interface Foo {}\nclass C : Foo { void M() { Get().Foo(); } }";
    let (host, _) = host_with(text);
    let analysis = host.analysis();
    let finding = analysis.naming_findings().remove(0);
    let outcome = analysis.fix(&finding).unwrap();

    assert!(outcome.is_partial());
    assert_eq!(outcome.unresolved.len(), 1);
    assert_eq!(outcome.unresolved[0].reason, UnresolvedReason::ExpressionQualifier);
    assert_eq!((outcome.unresolved[0].location.line, outcome.unresolved[0].location.col), (1, 33));
    assert_eq!(outcome.change.edit_count(), 2);
}

#[test]
fn test_fixes_from_one_snapshot_cannot_be_combined() {
    let (mut host, _) = host_with("interface Foo {}\ninterface Bar {}");
    let analysis = host.analysis();
    let findings = analysis.naming_findings();
    let first = analysis.fix(&findings[0]).unwrap();
    let second = analysis.fix(&findings[1]).unwrap();

    host.apply_change(&first.change).unwrap();
    assert!(matches!(
        host.apply_change(&second.change),
        Err(FixError::StaleSnapshot { .. })
    ));
}

#[test]
fn test_fix_of_conforming_declaration_is_rejected() {
    let (host, _) = host_with("interface IFoo {} class Foo {}");
    let analysis = host.analysis();
    let decls: Vec<_> = analysis.model().tree().decls().map(|(id, _)| id).collect();

    assert!(matches!(
        analysis.resolve_new_name(decls[0]),
        Err(FixError::AlreadyConforming { .. })
    ));
    assert!(matches!(
        analysis.resolve_new_name(decls[1]),
        Err(FixError::NotAnInterface { .. })
    ));
}

#[test]
fn test_rename_rejects_invalid_identifier() {
    let (host, _) = host_with("interface Foo {}");
    let analysis = host.analysis();
    let finding = analysis.naming_findings().remove(0);

    assert!(matches!(
        analysis.rename(finding.decl, "I Foo"),
        Err(FixError::InvalidIdentifier(_))
    ));
}

// ============================================================================
// FIX ALL
// ============================================================================

#[test]
fn test_fix_all_applies_sequentially() {
    let (mut host, file) =
        host_with("interface Foo {}\ninterface IFoo {}\ninterface Bar {}\nclass C : Foo, Bar {}");
    let report = host.fix_all();

    assert!(report.is_clean());
    assert_eq!(report.applied.len(), 2);
    assert_eq!(
        host.file_text(file).as_deref(),
        Some("interface IFoo1 {}\ninterface IFoo {}\ninterface IBar {}\nclass C : IFoo1, IBar {}")
    );
    assert!(locations(&host).is_empty());
}

#[test]
fn test_fix_all_resolves_against_earlier_fixes() {
    // Once the outer `Foo` is `IFoo`, the nested one can no longer use it.
    let (mut host, file) = host_with("interface Foo {}\nclass Outer { interface Foo {} }");
    let report = host.fix_all();

    assert_eq!(report.applied.len(), 2);
    assert_eq!(
        host.file_text(file).as_deref(),
        Some("interface IFoo {}\nclass Outer { interface IFoo1 {} }")
    );
}

#[test]
fn test_fix_all_continues_after_failure() {
    let mut host = AnalysisHost::new().with_config(AnalysisConfig::default().with_max_suffix_attempts(0));
    let file = host.set_file_content("A.cs", "interface Foo {}\ninterface IFoo {}\ninterface Bar {}");
    let report = host.fix_all();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "Foo");
    assert!(matches!(
        report.failed[0].error,
        FixError::ResolutionExhausted { attempts: 0, .. }
    ));
    assert_eq!(report.applied.len(), 1);
    assert_eq!(
        host.file_text(file).as_deref(),
        Some("interface Foo {}\ninterface IFoo {}\ninterface IBar {}")
    );
}

#[test]
fn test_fix_all_fixes_each_declaration_once() {
    let (mut host, file) = host_with("interface iFoo {}");
    let report = host.fix_all();

    assert_eq!(report.applied.len(), 1);
    assert_eq!(host.file_text(file).as_deref(), Some("interface IiFoo {}"));
}

#[test]
fn test_sequential_check_matches_parallel() {
    let text = "interface A {}\nclass C { interface B {} }\ninterface ID {}\ninterface e {}";
    let mut sequential = AnalysisHost::new().with_config(AnalysisConfig::default().with_parallel_check(false));
    sequential.set_file_content("Test0.cs", text);
    let (parallel, _) = host_with(text);

    assert_eq!(locations(&sequential), locations(&parallel));
    assert_eq!(locations(&parallel), vec![(1, 11), (2, 21), (4, 11)]);
}
