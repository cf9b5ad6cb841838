//! End-to-end rule scenarios.
//!
//! Each test parses a C# document, runs the built-in registry through the
//! analysis driver and, where a fix exists, applies it through the fix
//! dispatcher. The fixed text is then parsed and analyzed again.
//!
//! # Organization
//!
//! - Composite forwarding (ACA0001)
//! - Comment removal (ACA0002 to ACA0005)
//! - Static imports (ACA0006)
//! - Compiler diagnostics (CS0161, CS0123, CS0407, CS1998, CS4016)
//! - Fix all
//! - Idempotence and stability

use sharpfix_core::diagnostic::{Diagnostic, DiagnosticPayload};
use sharpfix_core::text::span_text;
use sharpfix_csharp::{
    AnalysisConfig, AnalysisDriver, Document, EnglishResources, FixCandidate, FixDispatcher,
    RuleRegistry,
};

// ============================================================================
// Harness
// ============================================================================

fn analyze(source: &str) -> (Document, Vec<Diagnostic>) {
    let document = Document::parse("Test.cs", source).expect("source parses");
    let registry = RuleRegistry::builtin();
    let config = AnalysisConfig::default();
    let diagnostics = AnalysisDriver::new(&registry, &config).analyze(&document);
    (document, diagnostics)
}

fn of_rule<'d>(diagnostics: &'d [Diagnostic], rule_id: &str) -> Vec<&'d Diagnostic> {
    diagnostics.iter().filter(|d| d.is_rule(rule_id)).collect()
}

/// All candidates for the first diagnostic of `rule_id`.
fn candidates(source: &str, rule_id: &str) -> Vec<FixCandidate> {
    let (document, diagnostics) = analyze(source);
    let diagnostic = of_rule(&diagnostics, rule_id)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("no {rule_id} diagnostic"));
    let registry = RuleRegistry::builtin();
    FixDispatcher::new(&registry, &EnglishResources).candidates(&document, diagnostic)
}

/// Text after applying the single fix for the first `rule_id` diagnostic.
fn fix(source: &str, rule_id: &str) -> String {
    let candidates = candidates(source, rule_id);
    assert_eq!(candidates.len(), 1, "expected one fix for {rule_id}");
    candidates[0].apply().text()
}

fn fix_all(source: &str, key: &str) -> String {
    let (document, diagnostics) = analyze(source);
    let registry = RuleRegistry::builtin();
    let outcome = FixDispatcher::new(&registry, &EnglishResources)
        .fix_all(&document, &diagnostics, key)
        .expect("fix all succeeds");
    assert!(outcome.skipped.is_empty(), "no fix should be skipped");
    outcome.document.text()
}

// ============================================================================
// Composite forwarding
// ============================================================================

mod forwarding {
    //! A composite holding a collection of its own interface forwards each
    //! empty interface method to every element.

    use super::*;

    fn composite(return_type: &str, modifiers: &str) -> String {
        format!(
            r#"using System;
using System.Collections.Generic;
using System.Linq;
using System.Threading.Tasks;

namespace ConsoleApplication1
{{
    public interface ICustomInterface
    {{
        {return_type} Method1(object p1);
    }}

    public class TypeName : ICustomInterface
    {{
        private ICollection<ICustomInterface> _disposables;

        public {modifiers}{return_type} Method1(object p1)
        {{
        }}
    }}
}}
"#
        )
    }

    #[test]
    fn void_method_is_reported_with_method_and_member() {
        let source = composite("void", "");
        let (_, diagnostics) = analyze(&source);
        let forwarding = of_rule(&diagnostics, "ACA0001");
        assert_eq!(forwarding.len(), 1);
        let diagnostic = forwarding[0];
        assert_eq!(span_text(&source, diagnostic.span), "Method1");
        assert_eq!(
            diagnostic.message_args,
            vec!["Method1".to_string(), "_disposables".to_string()]
        );
        assert_eq!(diagnostic.forwarding_member(), Some("_disposables"));
        assert!(diagnostic.span.start > source.find("public void").unwrap());
    }

    #[test]
    fn void_method_loops_over_the_collection() {
        let fixed = fix(&composite("void", ""), "ACA0001");
        let expected = composite("void", "").replace(
            "        {\n        }\n",
            "        {\n            foreach (var item in _disposables)\n            {\n                item.Method1(p1);\n            }\n        }\n",
        );
        assert_eq!(fixed, expected);
    }

    #[test]
    fn boolean_method_requires_all_children() {
        let fixed = fix(&composite("bool", ""), "ACA0001");
        assert!(fixed.contains("            return _disposables.All(item => item.Method1(p1));\n"));
        assert_eq!(fixed.matches("using System.Linq;").count(), 1);
    }

    #[test]
    fn task_method_waits_for_all_children() {
        let fixed = fix(&composite("Task", ""), "ACA0001");
        assert!(fixed
            .contains("            return Task.WhenAll(_disposables.Select(item => item.Method1(p1)));\n"));
    }

    #[test]
    fn async_task_method_awaits_all_children() {
        let fixed = fix(&composite("Task", "async "), "ACA0001");
        assert!(fixed
            .contains("            await Task.WhenAll(_disposables.Select(item => item.Method1(p1)));\n"));
    }

    #[test]
    fn candidate_title_and_key_name_the_member() {
        let candidates = candidates(&composite("void", ""), "ACA0001");
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].title,
            "Forward execution of \"Method1\" to member \"_disposables\""
        );
        assert_eq!(
            candidates[0].equivalence_key,
            "ACA0001-FixByForwardingToCollectionChildren_disposables"
        );
    }

    #[test]
    fn implemented_method_is_not_reported() {
        let source = composite("void", "").replace(
            "        {\n        }\n",
            "        {\n            Console.WriteLine(p1);\n        }\n",
        );
        let (_, diagnostics) = analyze(&source);
        assert!(of_rule(&diagnostics, "ACA0001").is_empty());
    }

    #[test]
    fn throwing_stub_is_replaced() {
        let source = composite("void", "").replace(
            "        {\n        }\n",
            "        {\n            throw new NotImplementedException();\n        }\n",
        );
        let fixed = fix(&source, "ACA0001");
        assert!(!fixed.contains("NotImplementedException"));
        assert!(fixed.contains("                item.Method1(p1);\n"));
    }
}

// ============================================================================
// Comment removal
// ============================================================================

mod comments {
    //! Comment rules report the enclosing declaration and strip comments
    //! only inside it.

    use super::*;

    const METHOD: &str = r#"class TypeName
{
    public void Method1()
    {
        // step one
        Run(); /* inline */
        Stop();
    }

    public void Method2()
    {
        Stop();
    }
}
"#;

    #[test]
    fn method_comments_are_reported_at_the_method() {
        let (_, diagnostics) = analyze(METHOD);
        let methods = of_rule(&diagnostics, "ACA0003");
        assert_eq!(methods.len(), 1);
        assert_eq!(span_text(METHOD, methods[0].span), "Method1");
    }

    #[test]
    fn method_comments_are_removed() {
        let fixed = fix(METHOD, "ACA0003");
        let expected = r#"class TypeName
{
    public void Method1()
    {
        Run();
        Stop();
    }

    public void Method2()
    {
        Stop();
    }
}
"#;
        assert_eq!(fixed, expected);
    }

    #[test]
    fn class_comments_reach_every_member() {
        let source = "class TypeName\n{\n    // field\n    int _count;\n\n    void M()\n    {\n        Run(); // call\n    }\n}\n";
        let fixed = fix(source, "ACA0002");
        assert!(!fixed.contains("//"));
        assert!(fixed.contains("    int _count;\n"));
        assert!(fixed.contains("        Run();\n"));
    }

    #[test]
    fn namespace_comments_are_removed() {
        let source = "namespace App\n{\n    // top\n    class A\n    {\n    }\n\n    /* block */\n    class B\n    {\n    }\n}\n";
        let (_, diagnostics) = analyze(source);
        assert_eq!(of_rule(&diagnostics, "ACA0005").len(), 1);
        let fixed = fix(source, "ACA0005");
        assert!(!fixed.contains("top"));
        assert!(!fixed.contains("block"));
        assert!(Document::parse("Test.cs", &fixed).is_ok());
    }

    #[test]
    fn array_initializer_comments_are_removed() {
        let source = "class C\n{\n    int[] Values = new[]\n    {\n        1, // one\n        2, // two\n    };\n}\n";
        let (_, diagnostics) = analyze(source);
        assert_eq!(of_rule(&diagnostics, "ACA0004").len(), 1);
        let fixed = fix(source, "ACA0004");
        assert!(!fixed.contains("// one"));
        assert!(!fixed.contains("// two"));
        assert!(fixed.contains("        1,\n        2,\n"));
    }

    #[test]
    fn code_without_comments_is_quiet() {
        let (_, diagnostics) = analyze("namespace App\n{\n    class A\n    {\n        void M() { }\n    }\n}\n");
        assert!(diagnostics.is_empty());
    }
}

// ============================================================================
// Static imports
// ============================================================================

mod static_import {
    //! A static class used at least five times is offered as `using static`.

    use super::*;

    fn program(calls: &[&str]) -> String {
        let body: String = calls
            .iter()
            .map(|name| format!("            Helper.{name}();\n"))
            .collect();
        format!(
            r#"using System;

namespace App
{{
    public static class Helper
    {{
        public static void A() {{ }}
        public static void B() {{ }}
        public static void C() {{ }}
        public static void D() {{ }}
        public static void E() {{ }}
    }}

    public class Program
    {{
        public void Run()
        {{
{body}        }}
    }}
}}
"#
        )
    }

    #[test]
    fn five_accesses_report_once_at_the_first_qualifier() {
        let source = program(&["A", "B", "C", "D", "E"]);
        let (_, diagnostics) = analyze(&source);
        let imports = of_rule(&diagnostics, "ACA0006");
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].span.start, source.find("Helper.A()").unwrap());
        assert_eq!(span_text(&source, imports[0].span), "Helper");
        assert_eq!(imports[0].message_args, vec!["Helper".to_string()]);
        assert_eq!(
            imports[0].payload,
            DiagnosticPayload::StaticImport {
                type_name: "App.Helper".to_string()
            }
        );
    }

    #[test]
    fn four_accesses_are_not_reported() {
        let (_, diagnostics) = analyze(&program(&["A", "B", "C", "D"]));
        assert!(of_rule(&diagnostics, "ACA0006").is_empty());
    }

    #[test]
    fn fix_imports_the_type_and_drops_qualifiers() {
        let source = program(&["A", "B", "C", "D", "E"]);
        let fixed = fix(&source, "ACA0006");
        assert!(fixed.starts_with("using System;\nusing static App.Helper;\n"));
        assert!(!fixed.contains("Helper.A()"));
        for name in ["A", "B", "C", "D", "E"] {
            assert!(fixed.contains(&format!("            {name}();\n")));
        }
    }

    #[test]
    fn threshold_comes_from_configuration() {
        let source = program(&["A", "B"]);
        let document = Document::parse("Test.cs", &source).unwrap();
        let registry = RuleRegistry::builtin();
        let config = AnalysisConfig {
            static_import_threshold: 2,
            ..AnalysisConfig::default()
        };
        let diagnostics = AnalysisDriver::new(&registry, &config).analyze(&document);
        assert_eq!(of_rule(&diagnostics, "ACA0006").len(), 1);
    }
}

// ============================================================================
// Compiler diagnostics
// ============================================================================

mod compiler {
    //! Fixes for diagnostics the semantic model reports the way the C#
    //! compiler would.

    use super::*;

    #[test]
    fn throw_is_added_only_to_the_falling_branch() {
        let source = r#"using System;

class TypeName
{
    int Get(bool flag)
    {
        if (flag)
        {
            return 1;
        }
        else
        {
            Log();
        }
    }
}
"#;
        let (_, diagnostics) = analyze(source);
        let missing = of_rule(&diagnostics, "CS0161");
        assert_eq!(missing.len(), 1);
        assert_eq!(span_text(source, missing[0].span), "Get");

        let candidates = candidates(source, "CS0161");
        assert_eq!(
            candidates[0].title,
            "Throw NotImplementedException in branches of \"Get\" that do not return int"
        );
        let fixed = candidates[0].apply().text();
        assert_eq!(fixed.matches("throw new NotImplementedException();").count(), 1);
        assert!(fixed.contains(
            "        else\n        {\n            throw new NotImplementedException();\n            Log();\n        }\n"
        ));
        assert!(fixed.contains("        if (flag)\n        {\n            return 1;\n        }\n"));
    }

    #[test]
    fn async_method_without_await_returns_task_from_result() {
        let source = "using System.Threading.Tasks;\n\nclass C\n{\n    public async Task<int> Get()\n    {\n        return 1;\n    }\n}\n";
        let fixed = fix(source, "CS1998");
        assert_eq!(
            fixed,
            "using System.Threading.Tasks;\n\nclass C\n{\n    public Task<int> Get()\n    {\n        return Task.FromResult(1);\n    }\n}\n"
        );
    }

    #[test]
    fn task_returned_from_async_method_is_unwrapped() {
        let source = "using System.Threading.Tasks;\n\nclass C\n{\n    async Task<int> Get()\n    {\n        await Task.Delay(1);\n        return Task.FromResult(3);\n    }\n}\n";
        let (_, diagnostics) = analyze(source);
        let wrong = of_rule(&diagnostics, "CS4016");
        assert_eq!(wrong.len(), 1);
        assert_eq!(span_text(source, wrong[0].span), "Task.FromResult(3)");
        assert_eq!(wrong[0].message_args, vec!["int".to_string()]);
        let fixed = fix(source, "CS4016");
        assert!(fixed.contains("        return 3;\n"));
    }

    #[test]
    fn wrong_return_type_follows_the_delegate() {
        let source = r#"using System;

namespace ConsoleApplication1
{
    class TypeName
    {
        TypeName()
        {
            var action = new Func<int, string>(TestMethod);
        }

        private int TestMethod(int param1)
        {
            throw new NotImplementedException();
        }
    }
}
"#;
        let (_, diagnostics) = analyze(source);
        let wrong = of_rule(&diagnostics, "CS0407");
        assert_eq!(wrong.len(), 1);
        assert_eq!(span_text(source, wrong[0].span), "TestMethod");

        let candidates = candidates(source, "CS0407");
        assert_eq!(candidates[0].title, "Change return type of \"TestMethod\" to string");
        let fixed = candidates[0].apply().text();
        assert!(fixed.contains("        private string TestMethod(int param1)\n"));
    }

    #[test]
    fn mismatched_parameters_follow_the_delegate() {
        let source = r#"using System;

class TypeName
{
    TypeName()
    {
        var action = new Action<int, string>(Handle);
    }

    private void Handle(string text, object value)
    {
    }
}
"#;
        let (_, diagnostics) = analyze(source);
        assert_eq!(of_rule(&diagnostics, "CS0123").len(), 1);
        let fixed = fix(source, "CS0123");
        assert!(fixed.contains("    private void Handle(int text, string value)\n"));
    }
}

// ============================================================================
// Fix all
// ============================================================================

mod fix_all {
    //! One equivalence key applied across a document.

    use super::*;

    const COMPOSITE: &str = r#"using System.Collections.Generic;

namespace App
{
    public interface ICheck
    {
        bool First();
        bool Second();
        void Third();
    }

    public class Checks : ICheck
    {
        private List<ICheck> _primary;
        private ICheck[] _backup;

        public bool First()
        {
        }

        public bool Second()
        {
        }

        public void Third()
        {
        }
    }
}
"#;

    #[test]
    fn each_method_is_reported_per_member() {
        let (_, diagnostics) = analyze(COMPOSITE);
        assert_eq!(of_rule(&diagnostics, "ACA0001").len(), 6);
    }

    #[test]
    fn key_selects_one_member_and_shares_the_import() {
        let fixed = fix_all(COMPOSITE, "ACA0001-FixByForwardingToCollectionChildren_primary");
        assert!(fixed.contains("            return _primary.All(item => item.First());\n"));
        assert!(fixed.contains("            return _primary.All(item => item.Second());\n"));
        assert!(fixed.contains("            foreach (var item in _primary)\n"));
        assert!(!fixed.contains("_backup.All"));
        assert_eq!(fixed.matches("using System.Linq;").count(), 1);
        assert!(Document::parse("Test.cs", &fixed).is_ok());
    }

    #[test]
    fn comment_fixes_across_methods_merge() {
        let source = "class C\n{\n    void A()\n    {\n        // a\n    }\n\n    void B()\n    {\n        // b\n    }\n\n    void D()\n    {\n        // d\n    }\n}\n";
        let fixed = fix_all(source, "ACA0003-FixByRemovingMethodComments");
        assert!(!fixed.contains("//"));
    }

    #[test]
    fn unknown_key_changes_nothing() {
        let fixed = fix_all(COMPOSITE, "ACA0001-FixByForwardingToCollectionChildren_missing");
        assert_eq!(fixed, COMPOSITE);
    }
}

// ============================================================================
// Idempotence and stability
// ============================================================================

mod stability {
    //! Applying a fix resolves its diagnostic, and analysis is deterministic.

    use super::*;

    const MIXED: &str = r#"using System;
using System.Collections.Generic;
using System.Threading.Tasks;

namespace App
{
    public interface IRunner
    {
        void Run();
    }

    // runners
    public class Runners : IRunner
    {
        private List<IRunner> _runners;

        public void Run()
        {
            // todo
        }

        async Task<int> Count()
        {
            return 1;
        }
    }
}
"#;

    #[test]
    fn every_fix_resolves_its_diagnostic_and_parses() {
        let (document, diagnostics) = analyze(MIXED);
        assert!(!diagnostics.is_empty());
        let registry = RuleRegistry::builtin();
        let dispatcher = FixDispatcher::new(&registry, &EnglishResources);
        for diagnostic in &diagnostics {
            for candidate in dispatcher.candidates(&document, diagnostic) {
                let fixed = candidate.apply().text();
                let (_, after) = analyze(&fixed);
                assert!(
                    !after.iter().any(|d| d == diagnostic),
                    "{} still reported after {}",
                    diagnostic.rule_id,
                    candidate.equivalence_key
                );
            }
        }
    }

    #[test]
    fn fixing_twice_offers_nothing_new() {
        let once = fix(MIXED, "CS1998");
        let (_, diagnostics) = analyze(&once);
        assert!(of_rule(&diagnostics, "CS1998").is_empty());
    }

    #[test]
    fn analysis_is_deterministic() {
        let (_, first) = analyze(MIXED);
        let (_, second) = analyze(MIXED);
        assert_eq!(first, second);
        let mut sorted = first.clone();
        sorted.sort_by(|a, b| a.span.cmp(&b.span).then_with(|| a.rule_id.cmp(&b.rule_id)));
        assert_eq!(first, sorted);
    }

    #[test]
    fn empty_document_has_no_diagnostics() {
        let (_, diagnostics) = analyze("");
        assert!(diagnostics.is_empty());
    }
}
