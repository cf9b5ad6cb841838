// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::*;
use crate::green::GreenElement;

/// Pre-order list of node kinds.
fn node_kinds(node: &GreenNode) -> Vec<SyntaxKind> {
    let mut kinds = vec![node.kind()];
    for child in node.children() {
        if let GreenElement::Node(child) = child {
            kinds.extend(node_kinds(child));
        }
    }
    kinds
}

fn assert_round_trip(source: &str) {
    let root = parse_compilation_unit(source).unwrap_or_else(|e| panic!("{}: {}", e, source));
    assert_eq!(root.text(), source);
}

#[test]
fn test_round_trip_realistic_file() {
    assert_round_trip(
        r#"using System;
using System.Collections.Generic;
using static System.Math;
using Alias = System.Text;

namespace Acme.Widgets
{
    // Composite of widgets.
    public interface IWidget
    {
        void Render(int depth);
        bool IsVisible { get; }
    }

    [Serializable]
    public sealed class Composite<T> : IWidget, IDisposable where T : class, new()
    {
        private readonly List<IWidget> _children = new List<IWidget>();
        private int[] _sizes = new int[] { 1, 2, 3 };
        private static int s_count;

        public Composite(int capacity) : base()
        {
            _children = new List<IWidget>(capacity);
        }

        public bool IsVisible => _children.Count > 0;

        public string Name { get; private set; } = "root";

        public void Render(int depth)
        {
            foreach (var child in _children)
            {
                child.Render(depth + 1);
            }
            for (int i = 0; i < _sizes.Length; i++) { s_count += _sizes[i] >> 1; }
            if (depth > 3 && !IsVisible) return; else { depth--; }
        }

        async Task<bool> LoadAsync()
        {
            var ok = await Task.FromResult(true);
            return ok ? ok : (bool)(object)false;
        }

        void IDisposable.Dispose()
        {
            try { _children.Clear(); }
            catch (InvalidOperationException e) { throw; }
            finally { s_count = 0; }
        }
    }

    public enum Color { Red = 1, Green, Blue, }

    public delegate TResult Mapper<in TArg, out TResult>(TArg arg);
}
"#,
    );
}

#[test]
fn test_round_trip_crlf_and_comments() {
    assert_round_trip("class C\r\n{\r\n    /* a */ void M() { } // b\r\n}\r\n");
}

#[test]
fn test_round_trip_file_scoped_namespace() {
    assert_round_trip("namespace N;\n\nclass C { }\n");
}

#[test]
fn test_compilation_unit_structure() {
    let root = parse_compilation_unit("using System;\nnamespace N { class C { void M() { } } }").unwrap();
    assert_eq!(
        node_kinds(&root),
        vec![
            SyntaxKind::CompilationUnit,
            SyntaxKind::UsingDirective,
            SyntaxKind::IdentifierName,
            SyntaxKind::NamespaceDeclaration,
            SyntaxKind::IdentifierName,
            SyntaxKind::ClassDeclaration,
            SyntaxKind::MethodDeclaration,
            SyntaxKind::PredefinedType,
            SyntaxKind::ParameterList,
            SyntaxKind::Block,
        ]
    );
}

#[test]
fn test_local_declaration_versus_expression() {
    let local = parse_statement("var x = 1;").unwrap();
    assert_eq!(local.kind(), SyntaxKind::LocalDeclarationStatement);

    let assignment = parse_statement("x = 1;").unwrap();
    assert_eq!(assignment.kind(), SyntaxKind::ExpressionStatement);

    let generic = parse_statement("List<int> xs = null;").unwrap();
    assert_eq!(generic.kind(), SyntaxKind::LocalDeclarationStatement);

    let comparison = parse_statement("a < b;").unwrap();
    assert_eq!(comparison.kind(), SyntaxKind::ExpressionStatement);

    let awaited = parse_statement("await task;").unwrap();
    assert_eq!(awaited.kind(), SyntaxKind::ExpressionStatement);
    assert!(node_kinds(&awaited).contains(&SyntaxKind::AwaitExpression));
}

#[test]
fn test_generic_invocation_versus_comparison() {
    let generic = parse_expression("Task.FromResult<bool>(true)").unwrap();
    assert!(node_kinds(&generic).contains(&SyntaxKind::GenericName));

    let comparison = parse_expression("a < b && c > d").unwrap();
    assert!(!node_kinds(&comparison).contains(&SyntaxKind::GenericName));
}

#[test]
fn test_precedence() {
    let expression = parse_expression("a + b * c").unwrap();
    assert_eq!(expression.kind(), SyntaxKind::BinaryExpression);
    let right = expression.children()[2].as_node().unwrap();
    assert_eq!(right.text(), "b * c");
}

#[test]
fn test_shift_is_two_adjacent_tokens() {
    let expression = parse_expression("a >> 2").unwrap();
    assert_eq!(expression.kind(), SyntaxKind::BinaryExpression);
    assert_eq!(expression.children().len(), 4);
}

#[test]
fn test_lambdas() {
    let simple = parse_expression("item => item.Run()").unwrap();
    assert_eq!(simple.kind(), SyntaxKind::SimpleLambdaExpression);

    let parenthesized = parse_expression("(a, b) => a + b").unwrap();
    assert_eq!(parenthesized.kind(), SyntaxKind::ParenthesizedLambdaExpression);

    let asynchronous = parse_expression("async x => await x").unwrap();
    assert_eq!(asynchronous.kind(), SyntaxKind::SimpleLambdaExpression);
    assert_eq!(
        asynchronous.children()[0].kind(),
        SyntaxKind::AsyncKeyword
    );
}

#[test]
fn test_casts_versus_parentheses() {
    let cast = parse_expression("(int)x").unwrap();
    assert_eq!(cast.kind(), SyntaxKind::CastExpression);

    let negative_cast = parse_expression("(int)-x").unwrap();
    assert_eq!(negative_cast.kind(), SyntaxKind::CastExpression);

    let sum = parse_expression("(a) + b").unwrap();
    assert_eq!(sum.kind(), SyntaxKind::BinaryExpression);

    let awaited = parse_expression("(await Task.WhenAll(xs)).All(r => r)").unwrap();
    assert_eq!(awaited.kind(), SyntaxKind::InvocationExpression);
}

#[test]
fn test_creation_expressions() {
    let array = parse_expression("new int[] { 1, 2 }").unwrap();
    assert_eq!(array.kind(), SyntaxKind::ArrayCreationExpression);

    let sized = parse_expression("new string[5]").unwrap();
    assert_eq!(sized.kind(), SyntaxKind::ArrayCreationExpression);

    let implicit = parse_expression("new[] { a, b }").unwrap();
    assert_eq!(implicit.kind(), SyntaxKind::ImplicitArrayCreationExpression);

    let object = parse_expression("new Foo(1) { Name = \"x\" }").unwrap();
    assert_eq!(object.kind(), SyntaxKind::ObjectCreationExpression);
}

#[test]
fn test_explicit_interface_method() {
    let member = parse_member("void IDisposable.Dispose() { }").unwrap();
    assert_eq!(member.kind(), SyntaxKind::MethodDeclaration);
    assert!(node_kinds(&member).contains(&SyntaxKind::ExplicitInterfaceSpecifier));
}

#[test]
fn test_generic_method_declaration() {
    let member = parse_member("T Get<T>(int id) where T : new() => default(T);").unwrap();
    assert_eq!(member.kind(), SyntaxKind::MethodDeclaration);
    let kinds = node_kinds(&member);
    assert!(kinds.contains(&SyntaxKind::TypeParameterList));
    assert!(kinds.contains(&SyntaxKind::TypeParameterConstraintClause));
    assert!(kinds.contains(&SyntaxKind::ArrowExpressionClause));
}

#[test]
fn test_contextual_keywords_are_rekinded() {
    let member = parse_member("public async Task M() { await N(); }").unwrap();
    let text_kinds: Vec<SyntaxKind> = member
        .children()
        .iter()
        .filter_map(|c| c.as_token().map(|t| t.kind()))
        .collect();
    assert!(text_kinds.contains(&SyntaxKind::AsyncKeyword));

    let property = parse_member("int P { get; set; }").unwrap();
    let kinds = node_kinds(&property);
    assert!(kinds.contains(&SyntaxKind::GetAccessorDeclaration));
    assert!(kinds.contains(&SyntaxKind::SetAccessorDeclaration));
}

#[test]
fn test_fragment_keeps_trailing_trivia() {
    let statement = parse_statement("return x;  // done\n\n").unwrap();
    assert_eq!(statement.text(), "return x;  // done\n\n");
}

#[test]
fn test_errors_carry_offsets() {
    let err = parse_member("void M() { return }").unwrap_err();
    assert_eq!(err.offset, 18);
    assert!(err.message.contains("expected"));

    assert!(parse_compilation_unit("class C {").is_err());
    assert!(parse_expression("a +").is_err());
    assert!(parse_statement("x = 1; y").is_err());
}

const MODERN: &str = r#"global using System;
using System.Collections.Generic;

namespace Demo;

public record Point(int X, int Y);

public sealed class Shapes
{
    public event EventHandler Changed;
    public event EventHandler Moved { add { } remove { } }
    private readonly object _gate = new();
    private readonly Dictionary<string, int> _index = new();

    public int this[string key] => _index[key];

    public static Shapes operator +(Shapes a, Shapes b) => a;
    public static implicit operator string(Shapes s) => s.ToString();

    ~Shapes() { }

    public (int, string name) Pair() => (1, name: "a");

    public string Describe(object shape)
    {
        switch (shape)
        {
            case null:
                throw new ArgumentNullException(nameof(shape));
            case Point { X: 0 } p when p.Y > 0:
                return "axis";
            case int n:
            case long:
                break;
            default:
                goto Done;
        }
    Done:
        shape = null;
        var size = shape switch
        {
            string s => s.Length,
            Point(var x, _) => x,
            not null and { } => 1,
            _ => 0,
        };
        var name = shape?.ToString() ?? throw new InvalidOperationException();
        if (shape is string text && text.Length > size) { }
        if (int.TryParse(name, out var parsed)) { size += parsed; }
        lock (_gate) { size++; }
        var (left, right) = (size, name!);
        int Twice(int v) => v * 2;
        return Twice(left) + right[^1..];
    }

    public IEnumerable<int> Numbers()
    {
        yield return 1;
        yield break;
    }
}
"#;

#[test]
fn test_round_trip_modern_syntax() {
    assert_round_trip(MODERN);
    let kinds = node_kinds(&parse_compilation_unit(MODERN).unwrap());
    for expected in [
        SyntaxKind::RecordDeclaration,
        SyntaxKind::EventFieldDeclaration,
        SyntaxKind::EventDeclaration,
        SyntaxKind::ImplicitObjectCreationExpression,
        SyntaxKind::IndexerDeclaration,
        SyntaxKind::OperatorDeclaration,
        SyntaxKind::ConversionOperatorDeclaration,
        SyntaxKind::DestructorDeclaration,
        SyntaxKind::TupleType,
        SyntaxKind::TupleExpression,
        SyntaxKind::SwitchStatement,
        SyntaxKind::CaseSwitchLabel,
        SyntaxKind::CasePatternSwitchLabel,
        SyntaxKind::DefaultSwitchLabel,
        SyntaxKind::WhenClause,
        SyntaxKind::GotoStatement,
        SyntaxKind::LabeledStatement,
        SyntaxKind::SwitchExpression,
        SyntaxKind::ConditionalAccessExpression,
        SyntaxKind::ThrowExpression,
        SyntaxKind::IsPatternExpression,
        SyntaxKind::DeclarationExpression,
        SyntaxKind::LockStatement,
        SyntaxKind::LocalFunctionStatement,
        SyntaxKind::RangeExpression,
        SyntaxKind::YieldReturnStatement,
        SyntaxKind::YieldBreakStatement,
    ] {
        assert!(kinds.contains(&expected), "missing {expected}");
    }
    assert!(!kinds.iter().any(|k| k.is_unknown()));
}

#[test]
fn test_is_type_versus_is_pattern() {
    let type_test = parse_expression("x is string").unwrap();
    assert_eq!(type_test.kind(), SyntaxKind::BinaryExpression);

    let declaration = parse_expression("x is string s && s.Length > 0").unwrap();
    assert_eq!(declaration.kind(), SyntaxKind::BinaryExpression);
    let left = declaration.children()[0].as_node().unwrap();
    assert_eq!(left.kind(), SyntaxKind::IsPatternExpression);
    assert!(node_kinds(left).contains(&SyntaxKind::DeclarationPattern));

    let negated = parse_expression("x is not null").unwrap();
    assert_eq!(negated.kind(), SyntaxKind::IsPatternExpression);
    assert!(node_kinds(&negated).contains(&SyntaxKind::UnaryPattern));

    let property = parse_expression("x is { Length: > 2 or 0 }").unwrap();
    let kinds = node_kinds(&property);
    assert!(kinds.contains(&SyntaxKind::PropertyPatternClause));
    assert!(kinds.contains(&SyntaxKind::RelationalPattern));
    assert!(kinds.contains(&SyntaxKind::BinaryPattern));

    let conditional = parse_expression("x is int ? 1 : 2").unwrap();
    assert_eq!(conditional.kind(), SyntaxKind::ConditionalExpression);
}

#[test]
fn test_conditional_access_owns_the_rest_of_the_chain() {
    let access = parse_expression("a?.b.c(1)?[0]").unwrap();
    assert_eq!(access.kind(), SyntaxKind::ConditionalAccessExpression);
    assert_eq!(access.children()[0].as_node().unwrap().text(), "a");
    let kinds = node_kinds(&access);
    assert!(kinds.contains(&SyntaxKind::MemberBindingExpression));
    assert!(kinds.contains(&SyntaxKind::ElementBindingExpression));

    let conditional = parse_expression("a ? b : c").unwrap();
    assert_eq!(conditional.kind(), SyntaxKind::ConditionalExpression);

    let forgiving = parse_expression("a!.b").unwrap();
    assert_eq!(forgiving.kind(), SyntaxKind::MemberAccessExpression);
    assert_eq!(
        forgiving.children()[0].as_node().unwrap().kind(),
        SyntaxKind::PostfixUnaryExpression
    );
}

#[test]
fn test_switch_labels() {
    let statement = parse_statement(
        "switch (x) { case 1: case > 5: return; case Foo f when f.Ok: break; default: break; }",
    )
    .unwrap();
    assert_eq!(statement.kind(), SyntaxKind::SwitchStatement);
    let kinds = node_kinds(&statement);
    assert_eq!(
        kinds.iter().filter(|k| **k == SyntaxKind::SwitchSection).count(),
        3
    );
    assert_eq!(
        kinds.iter().filter(|k| **k == SyntaxKind::CaseSwitchLabel).count(),
        1
    );
    assert_eq!(
        kinds.iter().filter(|k| **k == SyntaxKind::CasePatternSwitchLabel).count(),
        2
    );

    let tuple = parse_statement("switch (a, b) { default: break; }").unwrap();
    assert!(node_kinds(&tuple).contains(&SyntaxKind::TupleExpression));
}

#[test]
fn test_local_function_versus_invocation() {
    let function = parse_statement("static async Task<int> Load(int id) { return await Get(id); }")
        .unwrap();
    assert_eq!(function.kind(), SyntaxKind::LocalFunctionStatement);

    let invocation = parse_statement("Load<int>(id);").unwrap();
    assert_eq!(invocation.kind(), SyntaxKind::ExpressionStatement);

    let awaited = parse_statement("await Load(id);").unwrap();
    assert_eq!(awaited.kind(), SyntaxKind::ExpressionStatement);
}

#[test]
fn test_assorted_expressions() {
    for (source, kind) in [
        ("new { Name = n, Age = 3 }", SyntaxKind::AnonymousObjectCreationExpression),
        ("delegate (int x) { return x; }", SyntaxKind::AnonymousMethodExpression),
        ("static x => x", SyntaxKind::SimpleLambdaExpression),
        ("checked(a + b)", SyntaxKind::CheckedExpression),
        ("sizeof(int)", SyntaxKind::SizeOfExpression),
        ("p with { X = 1 }", SyntaxKind::WithExpression),
        ("[1, 2, ..rest]", SyntaxKind::CollectionExpression),
        ("x >>= 1", SyntaxKind::AssignmentExpression),
        ("x <<= 1", SyntaxKind::AssignmentExpression),
        ("global::System.Math.Abs(x)", SyntaxKind::InvocationExpression),
    ] {
        let expression = parse_expression(source).unwrap_or_else(|e| panic!("{source}: {e}"));
        assert_eq!(expression.kind(), kind, "{source}");
    }
}

#[test]
fn test_assorted_statements() {
    for (source, kind) in [
        ("await foreach (var item in items) { }", SyntaxKind::ForEachStatement),
        ("await using var stream = Open();", SyntaxKind::LocalDeclarationStatement),
        ("foreach (var (key, value) in pairs) { }", SyntaxKind::ForEachStatement),
        ("(a, b) = (b, a);", SyntaxKind::ExpressionStatement),
        ("unchecked { x++; }", SyntaxKind::CheckedStatement),
        ("goto case 1;", SyntaxKind::GotoStatement),
        ("try { } catch (IOException e) when (e.HResult == 5) { }", SyntaxKind::TryStatement),
    ] {
        let statement = parse_statement(source).unwrap_or_else(|e| panic!("{source}: {e}"));
        assert_eq!(statement.kind(), kind, "{source}");
    }
}

#[test]
fn test_unreadable_statement_is_kept_opaque() {
    let source = "class C\n{\n    void M()\n    {\n        fixed (byte* p = buffer) { Use(p); }\n        Next();\n    }\n}\n";
    assert_round_trip(source);
    let root = parse_compilation_unit(source).unwrap();
    let kinds = node_kinds(&root);
    assert_eq!(
        kinds.iter().filter(|k| **k == SyntaxKind::UnknownStatement).count(),
        1
    );
    assert!(kinds.contains(&SyntaxKind::ExpressionStatement));
    assert!(kinds.contains(&SyntaxKind::MethodDeclaration));
}

#[test]
fn test_skipped_statement_stops_at_the_enclosing_brace() {
    let source = "class C { void M() { a b } void N() { } }";
    assert_round_trip(source);
    let kinds = node_kinds(&parse_compilation_unit(source).unwrap());
    assert!(kinds.contains(&SyntaxKind::UnknownStatement));
    assert_eq!(
        kinds.iter().filter(|k| **k == SyntaxKind::MethodDeclaration).count(),
        2
    );
}

#[test]
fn test_unreadable_member_is_kept_opaque() {
    let source = "class C\n{\n    public ref int Get() => ref _x;\n    void M() { }\n}\n";
    assert_round_trip(source);
    let kinds = node_kinds(&parse_compilation_unit(source).unwrap());
    assert!(kinds.contains(&SyntaxKind::UnknownMember));
    assert!(kinds.contains(&SyntaxKind::MethodDeclaration));
}

#[test]
fn test_recovery_does_not_hide_unterminated_input() {
    assert!(parse_compilation_unit("class C\n{\n    void M(\n").is_err());
    assert!(parse_compilation_unit("class C { void M() { fixed (").is_err());
    assert!(parse_statement("fixed (byte* p = buffer) { }").is_err());
    assert!(parse_member("public ref int Get() => ref _x;").is_err());
}

#[test]
fn test_assembly_attributes_stand_alone() {
    let source = "using System.Reflection;\n[assembly: AssemblyTitle(\"x\")]\n";
    assert_round_trip(source);
    let kinds = node_kinds(&parse_compilation_unit(source).unwrap());
    assert!(kinds.contains(&SyntaxKind::AttributeList));
}
