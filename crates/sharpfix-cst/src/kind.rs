// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Syntax kinds for tokens, trivia-carrying tokens and nodes.

use std::fmt;

/// The kind of a token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    // ------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------
    Identifier,
    NumericLiteral,
    StringLiteral,
    CharacterLiteral,
    EndOfFile,

    // Reserved keywords
    AbstractKeyword,
    AsKeyword,
    BaseKeyword,
    BoolKeyword,
    BreakKeyword,
    ByteKeyword,
    CaseKeyword,
    CatchKeyword,
    CharKeyword,
    CheckedKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DecimalKeyword,
    DefaultKeyword,
    DelegateKeyword,
    DoKeyword,
    DoubleKeyword,
    ElseKeyword,
    EnumKeyword,
    EventKeyword,
    ExplicitKeyword,
    ExternKeyword,
    FalseKeyword,
    FinallyKeyword,
    FloatKeyword,
    ForKeyword,
    ForeachKeyword,
    GotoKeyword,
    IfKeyword,
    ImplicitKeyword,
    InKeyword,
    IntKeyword,
    InterfaceKeyword,
    InternalKeyword,
    IsKeyword,
    LockKeyword,
    LongKeyword,
    NamespaceKeyword,
    NewKeyword,
    NullKeyword,
    ObjectKeyword,
    OperatorKeyword,
    OutKeyword,
    OverrideKeyword,
    ParamsKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    RefKeyword,
    ReturnKeyword,
    SbyteKeyword,
    SealedKeyword,
    ShortKeyword,
    SizeofKeyword,
    StaticKeyword,
    StringKeyword,
    StructKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeofKeyword,
    UintKeyword,
    UlongKeyword,
    UncheckedKeyword,
    UnsafeKeyword,
    UshortKeyword,
    UsingKeyword,
    VirtualKeyword,
    VoidKeyword,
    VolatileKeyword,
    WhileKeyword,

    // Contextual keywords (lexed as identifiers, re-kinded by the parser)
    AsyncKeyword,
    AwaitKeyword,
    GetKeyword,
    SetKeyword,
    InitKeyword,
    PartialKeyword,
    WhereKeyword,
    YieldKeyword,
    WhenKeyword,
    GlobalKeyword,
    AddKeyword,
    RemoveKeyword,
    NotKeyword,
    AndKeyword,
    OrKeyword,
    VarKeyword,
    RecordKeyword,
    WithKeyword,
    RequiredKeyword,

    // Punctuation and operators
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Comma,
    Dot,
    DotDot,
    Colon,
    ColonColon,
    Question,
    QuestionQuestion,
    QuestionQuestionEquals,
    Equals,
    EqualsEquals,
    EqualsGreater,
    Exclamation,
    ExclamationEquals,
    Less,
    LessEquals,
    LessLess,
    LessLessEquals,
    Greater,
    GreaterEquals,
    Plus,
    PlusPlus,
    PlusEquals,
    Minus,
    MinusMinus,
    MinusEquals,
    Asterisk,
    AsteriskEquals,
    Slash,
    SlashEquals,
    Percent,
    PercentEquals,
    Ampersand,
    AmpersandAmpersand,
    AmpersandEquals,
    Bar,
    BarBar,
    BarEquals,
    Caret,
    CaretEquals,
    Tilde,

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------
    CompilationUnit,
    UsingDirective,
    NameEquals,
    NamespaceDeclaration,
    FileScopedNamespaceDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    StructDeclaration,
    EnumDeclaration,
    EnumMemberDeclaration,
    DelegateDeclaration,
    BaseList,
    SimpleBaseType,
    TypeParameterList,
    TypeParameter,
    TypeParameterConstraintClause,
    AttributeList,
    Attribute,
    FieldDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    EqualsValueClause,
    PropertyDeclaration,
    AccessorList,
    GetAccessorDeclaration,
    SetAccessorDeclaration,
    InitAccessorDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    ConstructorInitializer,
    ExplicitInterfaceSpecifier,
    ParameterList,
    Parameter,
    ArrowExpressionClause,
    RecordDeclaration,
    EventFieldDeclaration,
    EventDeclaration,
    AddAccessorDeclaration,
    RemoveAccessorDeclaration,
    IndexerDeclaration,
    BracketedParameterList,
    OperatorDeclaration,
    ConversionOperatorDeclaration,
    DestructorDeclaration,
    /// Member tokens the parser could not read, kept verbatim.
    UnknownMember,

    // Types and names
    PredefinedType,
    IdentifierName,
    GenericName,
    QualifiedName,
    TypeArgumentList,
    ArrayType,
    ArrayRankSpecifier,
    NullableType,
    AliasQualifiedName,
    TupleType,
    TupleElement,

    // Statements
    Block,
    LocalDeclarationStatement,
    ExpressionStatement,
    IfStatement,
    ElseClause,
    ReturnStatement,
    ThrowStatement,
    ForEachStatement,
    ForStatement,
    WhileStatement,
    DoStatement,
    BreakStatement,
    ContinueStatement,
    EmptyStatement,
    TryStatement,
    CatchClause,
    CatchDeclaration,
    FinallyClause,
    UsingStatement,
    SwitchStatement,
    SwitchSection,
    CaseSwitchLabel,
    CasePatternSwitchLabel,
    DefaultSwitchLabel,
    WhenClause,
    CatchFilterClause,
    LockStatement,
    YieldReturnStatement,
    YieldBreakStatement,
    GotoStatement,
    LabeledStatement,
    LocalFunctionStatement,
    CheckedStatement,
    UnsafeStatement,
    /// Statement tokens the parser could not read, kept verbatim.
    UnknownStatement,

    // Patterns and designations
    SwitchExpressionArm,
    DeclarationPattern,
    ConstantPattern,
    RelationalPattern,
    UnaryPattern,
    BinaryPattern,
    DiscardPattern,
    VarPattern,
    RecursivePattern,
    PositionalPatternClause,
    PropertyPatternClause,
    Subpattern,
    ParenthesizedPattern,
    SingleVariableDesignation,
    ParenthesizedVariableDesignation,
    DiscardDesignation,
    SpreadElement,

    // Expressions
    LiteralExpression,
    ThisExpression,
    BaseExpression,
    ParenthesizedExpression,
    MemberAccessExpression,
    InvocationExpression,
    ElementAccessExpression,
    ArgumentList,
    BracketedArgumentList,
    Argument,
    NameColon,
    ObjectCreationExpression,
    ArrayCreationExpression,
    ImplicitArrayCreationExpression,
    InitializerExpression,
    SimpleLambdaExpression,
    ParenthesizedLambdaExpression,
    BinaryExpression,
    AssignmentExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    AwaitExpression,
    ConditionalExpression,
    CastExpression,
    TypeOfExpression,
    DefaultExpression,
    ConditionalAccessExpression,
    MemberBindingExpression,
    ElementBindingExpression,
    ThrowExpression,
    IsPatternExpression,
    SwitchExpression,
    DeclarationExpression,
    ImplicitObjectCreationExpression,
    AnonymousObjectCreationExpression,
    AnonymousMethodExpression,
    TupleExpression,
    CheckedExpression,
    SizeOfExpression,
    RangeExpression,
    WithExpression,
    CollectionExpression,
}

impl SyntaxKind {
    /// Look up a reserved keyword by its text.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        let kind = match text {
            "abstract" => AbstractKeyword,
            "as" => AsKeyword,
            "base" => BaseKeyword,
            "bool" => BoolKeyword,
            "break" => BreakKeyword,
            "byte" => ByteKeyword,
            "case" => CaseKeyword,
            "catch" => CatchKeyword,
            "char" => CharKeyword,
            "checked" => CheckedKeyword,
            "class" => ClassKeyword,
            "const" => ConstKeyword,
            "continue" => ContinueKeyword,
            "decimal" => DecimalKeyword,
            "default" => DefaultKeyword,
            "delegate" => DelegateKeyword,
            "do" => DoKeyword,
            "double" => DoubleKeyword,
            "else" => ElseKeyword,
            "enum" => EnumKeyword,
            "event" => EventKeyword,
            "explicit" => ExplicitKeyword,
            "extern" => ExternKeyword,
            "false" => FalseKeyword,
            "finally" => FinallyKeyword,
            "float" => FloatKeyword,
            "for" => ForKeyword,
            "foreach" => ForeachKeyword,
            "goto" => GotoKeyword,
            "if" => IfKeyword,
            "implicit" => ImplicitKeyword,
            "in" => InKeyword,
            "int" => IntKeyword,
            "interface" => InterfaceKeyword,
            "internal" => InternalKeyword,
            "is" => IsKeyword,
            "lock" => LockKeyword,
            "long" => LongKeyword,
            "namespace" => NamespaceKeyword,
            "new" => NewKeyword,
            "null" => NullKeyword,
            "object" => ObjectKeyword,
            "operator" => OperatorKeyword,
            "out" => OutKeyword,
            "override" => OverrideKeyword,
            "params" => ParamsKeyword,
            "private" => PrivateKeyword,
            "protected" => ProtectedKeyword,
            "public" => PublicKeyword,
            "readonly" => ReadonlyKeyword,
            "ref" => RefKeyword,
            "return" => ReturnKeyword,
            "sbyte" => SbyteKeyword,
            "sealed" => SealedKeyword,
            "short" => ShortKeyword,
            "sizeof" => SizeofKeyword,
            "static" => StaticKeyword,
            "string" => StringKeyword,
            "struct" => StructKeyword,
            "switch" => SwitchKeyword,
            "this" => ThisKeyword,
            "throw" => ThrowKeyword,
            "true" => TrueKeyword,
            "try" => TryKeyword,
            "typeof" => TypeofKeyword,
            "uint" => UintKeyword,
            "ulong" => UlongKeyword,
            "unchecked" => UncheckedKeyword,
            "unsafe" => UnsafeKeyword,
            "ushort" => UshortKeyword,
            "using" => UsingKeyword,
            "virtual" => VirtualKeyword,
            "void" => VoidKeyword,
            "volatile" => VolatileKeyword,
            "while" => WhileKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// True for tokens (as opposed to nodes).
    pub fn is_token(self) -> bool {
        self < SyntaxKind::CompilationUnit
    }

    /// True for keywords naming a built-in type.
    pub fn is_predefined_type(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            BoolKeyword
                | ByteKeyword
                | CharKeyword
                | DecimalKeyword
                | DoubleKeyword
                | FloatKeyword
                | IntKeyword
                | LongKeyword
                | ObjectKeyword
                | SbyteKeyword
                | ShortKeyword
                | StringKeyword
                | UintKeyword
                | UlongKeyword
                | UshortKeyword
                | VoidKeyword
        )
    }

    /// True for declaration modifiers.
    pub fn is_modifier(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            PublicKeyword
                | PrivateKeyword
                | ProtectedKeyword
                | InternalKeyword
                | StaticKeyword
                | AbstractKeyword
                | SealedKeyword
                | VirtualKeyword
                | OverrideKeyword
                | ReadonlyKeyword
                | ConstKeyword
                | ExternKeyword
                | NewKeyword
                | UnsafeKeyword
                | VolatileKeyword
                | AsyncKeyword
                | PartialKeyword
                | RequiredKeyword
        )
    }

    /// True for type declaration nodes.
    pub fn is_type_declaration(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            ClassDeclaration
                | InterfaceDeclaration
                | StructDeclaration
                | EnumDeclaration
                | DelegateDeclaration
        )
    }

    /// True for nodes that can appear in statement position.
    pub fn is_statement(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            Block
                | LocalDeclarationStatement
                | ExpressionStatement
                | IfStatement
                | ReturnStatement
                | ThrowStatement
                | ForEachStatement
                | ForStatement
                | WhileStatement
                | DoStatement
                | BreakStatement
                | ContinueStatement
                | EmptyStatement
                | TryStatement
                | UsingStatement
                | SwitchStatement
                | LockStatement
                | YieldReturnStatement
                | YieldBreakStatement
                | GotoStatement
                | LabeledStatement
                | LocalFunctionStatement
                | CheckedStatement
                | UnsafeStatement
                | UnknownStatement
        )
    }

    /// True for type syntax nodes.
    pub fn is_type_syntax(self) -> bool {
        use SyntaxKind::*;
        matches!(
            self,
            PredefinedType
                | IdentifierName
                | GenericName
                | QualifiedName
                | AliasQualifiedName
                | ArrayType
                | NullableType
                | TupleType
        )
    }

    /// True for nodes that can appear in expression position.
    pub fn is_expression(self) -> bool {
        use SyntaxKind::*;
        match self {
            ArgumentList | BracketedArgumentList | Argument | NameColon => false,
            IdentifierName | GenericName | QualifiedName | AliasQualifiedName | PredefinedType => {
                true
            }
            kind => (LiteralExpression..=CollectionExpression).contains(&kind),
        }
    }

    /// True for lambda expression nodes.
    pub fn is_lambda(self) -> bool {
        matches!(
            self,
            SyntaxKind::SimpleLambdaExpression | SyntaxKind::ParenthesizedLambdaExpression
        )
    }

    /// True for functions nested in a body: lambdas, anonymous methods and
    /// local functions. Their `return`s belong to themselves.
    pub fn is_nested_function(self) -> bool {
        self.is_lambda()
            || matches!(
                self,
                SyntaxKind::AnonymousMethodExpression | SyntaxKind::LocalFunctionStatement
            )
    }

    /// True for nodes holding tokens the parser skipped over.
    pub fn is_unknown(self) -> bool {
        matches!(self, SyntaxKind::UnknownStatement | SyntaxKind::UnknownMember)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
