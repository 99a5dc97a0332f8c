use ruby_prism::Node;

/// Declares [`NodeKind`] together with its mapping from Prism nodes and its
/// display name, so the three can never disagree.
macro_rules! node_kinds {
    ($($kind:ident),* $(,)?) => {
        /// Variant tag of a lowered syntax node, one per Prism node type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum NodeKind {
            $($kind,)*
            /// A Prism node type newer than this table. Still visited and
            /// descended into like any other node.
            Unrecognized,
        }

        impl NodeKind {
            #[allow(unreachable_patterns)]
            pub fn of(node: &Node<'_>) -> Self {
                match node {
                    $(Node::$kind { .. } => Self::$kind,)*
                    _ => Self::Unrecognized,
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$kind => stringify!($kind),)*
                    Self::Unrecognized => "Unrecognized",
                }
            }

            pub const ALL: &'static [NodeKind] = &[$(Self::$kind,)* Self::Unrecognized];
        }
    };
}

node_kinds! {
    // Aliases and boolean operators
    AliasGlobalVariableNode,
    AliasMethodNode,
    AndNode,
    OrNode,

    // Collections and arguments
    ArgumentsNode,
    ArrayNode,
    AssocNode,
    AssocSplatNode,
    BlockArgumentNode,
    HashNode,
    KeywordHashNode,
    SplatNode,
    ForwardingArgumentsNode,

    // Pattern matching
    AlternationPatternNode,
    ArrayPatternNode,
    CapturePatternNode,
    CaseMatchNode,
    FindPatternNode,
    HashPatternNode,
    ImplicitNode,
    ImplicitRestNode,
    InNode,
    MatchPredicateNode,
    MatchRequiredNode,
    MatchWriteNode,
    PinnedExpressionNode,
    PinnedVariableNode,

    // Control flow
    BeginNode,
    BreakNode,
    CaseNode,
    ElseNode,
    EnsureNode,
    FlipFlopNode,
    ForNode,
    IfNode,
    NextNode,
    RedoNode,
    RescueModifierNode,
    RescueNode,
    RetryNode,
    ReturnNode,
    UnlessNode,
    UntilNode,
    WhenNode,
    WhileNode,
    YieldNode,

    // Blocks, lambdas and parameters
    BlockLocalVariableNode,
    BlockNode,
    BlockParameterNode,
    BlockParametersNode,
    ForwardingParameterNode,
    ItParametersNode,
    KeywordRestParameterNode,
    LambdaNode,
    NoKeywordsParameterNode,
    NumberedParametersNode,
    OptionalKeywordParameterNode,
    OptionalParameterNode,
    ParametersNode,
    RequiredKeywordParameterNode,
    RequiredParameterNode,
    RestParameterNode,

    // Calls
    CallAndWriteNode,
    CallNode,
    CallOperatorWriteNode,
    CallOrWriteNode,
    CallTargetNode,
    ForwardingSuperNode,
    IndexAndWriteNode,
    IndexOperatorWriteNode,
    IndexOrWriteNode,
    IndexTargetNode,
    SuperNode,

    // Declarations
    ClassNode,
    DefNode,
    ModuleNode,
    SingletonClassNode,
    UndefNode,

    // Constants
    ConstantAndWriteNode,
    ConstantOperatorWriteNode,
    ConstantOrWriteNode,
    ConstantPathAndWriteNode,
    ConstantPathNode,
    ConstantPathOperatorWriteNode,
    ConstantPathOrWriteNode,
    ConstantPathTargetNode,
    ConstantPathWriteNode,
    ConstantReadNode,
    ConstantTargetNode,
    ConstantWriteNode,
    ShareableConstantNode,

    // Variables
    BackReferenceReadNode,
    ClassVariableAndWriteNode,
    ClassVariableOperatorWriteNode,
    ClassVariableOrWriteNode,
    ClassVariableReadNode,
    ClassVariableTargetNode,
    ClassVariableWriteNode,
    GlobalVariableAndWriteNode,
    GlobalVariableOperatorWriteNode,
    GlobalVariableOrWriteNode,
    GlobalVariableReadNode,
    GlobalVariableTargetNode,
    GlobalVariableWriteNode,
    InstanceVariableAndWriteNode,
    InstanceVariableOperatorWriteNode,
    InstanceVariableOrWriteNode,
    InstanceVariableReadNode,
    InstanceVariableTargetNode,
    InstanceVariableWriteNode,
    ItLocalVariableReadNode,
    LocalVariableAndWriteNode,
    LocalVariableOperatorWriteNode,
    LocalVariableOrWriteNode,
    LocalVariableReadNode,
    LocalVariableTargetNode,
    LocalVariableWriteNode,
    MultiTargetNode,
    MultiWriteNode,
    NumberedReferenceReadNode,

    // Literals
    FalseNode,
    FloatNode,
    ImaginaryNode,
    IntegerNode,
    InterpolatedMatchLastLineNode,
    InterpolatedRegularExpressionNode,
    InterpolatedStringNode,
    InterpolatedSymbolNode,
    InterpolatedXStringNode,
    EmbeddedStatementsNode,
    EmbeddedVariableNode,
    MatchLastLineNode,
    NilNode,
    RangeNode,
    RationalNode,
    RegularExpressionNode,
    SelfNode,
    SourceEncodingNode,
    SourceFileNode,
    SourceLineNode,
    StringNode,
    SymbolNode,
    TrueNode,
    XStringNode,

    // Program structure
    DefinedNode,
    MissingNode,
    ParenthesesNode,
    PostExecutionNode,
    PreExecutionNode,
    ProgramNode,
    StatementsNode,
}

impl NodeKind {
    /// Kinds that name a constant: bare reads, path segments, and the
    /// assignment/target forms that declare one. Module and class names are
    /// reached through their read/path children.
    pub fn introduces_constant(self) -> bool {
        matches!(
            self,
            Self::ConstantReadNode
                | Self::ConstantPathNode
                | Self::ConstantWriteNode
                | Self::ConstantAndWriteNode
                | Self::ConstantOrWriteNode
                | Self::ConstantOperatorWriteNode
                | Self::ConstantTargetNode
        )
    }

    /// Kinds a definition query can start from.
    pub fn supports_definition(self) -> bool {
        matches!(self, Self::ConstantReadNode)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
