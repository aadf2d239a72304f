//! Syntax tree nodes for the scripting language
//!
//! Models the subset of the language that build plugins touch:
//! function declarations, parameters, and the expression kinds needed
//! to splice new statements into a function body. Every node renders
//! itself back to source via `transpile()`, which is what the program
//! serialization phase emits.

/// Declaration keyword of a function statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Sub,
    Function,
}

impl FunctionKind {
    /// Keyword that opens the declaration
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionKind::Sub => "sub",
            FunctionKind::Function => "function",
        }
    }

    /// Keyword pair that closes the declaration
    pub fn end_str(&self) -> &'static str {
        match self {
            FunctionKind::Sub => "end sub",
            FunctionKind::Function => "end function",
        }
    }
}

/// Expression node kinds.
///
/// String literals store their source-level text: embedded double
/// quotes must already be doubled (see [`escape_double_quotes`]), and
/// `transpile` wraps the text in quotes verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Bare identifier reference, e.g. `args`
    Variable { name: String },
    /// Member access, e.g. `args.append`
    DottedGet { obj: Box<Expression>, name: String },
    /// Call, e.g. `parseJson("{}")`
    Call {
        callee: Box<Expression>,
        args: Vec<Expression>,
    },
    /// Double-quoted string literal
    StringLiteral { value: String },
    /// Integer literal
    IntegerLiteral { value: i64 },
    /// Associative-array literal, e.g. `{}` or `{ id: 1 }`
    AssocArrayLiteral { elements: Vec<(String, Expression)> },
}

impl Expression {
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable { name: name.into() }
    }

    pub fn dotted_get(obj: Expression, name: impl Into<String>) -> Self {
        Expression::DottedGet {
            obj: Box::new(obj),
            name: name.into(),
        }
    }

    pub fn call(callee: Expression, args: Vec<Expression>) -> Self {
        Expression::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn string_literal(value: impl Into<String>) -> Self {
        Expression::StringLiteral {
            value: value.into(),
        }
    }

    pub fn integer_literal(value: i64) -> Self {
        Expression::IntegerLiteral { value }
    }

    /// The empty associative-array literal `{}`
    pub fn empty_assoc_array() -> Self {
        Expression::AssocArrayLiteral {
            elements: Vec::new(),
        }
    }

    /// Render this expression back to source text
    pub fn transpile(&self) -> String {
        match self {
            Expression::Variable { name } => name.clone(),
            Expression::DottedGet { obj, name } => {
                format!("{}.{}", obj.transpile(), name)
            }
            Expression::Call { callee, args } => {
                let args = args
                    .iter()
                    .map(Expression::transpile)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({})", callee.transpile(), args)
            }
            Expression::StringLiteral { value } => format!("\"{}\"", value),
            Expression::IntegerLiteral { value } => value.to_string(),
            Expression::AssocArrayLiteral { elements } => {
                if elements.is_empty() {
                    "{}".to_string()
                } else {
                    let elements = elements
                        .iter()
                        .map(|(key, value)| format!("{}: {}", key, value.transpile()))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{{ {} }}", elements)
                }
            }
        }
    }
}

/// Escape a string for embedding in a double-quoted string literal.
///
/// The language escapes quotes by doubling them, so `{"a":"b"}`
/// becomes `{""a"":""b""}` inside a literal.
pub fn escape_double_quotes(text: &str) -> String {
    text.replace('"', "\"\"")
}

/// A formal parameter of a function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParameter {
    pub name: String,
    pub default_value: Option<Expression>,
    pub type_annotation: Option<String>,
}

impl FunctionParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_value: None,
            type_annotation: None,
        }
    }

    pub fn with_default(mut self, default_value: Expression) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn with_type(mut self, type_annotation: impl Into<String>) -> Self {
        self.type_annotation = Some(type_annotation.into());
        self
    }

    /// Render as `name [= default] [as type]`
    pub fn transpile(&self) -> String {
        let mut out = self.name.clone();
        if let Some(default_value) = &self.default_value {
            out.push_str(" = ");
            out.push_str(&default_value.transpile());
        }
        if let Some(type_annotation) = &self.type_annotation {
            out.push_str(" as ");
            out.push_str(type_annotation);
        }
        out
    }
}

/// A top-level `sub`/`function` declaration.
///
/// Carries the full capability set plugins rely on: a name, a mutable
/// parameter list, and a mutable statement body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStatement {
    pub kind: FunctionKind,
    pub name: String,
    pub parameters: Vec<FunctionParameter>,
    pub body: Vec<Statement>,
}

impl FunctionStatement {
    /// New `sub name()` with no parameters and an empty body
    pub fn sub(name: impl Into<String>) -> Self {
        Self {
            kind: FunctionKind::Sub,
            name: name.into(),
            parameters: Vec::new(),
            body: Vec::new(),
        }
    }

    /// New `function name()` with no parameters and an empty body
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            kind: FunctionKind::Function,
            name: name.into(),
            ..Self::sub("")
        }
    }

    pub fn with_parameter(mut self, parameter: FunctionParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_body(mut self, body: Vec<Statement>) -> Self {
        self.body = body;
        self
    }

    /// Render the full declaration, body indented four spaces
    pub fn transpile(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(FunctionParameter::transpile)
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!("{} {}({})\n", self.kind.as_str(), self.name, parameters);
        for statement in &self.body {
            for line in statement.transpile().lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str(self.kind.end_str());
        out
    }
}

/// Statement node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Function(FunctionStatement),
    Expression(Expression),
    Print(Expression),
}

impl Statement {
    pub fn as_function(&self) -> Option<&FunctionStatement> {
        match self {
            Statement::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut FunctionStatement> {
        match self {
            Statement::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Render this statement back to source text
    pub fn transpile(&self) -> String {
        match self {
            Statement::Function(func) => func.transpile(),
            Statement::Expression(expr) => expr.transpile(),
            Statement::Print(expr) => format!("print {}", expr.transpile()),
        }
    }
}
