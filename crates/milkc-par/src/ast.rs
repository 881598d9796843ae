//! AST node definitions for the expression dialect.
//!
//! The tree is a tagged sum over a handful of forms; every value in the
//! language is a float, so nodes carry no type annotations. `Var` nodes
//! reference their [`SymbolTable`](milkc_sem::SymbolTable) entry through
//! a stable [`VarId`] assigned at first sighting.

use milkc_sem::VarId;
use milkc_util::Symbol;

/// An expression tree node.
///
/// A statement block parses to `Sequence`; everything else is an
/// expression (assignment included - `a = (b = 1)` is legal, as in the
/// source dialect).
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Numeric literal.
    Const(f64),

    /// Variable reference.
    Var(VarId),

    /// Assignment or compound assignment.
    Assign(AssignExpr),

    /// Unary operation.
    Unary(UnaryExpr),

    /// Binary operation.
    Binary(BinaryExpr),

    /// Whitelisted function call.
    Call(CallExpr),

    /// Statement list; the root form of a parsed block.
    Sequence(Vec<Node>),
}

/// Assignment: `target op= value`.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignExpr {
    pub op: AssignOp,
    pub target: VarId,
    pub value: Box<Node>,
}

/// Unary operation: `-x` or `!x`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    pub op: UnOp,
    pub operand: Box<Node>,
}

/// Binary operation.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    pub op: BinOp,
    pub lhs: Box<Node>,
    pub rhs: Box<Node>,
}

/// Function call. The name has been validated against the whitelist and
/// the argument count against the function's arity.
#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub name: Symbol,
    pub args: Vec<Node>,
}

/// Assignment operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Set,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
    /// `%=`
    Mod,
    /// `&=`
    BitAnd,
    /// `|=`
    BitOr,
    /// `^=`
    Pow,
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    /// `-x`
    Neg,
    /// `!x` - logical not; `!x` is 1.0 when x is 0.0, else 0.0
    Not,
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `^` - power
    Pow,
    /// `&` - bitwise and over truncated operands
    BitAnd,
    /// `|` - bitwise or over truncated operands
    BitOr,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `&&`
    LogicalAnd,
    /// `||`
    LogicalOr,
}

impl BinOp {
    /// True for the six comparison operators, whose natural GLSL result
    /// type is `bool` rather than `float`.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::NotEq | BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq
        )
    }

    /// GLSL spelling for operators that emit as plain infix text.
    pub fn glsl_symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Lt => "<",
            BinOp::LtEq => "<=",
            BinOp::Gt => ">",
            BinOp::GtEq => ">=",
            BinOp::LogicalAnd => "&&",
            BinOp::LogicalOr => "||",
        }
    }
}

impl Node {
    /// True for a `Sequence` with no statements.
    pub fn is_empty_sequence(&self) -> bool {
        matches!(self, Node::Sequence(stmts) if stmts.is_empty())
    }
}
