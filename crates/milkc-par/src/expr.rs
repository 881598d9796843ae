//! Expression parsing using Pratt parsing (top-down operator precedence).
//!
//! # Operator precedence (lowest to highest)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 1 | `=`, `+=`, `-=`, `*=`, `/=`, `%=`, `&=`, `\|=`, `^=` | Right |
//! | 2 | `\|\|` | Left |
//! | 3 | `&&` | Left |
//! | 4 | `\|` | Left |
//! | 5 | `&` | Left |
//! | 6 | `==`, `!=` | Left |
//! | 7 | `<`, `<=`, `>`, `>=` | Left |
//! | 8 | `+`, `-` | Left |
//! | 9 | `*`, `/`, `%` | Left |
//! | 10 | `^` (power) | Left |
//! | 11 | unary `-`, `!` | Prefix |
//!
//! `a + b * c` parses as `a + (b * c)`; `a = b = c` parses as
//! `a = (b = c)`.
//!
//! The comparison spellings `above(a, b)`, `below(a, b)` and
//! `equal(a, b)` are desugared here into the corresponding binary
//! comparison nodes - the dialect's evaluator treats both spellings as
//! the same operation, and downstream GLSL emission relies on seeing a
//! comparison node to produce a raw ternary condition.

use milkc_lex::Token;
use milkc_sem::tables;
use milkc_util::{Span, Symbol};

use crate::ast::{AssignExpr, AssignOp, BinOp, BinaryExpr, CallExpr, Node, UnOp, UnaryExpr};
use crate::{ParseError, Parser};

/// Binding power levels for Pratt parsing.
/// Higher numbers = tighter binding (higher precedence).
#[doc(hidden)]
pub mod bp {
    /// Minimum binding power (start of expression).
    pub const MIN: u8 = 0;

    /// Assignment: `=` and compound forms (right-associative).
    pub const ASSIGN: u8 = 2;

    /// Logical OR: `||`
    pub const LOGICAL_OR: u8 = 4;

    /// Logical AND: `&&`
    pub const LOGICAL_AND: u8 = 6;

    /// Bitwise OR: `|`
    pub const BITWISE_OR: u8 = 8;

    /// Bitwise AND: `&`
    pub const BITWISE_AND: u8 = 10;

    /// Equality: `==`, `!=`
    pub const EQUALITY: u8 = 12;

    /// Comparison: `<`, `<=`, `>`, `>=`
    pub const COMPARISON: u8 = 14;

    /// Additive: `+`, `-`
    pub const ADDITIVE: u8 = 16;

    /// Multiplicative: `*`, `/`, `%`
    pub const MULTIPLICATIVE: u8 = 18;

    /// Power: `^`
    pub const POWER: u8 = 20;

    /// Prefix operators: unary `-`, `!`
    pub const UNARY: u8 = 22;
}

impl<'a> Parser<'a> {
    /// Parse a complete expression.
    pub fn parse_expr(&mut self) -> Result<Node, ParseError> {
        self.parse_expr_bp(bp::MIN)
    }

    /// Pratt parser core: parse an expression whose operators all bind
    /// at least as tightly as `min_bp`.
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Node, ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let Some((l_bp, r_bp)) = self.infix_binding_power() else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            let op_token = self.current_token().clone();
            let op_span = self.current_span();
            self.advance();

            let rhs = self.parse_expr_bp(r_bp)?;
            lhs = combine(op_token, op_span, lhs, rhs)?;
        }

        Ok(lhs)
    }

    /// Binding powers `(left, right)` for the current token as an infix
    /// operator, or `None` if it is not one.
    ///
    /// Left-associative operators use `right = left + 1`; the
    /// right-associative assignment family uses `right = left`.
    fn infix_binding_power(&self) -> Option<(u8, u8)> {
        let bp = match self.current_token() {
            t if t.is_assign_op() => (bp::ASSIGN, bp::ASSIGN),
            Token::OrOr => (bp::LOGICAL_OR, bp::LOGICAL_OR + 1),
            Token::AndAnd => (bp::LOGICAL_AND, bp::LOGICAL_AND + 1),
            Token::Pipe => (bp::BITWISE_OR, bp::BITWISE_OR + 1),
            Token::Ampersand => (bp::BITWISE_AND, bp::BITWISE_AND + 1),
            Token::EqEq | Token::NotEq => (bp::EQUALITY, bp::EQUALITY + 1),
            Token::Lt | Token::LtEq | Token::Gt | Token::GtEq => {
                (bp::COMPARISON, bp::COMPARISON + 1)
            }
            Token::Plus | Token::Minus => (bp::ADDITIVE, bp::ADDITIVE + 1),
            Token::Star | Token::Slash | Token::Percent => {
                (bp::MULTIPLICATIVE, bp::MULTIPLICATIVE + 1)
            }
            Token::Caret => (bp::POWER, bp::POWER + 1),
            _ => return None,
        };
        Some(bp)
    }

    /// Parse a prefix form: literal, variable, call, parenthesized
    /// expression, or unary operator.
    fn parse_prefix(&mut self) -> Result<Node, ParseError> {
        let span = self.current_span();
        match self.current_token().clone() {
            Token::Number(value) => {
                self.advance();
                Ok(Node::Const(value))
            }
            Token::Minus => {
                self.advance();
                let operand = self.parse_expr_bp(bp::UNARY)?;
                Ok(Node::Unary(UnaryExpr {
                    op: UnOp::Neg,
                    operand: Box::new(operand),
                }))
            }
            Token::Bang => {
                self.advance();
                let operand = self.parse_expr_bp(bp::UNARY)?;
                Ok(Node::Unary(UnaryExpr {
                    op: UnOp::Not,
                    operand: Box::new(operand),
                }))
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr_bp(bp::MIN)?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => {
                self.advance();
                if self.check(&Token::LParen) {
                    self.parse_call(name, span)
                } else {
                    let id = self.symbols_mut().register(name, span);
                    Ok(Node::Var(id))
                }
            }
            token => Err(ParseError::at(
                span,
                format!("unexpected token '{}'", token),
            )),
        }
    }

    /// Parse a call's argument list and validate name and arity.
    fn parse_call(&mut self, name: Symbol, name_span: Span) -> Result<Node, ParseError> {
        self.expect(Token::LParen)?;

        let mut args = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                args.push(self.parse_expr_bp(bp::MIN)?);
                if self.check(&Token::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.expect(Token::RParen)?;

        let Some(arity) = tables::function_arity(name.as_str()) else {
            return Err(ParseError::at(
                name_span,
                format!("unknown function '{}'", name),
            ));
        };
        if args.len() != arity {
            return Err(ParseError::at(
                name_span,
                format!(
                    "function '{}' expects {} argument(s), found {}",
                    name,
                    arity,
                    args.len()
                ),
            ));
        }

        // The comparison spellings compile to the same operation as the
        // infix operators.
        let cmp = match name.as_str() {
            "above" => Some(BinOp::Gt),
            "below" => Some(BinOp::Lt),
            "equal" => Some(BinOp::Eq),
            _ => None,
        };
        if let Some(op) = cmp {
            let mut drain = args.into_iter();
            let lhs = drain.next().unwrap_or(Node::Const(0.0));
            let rhs = drain.next().unwrap_or(Node::Const(0.0));
            return Ok(Node::Binary(BinaryExpr {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            }));
        }

        Ok(Node::Call(CallExpr { name, args }))
    }
}

/// Fold an infix operator and its operands into a node.
fn combine(op: Token, op_span: Span, lhs: Node, rhs: Node) -> Result<Node, ParseError> {
    if let Some(assign_op) = assign_op_for(&op) {
        let Node::Var(target) = lhs else {
            return Err(ParseError::at(
                op_span,
                "invalid assignment target (expected a variable)",
            ));
        };
        return Ok(Node::Assign(AssignExpr {
            op: assign_op,
            target,
            value: Box::new(rhs),
        }));
    }

    let bin_op = match op {
        Token::Plus => BinOp::Add,
        Token::Minus => BinOp::Sub,
        Token::Star => BinOp::Mul,
        Token::Slash => BinOp::Div,
        Token::Percent => BinOp::Mod,
        Token::Caret => BinOp::Pow,
        Token::Ampersand => BinOp::BitAnd,
        Token::Pipe => BinOp::BitOr,
        Token::EqEq => BinOp::Eq,
        Token::NotEq => BinOp::NotEq,
        Token::Lt => BinOp::Lt,
        Token::LtEq => BinOp::LtEq,
        Token::Gt => BinOp::Gt,
        Token::GtEq => BinOp::GtEq,
        Token::AndAnd => BinOp::LogicalAnd,
        Token::OrOr => BinOp::LogicalOr,
        other => {
            return Err(ParseError::at(
                op_span,
                format!("'{}' is not an infix operator", other),
            ));
        }
    };

    Ok(Node::Binary(BinaryExpr {
        op: bin_op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }))
}

fn assign_op_for(token: &Token) -> Option<AssignOp> {
    let op = match token {
        Token::Eq => AssignOp::Set,
        Token::PlusEq => AssignOp::Add,
        Token::MinusEq => AssignOp::Sub,
        Token::StarEq => AssignOp::Mul,
        Token::SlashEq => AssignOp::Div,
        Token::PercentEq => AssignOp::Mod,
        Token::AmpEq => AssignOp::BitAnd,
        Token::PipeEq => AssignOp::BitOr,
        Token::CaretEq => AssignOp::Pow,
        _ => return None,
    };
    Some(op)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use milkc_sem::SymbolTable;
    use milkc_util::Handler;

    /// Parse a single expression (not a statement list).
    fn parse_expr_source(source: &str) -> (Result<Node, ParseError>, Handler) {
        let handler = Handler::new();
        let mut symbols = SymbolTable::new();
        let mut parser = Parser::from_source(source, &mut symbols, &handler);
        let result = parser.parse_expr();
        (result, handler)
    }

    fn expr(source: &str) -> Node {
        let (result, handler) = parse_expr_source(source);
        assert!(!handler.has_errors(), "unexpected diagnostics");
        result.expect("expression should parse")
    }

    fn assert_is_binary(node: &Node, op: BinOp) {
        match node {
            Node::Binary(b) => assert_eq!(b.op, op, "expected operator {:?}", op),
            other => panic!("expected Binary, got {:?}", other),
        }
    }

    // =========================================================================
    // LITERALS AND VARIABLES
    // =========================================================================

    #[test]
    fn test_parse_number_literal() {
        assert_eq!(expr("42"), Node::Const(42.0));
        assert_eq!(expr("3.14"), Node::Const(3.14));
        assert_eq!(expr("2e-3"), Node::Const(0.002));
    }

    #[test]
    fn test_parse_variable() {
        assert!(matches!(expr("bass"), Node::Var(_)));
    }

    // =========================================================================
    // PRECEDENCE
    // =========================================================================

    #[test]
    fn test_precedence_mul_over_add() {
        // a + b * c parses as a + (b * c)
        let node = expr("a + b * c");
        assert_is_binary(&node, BinOp::Add);
        if let Node::Binary(b) = &node {
            assert_is_binary(&b.rhs, BinOp::Mul);
        }
    }

    #[test]
    fn test_precedence_pow_over_mul() {
        // a * b ^ c parses as a * (b ^ c)
        let node = expr("a * b ^ c");
        assert_is_binary(&node, BinOp::Mul);
        if let Node::Binary(b) = &node {
            assert_is_binary(&b.rhs, BinOp::Pow);
        }
    }

    #[test]
    fn test_precedence_cmp_over_bitand() {
        // a & b < c parses as a & (b < c): bitwise binds looser.
        let node = expr("a & b < c");
        assert_is_binary(&node, BinOp::BitAnd);
        if let Node::Binary(b) = &node {
            assert_is_binary(&b.rhs, BinOp::Lt);
        }
    }

    #[test]
    fn test_precedence_logical_below_bitwise() {
        // a && b | c parses as a && (b | c).
        let node = expr("a && b | c");
        assert_is_binary(&node, BinOp::LogicalAnd);
        if let Node::Binary(b) = &node {
            assert_is_binary(&b.rhs, BinOp::BitOr);
        }
    }

    #[test]
    fn test_left_associativity() {
        // a - b - c parses as (a - b) - c
        let node = expr("a - b - c");
        assert_is_binary(&node, BinOp::Sub);
        if let Node::Binary(b) = &node {
            assert_is_binary(&b.lhs, BinOp::Sub);
            assert!(matches!(*b.rhs, Node::Var(_)));
        }
    }

    #[test]
    fn test_assignment_right_associative() {
        // a = b = 1 parses as a = (b = 1)
        let node = expr("a = b = 1");
        match node {
            Node::Assign(outer) => match *outer.value {
                Node::Assign(inner) => assert_eq!(*inner.value, Node::Const(1.0)),
                other => panic!("expected nested Assign, got {:?}", other),
            },
            other => panic!("expected Assign, got {:?}", other),
        }
    }

    #[test]
    fn test_parentheses_override_precedence() {
        // (a + b) * c
        let node = expr("(a + b) * c");
        assert_is_binary(&node, BinOp::Mul);
        if let Node::Binary(b) = &node {
            assert_is_binary(&b.lhs, BinOp::Add);
        }
    }

    // =========================================================================
    // UNARY OPERATORS
    // =========================================================================

    #[test]
    fn test_unary_negation() {
        let node = expr("-x");
        assert!(matches!(
            node,
            Node::Unary(UnaryExpr {
                op: UnOp::Neg,
                ..
            })
        ));
    }

    #[test]
    fn test_unary_not() {
        let node = expr("!x");
        assert!(matches!(
            node,
            Node::Unary(UnaryExpr {
                op: UnOp::Not,
                ..
            })
        ));
    }

    #[test]
    fn test_unary_binds_tighter_than_mul() {
        // -a * b parses as (-a) * b
        let node = expr("-a * b");
        assert_is_binary(&node, BinOp::Mul);
        if let Node::Binary(b) = &node {
            assert!(matches!(*b.lhs, Node::Unary(_)));
        }
    }

    #[test]
    fn test_negative_literal_argument() {
        let node = expr("a = -1");
        match node {
            Node::Assign(assign) => match *assign.value {
                Node::Unary(u) => assert_eq!(*u.operand, Node::Const(1.0)),
                other => panic!("expected Unary, got {:?}", other),
            },
            other => panic!("expected Assign, got {:?}", other),
        }
    }

    // =========================================================================
    // COMPOUND ASSIGNMENT
    // =========================================================================

    #[test]
    fn test_compound_assign_ops() {
        let cases = [
            ("a += 1", AssignOp::Add),
            ("a -= 1", AssignOp::Sub),
            ("a *= 1", AssignOp::Mul),
            ("a /= 1", AssignOp::Div),
            ("a %= 1", AssignOp::Mod),
            ("a &= 1", AssignOp::BitAnd),
            ("a |= 1", AssignOp::BitOr),
            ("a ^= 1", AssignOp::Pow),
        ];
        for (source, expected) in cases {
            match expr(source) {
                Node::Assign(assign) => assert_eq!(assign.op, expected, "source: {}", source),
                other => panic!("expected Assign for {}, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn test_invalid_assignment_target() {
        let (result, _) = parse_expr_source("1 = 2");
        let error = result.expect_err("should fail");
        assert!(error.message.contains("assignment target"));

        let (result, _) = parse_expr_source("sin(x) = 2");
        assert!(result.is_err());
    }

    // =========================================================================
    // CALLS
    // =========================================================================

    #[test]
    fn test_call_single_argument() {
        let node = expr("sin(time)");
        match node {
            Node::Call(call) => {
                assert_eq!(call.name.as_str(), "sin");
                assert_eq!(call.args.len(), 1);
            }
            other => panic!("expected Call, got {:?}", other),
        }
    }

    #[test]
    fn test_call_nested() {
        let node = expr("max(min(a, 1), 0)");
        match node {
            Node::Call(call) => {
                assert_eq!(call.name.as_str(), "max");
                assert!(matches!(call.args[0], Node::Call(_)));
            }
            other => panic!("expected Call, got {:?}", other),
        }
    }

    #[test]
    fn test_if_call_with_assignment_arguments() {
        let node = expr("if(a, r = 1, r = 0)");
        match node {
            Node::Call(call) => {
                assert_eq!(call.name.as_str(), "if");
                assert_eq!(call.args.len(), 3);
                assert!(matches!(call.args[1], Node::Assign(_)));
                assert!(matches!(call.args[2], Node::Assign(_)));
            }
            other => panic!("expected Call, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_function_rejected() {
        let (result, _) = parse_expr_source("frobnicate(1)");
        let error = result.expect_err("should fail");
        assert!(error.message.contains("unknown function 'frobnicate'"));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let (result, _) = parse_expr_source("sin(1, 2)");
        let error = result.expect_err("should fail");
        assert!(error.message.contains("expects 1 argument(s)"));

        let (result, _) = parse_expr_source("if(1, 2)");
        assert!(result.is_err());
    }

    #[test]
    fn test_above_desugars_to_comparison() {
        let node = expr("above(bass, 0.5)");
        assert_is_binary(&node, BinOp::Gt);
    }

    #[test]
    fn test_below_and_equal_desugar() {
        assert_is_binary(&expr("below(a, b)"), BinOp::Lt);
        assert_is_binary(&expr("equal(a, b)"), BinOp::Eq);
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[test]
    fn test_unclosed_paren() {
        let (result, _) = parse_expr_source("(a + b");
        assert!(result.is_err());
    }

    #[test]
    fn test_dangling_operator() {
        let (result, _) = parse_expr_source("a +");
        assert!(result.is_err());
    }
}
