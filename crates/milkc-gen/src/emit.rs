//! GLSL expression emitter - float/bool type bridging.
//!
//! The source dialect has exactly one type: `float`, with `0.0` meaning
//! false. GLSL splits the world into `float` and `bool` and refuses to
//! convert implicitly. The emitter holds one invariant: **every emitted
//! expression has a statically known GLSL type**, and every composition
//! keeps it.
//!
//! - [`GlslEmitter::emit_expr`] always produces a `float`-typed
//!   expression. Comparisons are wrapped in `float_from_bool(...)`,
//!   logical `&&`/`||` lower to float helpers, bitwise ops truncate
//!   through `int`.
//! - [`GlslEmitter::emit_condition`] produces a `bool`-typed expression
//!   for ternary conditions. When the condition subtree is itself a
//!   comparison (or `band`/`bor`/`bnot`/`!`), the underlying boolean is
//!   recovered directly instead of round-tripping through
//!   `float_from_bool(x) != 0.0`.
//!
//! The rules are a closed table (below); there is no type inference
//! pass, and none is needed.

use milkc_par::{AssignOp, BinOp, Node, UnOp};
use milkc_sem::{SymbolTable, VarId, VarKind};

/// Variable spellings rewritten only in the per-pixel block.
///
/// The dialect's per-pixel programs write their output color through
/// `red`/`green`/`blue`/`alpha`; in the shader those land in the
/// `pixelColor` accumulator.
pub const PER_PIXEL_REWRITES: &[(&str, &str)] = &[
    ("red", "pixelColor.r"),
    ("green", "pixelColor.g"),
    ("blue", "pixelColor.b"),
    ("alpha", "pixelColor.a"),
];

/// Render an `f64` as a GLSL float literal.
///
/// GLSL 330 treats `2` as an int, so integer-valued constants gain a
/// `.0` suffix: `emit(Const(2.0))` is `"2.0"`, `emit(Const(1.2))` is
/// `"1.2"`.
pub fn format_float(value: f64) -> String {
    let text = format!("{}", value);
    if text.contains('.') || text.contains('e') || text.contains('E') {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Tree-walking GLSL emitter for one statement block.
pub struct GlslEmitter<'a> {
    /// Variable registry built during parsing.
    symbols: &'a SymbolTable,

    /// Name rewrites applied before the builtin table (per-pixel only).
    rewrites: &'a [(&'a str, &'a str)],
}

impl<'a> GlslEmitter<'a> {
    /// Emitter for the per-frame block (no rewrites).
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            rewrites: &[],
        }
    }

    /// Emitter with variable rewrites (the per-pixel block).
    pub fn with_rewrites(symbols: &'a SymbolTable, rewrites: &'a [(&'a str, &'a str)]) -> Self {
        Self { symbols, rewrites }
    }

    /// Emit a parsed block as GLSL statements, one indented line per
    /// statement, each terminated with `;`.
    pub fn emit_block(&self, root: &Node) -> String {
        let mut out = String::new();
        match root {
            Node::Sequence(stmts) => {
                for stmt in stmts {
                    out.push_str("    ");
                    out.push_str(&self.emit_expr(stmt));
                    out.push_str(";\n");
                }
            }
            other => {
                out.push_str("    ");
                out.push_str(&self.emit_expr(other));
                out.push_str(";\n");
            }
        }
        out
    }

    /// Emit a `float`-typed GLSL expression for `node`.
    pub fn emit_expr(&self, node: &Node) -> String {
        match node {
            Node::Const(value) => format_float(*value),

            Node::Var(id) => self.emit_var(*id),

            Node::Assign(assign) => {
                let target = self.emit_var(assign.target);
                let value = self.emit_expr(&assign.value);
                match assign.op {
                    AssignOp::Set => format!("{} = {}", target, value),
                    AssignOp::Add => format!("{} = {} + {}", target, target, value),
                    AssignOp::Sub => format!("{} = {} - {}", target, target, value),
                    AssignOp::Mul => format!("{} = {} * {}", target, target, value),
                    AssignOp::Div => format!("{} = {} / {}", target, target, value),
                    AssignOp::Mod => format!("{} = mod({}, {})", target, target, value),
                    AssignOp::BitAnd => {
                        format!("{} = float(int({}) & int({}))", target, target, value)
                    }
                    AssignOp::BitOr => {
                        format!("{} = float(int({}) | int({}))", target, target, value)
                    }
                    AssignOp::Pow => format!("{} = pow({}, {})", target, target, value),
                }
            }

            Node::Unary(unary) => {
                let operand = self.emit_expr(&unary.operand);
                match unary.op {
                    UnOp::Neg => format!("(-{})", operand),
                    // `!x` is the function `bnot` in operator clothing.
                    UnOp::Not => format!("float_from_bool({} == 0.0)", operand),
                }
            }

            Node::Binary(binary) => {
                let lhs = self.emit_expr(&binary.lhs);
                let rhs = self.emit_expr(&binary.rhs);
                match binary.op {
                    op if op.is_comparison() => {
                        format!("float_from_bool(({} {} {}))", lhs, op.glsl_symbol(), rhs)
                    }
                    // GLSL `%` is integer-only; floats go through mod().
                    BinOp::Mod => format!("mod({}, {})", lhs, rhs),
                    BinOp::Pow => format!("pow({}, {})", lhs, rhs),
                    BinOp::BitAnd => format!("float(int({}) & int({}))", lhs, rhs),
                    BinOp::BitOr => format!("float(int({}) | int({}))", lhs, rhs),
                    BinOp::LogicalAnd => format!("boolean_and_op_eel({}, {})", lhs, rhs),
                    BinOp::LogicalOr => format!("boolean_or_op_eel({}, {})", lhs, rhs),
                    op => format!("({} {} {})", lhs, op.glsl_symbol(), rhs),
                }
            }

            Node::Call(call) => self.emit_call(call.name.as_str(), &call.args),

            Node::Sequence(_) => {
                // Sequences only appear at block roots; emit_block handles
                // them. An inline sequence would be a parser bug - emit
                // nothing rather than invalid GLSL.
                String::new()
            }
        }
    }

    /// Emit a `bool`-typed GLSL expression for a ternary condition.
    ///
    /// Comparison and boolean-function subtrees yield their underlying
    /// boolean; everything else is emitted as float and tested against
    /// `0.0`.
    fn emit_condition(&self, node: &Node) -> String {
        match node {
            Node::Binary(binary) if binary.op.is_comparison() => {
                format!(
                    "{} {} {}",
                    self.emit_expr(&binary.lhs),
                    binary.op.glsl_symbol(),
                    self.emit_expr(&binary.rhs)
                )
            }
            Node::Unary(unary) if unary.op == UnOp::Not => {
                format!("{} == 0.0", self.emit_expr(&unary.operand))
            }
            Node::Call(call) if call.name.as_str() == "bnot" && call.args.len() == 1 => {
                format!("{} == 0.0", self.emit_expr(&call.args[0]))
            }
            Node::Call(call) if call.name.as_str() == "band" && call.args.len() == 2 => {
                format!(
                    "({} != 0.0) && ({} != 0.0)",
                    self.emit_expr(&call.args[0]),
                    self.emit_expr(&call.args[1])
                )
            }
            Node::Call(call) if call.name.as_str() == "bor" && call.args.len() == 2 => {
                format!(
                    "({} != 0.0) || ({} != 0.0)",
                    self.emit_expr(&call.args[0]),
                    self.emit_expr(&call.args[1])
                )
            }
            other => format!("{} != 0.0", self.emit_expr(other)),
        }
    }

    /// Emit a variable reference.
    ///
    /// Rewrites (per-pixel color aliases) take precedence, then the
    /// built-in mapping; controls, state registers, and user locals are
    /// plain names backed by local declarations.
    fn emit_var(&self, id: VarId) -> String {
        let entry = self.symbols.entry(id);
        let name = entry.name.as_str();

        if let Some((_, replacement)) = self.rewrites.iter().find(|(from, _)| *from == name) {
            return (*replacement).to_string();
        }
        if entry.kind == VarKind::BuiltinReadOnly {
            if let Some(glsl) = milkc_sem::builtin_glsl(name) {
                return glsl.to_string();
            }
        }
        name.to_string()
    }

    /// Emit a whitelisted function call.
    fn emit_call(&self, name: &str, args: &[Node]) -> String {
        match (name, args) {
            ("if", [cond, then_arm, else_arm]) => {
                format!(
                    "(({}) ? ({}) : ({}))",
                    self.emit_condition(cond),
                    self.emit_expr(then_arm),
                    self.emit_expr(else_arm)
                )
            }
            ("sqr", [arg]) => {
                // Textual double expansion; the dialect has no
                // side-effecting subexpressions outside assignment, and
                // `sqr` never wraps one.
                let x = self.emit_expr(arg);
                format!("(({})*({}))", x, x)
            }
            ("bnot", [arg]) => {
                format!("float_from_bool({} == 0.0)", self.emit_expr(arg))
            }
            ("band", [lhs, rhs]) => {
                format!(
                    "float_from_bool(({} != 0.0) && ({} != 0.0))",
                    self.emit_expr(lhs),
                    self.emit_expr(rhs)
                )
            }
            ("bor", [lhs, rhs]) => {
                format!(
                    "float_from_bool(({} != 0.0) || ({} != 0.0))",
                    self.emit_expr(lhs),
                    self.emit_expr(rhs)
                )
            }
            ("atan2", [y, x]) => {
                // GLSL's two-argument atan.
                format!("atan({}, {})", self.emit_expr(y), self.emit_expr(x))
            }
            ("rand", [max]) => {
                // Scaled 2D hash over the fragment position.
                format!("(rand(uv) * {})", self.emit_expr(max))
            }
            ("invsqrt", [arg]) => {
                format!("inversesqrt({})", self.emit_expr(arg))
            }
            ("sigmoid", [value, response]) => {
                format!(
                    "sigmoid_eel({}, {})",
                    self.emit_expr(value),
                    self.emit_expr(response)
                )
            }
            ("exec2", [first, second]) => {
                format!(
                    "exec2_helper({}, {})",
                    self.emit_expr(first),
                    self.emit_expr(second)
                )
            }
            ("exec3", [first, second, third]) => {
                format!(
                    "exec3_helper({}, {}, {})",
                    self.emit_expr(first),
                    self.emit_expr(second),
                    self.emit_expr(third)
                )
            }
            _ => {
                // Pass-through: sin, cos, pow, min, max, log10, megabuf, ...
                let rendered: Vec<String> = args.iter().map(|a| self.emit_expr(a)).collect();
                format!("{}({})", name, rendered.join(", "))
            }
        }
    }
}
