//! Text dump of an expression DAG.
//!
//! One line per node reachable from the outputs, children first:
//!
//! ```text
//! %0 = input @uv : float2
//! %1 = swizzle %0.x : float
//! %2 = const 2.5 : float
//! %3 = add %1, %2 : float
//! %4 = output @color %3 : float
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fmt::Write;

use crate::context::ExprAst;
use crate::node::NodeKind;
use crate::refs::NodeRef;
use crate::walk;

/// Value numbering for one print.
struct PrintState<'a> {
    ast: &'a ExprAst,
    names: HashMap<NodeRef, String>,
    next_num: usize,
}

impl<'a> PrintState<'a> {
    fn new(ast: &'a ExprAst) -> Self {
        Self {
            ast,
            names: HashMap::new(),
            next_num: 0,
        }
    }

    fn assign_name(&mut self, node: NodeRef) -> String {
        let name = format!("%{}", self.next_num);
        self.next_num += 1;
        self.names.insert(node, name.clone());
        name
    }

    fn name(&self, node: NodeRef) -> &str {
        self.names.get(&node).map(|s| s.as_str()).unwrap_or("%?")
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Print every node reachable from the outputs.
pub fn print_ast(ast: &ExprAst) -> String {
    print_roots(ast, ast.outputs())
}

/// Print the nodes reachable from `roots`, numbered from `%0`.
pub fn print_roots(ast: &ExprAst, roots: &[NodeRef]) -> String {
    let mut state = PrintState::new(ast);
    let mut out = String::new();
    for node in walk::post_order(ast, roots) {
        print_node(&mut state, &mut out, node).expect("fmt::Write to String never fails");
    }
    out
}

// ============================================================================
// Node printing
// ============================================================================

fn print_node(state: &mut PrintState<'_>, f: &mut impl Write, node: NodeRef) -> fmt::Result {
    let ast = state.ast;
    let data = ast.node(node);
    let name = state.assign_name(node);
    write!(f, "{name} = {}", data.kind().mnemonic())?;

    match data.kind() {
        NodeKind::Unary { .. } | NodeKind::Binary { .. } | NodeKind::Ternary { .. } => {
            write_operands(state, f, data.children())?;
        }
        NodeKind::Constant(literal) => write!(f, " {literal}")?,
        NodeKind::Swizzle { source, components } => {
            write!(f, " {}.", state.name(*source))?;
            for component in components {
                f.write_char(component.as_char())?;
            }
        }
        NodeKind::Input(stream) => write!(f, " @{}", stream.name)?,
        NodeKind::Output { stream, expr } => {
            write!(f, " @{} ", stream.name)?;
            match expr {
                Some(expr) => f.write_str(state.name(*expr))?,
                None => f.write_str("<error>")?,
            }
        }
        NodeKind::FunctionCall { candidates, args } => {
            let chosen = candidates.get(data.overload().unwrap_or(0));
            let callee = chosen.map(|&c| ast.function(c).name.as_str());
            write!(f, " @{}(", callee.unwrap_or("?"))?;
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(state.name(arg))?;
            }
            f.write_char(')')?;
        }
        NodeKind::ConstructorCall { args, .. } => write_operands(state, f, args)?,
    }

    writeln!(f, " : {}", data.return_type())
}

fn write_operands(state: &PrintState<'_>, f: &mut impl Write, operands: &[NodeRef]) -> fmt::Result {
    for (i, &operand) in operands.iter().enumerate() {
        f.write_str(if i == 0 { " " } else { ", " })?;
        f.write_str(state.name(operand))?;
    }
    Ok(())
}
