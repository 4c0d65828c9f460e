use vigil_hir::{Body, DeclId, MethodDecl, NodeId, NodeKind};

/// Whether `method`'s body is nothing but `super.<super_method>(p0, p1, ...)`, forwarding
/// every parameter unchanged and in declaration order.
///
/// For `void` methods the single statement must be the call itself; otherwise it must be a
/// `return` of the call. Redundant parentheses around the returned value and around each
/// argument are ignored.
#[must_use]
pub fn is_delegating_call(method: &MethodDecl, super_method: DeclId) -> bool {
    let Some(body) = method.body.as_ref() else {
        return false;
    };
    let [statement] = body.statements() else {
        return false;
    };
    let Some(call) = forwarded_call(body, *statement, method.return_type.is_void()) else {
        return false;
    };
    is_super_call_with_same_arguments(body, call, method, super_method)
}

fn forwarded_call(body: &Body, statement: NodeId, is_void: bool) -> Option<NodeId> {
    let node = body.node(statement)?;
    let expr = match (node.kind, node.children.as_slice(), is_void) {
        (NodeKind::ExprStmt, [expr], true) => *expr,
        (NodeKind::Return, [value], false) => body.strip_parens(*value),
        _ => return None,
    };
    (body.node(expr)?.kind == NodeKind::MethodCall).then_some(expr)
}

fn is_super_call_with_same_arguments(
    body: &Body,
    call: NodeId,
    method: &MethodDecl,
    super_method: DeclId,
) -> bool {
    let Some(call) = body.node(call) else {
        return false;
    };
    if call.resolved() != Some(super_method) {
        return false;
    }
    let Some((&receiver, args)) = call.children.split_first() else {
        return false;
    };
    if body.node(receiver).map(|node| node.kind) != Some(NodeKind::Super) {
        return false;
    }
    if args.len() != method.params.len() {
        return false;
    }
    args.iter().zip(&method.params).all(|(&arg, &param)| {
        body.node(body.strip_parens(arg))
            .is_some_and(|arg| arg.kind == NodeKind::NameRef && arg.resolved() == Some(param))
    })
}
