//! Unit tests for semantic analysis.
//!
//! This module contains tests for both analysis passes:
//! - Scope validation over parsed and hand-built declaration lists
//! - Resolution, binding order and the return-type contract
//! - Return-type inference on the resolved table

use std::sync::Arc;

use crate::{
    ast::{
        ast::{Declaration, FunctionDecl, Type, VariableDecl},
        expressions::{Expr, IntLiteralExpr, NameRefExpr},
        statements::{Block, ReturnStmt, Stmt},
    },
    errors::errors::{Error, ErrorImpl},
    parser::parser::parse_source,
    SourceLocation,
};

use super::{
    analyser::{analyse, AnalysisContext},
    resolved_ir::{
        DeclIndex, ResolvedBlock, ResolvedDeclaration, ResolvedExpr, ResolvedFunctionDeclaration,
        ResolvedProgram, ResolvedRef, ResolvedStmt, ResolvedVariableDeclaration,
    },
};

fn analyse_ok(source: &str) -> ResolvedProgram {
    let declarations = parse_source(source, Some("test.mc".to_string())).unwrap();
    analyse(&declarations).unwrap()
}

fn analyse_err(source: &str) -> Error {
    let declarations = parse_source(source, Some("test.mc".to_string())).unwrap();
    analyse(&declarations).unwrap_err()
}

fn location(line: u32, column: u32) -> SourceLocation {
    SourceLocation::new(Arc::new("built.mc".to_string()), line, column)
}

fn variable(id: &str, value: Option<Expr>) -> VariableDecl {
    VariableDecl {
        id: id.to_string(),
        location: location(1, 1),
        var_type: Type::Int,
        value,
    }
}

fn name_ref(name: &str, column: u32) -> Expr {
    Expr::NameRef(NameRefExpr {
        name: name.to_string(),
        is_call: false,
        arguments: vec![],
        location: location(2, column),
    })
}

fn int_literal(value: &str) -> Expr {
    Expr::IntLiteral(IntLiteralExpr {
        value: value.to_string(),
        location: location(2, 10),
    })
}

fn function(id: &str, return_type: Type, params: Vec<VariableDecl>, value: Option<Expr>) -> Declaration {
    Declaration::Function(FunctionDecl {
        id: id.to_string(),
        location: location(1, 4),
        return_type,
        params,
        body: Block {
            stmts: vec![Stmt::Return(ReturnStmt {
                value,
                location: location(2, 3),
            })],
            location: location(1, 20),
        },
    })
}

fn resolved_function<'a>(program: &'a ResolvedProgram, index: DeclIndex) -> &'a ResolvedFunctionDeclaration {
    match program.get(index) {
        Some(ResolvedDeclaration::Function(function)) => function,
        other => panic!("expected a function at {:?}, got {:?}", index, other),
    }
}

fn final_value(function: &ResolvedFunctionDeclaration) -> Option<&ResolvedExpr> {
    match function.body.stmts.last() {
        Some(ResolvedStmt::Return(value)) => value.as_ref(),
        None => panic!("function {} has an empty body", function.id),
    }
}

#[test]
fn test_analyse_empty_main() {
    let program = analyse_ok("fn main(): void { return }");

    assert_eq!(program.len(), 1);
    let main = program.main().unwrap();
    let function = resolved_function(&program, main);
    assert!(function.params.is_empty());
    assert!(final_value(function).is_none());
    assert_eq!(program.return_type_of(function), Some(Type::Void));
}

#[test]
fn test_analyse_call_binds_to_earlier_function() {
    let program =
        analyse_ok("fn returnParam(a: int): int { return a } fn main(): int { return returnParam(5) }");

    // parameter, returnParam, main
    assert_eq!(program.len(), 3);
    assert!(matches!(program.get(DeclIndex(0)), Some(ResolvedDeclaration::Variable(param)) if param.id == "a"));

    let return_param = resolved_function(&program, DeclIndex(1));
    assert_eq!(return_param.params, vec![DeclIndex(0)]);
    assert!(matches!(final_value(return_param), Some(ResolvedExpr::Ref(reference)) if reference.target == DeclIndex(0)));

    let main = resolved_function(&program, program.main().unwrap());
    assert_eq!(
        final_value(main),
        Some(&ResolvedExpr::Ref(ResolvedRef {
            target: DeclIndex(1),
            is_call: true,
            arguments: vec![ResolvedExpr::IntValue(5)],
        }))
    );
    assert_eq!(program.return_type_of(main), Some(Type::Int));
}

#[test]
fn test_analyse_void_returning_value_fails() {
    let error = analyse_err("fn main(): void { return 1 }");

    assert_eq!(
        error.kind(),
        &ErrorImpl::ReturnTypeMismatch {
            function: "main".to_string(),
            returned: Type::Int,
            declared: Type::Void,
        }
    );
    assert!(error.to_string().contains("returns int but declared as void"));
    assert_eq!(error.get_scope(), "main");
    assert_eq!((error.get_location().line, error.get_location().column), (1, 19));
}

#[test]
fn test_analyse_undeclared_reference_fails() {
    let error = analyse_err("fn main(): int { return b }");

    assert_eq!(error.kind(), &ErrorImpl::UndeclaredReference { name: "b".to_string() });
    assert_eq!(error.get_scope(), "main");
    assert_eq!((error.get_location().line, error.get_location().column), (1, 25));
}

#[test]
fn test_int_function_needs_int_value() {
    let error = analyse_err("fn main(): int { return }");
    assert_eq!(
        error.kind(),
        &ErrorImpl::ReturnTypeMismatch {
            function: "main".to_string(),
            returned: Type::Void,
            declared: Type::Int,
        }
    );

    let error = analyse_err("fn nothing(): void { return } fn main(): int { return nothing() }");
    assert_eq!(
        error.kind(),
        &ErrorImpl::ReturnTypeMismatch {
            function: "main".to_string(),
            returned: Type::Void,
            declared: Type::Int,
        }
    );
}

#[test]
fn test_void_function_needs_bare_return() {
    let error = analyse_err("fn nothing(): void { return } fn main(): void { return nothing() }");
    assert!(matches!(error.kind(), ErrorImpl::ReturnTypeMismatch { declared: Type::Void, .. }));
}

#[test]
fn test_return_type_follows_nested_calls() {
    let program = analyse_ok(
        "fn one(): int { return 1 } fn two(): int { return one() } fn three(): int { return two() } fn main(): int { return three() }",
    );

    let main = resolved_function(&program, program.main().unwrap());
    assert_eq!(program.return_type_of(main), Some(Type::Int));
}

#[test]
fn test_missing_return_fails() {
    let error = analyse_err("fn main(): void { }");

    assert_eq!(error.kind(), &ErrorImpl::MissingReturn { function: "main".to_string() });
    assert_eq!(error.get_location().column, 17);
}

#[test]
fn test_integer_literal_range() {
    let program = analyse_ok("fn main(): int { return 9223372036854775807 }");
    let main = resolved_function(&program, program.main().unwrap());
    assert_eq!(final_value(main), Some(&ResolvedExpr::IntValue(i64::MAX)));

    let error = analyse_err("fn main(): int { return 9223372036854775808 }");
    assert_eq!(
        error.kind(),
        &ErrorImpl::IntegerOutOfRange {
            literal: "9223372036854775808".to_string()
        }
    );
    assert_eq!(error.get_location().column, 25);
}

#[test]
fn test_duplicate_parameters_fail() {
    let error = analyse_err("fn f(a: int, a: int): int { return a } fn main(): void { return }");

    assert_eq!(error.kind(), &ErrorImpl::DuplicateDeclaration { id: "a".to_string() });
    assert_eq!(error.get_scope(), "f");
    assert_eq!(error.get_location().column, 14);
}

#[test]
fn test_duplicate_functions_fail() {
    let error = analyse_err("fn f(): int { return 1 } fn f(): int { return 2 } fn main(): void { return }");

    assert_eq!(error.kind(), &ErrorImpl::DuplicateDeclaration { id: "f".to_string() });
    assert_eq!(error.get_scope(), "global");

    let error = analyse_err("fn main(): void { return } fn main(): void { return }");
    assert_eq!(error.kind(), &ErrorImpl::DuplicateDeclaration { id: "main".to_string() });
}

#[test]
fn test_no_forward_references() {
    let error = analyse_err("fn main(): int { return later() } fn later(): int { return 1 }");
    assert_eq!(error.kind(), &ErrorImpl::UndeclaredReference { name: "later".to_string() });
}

#[test]
fn test_no_self_recursion() {
    let error = analyse_err("fn loop(): int { return loop() } fn main(): void { return }");

    assert_eq!(error.kind(), &ErrorImpl::UndeclaredReference { name: "loop".to_string() });
    assert_eq!(error.get_scope(), "loop");
}

#[test]
fn test_arguments_are_bound_against_the_table() {
    // Scope validation only looks at the returned name, so `a` here is bound
    // to the parameter of `returnParam` by resolution.
    let program = analyse_ok("fn returnParam(a: int): int { return a } fn main(): int { return returnParam(a) }");
    let main = resolved_function(&program, program.main().unwrap());
    match final_value(main) {
        Some(ResolvedExpr::Ref(call)) => {
            assert_eq!(call.arguments, vec![ResolvedExpr::Ref(ResolvedRef {
                target: DeclIndex(0),
                is_call: false,
                arguments: vec![],
            })]);
        }
        other => panic!("expected a call, got {:?}", other),
    }

    let error = analyse_err("fn f(a: int): int { return a } fn main(): int { return f(zz) }");
    assert_eq!(error.kind(), &ErrorImpl::UndeclaredReference { name: "zz".to_string() });
    assert_eq!(error.get_scope(), "main");
}

#[test]
fn test_parameters_may_repeat_across_functions() {
    let program = analyse_ok("fn f(a: int): int { return a } fn g(a: int): int { return a } fn main(): int { return g(1) }");

    // parameter a, f, parameter a, g, main
    let g = resolved_function(&program, DeclIndex(3));
    assert_eq!(g.params, vec![DeclIndex(2)]);
    assert!(matches!(final_value(g), Some(ResolvedExpr::Ref(reference)) if reference.target == DeclIndex(2)));
    assert_eq!(program.return_type_of(g), Some(Type::Int));
}

#[test]
fn test_function_cannot_reuse_parameter_id() {
    let error = analyse_err("fn f(g: int): int { return g } fn g(): int { return 1 } fn main(): int { return g() }");

    assert_eq!(error.kind(), &ErrorImpl::DuplicateDeclaration { id: "g".to_string() });
    assert_eq!(error.get_scope(), "global");
    assert_eq!(error.get_location().column, 35);
}

#[test]
fn test_parameter_cannot_reuse_function_id() {
    let error = analyse_err("fn a(): void { return } fn f(a: int): int { return a } fn main(): int { return f(1) }");

    assert_eq!(error.kind(), &ErrorImpl::DuplicateDeclaration { id: "a".to_string() });
    assert_eq!(error.get_scope(), "f");
    assert_eq!(error.get_location().column, 30);
}

#[test]
fn test_resolved_ids_are_unique_apart_from_parameters() {
    let program = analyse_ok("fn f(x: int): int { return x } fn g(x: int): int { return f(x) } fn main(): int { return g(2) }");

    let parameters: Vec<DeclIndex> = program
        .iter()
        .flat_map(|(_, entry)| match entry {
            ResolvedDeclaration::Function(function) => function.params.clone(),
            ResolvedDeclaration::Variable(_) => vec![],
        })
        .collect();
    let ids: Vec<&str> = program
        .iter()
        .filter(|(index, _)| !parameters.contains(index))
        .map(|(_, entry)| entry.id())
        .collect();

    assert_eq!(ids, vec!["f", "g", "main"]);
}

#[test]
fn test_global_variables() {
    let declarations = vec![
        Declaration::Variable(variable("limit", Some(int_literal("10")))),
        function("main", Type::Int, vec![], Some(name_ref("limit", 10))),
    ];

    let program = analyse(&declarations).unwrap();
    assert_eq!(
        program.get(DeclIndex(0)),
        Some(&ResolvedDeclaration::Variable(ResolvedVariableDeclaration {
            id: "limit".to_string(),
            var_type: Type::Int,
            value: Some(ResolvedExpr::IntValue(10)),
        }))
    );
    assert_eq!(program.main(), Some(DeclIndex(1)));
}

#[test]
fn test_duplicate_global_variable_fails() {
    let declarations = vec![
        Declaration::Variable(variable("x", None)),
        Declaration::Variable(variable("x", None)),
        function("main", Type::Void, vec![], None),
    ];

    let error = analyse(&declarations).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::DuplicateDeclaration { id: "x".to_string() });
    assert_eq!(error.get_scope(), "global");
}

#[test]
fn test_variable_initializer_must_resolve() {
    let declarations = vec![
        Declaration::Variable(variable("x", Some(name_ref("y", 8)))),
        function("main", Type::Void, vec![], None),
    ];

    let error = analyse(&declarations).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::UndeclaredReference { name: "y".to_string() });
    assert_eq!(error.get_location().column, 8);
}

#[test]
fn test_parameter_cannot_reuse_global_variable_id() {
    let declarations = vec![
        Declaration::Variable(variable("a", None)),
        function("id", Type::Int, vec![variable("a", None)], Some(name_ref("a", 10))),
        function("main", Type::Void, vec![], None),
    ];

    let error = analyse(&declarations).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::DuplicateDeclaration { id: "a".to_string() });
    assert_eq!(error.get_scope(), "id");
}

#[test]
fn test_missing_main() {
    let error = analyse(&[]).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::MissingMain { found: 0 });
    assert_eq!(error.get_location(), &SourceLocation::null());

    let declarations = vec![function("helper", Type::Int, vec![], Some(int_literal("1")))];
    let error = analyse(&declarations).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::MissingMain { found: 0 });
    assert_eq!(error.get_location(), declarations[0].location());
}

#[test]
fn test_global_append_rejects_duplicates() {
    let mut context = AnalysisContext::new();
    let entry = ResolvedDeclaration::Variable(ResolvedVariableDeclaration {
        id: "x".to_string(),
        var_type: Type::Int,
        value: None,
    });

    assert_eq!(context.append_global(entry.clone(), &location(1, 1)).unwrap(), DeclIndex(0));
    let error = context.append_global(entry, &location(2, 1)).unwrap_err();
    assert_eq!(error.kind(), &ErrorImpl::DuplicateDeclaration { id: "x".to_string() });
    assert_eq!(error.get_location().line, 2);
    assert_eq!(context.table.len(), 1);
}

#[test]
fn test_type_inference_is_bounded() {
    let mut program = ResolvedProgram::new();
    let call_self = ResolvedExpr::Ref(ResolvedRef {
        target: DeclIndex(0),
        is_call: true,
        arguments: vec![],
    });
    program.push(ResolvedDeclaration::Function(ResolvedFunctionDeclaration {
        id: "cycle".to_string(),
        params: vec![],
        body: ResolvedBlock {
            stmts: vec![ResolvedStmt::Return(Some(call_self.clone()))],
        },
    }));

    assert_eq!(program.type_of(&call_self), None);

    let dangling = ResolvedExpr::Ref(ResolvedRef {
        target: DeclIndex(7),
        is_call: false,
        arguments: vec![],
    });
    assert_eq!(program.type_of(&dangling), None);
}

#[test]
fn test_long_call_chains_resolve() {
    let mut source = String::from("fn f0(): int { return 0 }\n");
    for index in 1..=70 {
        source.push_str(&format!("fn f{}(): int {{ return f{}() }}\n", index, index - 1));
    }
    source.push_str("fn main(): int { return f70() }\n");

    let program = analyse_ok(&source);
    assert_eq!(program.len(), 72);
    let main = resolved_function(&program, program.main().unwrap());
    assert_eq!(program.return_type_of(main), Some(Type::Int));
}

#[test]
fn test_find_prefers_newest_entry() {
    let mut program = ResolvedProgram::new();
    for _ in 0..2 {
        program.push(ResolvedDeclaration::Variable(ResolvedVariableDeclaration {
            id: "a".to_string(),
            var_type: Type::Int,
            value: None,
        }));
    }

    assert_eq!(program.find("a"), Some(DeclIndex(1)));
    assert_eq!(program.find("b"), None);
}

#[test]
fn test_render() {
    let program =
        analyse_ok("fn returnParam(a: int): int { return a } fn main(): int { return returnParam(5) }");
    assert_eq!(
        program.render(),
        "Variable a int\nFunction returnParam(&a):\n  Return &a\nFunction main():\n  Return Call &returnParam(5)\n"
    );

    let program = analyse_ok("fn main(): void { return }");
    assert_eq!(program.render(), "Function main():\n  Return\n");
}

#[test]
fn test_analyse_is_deterministic() {
    let source = "fn one(): int { return 1 } fn main(): int { return one() }";
    assert_eq!(analyse_ok(source), analyse_ok(source));
}
