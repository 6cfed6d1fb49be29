use pretty_assertions::assert_eq;

use super::*;
use crate::{ast::Primitive, util::test_utils::tree_tests};

fn main_program() -> Node {
    Node::Program {
        body: vec![Node::FunctionDeclaration {
            name: "main".to_owned(),
            return_type: Primitive::Int,
            params: vec![],
            body: vec![
                Node::VariableDeclaration {
                    datatype: Primitive::Int,
                    name: "a".to_owned(),
                },
                Node::assign("a", Node::literal(5)),
                Node::ret(Node::ident("a")),
            ],
        }],
    }
}

fn gen(node: &Node) -> Result<String, Error> {
    generate(node, &Options::default())
}

#[test]
fn test_ordered_fragments() {
    let code = gen(&main_program()).unwrap();
    let fragments = [
        "public class MainClass {",
        "int a;\n",
        "a = 5;\n",
        "System.out.println(a);\n",
        "return;\n",
        "}\n",
    ];
    let mut rest = code.as_str();
    for fragment in fragments {
        let at = rest
            .find(fragment)
            .unwrap_or_else(|| panic!("{fragment:?} missing or out of order in:\n{code}"));
        rest = &rest[at + fragment.len()..];
    }
    assert!(code.ends_with("}\n"));
}

#[test]
fn test_deterministic() {
    let program = main_program();
    assert_eq!(gen(&program).unwrap(), gen(&program).unwrap());
}

#[test]
fn test_custom_class_name() {
    let options = Options {
        class_name: "Demo".to_owned(),
    };
    let code = generate(&main_program(), &options).unwrap();
    assert!(code.starts_with("public class Demo {\n"));
}

#[test]
fn test_standalone_nodes() {
    let decl = Node::VariableDeclaration {
        datatype: Primitive::Float,
        name: "f".to_owned(),
    };
    assert_eq!(gen(&decl).unwrap(), "float f;\n");
    assert_eq!(gen(&Node::assign("x", Node::ident("y"))).unwrap(), "x = y;\n");
    assert_eq!(
        gen(&Node::ret(Node::literal(7))).unwrap(),
        "System.out.println(7);\nreturn;\n"
    );
    assert_eq!(gen(&Node::ident("x")).unwrap(), "x");
    assert_eq!(gen(&Node::literal(-3)).unwrap(), "-3");
}

#[test]
fn test_standalone_function() {
    let function = Node::FunctionDeclaration {
        name: "twice".to_owned(),
        return_type: Primitive::Void,
        params: vec![],
        body: vec![],
    };
    assert_eq!(gen(&function).unwrap(), "public static void twice() {\n}\n");
}

#[test]
fn test_args_name() {
    assert_eq!(args_name(&[]), "args");
    assert_eq!(args_name(&[Node::ret(Node::ident("args"))]), "args_");
    let body = [
        Node::assign("args_", Node::ident("args")),
        Node::ret(Node::literal(0)),
    ];
    assert_eq!(args_name(&body), "args__");
}

#[test]
fn test_error_misplaced_nodes() {
    let cases = [
        (
            Node::Program {
                body: vec![Node::literal(1)],
            },
            NodeKind::Literal,
            Place::ProgramBody,
        ),
        (
            Node::Program {
                body: vec![Node::FunctionDeclaration {
                    name: "f".to_owned(),
                    return_type: Primitive::Void,
                    params: vec![],
                    body: vec![Node::Program { body: vec![] }],
                }],
            },
            NodeKind::Program,
            Place::FunctionBody,
        ),
        (
            Node::AssignmentExpression {
                left: Box::new(Node::literal(1)),
                right: Box::new(Node::literal(2)),
            },
            NodeKind::Literal,
            Place::AssignmentTarget,
        ),
        (
            Node::ret(Node::assign("a", Node::literal(1))),
            NodeKind::AssignmentExpression,
            Place::Expression,
        ),
        (
            Node::assign("a", Node::ret(Node::literal(1))),
            NodeKind::ReturnStatement,
            Place::Expression,
        ),
    ];

    for (node, kind, place) in cases {
        assert_eq!(gen(&node), Err(Error { kind, place }), "node: {node:?}");
    }
}

#[test]
fn test_error_message() {
    let error = gen(&Node::ret(Node::ret(Node::ident("x")))).unwrap_err();
    assert_eq!(
        error.to_string(),
        "ReturnStatement is not allowed in expression position"
    );
}

tree_tests!(
    use codegen;

    fn test_main_program() {
        let program = "int main() { int a; a = 5; return a; }";
        let java_ok = "
            public class MainClass {
                public static void main(String[] args) {
                    int a;
                    a = 5;
                    System.out.println(a);
                    return;
                }
            }
        ";
    }

    fn test_params_and_return_types() {
        let program = "
            float scale(int a, float b) { b = a; return b; }
            void main() { return 0; }
        ";
        let java_ok = "
            public class MainClass {
                public static void scale(int a, float b) {
                    b = a;
                    System.out.println(b);
                    return;
                }
                public static void main(String[] args) {
                    System.out.println(0);
                    return;
                }
            }
        ";
    }

    fn test_main_with_params_keeps_them() {
        let program = "int main(int argc) { return argc; }";
        let java_ok = "
            public class MainClass {
                public static void main(int argc) {
                    System.out.println(argc);
                    return;
                }
            }
        ";
    }

    fn test_main_args_avoids_local_names() {
        let program = "int main() { int args; int args_; args = 1; args_ = args; return args_; }";
        let java_ok = "
            public class MainClass {
                public static void main(String[] args__) {
                    int args;
                    int args_;
                    args = 1;
                    args_ = args;
                    System.out.println(args_);
                    return;
                }
            }
        ";
    }

    fn test_main_args_kept_when_unused() {
        let program = "void main() { int argv; }";
        let java_ok = "
            public class MainClass {
                public static void main(String[] args) {
                    int argv;
                }
            }
        ";
    }

    fn test_empty_program() {
        let program = "/* empty */";
        let java_ok = "
            public class MainClass {
            }
        ";
    }

    fn test_lexical_error_stops_pipeline() {
        let program = "int main() { a = 1 + 2; }";
        let expected_errors = &["19..20: unexpected character '+'"];
    }
);
