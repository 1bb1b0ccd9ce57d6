use m87::run_source;

fn assert_output(src: &str, expected: &[&str]) {
    match run_source(src) {
        Ok(output) => assert_eq!(output, expected, "unexpected output for script:\n{src}"),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_failure_kind(src: &str, kind: &str) {
    match run_source(src) {
        Ok(output) => panic!("Script succeeded with {output:?} but was expected to fail"),
        Err(e) => assert_eq!(e.diagnostic().kind, kind, "wrong error for script:\n{src}\n{e}"),
    }
}

#[test]
fn declarations_and_basic_arithmetic() {
    assert_output("let x: number = 1 + 2\nprint(x)", &["3"]);
    assert_output("let x: number = 7 * 9\nprint(x)", &["63"]);
    assert_output("let x: number = 8 - 5\nprint(x)", &["3"]);
    assert_output("let x: number = 7 / 2\nprint(x)", &["3.5"]);
    assert_output("print(2 + 3 * 4 - 1)", &["13"]);
    assert_output("print(2 + 3 * 4)", &["14"]);
    assert_output("print((2 + 3) * 4)", &["20"]);
    assert_output("print(10 - 4 - 3)", &["3"]);
    assert_output("print(-2 + 3)", &["1"]);
}

#[test]
fn decimals_keep_their_fraction_digits() {
    assert_output("print(3.05)", &["3.05"]);
    assert_output("print(2.5 * 2)", &["5"]);
    assert_output("print(-1.5)", &["-1.5"]);
}

#[test]
fn remainder_is_truncated() {
    assert_output("print(-7 % 3)", &["-1"]);
    assert_output("print(7 % -3)", &["1"]);
}

#[test]
fn division_by_zero_is_error() {
    assert_failure_kind("print(1 / 0)", "DivideByZero");
    assert_failure_kind("print(1 % 0)", "DivideByZero");
}

#[test]
fn strings_concatenate() {
    assert_output("let s: string = \"ab\" + \"cd\"\nprint(s)", &["abcd"]);
    assert_failure_kind("print(\"a\" + 1)", "TypeMismatch");
    assert_failure_kind("print(\"a\" < \"b\")", "TypeMismatch");
}

#[test]
fn print_joins_arguments() {
    assert_output("print(\"x = \", 4, \", ok: \", true)", &["x = 4, ok: true"]);
    assert_output("print()", &[""]);
    assert_output("print(1); print(2)", &["1", "2"]);
}

#[test]
fn comments_are_ignored() {
    assert_output("// first\nprint(1) // trailing\n/* block\ncomment */ print(2)",
                  &["1", "2"]);
}

#[test]
fn logical_and_comparisons() {
    assert_output("print(2 < 3, 3 > 2, 2 <= 2, 3 >= 4)", &["truetruetruefalse"]);
    assert_output("print(true && !false)", &["true"]);
    assert_output("print(1 > 2 || 2 > 1)", &["true"]);
    assert_failure_kind("print(1 && true)", "TypeMismatch");
}

#[test]
fn logical_operators_short_circuit() {
    assert_output("print(false && missing)", &["false"]);
    assert_output("print(true || missing)", &["true"]);
    assert_failure_kind("print(true && missing)", "NotDefined");
}

#[test]
fn equality_rules() {
    assert_output("print([1, 2] == [1, 2])", &["true"]);
    assert_output("print([1, 2] == [1, 2, 3])", &["false"]);
    assert_output("print(\"a\" != \"b\")", &["true"]);
    assert_output("print(null(number) == null(number))", &["true"]);
    assert_output("print(null(number) == 1)", &["false"]);
    assert_failure_kind("print(\"a\" == 1)", "TypeMismatch");
}

#[test]
fn minus_after_logical_operator_is_ambiguous() {
    assert_failure_kind("print(true && -1)", "AmbiguousToken");
    assert_failure_kind("print(!-1)", "AmbiguousToken");
}

#[test]
fn let_bindings_cannot_be_reassigned() {
    assert_failure_kind("let x: number = 1\nx = 2", "MutatedLet");
    assert_output("var x: number = 1\nx = 2\nprint(x)", &["2"]);
}

#[test]
fn declared_types_are_enforced() {
    assert_failure_kind("let x: number = \"a\"", "TypeMismatch");
    assert_failure_kind("var x: number = 1\nx = true", "TypeMismatch");
    assert_failure_kind("let x = 1", "MissingType");
}

#[test]
fn redeclaration_replaces_the_binding() {
    assert_output("let x: number = 1\nlet x: string = \"a\"\nprint(x)", &["a"]);
}

#[test]
fn uninitialized_reads_fail() {
    assert_failure_kind("var x: number\nprint(x)", "UninitializedValue");
    assert_output("var x: number\nx = 3\nprint(x)", &["3"]);
}

#[test]
fn unknown_variable_is_error() {
    assert_failure_kind("print(foo)", "NotDefined");
}

#[test]
fn optional_values() {
    let src = r#"
var maybe: optional(number) = null(number)
print(maybe)
print(maybe == null(number))
maybe = 4
print(maybe)
print(maybe == null(number))
"#;
    assert_output(src, &["null(number)", "true", "4", "false"]);
}

#[test]
fn conversions() {
    assert_output("print(convert(number, \"42\") + 1)", &["43"]);
    assert_output("print(convert(string, 5) + \"!\")", &["5!"]);
    assert_output("print(convert(string, true))", &["true"]);
    assert_output("print(convert(number, \"abc\") == null(number))", &["true"]);
    assert_failure_kind("print(convert(boolean, 1))", "TypeMismatch");
}

#[test]
fn types_are_values() {
    let src = r#"
let t: type = number
print(t)
print(convert(t, "4") + 1)
"#;
    assert_output(src, &["number", "5"]);
}

#[test]
fn id_turns_a_literal_into_a_name() {
    assert_output("var x: number = 9\nprint(id(\"x\"))", &["9"]);
}

#[test]
fn if_else_chains() {
    let src = r#"
fn describe(n: number) => string {
    if n < 0 {
        return "negative"
    } else if n == 0 {
        return "zero"
    }
    else {
        return "positive"
    }
}
print(describe(-2), " ", describe(0), " ", describe(5))
"#;
    assert_output(src, &["negative zero positive"]);
}

#[test]
fn block_scopes_end_with_their_block() {
    let src = r#"
if true {
    let inner: number = 1
}
print(inner)
"#;
    assert_failure_kind(src, "NotDefined");
}

#[test]
fn conditions_must_be_booleans() {
    assert_failure_kind("if 1 {\n}", "TypeMismatch");
    assert_failure_kind("if true\nprint(1)", "NoBraceStarter");
}

#[test]
fn while_loops() {
    let src = r#"
var i: number = 0
while i < 3 {
    print(i)
    i = i + 1
}
"#;
    assert_output(src, &["0", "1", "2"]);
}

#[test]
fn for_loops_over_ranges_and_arrays() {
    let src = r#"
var total: number = 0
for i in 1 -> 4 {
    total = total + i
}
print(total)
for x in [2, 3, 4] {
    total = total + x
}
print(total)
"#;
    assert_output(src, &["10", "19"]);
}

#[test]
fn for_loops_advance_in_lockstep() {
    let src = r#"
for a, b in [1, 2, 3], "xy" {
    print(a, b)
}
"#;
    assert_output(src, &["1x", "2y"]);
    assert_failure_kind("for a, b in [1] {\n}", "ArgumentCountMismatch");
}

#[test]
fn ranges() {
    assert_output("print(-1 -> 2)", &["-1, 0, 1, 2"]);
    assert_output("print(1 -> 5)", &["1, 2, 3, 4, 5"]);
    assert_output("print(2 -> 2)", &["2"]);
    assert_failure_kind("print(5 -> 1)", "General");
}

#[test]
fn arrays_and_indexing() {
    let src = r#"
let xs: array(number) = [3, 2, 1]
print(xs[0], xs[2])
let s: string = "hello"
print(s[1])
print(length(xs), length(s))
"#;
    assert_output(src, &["31", "e", "35"]);
    assert_failure_kind("let xs: array(number) = [1]\nprint(xs[1])", "IndexOutOfRange");
    assert_failure_kind("let xs: array(number) = [1]\nprint(xs[-1])", "IndexOutOfRange");
    assert_failure_kind("print([1, \"a\"])", "TypeMismatch");
}

#[test]
fn empty_arrays_need_a_declared_type() {
    assert_output("var xs: array(number) = []\nprint(length(xs))", &["0"]);
    assert_output("var xs: array(string) = [\"a\"]\nxs = []\nprint(length(xs))", &["0"]);
    assert_failure_kind("print([])", "TypeMismatch");
}

#[test]
fn append_and_index_assignment() {
    let src = r#"
var xs: array(number) = []
append(xs, 1)
append(xs, 2)
xs[0] = 5
print(xs)
"#;
    assert_output(src, &["5, 2"]);
    assert_failure_kind("var xs: array(number) = []\nappend(xs, \"a\")", "TypeMismatch");
    assert_failure_kind("let xs: array(number) = [1]\nappend(xs, 2)", "MutatedLet");
    assert_failure_kind("var xs: array(number) = [1]\nxs[0] = \"a\"", "TypeMismatch");
}

#[test]
fn round_rounds_half_away_from_zero() {
    assert_output("print(round(2.5), \" \", round(-2.5), \" \", round(2.4))", &["3 -3 2"]);
}

#[test]
fn user_defined_functions() {
    let src = r#"
fn add(a: number, b: number) => number {
    return a + b
}
fn greet(name: string) {
    print("hi ", name)
}
print(add(2, 3))
greet("ada")
"#;
    assert_output(src, &["5", "hi ada"]);
}

#[test]
fn recursion() {
    let src = r#"
fn fact(n: number) => number {
    if n <= 1 {
        return 1
    }
    return n * fact(n - 1)
}
print(fact(5))
"#;
    assert_output(src, &["120"]);
}

#[test]
fn functions_see_the_callers_scope() {
    let src = r#"
fn show() {
    print(secret)
}
fn outer() {
    let secret: string = "dynamic"
    show()
}
outer()
"#;
    assert_output(src, &["dynamic"]);
}

#[test]
fn function_calls_are_checked() {
    let add = "fn add(a: number, b: number) => number {\nreturn a + b\n}\n";
    assert_failure_kind(&format!("{add}print(add(1))"), "ArgumentCountMismatch");
    assert_failure_kind(&format!("{add}print(add(1, \"b\"))"), "TypeMismatch");
    assert_failure_kind("fn f() => number {\nreturn \"a\"\n}\nprint(f())", "TypeMismatch");
    assert_failure_kind("fn f() => number {\nprint(1)\n}\nf()", "General");
    assert_failure_kind("print(length(1, 2))", "ArgumentCountMismatch");
}

#[test]
fn return_outside_of_a_function_is_error() {
    assert_failure_kind("return 1", "General");
}

#[test]
fn structs_and_methods() {
    let src = r#"
struct Point {
    var x: number = 0
    var y: number = 0
    fn sum() => number {
        return x + y
    }
}
var p: Point = create Point(3, 4)
print(p.sum())
p.x = 10
print(p.x, " ", p.sum())
var origin: Point = create Point()
print(origin.x)
"#;
    assert_output(src, &["7", "10 14", "0"]);
}

#[test]
fn methods_write_through_self() {
    let src = r#"
struct Counter {
    var count: number = 0
    fn bump() {
        self.count = self.count + 1
    }
}
var c: Counter = create Counter()
c.bump()
c.bump()
print(c.count)
"#;
    assert_output(src, &["2"]);
}

#[test]
fn nested_fields_can_be_assigned() {
    let src = r#"
struct Inner {
    var value: number = 1
}
struct Outer {
    var inner: Inner = create Inner()
}
var o: Outer = create Outer()
o.inner.value = 5
print(o.inner.value)
"#;
    assert_output(src, &["5"]);
}

#[test]
fn struct_mutation_rules() {
    let point = "struct P {\nvar x: number = 0\nlet id: number = 1\n}\n";
    assert_failure_kind(&format!("{point}P.x = 5"), "MutatedNonBindable");
    assert_failure_kind(&format!("{point}var p: P = create P()\np.id = 2"), "MutatedLet");
    assert_failure_kind(&format!("{point}var p: P = create P()\np.x = \"a\""), "TypeMismatch");
    assert_failure_kind(&format!("{point}let p: P = create P()\np.x = 2"), "MutatedLet");
    assert_failure_kind(&format!("{point}var p: P = create P()\nprint(p.z)"), "NotDefined");
    assert_failure_kind(&format!("{point}var p: P = create P(1)"), "ArgumentCountMismatch");
}

#[test]
fn uninitialized_fields_must_be_assigned_before_use() {
    let point = "struct P {\nvar x: number\n}\nvar p: P = create P()\n";
    assert_failure_kind(&format!("{point}print(p.x)"), "UninitializedValue");
    assert_output(&format!("{point}p.x = 3\nprint(p.x)"), &["3"]);
}

#[test]
fn let_fields_cannot_be_written_through_self() {
    let src = r#"
struct Account {
    let id: number = 1
    fn reset() {
        self.id = 0
    }
}
var a: Account = create Account()
a.reset()
"#;
    assert_failure_kind(src, "MutatedLet");
}

#[test]
fn copies_add_delete_and_modify_fields() {
    let src = r#"
struct Animal {
    var name: string = "generic"
    var legs: number = 4
}
copy Bird from Animal
add {
    var wings: number = 2
}
delete [legs]
modify {
    var name: string = "bird"
}
var b: Bird = create Bird()
print(b.name, " ", b.wings)
"#;
    assert_output(src, &["bird 2"]);
    assert_failure_kind(&format!("{src}print(b.legs)"), "NotDefined");
    assert_failure_kind(&format!("{src}copy Robin from Bird"), "TypeMismatch");
}

#[test]
fn copy_of_a_missing_field_is_error() {
    let src = "struct A {\nvar x: number = 0\n}\ncopy B from A delete [y]";
    assert_failure_kind(src, "NotDefined");
}

#[test]
fn lexer_errors() {
    assert_failure_kind("print(\"abc", "UnterminatedString");
    assert_failure_kind("print(1 $ 2)", "UnexpectedCharacter");
}

#[test]
fn programs_that_need_input_fail_without_a_runner() {
    assert_failure_kind("let s: string = input(\"? \")", "General");
}
