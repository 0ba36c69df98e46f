fn main() {
    // Generates the expression parser from src/expr/expr.lalrpop
    lalrpop::process_root().unwrap();
}
