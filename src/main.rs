fn main() {
    depstrap::run_cli();
}
