fn main() -> anyhow::Result<()> {
    quiz_author::cli::main()
}
