fn main() -> anyhow::Result<()> {
    mizkit::cli::run_cli()
}
