fn main() -> anyhow::Result<()> {
    kira_polyat::cli::run::entry()
}
