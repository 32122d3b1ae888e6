use anyhow::Result;

fn main() -> Result<()> {
    cpjudge::cli::run(cpjudge::cli::CliMode::Checker)
}
