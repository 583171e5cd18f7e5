use anyhow::Result;

fn main() -> Result<()> {
    ensure_init_files::run_cli()
}
