fn main() -> anyhow::Result<()> {
    journal_map_lib::run()
}
