fn main() -> anyhow::Result<()> {
    reelfolio_lib::run()
}
